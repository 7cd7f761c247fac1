pub mod dashboard;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// Assemble the dashboard router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(dashboard::routes())
}
