use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::models::PriceTable;
use crate::utils::ColorMap;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
///
/// The table is loaded once at startup and never mutated afterwards.
pub struct AppState {
    pub config: DashboardConfig,
    pub table: PriceTable,
    pub colors: ColorMap,
}

impl AppState {
    pub fn new(config: DashboardConfig, table: PriceTable, colors: ColorMap) -> Arc<Self> {
        Arc::new(Self { config, table, colors })
    }
}
