use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::models::{Figure, PriceTable};
use crate::services::dashboard_service::{self, ChartFilter};
use crate::services::{chart_service, table_service};
use crate::state::AppState;
use crate::utils::{escape_html, DashboardError, Page};

const PAGE_STYLE: &str = "\
body { margin: 0; background: #111111; color: white; font-family: Verdana, sans-serif; }
#header-area { background-color: black; padding: 16px 24px; }
#header-area h1, #header-area p { color: white; margin: 4px 0; }
#menu-area { display: flex; gap: 48px; padding: 16px 24px; background: #1e1e1e; }
.menu-title { font-weight: bold; margin-bottom: 6px; }
.dropdown { min-width: 260px; min-height: 140px; }
#graph-container { padding: 16px 24px; }
#graph-container svg { max-width: 100%; height: auto; }";

// ── Query params ─────────────────────────────────────────────────────────

/// Raw chart inputs as sent by the page form.
///
/// `coin` may repeat. `submitted` marks a form post, so an empty coin list
/// is kept empty instead of falling back to the defaults.
#[derive(Debug, Default, PartialEq)]
pub struct ChartQuery {
    coins: Vec<String>,
    submitted: bool,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl ChartQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = ChartQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "coin" => {
                    query.submitted = true;
                    query.coins.push(value);
                }
                "submitted" => query.submitted = true,
                "start_date" => query.start_date = Some(value).filter(|v| !v.trim().is_empty()),
                "end_date" => query.end_date = Some(value).filter(|v| !v.trim().is_empty()),
                _ => {}
            }
        }
        query
    }

    /// Resolve against the table defaults
    pub fn into_filter(self, table: &PriceTable) -> Result<ChartFilter, DashboardError> {
        let defaults = ChartFilter::defaults_for(table);
        Ok(ChartFilter {
            coins: if self.submitted { self.coins } else { defaults.coins },
            start: parse_date(self.start_date.as_deref(), defaults.start)?,
            end: parse_date(self.end_date.as_deref(), defaults.end)?,
        })
    }
}

fn parse_date(value: Option<&str>, default: NaiveDate) -> Result<NaiveDate, DashboardError> {
    let Some(raw) = value else {
        return Ok(default);
    };
    // date pickers may send a full timestamp; only the date part matters
    let date_part = raw.trim().get(..10).unwrap_or(raw.trim());
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| DashboardError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/chart.svg", get(chart_svg))
        .route("/api/figure", get(figure_json))
        .route("/health", get(health))
}

fn build_figure(state: &AppState, pairs: Vec<(String, String)>) -> Result<(ChartFilter, Figure), DashboardError> {
    let filter = ChartQuery::from_pairs(pairs).into_filter(&state.table)?;
    let figure = dashboard_service::update_chart(&state.table, &filter, &state.colors)?;
    Ok((filter, figure))
}

fn render(state: &AppState, figure: &Figure) -> Result<String, DashboardError> {
    chart_service::render_svg(figure, state.config.chart_width, state.config.chart_height).map_err(|e| {
        error!("Chart rendering failed: {}", e);
        DashboardError::from(e)
    })
}

// ── Handlers ─────────────────────────────────────────────────────────────

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, DashboardError> {
    let (filter, figure) = build_figure(&state, pairs)?;
    let svg = render(&state, &figure)?;
    info!("📈 Rendered dashboard for {} coin(s), {} to {}", filter.coins.len(), filter.start, filter.end);

    let page = Page::new(dashboard_service::APP_TITLE)
        .style(PAGE_STYLE)
        .section(header_html())
        .section(menu_html(&state.table, &filter))
        .section(format!("<div id=\"graph-container\">\n{}\n</div>", svg));

    Ok(Html(page.render()))
}

pub async fn chart_svg(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, DashboardError> {
    let (_, figure) = build_figure(&state, pairs)?;
    let svg = render(&state, &figure)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

pub async fn figure_json(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Figure>, DashboardError> {
    let (_, figure) = build_figure(&state, pairs)?;
    Ok(Json(figure))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// ── Layout ───────────────────────────────────────────────────────────────

fn header_html() -> String {
    "<div id=\"header-area\">\n\
     <h1 id=\"header-title\">Cryptocurrency Prices from 2018-2022</h1>\n\
     <p id=\"header-description\">Cost of various crypto coins from 2018-22</p>\n\
     </div>"
        .to_string()
}

fn menu_html(table: &PriceTable, filter: &ChartFilter) -> String {
    let options: String = table
        .price_column_names()
        .into_iter()
        .map(|coin| {
            let selected = if filter.coins.iter().any(|c| c == coin) { " selected" } else { "" };
            let coin = escape_html(coin);
            format!("<option value=\"{coin}\"{selected}>{coin}</option>\n")
        })
        .collect();

    let (min, max) = table
        .date_bounds(table_service::DATE_COLUMN)
        .unwrap_or((filter.start, filter.end));

    format!(
        "<form id=\"menu-area\" method=\"get\" action=\"/\">\n\
         <input type=\"hidden\" name=\"submitted\" value=\"1\">\n\
         <div>\n<div class=\"menu-title\">Cryptocurrencies</div>\n\
         <select id=\"crypto-filter\" class=\"dropdown\" name=\"coin\" multiple onchange=\"this.form.submit()\">\n\
         {options}</select>\n</div>\n\
         <div>\n<div class=\"menu-title\">Date Range</div>\n\
         <input id=\"start-date\" type=\"date\" name=\"start_date\" min=\"{min}\" max=\"{max}\" value=\"{start}\" onchange=\"this.form.submit()\">\n\
         <input id=\"end-date\" type=\"date\" name=\"end_date\" min=\"{min}\" max=\"{max}\" value=\"{end}\" onchange=\"this.form.submit()\">\n\
         </div>\n</form>",
        options = options,
        min = min,
        max = max,
        start = filter.start,
        end = filter.end,
    )
}
