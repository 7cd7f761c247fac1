use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors raised while loading or assembling a price table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read price file: {0}")]
    Csv(#[from] csv::Error),
    #[error("Expected {expected} columns (date + coins), found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("Invalid date '{value}' on line {line}, expected YYYY-MM-DD")]
    InvalidDate { line: u64, value: String },
    #[error("Invalid price '{value}' for {column} on line {line}")]
    InvalidNumber { line: u64, column: String, value: String },
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    RaggedColumn { column: String, expected: usize, found: usize },
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),
}

/// Shape violations detected by the chart composer
#[derive(Debug, Error, PartialEq)]
pub enum ComposeError {
    #[error("x and y columns passed must match the number of datasets passed ({datasets}), got {x} x and {y} y; use grouped selections for multiple columns from the same dataset")]
    SelectorCountMismatch { datasets: usize, x: usize, y: usize },
    #[error("Passed more sizes ({sizes}) than datasets ({datasets})")]
    TooManySizes { sizes: usize, datasets: usize },
    #[error("Group {group} pairs {x} x columns with {y} y columns")]
    PairingMismatch { group: usize, x: usize, y: usize },
    #[error("Column '{column}' not found in dataset {group}")]
    UnknownColumn { group: usize, column: String },
}

/// Failures while drawing a figure
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("{0}")]
    Draw(String),
}

/// Error type returned by the dashboard HTTP handlers
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("bad_request: {0}")]
    BadRequest(String),
    #[error("internal_error: {0}")]
    Internal(String),
}

impl From<ComposeError> for DashboardError {
    fn from(e: ComposeError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<ChartError> for DashboardError {
    fn from(e: ChartError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_error_maps_to_bad_request() {
        let err: DashboardError = ComposeError::TooManySizes { sizes: 3, datasets: 1 }.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_chart_error_maps_to_internal() {
        let err: DashboardError = ChartError::Draw("boom".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_selector_mismatch_message() {
        let err = ComposeError::SelectorCountMismatch { datasets: 2, x: 1, y: 2 };
        assert!(err.to_string().contains("must match the number of datasets"));
    }
}
