//! In-memory price table models

use std::collections::HashSet;
use chrono::NaiveDate;
use serde::Serialize;
use crate::utils::TableError;

/// A single value as it appears on a chart axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Date(NaiveDate),
    Number(f64),
    Missing,
}

/// Values of one column, all of a single semantic type
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Dates(Vec<NaiveDate>),
    /// `None` marks a missing price
    Prices(Vec<Option<f64>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Dates(values) => values.len(),
            ColumnData::Prices(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cells(&self) -> Vec<Cell> {
        match self {
            ColumnData::Dates(values) => values.iter().map(|d| Cell::Date(*d)).collect(),
            ColumnData::Prices(values) => values
                .iter()
                .map(|p| p.map(Cell::Number).unwrap_or(Cell::Missing))
                .collect(),
        }
    }

    fn take_rows(&self, rows: &[usize]) -> ColumnData {
        match self {
            ColumnData::Dates(values) => ColumnData::Dates(rows.iter().map(|&i| values[i]).collect()),
            ColumnData::Prices(values) => ColumnData::Prices(rows.iter().map(|&i| values[i]).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn dates(name: &str, values: Vec<NaiveDate>) -> Self {
        Column { name: name.to_string(), data: ColumnData::Dates(values) }
    }

    pub fn prices(name: &str, values: Vec<Option<f64>>) -> Self {
        Column { name: name.to_string(), data: ColumnData::Prices(values) }
    }
}

/// Ordered collection of equally long, uniquely named columns
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    columns: Vec<Column>,
}

impl PriceTable {
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let expected = columns.first().map(|c| c.data.len()).unwrap_or(0);
        let mut seen = HashSet::new();

        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn(column.name.clone()));
            }
            if column.data.len() != expected {
                return Err(TableError::RaggedColumn {
                    column: column.name.clone(),
                    expected,
                    found: column.data.len(),
                });
            }
        }

        Ok(PriceTable { columns })
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.data.len()).unwrap_or(0)
    }

    /// Names of the numeric columns, in table order
    pub fn price_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| matches!(c.data, ColumnData::Prices(_)))
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn dates(&self, name: &str) -> Option<&[NaiveDate]> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Dates(values)) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Earliest and latest date of a date column
    pub fn date_bounds(&self, name: &str) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.dates(name)?;
        let min = dates.iter().min()?;
        let max = dates.iter().max()?;
        Some((*min, *max))
    }

    /// Build a new table keeping only the rows for which `keep` returns true
    pub fn retain_rows<F>(&self, keep: F) -> PriceTable
    where
        F: Fn(usize) -> bool,
    {
        let rows: Vec<usize> = (0..self.row_count()).filter(|&i| keep(i)).collect();
        PriceTable {
            columns: self
                .columns
                .iter()
                .map(|c| Column { name: c.name.clone(), data: c.data.take_rows(&rows) })
                .collect(),
        }
    }
}
