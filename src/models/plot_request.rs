//! Plot request models: what to draw from which tables

use crate::models::PriceTable;

/// One value or a group of values taken from the same dataset
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    Single(T),
    Grouped(Vec<T>),
}

impl<T> Selection<T> {
    pub fn len(&self) -> usize {
        match self {
            Selection::Single(_) => 1,
            Selection::Grouped(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for Selection<String> {
    fn from(column: &str) -> Self {
        Selection::Single(column.to_string())
    }
}

impl From<Vec<&str>> for Selection<String> {
    fn from(columns: Vec<&str>) -> Self {
        Selection::Grouped(columns.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Selection<String> {
    fn from(columns: Vec<String>) -> Self {
        Selection::Grouped(columns)
    }
}

/// Marker sizes for the traces of a request
#[derive(Debug, Clone, PartialEq)]
pub enum SizeSpec {
    /// Applied to the first trace of every group
    Each(f64),
    /// Entry `i` belongs to dataset group `i`
    PerGroup(Vec<Selection<f64>>),
}

impl SizeSpec {
    /// Marker size of trace `j` within group `group`
    pub fn size_for(&self, group: usize, j: usize) -> Option<f64> {
        let entry = match self {
            SizeSpec::Each(size) => return (j == 0).then_some(*size),
            SizeSpec::PerGroup(entries) => entries.get(group)?,
        };

        match entry {
            Selection::Single(size) => (j == 0).then_some(*size),
            Selection::Grouped(sizes) => sizes.get(j).copied(),
        }
    }
}

/// The tables a request draws from
#[derive(Debug, Clone)]
pub enum Datasets<'a> {
    Single(&'a PriceTable),
    Many(Vec<&'a PriceTable>),
}

impl<'a> Datasets<'a> {
    pub fn len(&self) -> usize {
        match self {
            Datasets::Single(_) => 1,
            Datasets::Many(tables) => tables.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, group: usize) -> Option<&'a PriceTable> {
        match self {
            Datasets::Single(table) => (group == 0).then_some(*table),
            Datasets::Many(tables) => tables.get(group).copied(),
        }
    }
}

/// Everything the composer needs to build a figure
#[derive(Debug, Clone)]
pub struct PlotRequest<'a> {
    pub datasets: Datasets<'a>,
    pub x: Vec<Selection<String>>,
    pub y: Vec<Selection<String>>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub title: Option<String>,
    pub size: Option<SizeSpec>,
}

impl<'a> PlotRequest<'a> {
    pub fn new(datasets: Datasets<'a>, x: Vec<Selection<String>>, y: Vec<Selection<String>>) -> Self {
        PlotRequest {
            datasets,
            x,
            y,
            x_title: None,
            y_title: None,
            title: None,
            size: None,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn axis_titles(mut self, x_title: &str, y_title: &str) -> Self {
        self.x_title = Some(x_title.to_string());
        self.y_title = Some(y_title.to_string());
        self
    }

    pub fn size(mut self, size: SizeSpec) -> Self {
        self.size = Some(size);
        self
    }
}
