//! Chart figure models

use serde::Serialize;
use crate::models::Cell;

/// One line on the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub x: Vec<Cell>,
    pub y: Vec<Cell>,
    pub color: String,
    /// `None` leaves marker sizing to the renderer
    pub marker_size: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    Plotly,
    PlotlyDark,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub color: String,
}

/// Visual theme applied on top of a composed figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub template: Template,
    pub paper_color: String,
    pub plot_color: String,
    pub grid_color: String,
    pub font: Font,
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            template: Template::Plotly,
            paper_color: "#ffffff".to_string(),
            plot_color: "#e5ecf6".to_string(),
            grid_color: "#ffffff".to_string(),
            font: Font {
                family: "sans-serif".to_string(),
                size: 12.0,
                color: "#2a3f5f".to_string(),
            },
        }
    }

    /// Dark dashboard theme with white Verdana text
    pub fn dark() -> Self {
        Theme {
            template: Template::PlotlyDark,
            paper_color: "#111111".to_string(),
            plot_color: "#111111".to_string(),
            grid_color: "#283442".to_string(),
            font: Font {
                family: "Verdana, sans-serif".to_string(),
                size: 14.0,
                color: "white".to_string(),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Option<String>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub legend_title: Option<String>,
    pub theme: Theme,
    y_axis_type: AxisType,
}

impl Layout {
    pub fn new(title: Option<String>, x_title: Option<String>, y_title: Option<String>) -> Self {
        Layout {
            title,
            x_title,
            y_title,
            legend_title: None,
            theme: Theme::default(),
            y_axis_type: AxisType::Log,
        }
    }

    pub fn y_axis_type(&self) -> AxisType {
        self.y_axis_type
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(layout: Layout) -> Self {
        Figure { traces: Vec::new(), layout }
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        self.layout.theme = theme;
    }

    pub fn set_axis_titles(&mut self, x_title: &str, y_title: &str) {
        self.layout.x_title = Some(x_title.to_string());
        self.layout.y_title = Some(y_title.to_string());
    }

    /// True when the x-values of the figure are dates
    pub fn has_date_axis(&self) -> bool {
        self.traces
            .iter()
            .flat_map(|t| t.x.iter())
            .find(|c| !matches!(c, Cell::Missing))
            .map(|c| matches!(c, Cell::Date(_)))
            .unwrap_or(false)
    }
}
