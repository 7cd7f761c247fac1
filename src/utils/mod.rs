pub mod errors;
pub mod colors;
pub mod page;

pub use errors::{ChartError, ComposeError, DashboardError, TableError};
pub use colors::{parse_css_color, ColorMap};
pub use page::{escape_html, Page};
