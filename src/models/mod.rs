//! Data models for the dashboard
//!
//! Tables are loaded once and shared read-only. Plot requests and figures are
//! built fresh for every chart update.

pub mod table;
pub mod plot_request;
pub mod chart;

pub use table::{Cell, Column, PriceTable};
pub use plot_request::{Datasets, PlotRequest, Selection, SizeSpec};
pub use chart::{Figure, Layout, Theme, Trace};
