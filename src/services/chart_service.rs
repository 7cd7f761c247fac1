use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use tracing::debug;
use crate::models::{Cell, Figure, Trace};
use crate::utils::{parse_css_color, ChartError};

const LINE_WIDTH: u32 = 2;
const FALLBACK_COLOR: RGBColor = RGBColor(128, 128, 128);

/// A run of consecutive drawable points of one trace
type Segment = Vec<(f64, f64)>;

/// Map an x cell onto the numeric axis (dates become day numbers)
fn x_position(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Date(date) => Some(date.num_days_from_ce() as f64),
        Cell::Number(value) => Some(*value),
        Cell::Missing => None,
    }
}

/// Only strictly positive prices can be drawn on a log axis
fn y_position(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(value) if *value > 0.0 && value.is_finite() => Some(*value),
        _ => None,
    }
}

/// Split a trace into line segments, breaking at every undrawable point
fn trace_segments(trace: &Trace) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = Segment::new();

    for (x, y) in trace.x.iter().zip(&trace.y) {
        match (x_position(x), y_position(y)) {
            (Some(x), Some(y)) => current.push((x, y)),
            _ => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

fn bounds<I: Iterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn x_range(segments: &[Vec<Segment>]) -> (f64, f64) {
    let points = segments.iter().flatten().flatten();
    match bounds(points.map(|p| p.0)) {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((lo, _)) => (lo - 1.0, lo + 1.0),
        None => (0.0, 1.0),
    }
}

fn y_range(segments: &[Vec<Segment>]) -> (f64, f64) {
    let points = segments.iter().flatten().flatten();
    match bounds(points.map(|p| p.1)) {
        // pad by a constant factor, which is an even margin on a log axis
        Some((lo, hi)) if hi > lo => (lo / 1.25, hi * 1.25),
        Some((lo, _)) => (lo / 2.0, lo * 2.0),
        None => (1.0, 10.0),
    }
}

// marker sizes are diameters in pixels
fn marker_radius(size: f64) -> u32 {
    (size / 2.0).max(1.0).round() as u32
}

fn format_x(value: f64, dates: bool) -> String {
    if !dates {
        return format_number(value);
    }
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn format_number(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("{:.0}", value)
    } else if value.abs() >= 1.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.4}", value)
    }
}

/// Render a figure as an SVG document
pub fn render_svg(figure: &Figure, width: u32, height: u32) -> Result<String, ChartError> {
    let layout = &figure.layout;
    let theme = &layout.theme;
    let paper = parse_css_color(&theme.paper_color).unwrap_or(WHITE);
    let plot = parse_css_color(&theme.plot_color).unwrap_or(paper);
    let grid = parse_css_color(&theme.grid_color).unwrap_or(FALLBACK_COLOR);
    let font_color = parse_css_color(&theme.font.color).unwrap_or(BLACK);
    // only the first family is passed to the backend
    let family = theme.font.family.split(',').next().unwrap_or("sans-serif").trim().to_string();
    let text = (family.as_str(), theme.font.size).into_font().color(&font_color);
    let caption = (family.as_str(), theme.font.size * 1.5).into_font().color(&font_color);

    let segments: Vec<Vec<Segment>> = figure.traces.iter().map(trace_segments).collect();
    let (x_min, x_max) = x_range(&segments);
    let (y_min, y_max) = y_range(&segments);
    let dates = figure.has_date_axis();

    let mut svg = String::new();
    {
        let backend = SVGBackend::with_string(&mut svg, (width, height));
        let root = backend.into_drawing_area();
        root.fill(&paper)
            .map_err(|e| ChartError::Draw(format!("Failed to fill canvas: {}", e)))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(layout.title.as_deref().unwrap_or(""), caption)
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(x_min..x_max, (y_min..y_max).log_scale())
            .map_err(|e| ChartError::Draw(format!("Failed to build chart: {}", e)))?;

        chart.plotting_area().fill(&plot)
            .map_err(|e| ChartError::Draw(format!("Failed to fill plot area: {}", e)))?;

        let x_formatter = |v: &f64| format_x(*v, dates);
        let y_formatter = |v: &f64| format_number(*v);
        chart
            .configure_mesh()
            .x_desc(layout.x_title.as_deref().unwrap_or(""))
            .y_desc(layout.y_title.as_deref().unwrap_or(""))
            .x_labels(8)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .label_style(text.clone())
            .axis_desc_style(text.clone())
            .axis_style(&grid)
            .bold_line_style(&grid)
            .light_line_style(&grid.mix(0.4))
            .draw()
            .map_err(|e| ChartError::Draw(format!("Failed to draw mesh: {}", e)))?;

        if let Some(title) = &layout.legend_title {
            chart
                .draw_series(LineSeries::new(Vec::<(f64, f64)>::new(), &font_color))
                .map_err(|e| ChartError::Draw(format!("Failed to draw legend title: {}", e)))?
                .label(title.as_str())
                .legend(|(x, y)| PathElement::new(vec![(x, y)], &TRANSPARENT));
        }

        for (trace, runs) in figure.traces.iter().zip(&segments) {
            let color = parse_css_color(&trace.color).unwrap_or(FALLBACK_COLOR);
            let style = color.stroke_width(LINE_WIDTH);

            // empty series carries the legend entry even when nothing is drawable
            chart
                .draw_series(LineSeries::new(Vec::<(f64, f64)>::new(), style))
                .map_err(|e| ChartError::Draw(format!("Failed to draw legend entry: {}", e)))?
                .label(trace.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));

            for run in runs {
                chart
                    .draw_series(LineSeries::new(run.iter().copied(), style))
                    .map_err(|e| ChartError::Draw(format!("Failed to draw line: {}", e)))?;

                if let Some(size) = trace.marker_size {
                    let radius = marker_radius(size);
                    chart
                        .draw_series(run.iter().map(|p| Circle::new(*p, radius, color.filled())))
                        .map_err(|e| ChartError::Draw(format!("Failed to draw point: {}", e)))?;
                }
            }
        }

        if layout.legend_title.is_some() || !figure.traces.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(&paper.mix(0.8))
                .border_style(&font_color)
                .label_font(text.clone())
                .draw()
                .map_err(|e| ChartError::Draw(format!("Failed to draw legend: {}", e)))?;
        }

        root.present()
            .map_err(|e| ChartError::Draw(format!("Failed to render chart: {}", e)))?;
    }

    debug!("Rendered {} trace(s) into {} bytes of SVG", figure.traces.len(), svg.len());
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Layout, Theme};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn trace(name: &str, y: Vec<Cell>) -> Trace {
        let x = (1..=y.len() as u32).map(|d| Cell::Date(day(d))).collect();
        Trace { name: name.to_string(), x, y, color: "orchid".to_string(), marker_size: None }
    }

    #[test]
    fn test_segments_break_at_missing_and_non_positive() {
        let t = trace(
            "A",
            vec![Cell::Number(1.0), Cell::Missing, Cell::Number(2.0), Cell::Number(3.0), Cell::Number(0.0)],
        );
        let segments = trace_segments(&t);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 1);
        assert_eq!(segments[1].len(), 2);
    }

    #[test]
    fn test_ranges_for_empty_figure() {
        assert_eq!(x_range(&[]), (0.0, 1.0));
        assert_eq!(y_range(&[]), (1.0, 10.0));
    }

    #[test]
    fn test_single_point_ranges_are_widened() {
        let segments = vec![vec![vec![(5.0, 4.0)]]];
        assert_eq!(x_range(&segments), (4.0, 6.0));
        assert_eq!(y_range(&segments), (2.0, 8.0));
    }

    #[test]
    fn test_marker_radius_is_half_the_size() {
        assert_eq!(marker_radius(10.0), 5);
        assert_eq!(marker_radius(7.0), 4);
        assert_eq!(marker_radius(0.5), 1);
    }

    #[test]
    fn test_format_x_dates() {
        let value = day(15).num_days_from_ce() as f64;
        assert_eq!(format_x(value, true), "2020-01-15");
        assert_eq!(format_x(12.5, false), "12.50");
    }

    #[test]
    fn test_render_svg_with_traces() {
        let mut figure = Figure::new(Layout::new(Some("Prices".to_string()), None, None));
        figure.apply_theme(Theme::dark());
        figure.layout.legend_title = Some("Cryptocurrencies".to_string());
        figure.traces.push(trace("Bitcoin-BTC", vec![Cell::Number(100.0), Cell::Missing, Cell::Number(300.0)]));
        let mut marked = trace("Etherium-ETH", vec![Cell::Number(10.0), Cell::Number(20.0)]);
        marked.marker_size = Some(4.0);
        figure.traces.push(marked);

        let svg = render_svg(&figure, 800, 600).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Bitcoin-BTC"));
        assert!(svg.contains("Etherium-ETH"));
        assert!(svg.contains("Cryptocurrencies"));
    }

    #[test]
    fn test_render_svg_empty_figure() {
        let mut figure = Figure::new(Layout::new(None, None, None));
        figure.traces.push(trace("Zeta-ZZZ", vec![]));

        let svg = render_svg(&figure, 640, 480).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Zeta-ZZZ"));
    }
}
