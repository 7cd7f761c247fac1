use chrono::NaiveDate;
use tracing::{debug, warn};
use crate::models::{Datasets, Figure, PlotRequest, PriceTable, Selection, Theme};
use crate::services::{composer_service, table_service};
use crate::utils::{ColorMap, ComposeError};

pub const APP_TITLE: &str = "Cryptocurrency Prices 2018-2022";
pub const CHART_TITLE: &str = "Cryptocurrency Prices 2018-2022";
pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Price (USD)";
pub const LEGEND_TITLE: &str = "Cryptocurrencies";
pub const DEFAULT_COINS: [&str; 3] = ["Bitcoin-BTC", "Etherium-ETH", "Litecoin-LTC"];

/// User-controlled chart inputs: selected coins and an inclusive date range
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFilter {
    pub coins: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ChartFilter {
    /// Default coins over the full date range of the table
    pub fn defaults_for(table: &PriceTable) -> Self {
        let (start, end) = table
            .date_bounds(table_service::DATE_COLUMN)
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));

        ChartFilter {
            coins: DEFAULT_COINS.iter().map(|c| c.to_string()).collect(),
            start,
            end,
        }
    }
}

/// Filter the table, compose the coin traces and apply the dashboard theme
pub fn update_chart(table: &PriceTable, filter: &ChartFilter, colors: &ColorMap) -> Result<Figure, ComposeError> {
    // only price columns are selectable as coins
    let coins = table.price_column_names();
    if let Some(unknown) = filter.coins.iter().find(|c| !coins.contains(&c.as_str())) {
        warn!("Rejected unknown coin '{}'", unknown);
        return Err(ComposeError::UnknownColumn { group: 0, column: unknown.clone() });
    }

    let filtered = table_service::filter_by_date_range(table, filter.start, filter.end);
    debug!(
        "Chart update: {} coin(s), {} to {}, {} row(s)",
        filter.coins.len(),
        filter.start,
        filter.end,
        filtered.row_count()
    );

    let dates = vec![table_service::DATE_COLUMN.to_string(); filter.coins.len()];
    let request = PlotRequest::new(
        Datasets::Single(&filtered),
        vec![Selection::Grouped(dates)],
        vec![Selection::Grouped(filter.coins.clone())],
    )
    .title(CHART_TITLE);

    let mut figure = composer_service::compose(&request, colors).map_err(|e| {
        warn!("Chart composition failed: {}", e);
        e
    })?;

    figure.apply_theme(Theme::dark());
    figure.set_axis_titles(X_AXIS_TITLE, Y_AXIS_TITLE);
    figure.layout.legend_title = Some(LEGEND_TITLE.to_string());

    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chart::{AxisType, Template};
    use crate::models::{Cell, Column};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn coin_table() -> PriceTable {
        PriceTable::new(vec![
            Column::dates("date", vec![day(1), day(2), day(3)]),
            Column::prices("Bitcoin-BTC", vec![Some(7000.0), Some(7100.0), Some(7200.0)]),
            Column::prices("Etherium-ETH", vec![Some(130.0), None, Some(140.0)]),
            Column::prices("Litecoin-LTC", vec![Some(40.0), Some(41.0), Some(42.0)]),
            Column::prices("Dogecoin-DOGE", vec![None, None, Some(0.002)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults_cover_full_range() {
        let filter = ChartFilter::defaults_for(&coin_table());
        assert_eq!(filter.start, day(1));
        assert_eq!(filter.end, day(3));
        assert_eq!(filter.coins, vec!["Bitcoin-BTC", "Etherium-ETH", "Litecoin-LTC"]);
    }

    #[test]
    fn test_update_chart_filters_and_themes() {
        let table = coin_table();
        let filter = ChartFilter {
            coins: vec!["Dogecoin-DOGE".to_string(), "Etherium-ETH".to_string()],
            start: day(2),
            end: day(3),
        };

        let figure = update_chart(&table, &filter, &ColorMap::coin_defaults()).unwrap();
        assert_eq!(figure.traces.len(), 2);
        assert_eq!(figure.traces[0].name, "Dogecoin-DOGE");
        assert_eq!(figure.traces[0].color, "orange");
        assert_eq!(figure.traces[1].y, vec![Cell::Missing, Cell::Number(140.0)]);
        assert_eq!(figure.layout.theme.template, Template::PlotlyDark);
        assert_eq!(figure.layout.x_title.as_deref(), Some(X_AXIS_TITLE));
        assert_eq!(figure.layout.y_title.as_deref(), Some(Y_AXIS_TITLE));
        assert_eq!(figure.layout.legend_title.as_deref(), Some(LEGEND_TITLE));
        assert_eq!(figure.layout.y_axis_type(), AxisType::Log);
    }

    #[test]
    fn test_update_chart_empty_range() {
        let table = coin_table();
        let filter = ChartFilter { coins: vec!["Bitcoin-BTC".to_string()], start: day(10), end: day(20) };

        let figure = update_chart(&table, &filter, &ColorMap::coin_defaults()).unwrap();
        assert_eq!(figure.traces.len(), 1);
        assert!(figure.traces[0].x.is_empty());
        assert!(figure.traces[0].y.is_empty());
    }

    #[test]
    fn test_update_chart_no_coins() {
        let table = coin_table();
        let filter = ChartFilter { coins: vec![], start: day(1), end: day(3) };

        let figure = update_chart(&table, &filter, &ColorMap::coin_defaults()).unwrap();
        assert!(figure.traces.is_empty());
    }

    #[test]
    fn test_update_chart_unknown_coin() {
        let table = coin_table();
        let filter = ChartFilter { coins: vec!["Nope-NOPE".to_string()], start: day(1), end: day(3) };

        let result = update_chart(&table, &filter, &ColorMap::coin_defaults());
        assert!(matches!(result, Err(ComposeError::UnknownColumn { .. })));
    }

    #[test]
    fn test_update_chart_rejects_date_column_as_coin() {
        let table = coin_table();
        let filter = ChartFilter {
            coins: vec!["Bitcoin-BTC".to_string(), "date".to_string()],
            start: day(1),
            end: day(3),
        };

        let result = update_chart(&table, &filter, &ColorMap::coin_defaults());
        assert_eq!(
            result.unwrap_err(),
            ComposeError::UnknownColumn { group: 0, column: "date".to_string() }
        );
    }
}
