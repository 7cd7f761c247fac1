use std::path::Path;
use chrono::NaiveDate;
use tracing::{debug, info};
use crate::models::{Column, PriceTable};
use crate::utils::TableError;

pub const DATE_COLUMN: &str = "date";

/// Display names given to the numeric columns of the price file, in file order
pub const COIN_COLUMNS: [&str; 7] = [
    "Solana-SOL",
    "Litecoin-LTC",
    "Etherium-ETH",
    "Dogecoin-DOGE",
    "Bitcoin-BTC",
    "Binancecoin-BNB",
    "Cardano-ADA",
];

/// Load the price file into an immutable table.
///
/// The first column holds `YYYY-MM-DD` dates and the remaining columns are
/// renamed positionally to `coin_names`, whatever their header says. Zero or
/// empty prices become missing values.
pub fn load_price_table<P: AsRef<Path>>(path: P, coin_names: &[&str]) -> Result<PriceTable, TableError> {
    let path = path.as_ref();
    debug!("Reading price file {}", path.display());

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let expected = coin_names.len() + 1;
    let found = reader.headers()?.len();
    if found != expected {
        return Err(TableError::ColumnCount { expected, found });
    }

    let mut dates = Vec::new();
    let mut prices: Vec<Vec<Option<f64>>> = vec![Vec::new(); coin_names.len()];

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != expected {
            return Err(TableError::ColumnCount { expected, found: record.len() });
        }

        let raw_date = record.get(0).unwrap_or("");
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| TableError::InvalidDate {
            line,
            value: raw_date.to_string(),
        })?;
        dates.push(date);

        for (i, name) in coin_names.iter().enumerate() {
            let raw = record.get(i + 1).unwrap_or("");
            prices[i].push(parse_price(raw, line, name)?);
        }
    }

    let mut columns = Vec::with_capacity(expected);
    columns.push(Column::dates(DATE_COLUMN, dates));
    for (name, values) in coin_names.iter().zip(prices) {
        columns.push(Column::prices(name, values));
    }

    let table = PriceTable::new(columns)?;
    info!("Loaded {} rows x {} coins from {}", table.row_count(), coin_names.len(), path.display());
    Ok(table)
}

/// Parse one price cell, treating zero and empty cells as missing
pub fn parse_price(raw: &str, line: u64, column: &str) -> Result<Option<f64>, TableError> {
    if raw.is_empty() {
        return Ok(None);
    }

    let value: f64 = raw.parse().map_err(|_| TableError::InvalidNumber {
        line,
        column: column.to_string(),
        value: raw.to_string(),
    })?;

    if value == 0.0 || value.is_nan() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

/// Keep the rows whose date lies in `start..=end`.
///
/// An inverted range yields an empty table rather than an error.
pub fn filter_by_date_range(table: &PriceTable, start: NaiveDate, end: NaiveDate) -> PriceTable {
    match table.dates(DATE_COLUMN) {
        Some(dates) => table.retain_rows(|i| dates[i] >= start && dates[i] <= end),
        None => table.retain_rows(|_| false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use crate::models::table::ColumnData;
    use crate::models::Cell;

    fn write_csv(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("prices.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    #[test]
    fn test_load_renames_and_normalizes_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "date,a,b\n2020-01-01,10,0\n2020-01-02,20,5\n2020-01-03,,7.5\n");

        let table = load_price_table(&path, &["A", "B"]).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.price_column_names(), vec!["A", "B"]);
        assert_eq!(table.dates(DATE_COLUMN).unwrap()[1], day(2));
        assert_eq!(
            table.column("B").unwrap().data,
            ColumnData::Prices(vec![None, Some(5.0), Some(7.5)])
        );
        assert_eq!(table.column("A").unwrap().data.cells()[2], Cell::Missing);
    }

    #[test]
    fn test_load_default_coin_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "date,sol,ltc,eth,doge,btc,bnb,ada\n2021-05-01,40,250,2900,0.4,57000,600,1.3\n",
        );

        let table = load_price_table(&path, &COIN_COLUMNS).unwrap();
        assert_eq!(table.price_column_names(), COIN_COLUMNS.to_vec());
        assert_eq!(
            table.column("Bitcoin-BTC").unwrap().data,
            ColumnData::Prices(vec![Some(57000.0)])
        );
    }

    #[test]
    fn test_load_rejects_wrong_column_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "date,a\n2020-01-01,10\n");

        let result = load_price_table(&path, &["A", "B"]);
        assert!(matches!(result, Err(TableError::ColumnCount { expected: 3, found: 2 })));
    }

    #[test]
    fn test_load_rejects_bad_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "date,a\n01/02/2020,10\n");

        let result = load_price_table(&path, &["A"]);
        assert!(matches!(result, Err(TableError::InvalidDate { .. })));
    }

    #[test]
    fn test_load_rejects_bad_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "date,a\n2020-01-01,ten\n");

        let result = load_price_table(&path, &["A"]);
        assert!(matches!(result, Err(TableError::InvalidNumber { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_price_table("/nonexistent/prices.csv", &["A"]);
        assert!(matches!(result, Err(TableError::Csv(_))));
    }

    #[test]
    fn test_filter_is_inclusive() {
        let table = PriceTable::new(vec![
            Column::dates(DATE_COLUMN, vec![day(1), day(2), day(3), day(4)]),
            Column::prices("A", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
        ])
        .unwrap();

        let filtered = filter_by_date_range(&table, day(2), day(3));
        assert_eq!(filtered.dates(DATE_COLUMN).unwrap(), &[day(2), day(3)]);
        assert_eq!(
            filtered.column("A").unwrap().data,
            ColumnData::Prices(vec![Some(2.0), Some(3.0)])
        );
    }

    #[test]
    fn test_filter_empty_range() {
        let table = PriceTable::new(vec![
            Column::dates(DATE_COLUMN, vec![day(1), day(2)]),
            Column::prices("A", vec![Some(1.0), Some(2.0)]),
        ])
        .unwrap();

        let filtered = filter_by_date_range(&table, day(3), day(1));
        assert_eq!(filtered.row_count(), 0);
        assert_eq!(filtered.price_column_names(), vec!["A"]);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("0", 1, "A").unwrap(), None);
        assert_eq!(parse_price("0.0", 1, "A").unwrap(), None);
        assert_eq!(parse_price("", 1, "A").unwrap(), None);
        assert_eq!(parse_price("NaN", 1, "A").unwrap(), None);
        assert_eq!(parse_price("nan", 1, "A").unwrap(), None);
        assert_eq!(parse_price("1.5", 1, "A").unwrap(), Some(1.5));
    }
}
