//! CSV file data adapter. One `<SYMBOL>.csv` per symbol under a base directory.

use crate::domain::error::QuantError;
use crate::domain::price_bar::PriceBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, QuantError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| QuantError::DataSource {
            reason: format!("missing {} column", name),
        })
}

/// Accepts `YYYY-MM-DD` with an optional trailing time component.
fn parse_date(raw: &str) -> Result<NaiveDate, QuantError> {
    let raw = raw.trim();
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| QuantError::DataSource {
        reason: format!("invalid date '{}': {}", raw, e),
    })
}

/// An empty cell is a missing observation and reads as NaN.
fn parse_close(raw: &str) -> Result<f64, QuantError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse().map_err(|e| QuantError::DataSource {
        reason: format!("invalid close value '{}': {}", raw, e),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PriceBar>, QuantError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => QuantError::NoData {
                symbol: symbol.to_string(),
            },
            _ => QuantError::DataSource {
                reason: format!("failed to read {}: {}", path.display(), e),
            },
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| QuantError::DataSource {
            reason: format!("CSV header error in {}: {}", path.display(), e),
        })?;
        let date_col = column_index(headers, "date")?;
        let close_col = column_index(headers, "close")?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| QuantError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date = parse_date(record.get(date_col).unwrap_or(""))?;
            if start_date.is_some_and(|start| date < start)
                || end_date.is_some_and(|end| date > end)
            {
                continue;
            }

            let close = parse_close(record.get(close_col).unwrap_or(""))?;
            bars.push(PriceBar::new(date, close));
        }

        bars.sort_by_key(|b| b.date);
        debug!(symbol, bars = bars.len(), path = %path.display(), "loaded csv bars");
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, QuantError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| QuantError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                symbols.push(stem.to_string_lossy().into_owned());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
