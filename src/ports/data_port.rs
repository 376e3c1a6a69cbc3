//! Data access port trait.

use crate::domain::error::QuantError;
use crate::domain::price_bar::PriceBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Close prices for `symbol`, sorted by date, optionally bounded by an
    /// inclusive date range.
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PriceBar>, QuantError>;

    fn list_symbols(&self) -> Result<Vec<String>, QuantError>;

    /// First date, last date and bar count, or `None` when the symbol has no bars.
    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, QuantError> {
        let bars = self.fetch_bars(symbol, None, None)?;
        Ok(match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        })
    }
}
