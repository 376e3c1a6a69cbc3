//! Trade performance statistics.
//!
//! Returns are carried as fractions on [`Trade`] and reported here as
//! percentages rounded to two decimals.

use super::backtest::Trade;

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TradeMetrics {
    pub total_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    pub win_rate: f64,
    pub avg_return: f64,
    pub max_return: f64,
    pub min_return: f64,
}

impl TradeMetrics {
    /// Aggregates realized trades. With no trades every field is zero.
    /// A return of exactly zero counts as breakeven, not a win.
    pub fn compute(trades: &[Trade]) -> Self {
        if trades.is_empty() {
            return Self::default();
        }

        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut trades_breakeven = 0usize;
        let mut total_return = 0.0_f64;
        let mut max_return = f64::NEG_INFINITY;
        let mut min_return = f64::INFINITY;

        for trade in trades {
            let ret = trade.realized_return;
            if ret > 0.0 {
                trades_won += 1;
            } else if ret < 0.0 {
                trades_lost += 1;
            } else {
                trades_breakeven += 1;
            }
            total_return += ret;
            max_return = max_return.max(ret);
            min_return = min_return.min(ret);
        }

        let total_trades = trades.len();
        let win_rate = trades_won as f64 / total_trades as f64;
        let avg_return = total_return / total_trades as f64;

        TradeMetrics {
            total_trades,
            trades_won,
            trades_lost,
            trades_breakeven,
            win_rate: as_percent(win_rate),
            avg_return: as_percent(avg_return),
            max_return: as_percent(max_return),
            min_return: as_percent(min_return),
        }
    }
}

/// Fraction to percentage, rounded half-to-even to two decimals.
pub fn as_percent(fraction: f64) -> f64 {
    round2(fraction * 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trade(entry: f64, exit: f64) -> Trade {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Trade::new(date, date, entry, exit)
    }

    #[test]
    fn no_trades_is_all_zero() {
        let m = TradeMetrics::compute(&[]);
        assert_eq!(m, TradeMetrics::default());
        assert_eq!(m.win_rate, 0.0);
        assert_eq!(m.total_trades, 0);
    }

    #[test]
    fn mixed_trades() {
        let trades = vec![trade(100.0, 110.0), trade(100.0, 95.0), trade(100.0, 100.0)];
        let m = TradeMetrics::compute(&trades);

        assert_eq!(m.total_trades, 3);
        assert_eq!(m.trades_won, 1);
        assert_eq!(m.trades_lost, 1);
        assert_eq!(m.trades_breakeven, 1);
        assert_eq!(m.win_rate, 33.33);
        assert_eq!(m.avg_return, 1.67);
        assert_eq!(m.max_return, 10.0);
        assert_eq!(m.min_return, -5.0);
    }

    #[test]
    fn zero_return_is_not_a_win() {
        let m = TradeMetrics::compute(&[trade(50.0, 50.0)]);
        assert_eq!(m.win_rate, 0.0);
        assert_eq!(m.total_trades, 1);
        assert_eq!(m.trades_breakeven, 1);
    }

    #[test]
    fn all_losses() {
        let trades = vec![trade(100.0, 90.0), trade(100.0, 80.0)];
        let m = TradeMetrics::compute(&trades);
        assert_eq!(m.win_rate, 0.0);
        assert_eq!(m.avg_return, -15.0);
        assert_eq!(m.max_return, -10.0);
        assert_eq!(m.min_return, -20.0);
    }

    #[test]
    fn round2_behaviour() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(-1.236), -1.24);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn as_percent_scales_and_rounds() {
        assert_eq!(as_percent(0.123_456), 12.35);
        assert_eq!(as_percent(-0.05), -5.0);
    }
}
