//! Date-indexed time series and inner-join alignment.
//!
//! A `TimeSeries` is strictly increasing by date with no duplicate dates.
//! `align` inner-joins two series on date in a single merge pass.

use chrono::NaiveDate;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeSeries<T> {
    points: Vec<(NaiveDate, T)>,
}

impl<T> TimeSeries<T> {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Builds a series from points in any order. Points are sorted by date;
    /// when a date repeats, the last point supplied for it wins.
    pub fn from_points(mut points: Vec<(NaiveDate, T)>) -> Self {
        points.sort_by_key(|(date, _)| *date);

        let mut deduped: Vec<(NaiveDate, T)> = Vec::with_capacity(points.len());
        for (date, value) in points {
            match deduped.last_mut() {
                Some(last) if last.0 == date => last.1 = value,
                _ => deduped.push((date, value)),
            }
        }

        Self { points: deduped }
    }

    /// Builds a series from points the caller guarantees are strictly
    /// increasing by date.
    pub fn from_sorted(points: Vec<(NaiveDate, T)>) -> Self {
        debug_assert!(
            points.windows(2).all(|w| w[0].0 < w[1].0),
            "points must be strictly increasing by date"
        );
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[(NaiveDate, T)] {
        &self.points
    }

    pub fn first(&self) -> Option<&(NaiveDate, T)> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&(NaiveDate, T)> {
        self.points.last()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|(date, _)| *date)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.points.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (NaiveDate, T)> {
        self.points.iter()
    }
}

impl<T> Default for TimeSeries<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(NaiveDate, T)> for TimeSeries<T> {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, T)>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a TimeSeries<T> {
    type Item = &'a (NaiveDate, T);
    type IntoIter = std::slice::Iter<'a, (NaiveDate, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Two series inner-joined on date. All three vectors have the same length
/// and `dates` is strictly increasing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignedPair {
    pub dates: Vec<NaiveDate>,
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Inner-joins `left` and `right` on date. Dates present in only one series
/// are dropped, as are dates where either value is NaN.
pub fn align(left: &TimeSeries<f64>, right: &TimeSeries<f64>) -> AlignedPair {
    let capacity = left.len().min(right.len());
    let mut aligned = AlignedPair {
        dates: Vec::with_capacity(capacity),
        left: Vec::with_capacity(capacity),
        right: Vec::with_capacity(capacity),
    };

    let (a, b) = (left.points(), right.points());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let (date_a, value_a) = a[i];
        let (date_b, value_b) = b[j];

        match date_a.cmp(&date_b) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                if !value_a.is_nan() && !value_b.is_nan() {
                    aligned.dates.push(date_a);
                    aligned.left.push(value_a);
                    aligned.right.push(value_b);
                }
                i += 1;
                j += 1;
            }
        }
    }

    aligned
}

/// Divides `numerator` by `denominator` on their common dates. Dates where
/// the quotient is not finite (for instance a zero denominator) are dropped.
pub fn ratio_of(numerator: &TimeSeries<f64>, denominator: &TimeSeries<f64>) -> TimeSeries<f64> {
    let aligned = align(numerator, denominator);

    let points = aligned
        .dates
        .iter()
        .zip(aligned.left.iter().zip(aligned.right.iter()))
        .filter_map(|(&date, (&num, &den))| {
            let ratio = num / den;
            ratio.is_finite().then_some((date, ratio))
        })
        .collect();

    TimeSeries::from_sorted(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn series(points: &[(u32, f64)]) -> TimeSeries<f64> {
        TimeSeries::from_points(points.iter().map(|&(day, v)| (d(day), v)).collect())
    }

    #[test]
    fn from_points_sorts_by_date() {
        let s = series(&[(3, 3.0), (1, 1.0), (2, 2.0)]);
        let dates: Vec<_> = s.dates().collect();
        assert_eq!(dates, vec![d(1), d(2), d(3)]);
        let values: Vec<_> = s.values().copied().collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn from_points_last_duplicate_wins() {
        let s = series(&[(1, 1.0), (2, 2.0), (1, 9.0)]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.first(), Some(&(d(1), 9.0)));
    }

    #[test]
    fn empty_series() {
        let s: TimeSeries<f64> = TimeSeries::new();
        assert!(s.is_empty());
        assert!(s.last().is_none());
    }

    #[test]
    fn collect_into_series() {
        let s: TimeSeries<f64> = vec![(d(2), 2.0), (d(1), 1.0)].into_iter().collect();
        assert_eq!(s.first(), Some(&(d(1), 1.0)));
    }

    #[test]
    fn align_keeps_only_common_dates() {
        let a = series(&[(1, 1.0), (2, 2.0), (4, 4.0), (5, 5.0)]);
        let b = series(&[(2, 20.0), (3, 30.0), (5, 50.0), (6, 60.0)]);

        let aligned = align(&a, &b);

        assert_eq!(aligned.dates, vec![d(2), d(5)]);
        assert_eq!(aligned.left, vec![2.0, 5.0]);
        assert_eq!(aligned.right, vec![20.0, 50.0]);
    }

    #[test]
    fn align_drops_nan_on_either_side() {
        let a = series(&[(1, 1.0), (2, f64::NAN), (3, 3.0)]);
        let b = series(&[(1, 10.0), (2, 20.0), (3, f64::NAN)]);

        let aligned = align(&a, &b);

        assert_eq!(aligned.dates, vec![d(1)]);
    }

    #[test]
    fn align_disjoint_is_empty() {
        let a = series(&[(1, 1.0), (3, 3.0)]);
        let b = series(&[(2, 2.0), (4, 4.0)]);
        assert!(align(&a, &b).is_empty());
    }

    #[test]
    fn align_with_empty_side() {
        let a = series(&[(1, 1.0)]);
        let b = TimeSeries::new();
        assert!(align(&a, &b).is_empty());
        assert!(align(&b, &a).is_empty());
    }

    #[test]
    fn align_is_symmetric() {
        let a = series(&[(1, 1.0), (2, 2.0), (4, 4.0)]);
        let b = series(&[(2, 20.0), (4, 40.0), (7, 70.0)]);

        let ab = align(&a, &b);
        let ba = align(&b, &a);
        assert_eq!(ab.dates, ba.dates);
        assert_eq!(ab.left, ba.right);
        assert_eq!(ab.right, ba.left);
    }

    #[test]
    fn ratio_divides_common_dates() {
        let gold = series(&[(1, 2000.0), (2, 2100.0), (3, 2050.0)]);
        let silver = series(&[(1, 25.0), (3, 20.5)]);

        let ratio = ratio_of(&gold, &silver);

        assert_eq!(ratio.len(), 2);
        assert_eq!(ratio.points()[0], (d(1), 80.0));
        assert_eq!(ratio.points()[1], (d(3), 100.0));
    }

    #[test]
    fn ratio_drops_zero_denominator() {
        let gold = series(&[(1, 2000.0), (2, 2100.0)]);
        let silver = series(&[(1, 0.0), (2, 30.0)]);

        let ratio = ratio_of(&gold, &silver);

        assert_eq!(ratio.len(), 1);
        assert_eq!(ratio.points()[0], (d(2), 70.0));
    }
}
