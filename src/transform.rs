use crate::error::DataError;
use crate::models::{Category, DeltaPoint, DeltaSeries, RawSeries};

/// Turn the cumulative timeline of `category` into day-over-day deltas.
///
/// Iteration follows the `cases` dates, which drive the x axis for every
/// category. The first day only seeds the running value, so the result is
/// one point shorter than the source (empty for zero or one day).
///
/// ### Errors
/// - [`DataError::MissingValue`] if `category` has no count for a `cases` date
/// - [`DataError::Overflow`] if a difference does not fit in `i64`
///
/// ### Example
/// ```
/// # use covid_trend::models::{Category, RawSeries};
/// # use covid_trend::transform::delta_series;
/// let raw: RawSeries = serde_json::from_str(
///     r#"{"cases":{"1/1/21":100,"1/2/21":150,"1/3/21":170}}"#,
/// )?;
/// let deltas = delta_series(&raw, Category::Confirmed)?;
/// assert_eq!(deltas.iter().map(|p| p.value).collect::<Vec<_>>(), vec![50, 20]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn delta_series(raw: &RawSeries, category: Category) -> Result<DeltaSeries, DataError> {
    let values = raw.timeline(category);
    let mut out = Vec::with_capacity(raw.cases.len().saturating_sub(1));
    let mut previous: Option<i64> = None;

    for date in raw.cases.keys().copied() {
        let current = *values
            .get(&date)
            .ok_or(DataError::MissingValue { category, date })?;
        if let Some(prev) = previous {
            let value = current
                .checked_sub(prev)
                .ok_or(DataError::Overflow { category, date })?;
            out.push(DeltaPoint { date, value });
        }
        previous = Some(current);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, m, day).unwrap()
    }

    fn raw(cases: &[(u32, i64)], deaths: &[(u32, i64)]) -> RawSeries {
        RawSeries {
            cases: cases.iter().map(|(day, v)| (d(1, *day), *v)).collect(),
            recovered: Default::default(),
            deaths: deaths.iter().map(|(day, v)| (d(1, *day), *v)).collect(),
        }
    }

    #[test]
    fn three_days_give_two_deltas() {
        let r = raw(&[(1, 100), (2, 150), (3, 170)], &[]);
        let got = delta_series(&r, Category::Confirmed).unwrap();
        assert_eq!(
            got,
            vec![
                DeltaPoint { date: d(1, 2), value: 50 },
                DeltaPoint { date: d(1, 3), value: 20 },
            ]
        );
    }

    #[test]
    fn empty_and_single_day_give_nothing() {
        assert!(delta_series(&RawSeries::default(), Category::Deaths).unwrap().is_empty());
        let one = raw(&[(1, 10)], &[(1, 1)]);
        assert!(delta_series(&one, Category::Deaths).unwrap().is_empty());
    }

    #[test]
    fn other_category_follows_cases_dates() {
        let r = raw(&[(1, 100), (2, 150), (3, 170)], &[(1, 5), (2, 9), (3, 8)]);
        let got = delta_series(&r, Category::Deaths).unwrap();
        let values: Vec<i64> = got.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![4, -1]);
        assert_eq!(got.len(), r.cases.len() - 1);
    }

    #[test]
    fn missing_value_is_reported() {
        let r = raw(&[(1, 100), (2, 150)], &[(1, 5)]);
        let err = delta_series(&r, Category::Deaths).unwrap_err();
        assert_eq!(
            err,
            DataError::MissingValue {
                category: Category::Deaths,
                date: d(1, 2)
            }
        );
    }

    #[test]
    fn overflow_is_reported() {
        let r = raw(&[(1, i64::MIN), (2, i64::MAX)], &[]);
        assert!(matches!(
            delta_series(&r, Category::Confirmed),
            Err(DataError::Overflow { .. })
        ));
    }
}
