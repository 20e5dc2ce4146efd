//! Daily grouping view
//!
//! Selects the sibling records that fall on the same calendar day as the
//! draft, so they can be shown next to the form before a possibly
//! conflicting record is committed. Days are compared in a configurable
//! time zone (the process local zone by default), never as full timestamps.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use parking_lot::Mutex;
use puris_model::Record;
use std::sync::Arc;

/// Calendar day of `instant` in `tz`
#[inline]
#[must_use]
pub fn calendar_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Records whose primary date falls on the same day as `reference`
///
/// `reference` defaults to `now` when the draft has no date yet. Records
/// without a primary date never match. Original order is preserved.
#[must_use]
pub fn same_day<T, Tz>(
    records: &[T],
    reference: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<T>
where
    T: Record,
    Tz: TimeZone,
{
    let day = calendar_day(reference.unwrap_or(now), tz);
    records
        .iter()
        .filter(|r| r.primary_date().is_some_and(|d| calendar_day(d, tz) == day))
        .cloned()
        .collect()
}

#[derive(Debug)]
struct Memo<T> {
    collection: Arc<[T]>,
    reference: Option<DateTime<Utc>>,
    day: NaiveDate,
    result: Arc<[T]>,
}

/// Memoized same-day view
///
/// Recomputes only when the collection (by identity), the reference date
/// or the calendar day it resolves to changes. An undated draft resolves
/// to today, so its siblings move on at midnight.
#[derive(Debug)]
pub struct DailyGroupingView<T, Tz: TimeZone = Local> {
    tz: Tz,
    memo: Mutex<Option<Memo<T>>>,
    computations: Mutex<usize>,
}

impl<T: Record> DailyGroupingView<T, Local> {
    /// View comparing days in the process local zone
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::in_zone(Local)
    }
}

impl<T: Record> Default for DailyGroupingView<T, Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record, Tz: TimeZone> DailyGroupingView<T, Tz> {
    /// View comparing days in `tz`
    #[inline]
    #[must_use]
    pub fn in_zone(tz: Tz) -> Self {
        Self {
            tz,
            memo: Mutex::new(None),
            computations: Mutex::new(0),
        }
    }

    /// Same-day siblings of a draft dated `reference`
    pub fn siblings(&self, collection: &Arc<[T]>, reference: Option<DateTime<Utc>>) -> Arc<[T]> {
        self.siblings_at(collection, reference, Utc::now())
    }

    /// Same-day siblings with `now` standing in for a missing reference
    pub fn siblings_at(
        &self,
        collection: &Arc<[T]>,
        reference: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Arc<[T]> {
        let day = calendar_day(reference.unwrap_or(now), &self.tz);
        let mut memo = self.memo.lock();
        if let Some(m) = memo.as_ref() {
            if Arc::ptr_eq(&m.collection, collection) && m.reference == reference && m.day == day {
                return Arc::clone(&m.result);
            }
        }

        let result: Arc<[T]> = same_day(collection, reference, now, &self.tz).into();
        tracing::debug!(
            kind = %T::KIND,
            total = collection.len(),
            same_day = result.len(),
            "daily grouping recomputed"
        );
        *self.computations.lock() += 1;
        *memo = Some(Memo {
            collection: Arc::clone(collection),
            reference,
            day,
            result: Arc::clone(&result),
        });
        result
    }

    /// Number of times the view was recomputed
    #[must_use]
    pub fn computations(&self) -> usize {
        *self.computations.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};
    use proptest::prelude::*;
    use puris_model::Production;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    fn completing(instant: Option<DateTime<Utc>>) -> Production {
        Production {
            estimated_time_of_completion: instant,
            ..Production::default()
        }
    }

    #[test]
    fn undated_records_never_match() {
        let records = vec![completing(None), completing(Some(at(5, 9)))];
        let grouped = same_day(&records, Some(at(5, 12)), at(1, 0), &Utc);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].estimated_time_of_completion, Some(at(5, 9)));
    }

    #[test]
    fn missing_reference_uses_now() {
        let now = at(6, 10);
        let records = vec![completing(Some(at(5, 23))), completing(Some(at(6, 1)))];
        let grouped = same_day(&records, None, now, &Utc);
        assert_eq!(grouped, vec![completing(Some(at(6, 1)))]);
    }

    #[test]
    fn day_boundary_follows_time_zone() {
        // 23:30 UTC on the 5th is already the 6th at UTC+2
        let late = Utc.with_ymd_and_hms(2024, 1, 5, 23, 30, 0).unwrap();
        let records = vec![completing(Some(late))];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(same_day(&records, Some(at(6, 8)), at(1, 0), &plus_two).len(), 1);
        assert!(same_day(&records, Some(at(6, 8)), at(1, 0), &Utc).is_empty());
    }

    #[test]
    fn memo_reused_until_inputs_change() {
        let view = DailyGroupingView::in_zone(Utc);
        let collection: Arc<[Production]> =
            vec![completing(Some(at(5, 8))), completing(Some(at(6, 8)))].into();

        let first = view.siblings(&collection, Some(at(5, 12)));
        let second = view.siblings(&collection, Some(at(5, 12)));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(view.computations(), 1);

        view.siblings(&collection, Some(at(5, 12) + Duration::hours(1)));
        assert_eq!(view.computations(), 2);

        let refreshed: Arc<[Production]> = collection.to_vec().into();
        view.siblings(&refreshed, Some(at(5, 12) + Duration::hours(1)));
        assert_eq!(view.computations(), 3);
    }

    #[test]
    fn undated_draft_follows_the_clock() {
        let view = DailyGroupingView::in_zone(Utc);
        let collection: Arc<[Production]> =
            vec![completing(Some(at(5, 8))), completing(Some(at(6, 8)))].into();

        let today = view.siblings_at(&collection, None, at(5, 10));
        assert_eq!(today.to_vec(), vec![completing(Some(at(5, 8)))]);
        view.siblings_at(&collection, None, at(5, 22));
        assert_eq!(view.computations(), 1);

        let tomorrow = view.siblings_at(&collection, None, at(6, 1));
        assert_eq!(tomorrow.to_vec(), vec![completing(Some(at(6, 8)))]);
        assert_eq!(view.computations(), 2);
    }

    proptest! {
        #[test]
        fn same_day_is_an_ordered_subsequence(
            hours in prop::collection::vec(prop::option::of(0i64..24 * 10), 0..24),
            reference in 0i64..24 * 10,
        ) {
            let base = at(1, 0);
            let records: Vec<Production> = hours
                .iter()
                .map(|h| completing(h.map(|h| base + Duration::hours(h))))
                .collect();
            let reference = base + Duration::hours(reference);
            let day = calendar_day(reference, &Utc);

            let grouped = same_day(&records, Some(reference), base, &Utc);

            for r in &grouped {
                let d = r.estimated_time_of_completion.unwrap();
                prop_assert_eq!(calendar_day(d, &Utc), day);
            }
            let expected: Vec<Production> = records
                .iter()
                .filter(|r| {
                    r.estimated_time_of_completion
                        .is_some_and(|d| calendar_day(d, &Utc) == day)
                })
                .cloned()
                .collect();
            prop_assert_eq!(grouped, expected);
        }
    }
}
