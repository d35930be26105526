/// Reporting window selection and date-range filtering
///
/// The weekly report covers `today - 7 days` through `today`, inclusive of
/// both endpoints. That is 8 distinct calendar dates, not 7; downstream
/// per-week denominators deliberately stay at 7 regardless (see stats).

use chrono::{Duration, NaiveDate};

/// A contiguous, inclusive range of calendar dates ending "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportingWindow {
    /// Build the reporting window ending at the given date
    ///
    /// "today" is always an explicit parameter; the engine never reads the
    /// clock itself.
    pub fn ending_at(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(7),
            end: today,
        }
    }

    /// First date in the window
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date in the window (the report's "today")
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether a date falls inside the window, endpoints included
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// All dates in the window, ascending (always 8 entries)
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..=7).map(|offset| self.start + Duration::days(offset)).collect()
    }

    /// Restrict a record collection to the window
    ///
    /// Returns references in their original order; `date_of` extracts the
    /// calendar date from a record.
    pub fn filter<'a, T>(
        &self,
        records: &'a [T],
        date_of: impl Fn(&T) -> NaiveDate,
    ) -> Vec<&'a T> {
        records.iter().filter(|r| self.contains(date_of(r))).collect()
    }
}
