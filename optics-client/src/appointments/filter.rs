//! Appointment filter and sort engine
//!
//! A record is shown when it matches the search text, the date range and
//! the status filter. Survivors are ordered today first, then tomorrow,
//! then everything else, each group chronologically.
//!
//! The date range compares the raw `appointment_datetime` strings, so
//! bounds must be zero-padded (`YYYY-MM-DD...`). A bound of `2024-01-04`
//! excludes `2024-01-04T10:00:00`, which sorts after it.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use shared::models::{AppointmentRecord, AppointmentStatus};
use std::cmp::Ordering;

/// Status criterion as chosen in the UI
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Is(AppointmentStatus),
    /// A value outside the enumeration; matches nothing
    Unrecognized(String),
}

impl StatusFilter {
    /// Parse the raw select value (`"all"`, `"pending"`, ...).
    ///
    /// Matching is exact: `"ALL"`, `""` or `" pending"` are unrecognized.
    pub fn parse(raw: &str) -> Self {
        if raw == "all" {
            return StatusFilter::All;
        }
        match AppointmentStatus::parse(raw) {
            Some(status) => StatusFilter::Is(status),
            None => StatusFilter::Unrecognized(raw.to_string()),
        }
    }

    pub fn matches(&self, status: Option<AppointmentStatus>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Is(wanted) => status == Some(*wanted),
            StatusFilter::Unrecognized(_) => false,
        }
    }
}

/// The four independent criteria of the appointment list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppointmentFilter {
    pub search: String,
    pub start_date: String,
    pub end_date: String,
    pub status: StatusFilter,
}

impl AppointmentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_date_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Case-insensitive substring match on `"{first} {last}"` or email
    pub fn matches_search(&self, record: &AppointmentRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record.full_name().to_lowercase().contains(&needle)
            || record
                .email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(&needle))
    }

    /// Inclusive lexical range; inactive unless both bounds are set
    pub fn matches_date_range(&self, record: &AppointmentRecord) -> bool {
        if self.start_date.is_empty() || self.end_date.is_empty() {
            return true;
        }
        let value = record.appointment_datetime.as_str();
        self.start_date.as_str() <= value && value <= self.end_date.as_str()
    }

    pub fn matches(&self, record: &AppointmentRecord) -> bool {
        self.matches_search(record)
            && self.matches_date_range(record)
            && self.status.matches(record.status)
    }
}

/// Parse a stored date-time into local wall-clock time.
///
/// Accepts RFC 3339 with an offset (converted to local time), naive
/// `YYYY-MM-DDTHH:MM[:SS[.frac]]` with `T` or a space, and a bare date
/// (local midnight).
pub fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    // Offset without the seconds field, e.g. 2024-06-10T08:00+05:30
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%#z") {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Priority tier relative to `today`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DayTier {
    Today,
    Tomorrow,
    Later,
}

impl DayTier {
    /// Calendar-day comparison, not a 24-hour window.
    pub fn of(parsed: Option<NaiveDateTime>, today: NaiveDate) -> Self {
        match parsed.map(|dt| dt.date()) {
            Some(date) if date == today => DayTier::Today,
            Some(date) if today.succ_opt() == Some(date) => DayTier::Tomorrow,
            _ => DayTier::Later,
        }
    }
}

struct SortKey<'a> {
    tier: DayTier,
    parsed: Option<NaiveDateTime>,
    record: &'a AppointmentRecord,
}

impl<'a> SortKey<'a> {
    fn new(record: &'a AppointmentRecord, today: NaiveDate) -> Self {
        let parsed = parse_local_datetime(&record.appointment_datetime);
        SortKey {
            tier: DayTier::of(parsed, today),
            parsed,
            record,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.tier
            .cmp(&other.tier)
            // unparseable dates last
            .then_with(|| match (self.parsed, other.parsed) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| self.record.id.cmp(&other.record.id))
            .then_with(|| {
                self.record
                    .appointment_datetime
                    .cmp(&other.record.appointment_datetime)
            })
    }
}

/// Ordering used by the appointment list
pub fn compare_appointments(
    a: &AppointmentRecord,
    b: &AppointmentRecord,
    today: NaiveDate,
) -> Ordering {
    SortKey::new(a, today).compare(&SortKey::new(b, today))
}

/// Filter then sort. The input is left untouched.
pub fn filter_and_sort<'a, I>(
    records: I,
    filter: &AppointmentFilter,
    today: NaiveDate,
) -> Vec<AppointmentRecord>
where
    I: IntoIterator<Item = &'a AppointmentRecord>,
{
    let mut keyed: Vec<SortKey<'a>> = records
        .into_iter()
        .filter(|record| filter.matches(record))
        .map(|record| SortKey::new(record, today))
        .collect();

    keyed.sort_by(|a, b| a.compare(b));
    keyed.into_iter().map(|key| key.record.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ids(records: &[AppointmentRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn jane(id: &str, email: &str) -> AppointmentRecord {
        AppointmentRecord::new(id, "2024-06-20T10:00:00")
            .with_name("Jane", "Doe")
            .with_email(email)
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let records = vec![
            AppointmentRecord::new("a", "2024-01-01T10:00:00"),
            AppointmentRecord::new("b", "garbage"),
            AppointmentRecord::new("c", ""),
        ];
        let out = filter_and_sort(&records, &AppointmentFilter::default(), date("2024-06-10"));
        let mut got = ids(&out);
        got.sort();
        assert_eq!(got, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_date_range_scenario() {
        let records = vec![
            AppointmentRecord::new("first", "2024-01-01"),
            AppointmentRecord::new("third", "2024-01-03"),
        ];
        let filter = AppointmentFilter::new().with_date_range("2024-01-02", "2024-01-04");
        let out = filter_and_sort(&records, &filter, date("2024-06-10"));
        assert_eq!(ids(&out), vec!["third"]);
    }

    #[test]
    fn test_date_range_needs_both_bounds() {
        let records = vec![AppointmentRecord::new("a", "2023-01-01")];
        let filter = AppointmentFilter::new().with_date_range("2024-01-02", "");
        assert_eq!(filter_and_sort(&records, &filter, date("2024-06-10")).len(), 1);
    }

    #[test]
    fn test_date_range_is_lexical() {
        let filter = AppointmentFilter::new().with_date_range("2024-01-02", "2024-01-04");
        assert!(filter.matches(&AppointmentRecord::new("a", "2024-01-02T00:00:00")));
        assert!(!filter.matches(&AppointmentRecord::new("b", "2024-01-04T10:00:00")));
        assert!(filter.matches(&AppointmentRecord::new("c", "2024-01-04")));
    }

    #[test]
    fn test_search_scenario() {
        let records = vec![jane("first", "a@x.com"), jane("second", "b@x.com")];

        let out = filter_and_sort(
            &records,
            &AppointmentFilter::new().with_search("jane"),
            date("2024-06-10"),
        );
        assert_eq!(ids(&out), vec!["first", "second"]);

        let out = filter_and_sort(
            &records,
            &AppointmentFilter::new().with_search("a@x"),
            date("2024-06-10"),
        );
        assert_eq!(ids(&out), vec!["first"]);
    }

    #[test]
    fn test_search_full_name_and_case() {
        let record = jane("a", "JD@Example.com");
        assert!(AppointmentFilter::new().with_search("JANE DOE").matches(&record));
        assert!(AppointmentFilter::new().with_search("e d").matches(&record));
        assert!(AppointmentFilter::new().with_search("example").matches(&record));
        assert!(!AppointmentFilter::new().with_search("smith").matches(&record));
    }

    #[test]
    fn test_search_with_missing_fields() {
        let record = AppointmentRecord::new("a", "2024-06-10T08:00:00");
        assert!(!AppointmentFilter::new().with_search("x").matches(&record));
        assert!(AppointmentFilter::new().matches(&record));
    }

    #[test]
    fn test_status_scenario() {
        let records = vec![
            AppointmentRecord::new("p", "2024-06-20").with_status(AppointmentStatus::Pending),
            AppointmentRecord::new("c", "2024-06-21").with_status(AppointmentStatus::Confirmed),
            AppointmentRecord::new("d", "2024-06-22").with_status(AppointmentStatus::Completed),
        ];
        let filter = AppointmentFilter::new().with_status(StatusFilter::parse("confirmed"));
        let out = filter_and_sort(&records, &filter, date("2024-06-10"));
        assert_eq!(ids(&out), vec!["c"]);
    }

    #[test]
    fn test_unrecognized_status_excludes_all() {
        let records = vec![
            AppointmentRecord::new("p", "2024-06-20").with_status(AppointmentStatus::Pending),
            AppointmentRecord::new("n", "2024-06-21"),
        ];
        let filter = AppointmentFilter::new().with_status(StatusFilter::parse("cancelled"));
        assert!(filter_and_sort(&records, &filter, date("2024-06-10")).is_empty());
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::parse("all"), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse("pending"),
            StatusFilter::Is(AppointmentStatus::Pending)
        );
        for raw in ["ALL", "", "Pending", " confirmed ", "later"] {
            assert_eq!(
                StatusFilter::parse(raw),
                StatusFilter::Unrecognized(raw.to_string())
            );
        }
    }

    #[test]
    fn test_near_miss_status_values_exclude_all() {
        let records = vec![
            AppointmentRecord::new("p", "2024-06-20").with_status(AppointmentStatus::Pending),
            AppointmentRecord::new("c", "2024-06-21").with_status(AppointmentStatus::Confirmed),
        ];
        for raw in ["Confirmed", " confirmed ", "", "ALL"] {
            let filter = AppointmentFilter::new().with_status(StatusFilter::parse(raw));
            let out = filter_and_sort(&records, &filter, date("2024-06-10"));
            assert!(out.is_empty(), "{:?} kept {:?}", raw, ids(&out));
        }
    }

    #[test]
    fn test_today_tomorrow_priority_scenario() {
        let records = vec![
            AppointmentRecord::new("past", "2024-06-05T08:00"),
            AppointmentRecord::new("tomorrow", "2024-06-11T08:00"),
            AppointmentRecord::new("today", "2024-06-10T08:00"),
        ];
        let out = filter_and_sort(&records, &AppointmentFilter::default(), date("2024-06-10"));
        assert_eq!(ids(&out), vec!["today", "tomorrow", "past"]);
    }

    #[test]
    fn test_today_beats_earlier_dates() {
        let records = vec![
            AppointmentRecord::new("old", "2020-01-01T00:00:00"),
            AppointmentRecord::new("today-late", "2024-06-10T23:59:00"),
            AppointmentRecord::new("today-early", "2024-06-10T00:01:00"),
            AppointmentRecord::new("future", "2030-01-01T00:00:00"),
        ];
        let out = filter_and_sort(&records, &AppointmentFilter::default(), date("2024-06-10"));
        assert_eq!(ids(&out), vec!["today-early", "today-late", "old", "future"]);
    }

    #[test]
    fn test_tomorrow_across_month_end() {
        let records = vec![
            AppointmentRecord::new("later", "2024-07-02T09:00:00"),
            AppointmentRecord::new("tomorrow", "2024-07-01T18:00:00"),
        ];
        let out = filter_and_sort(&records, &AppointmentFilter::default(), date("2024-06-30"));
        assert_eq!(ids(&out), vec!["tomorrow", "later"]);
    }

    #[test]
    fn test_unparseable_dates_last() {
        let records = vec![
            AppointmentRecord::new("bad", "not a date"),
            AppointmentRecord::new("empty", ""),
            AppointmentRecord::new("ok", "2025-01-01T09:00:00"),
            AppointmentRecord::new("today", "2024-06-10T09:00:00"),
        ];
        let out = filter_and_sort(&records, &AppointmentFilter::default(), date("2024-06-10"));
        assert_eq!(ids(&out), vec!["today", "ok", "bad", "empty"]);
    }

    #[test]
    fn test_ties_break_on_id() {
        let records = vec![
            AppointmentRecord::new("b", "2024-06-20T10:00:00"),
            AppointmentRecord::new("a", "2024-06-20T10:00"),
            AppointmentRecord::new("c", "2024-06-20 10:00:00"),
        ];
        let out = filter_and_sort(&records, &AppointmentFilter::default(), date("2024-06-10"));
        assert_eq!(ids(&out), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            AppointmentRecord::new("x", "2024-06-12T08:00:00").with_name("Ann", "Lee"),
            AppointmentRecord::new("y", "2024-06-10T12:00:00").with_name("Bob", "Ray"),
            AppointmentRecord::new("z", "oops").with_name("Ann", "Ray"),
            AppointmentRecord::new("w", "2024-06-11T07:00:00").with_name("Ann", "Kim"),
        ];
        let filter = AppointmentFilter::new().with_search("ann");
        let today = date("2024-06-10");
        let once = filter_and_sort(&records, &filter, today);
        let twice = filter_and_sort(&once, &filter, today);
        assert_eq!(once, twice);
        assert_eq!(ids(&once), vec!["w", "x", "z"]);
    }

    #[test]
    fn test_input_untouched() {
        let records = vec![
            AppointmentRecord::new("later", "2024-06-20T08:00:00"),
            AppointmentRecord::new("today", "2024-06-10T08:00:00"),
        ];
        let before = records.clone();
        let _ = filter_and_sort(&records, &AppointmentFilter::default(), date("2024-06-10"));
        assert_eq!(records, before);
    }

    #[test]
    fn test_compare_appointments_matches_sort() {
        let today = date("2024-06-10");
        let a = AppointmentRecord::new("a", "2024-06-11T08:00:00");
        let b = AppointmentRecord::new("b", "2024-06-01T08:00:00");
        assert_eq!(compare_appointments(&a, &b, today), Ordering::Less);
        assert_eq!(compare_appointments(&b, &a, today), Ordering::Greater);
        assert_eq!(compare_appointments(&a, &a, today), Ordering::Equal);
    }

    #[test]
    fn test_parse_local_datetime_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(parse_local_datetime("2024-06-10T08:00"), Some(expected));
        assert_eq!(parse_local_datetime("2024-06-10T08:00:00"), Some(expected));
        assert_eq!(parse_local_datetime("2024-06-10 08:00:00"), Some(expected));
        assert_eq!(parse_local_datetime("2024-06-10T08:00:00.000"), Some(expected));
        assert_eq!(
            parse_local_datetime("2024-06-10"),
            Some(expected.date().and_time(NaiveTime::MIN))
        );
        assert!(parse_local_datetime("2024-06-10T08:00:00+00:00").is_some());
        assert!(parse_local_datetime("2024-13-40").is_none());
        assert!(parse_local_datetime("tomorrow").is_none());
        assert!(parse_local_datetime("").is_none());
    }
}
