//! Best-effort date parsing with an ordered pattern list
//!
//! Sort columns flagged as dates go through [`parse`]. A value that matches
//! none of the recognized patterns is not an error: it comes back as fallback
//! text, a warning is emitted, and the row compares lexicographically on that
//! value instead.

use crate::diag::DiagnosticSink;
use chrono::NaiveDate;

/// Outcome of a best-effort date parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedDate {
    /// The value matched a recognized pattern
    Date(NaiveDate),
    /// No pattern matched; the trimmed original text stands in
    Fallback(String),
}

/// One recognized shape of date input
///
/// Separated patterns name the position of the year segment so it can be
/// width checked before the chrono parse; chrono's `%Y` alone accepts years
/// shorter than four digits.
enum Pattern {
    /// Complete date with the year leading, e.g. "%Y-%m-%d"
    YearFirst(&'static str, char),
    /// Complete date with the year trailing, e.g. "%d-%m-%Y"
    YearLast(&'static str, char),
    /// Bare year, day and month default to 1
    Year,
    /// "YYYY-MM", day defaults to 1
    YearMonth,
    /// "MM-YYYY", day defaults to 1
    MonthYear,
}

/// Recognized patterns in attempt order; the order settles ambiguous input
/// (e.g. "04/05/2019" parses day-first, "2019.04.01" only matches year-first)
const PATTERNS: &[Pattern] = &[
    Pattern::YearFirst("%Y-%m-%d", '-'),
    Pattern::YearFirst("%Y/%m/%d", '/'),
    Pattern::YearLast("%d-%m-%Y", '-'),
    Pattern::YearLast("%d/%m/%Y", '/'),
    Pattern::Year,
    Pattern::YearMonth,
    Pattern::MonthYear,
    Pattern::YearLast("%m/%d/%Y", '/'),
    Pattern::YearLast("%d.%m.%Y", '.'),
    Pattern::YearFirst("%Y.%m.%d", '.'),
];

impl Pattern {
    fn apply(&self, s: &str) -> Option<NaiveDate> {
        match self {
            Pattern::YearFirst(fmt, separator) => {
                parse_year(s.split(*separator).next()?)?;
                NaiveDate::parse_from_str(s, fmt).ok()
            }
            Pattern::YearLast(fmt, separator) => {
                parse_year(s.rsplit(*separator).next()?)?;
                NaiveDate::parse_from_str(s, fmt).ok()
            }
            Pattern::Year => NaiveDate::from_ymd_opt(parse_year(s)?, 1, 1),
            Pattern::YearMonth => {
                let (year, month) = s.split_once('-')?;
                NaiveDate::from_ymd_opt(parse_year(year)?, parse_month(month)?, 1)
            }
            Pattern::MonthYear => {
                let (month, year) = s.split_once('-')?;
                NaiveDate::from_ymd_opt(parse_year(year)?, parse_month(month)?, 1)
            }
        }
    }
}

/// Exactly four ASCII digits, year 1 or later ("0019" passes, "19" does not)
fn parse_year(s: &str) -> Option<i32> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = s.parse::<i32>().ok()?;
    (year >= 1).then_some(year)
}

/// 1 to 2 digits in 1..=12
fn parse_month(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = s.parse::<u32>().ok()?;
    (1..=12).contains(&month).then_some(month)
}

/// Try all recognized patterns in order; first success wins
pub fn try_parse(trimmed: &str) -> Option<NaiveDate> {
    PATTERNS.iter().find_map(|pattern| pattern.apply(trimmed))
}

/// Parse a raw cell value, degrading to the trimmed original on failure
///
/// Empty input comes back unchanged and without a diagnostic. A failed parse
/// is reported to the sink at warning severity and never aborts the run.
pub fn parse(raw: &str, sink: &dyn DiagnosticSink) -> ParsedDate {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedDate::Fallback(raw.to_string());
    }
    match try_parse(trimmed) {
        Some(date) => ParsedDate::Date(date),
        None => {
            sink.warn(&format!("could not parse date: '{trimmed}'"));
            ParsedDate::Fallback(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::{MemorySink, NullSink};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("Invalid test date")
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(try_parse("2019-04-01"), Some(date(2019, 4, 1)));
        assert_eq!(try_parse("2019/04/01"), Some(date(2019, 4, 1)));
    }

    #[test]
    fn test_day_first_formats() {
        assert_eq!(try_parse("15-04-2019"), Some(date(2019, 4, 15)));
        assert_eq!(try_parse("15/04/2019"), Some(date(2019, 4, 15)));
        assert_eq!(try_parse("01.04.2019"), Some(date(2019, 4, 1)));
    }

    #[test]
    fn test_day_first_wins_on_ambiguous_input() {
        // Both d/m/Y and m/d/Y could match; d/m/Y comes first in the list
        assert_eq!(try_parse("04/05/2019"), Some(date(2019, 5, 4)));
        // Day slot exceeds 12, so only month-day-year can apply
        assert_eq!(try_parse("04/15/2019"), Some(date(2019, 4, 15)));
    }

    #[test]
    fn test_dotted_year_first() {
        assert_eq!(try_parse("2019.04.01"), Some(date(2019, 4, 1)));
    }

    #[test]
    fn test_year_only() {
        assert_eq!(try_parse("2019"), Some(date(2019, 1, 1)));
        assert_eq!(try_parse("0019"), Some(date(19, 1, 1)));
        assert_eq!(try_parse("19"), None);
        assert_eq!(try_parse("0000"), None);
        assert_eq!(try_parse("12345"), None);
    }

    #[test]
    fn test_year_month_and_month_year() {
        assert_eq!(try_parse("2019-04"), Some(date(2019, 4, 1)));
        assert_eq!(try_parse("04-2019"), Some(date(2019, 4, 1)));
        assert_eq!(try_parse("13-2019"), None);
        assert_eq!(try_parse("19-04"), None);
        assert_eq!(try_parse("04-19"), None);
    }

    #[test]
    fn test_short_years_read_as_text() {
        // The four-digit year rule applies in every pattern, including the
        // chrono-parsed ones where %Y alone would take fewer digits
        assert_eq!(try_parse("19"), None);
        assert_eq!(try_parse("500"), None);
        assert_eq!(try_parse("19-04-01"), None);
        assert_eq!(try_parse("19/04/01"), None);
        assert_eq!(try_parse("19.04.01"), None);

        let sink = MemorySink::new();
        assert_eq!(parse("500", &sink), ParsedDate::Fallback("500".to_string()));
        assert_eq!(sink.warnings().len(), 1);
    }

    #[test]
    fn test_invalid_calendar_dates_rejected() {
        assert_eq!(try_parse("2019-02-30"), None);
        assert_eq!(try_parse("2019-13-01"), None);
    }

    #[test]
    fn test_unparseable_falls_back_with_warning() {
        let sink = MemorySink::new();
        let parsed = parse("not-a-date", &sink);
        assert_eq!(parsed, ParsedDate::Fallback("not-a-date".to_string()));

        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("not-a-date"));
    }

    #[test]
    fn test_fallback_is_trimmed() {
        let parsed = parse("  junk  ", &NullSink);
        assert_eq!(parsed, ParsedDate::Fallback("junk".to_string()));
    }

    #[test]
    fn test_empty_returned_unchanged_without_warning() {
        let sink = MemorySink::new();
        assert_eq!(parse("   ", &sink), ParsedDate::Fallback("   ".to_string()));
        assert_eq!(parse("", &sink), ParsedDate::Fallback(String::new()));
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        let parsed = parse(" 2020-01-15 ", &NullSink);
        assert_eq!(parsed, ParsedDate::Date(date(2020, 1, 15)));
    }
}
