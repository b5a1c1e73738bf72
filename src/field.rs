//! Field identities and the parsed per-field specification union.

use std::fmt;

/// One of the seven calendar fields of a schedule expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Field {
    Second,
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
    Year,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "dayOfMonth",
            Self::Month => "month",
            Self::DayOfWeek => "dayOfWeek",
            Self::Year => "year",
        }
    }

    /// Smallest value a literal in this field may take.
    ///
    /// Day-of-week accepts 0-7 on input (0 and 7 both denote Sunday); the
    /// resolver works on the normalized domain 0-6.
    pub fn min(self) -> i32 {
        match self {
            Self::Second | Self::Minute | Self::Hour | Self::DayOfWeek => 0,
            Self::DayOfMonth | Self::Month => 1,
            Self::Year => 1000,
        }
    }

    /// Largest value a literal in this field may take.
    pub fn max(self) -> i32 {
        match self {
            Self::Second | Self::Minute => 59,
            Self::Hour => 23,
            Self::DayOfMonth => 31,
            Self::Month => 12,
            Self::DayOfWeek => 7,
            Self::Year => 9999,
        }
    }

    /// Step expressions (`a/b`) are limited to the three time-of-day fields.
    pub fn allows_step(self) -> bool {
        matches!(self, Self::Second | Self::Minute | Self::Hour)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordinal position of a weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordinal {
    /// 1st through 5th occurrence.
    Nth(u8),
    /// The last occurrence.
    Last,
}

/// A single concrete token inside a field specification.
///
/// Month and weekday names are normalized to numbers at parse time, so the
/// only carriers of calendar context left are the day-of-month descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// A plain numeric value. May be out of domain until validated.
    Number(i32),
    /// `Last` — the last day of the resolved month (day-of-month only).
    Last,
    /// `-n` — n days before the end of the month, 1-indexed so `-1` is the
    /// last day (day-of-month only).
    DaysBeforeLast(u8),
    /// `2nd Mon`, `Last Fri` — the nth (or last) occurrence of a weekday in
    /// the resolved month (day-of-month only). Weekday is 0-6, Sunday = 0.
    NthWeekday { nth: Ordinal, weekday: u8 },
}

/// The parsed specification for one calendar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// `*` — every legal value.
    Wildcard,
    /// One concrete value.
    Single(FieldValue),
    /// `from-to`, ascending or wrap-around. Day-of-month endpoints may be
    /// descriptor tokens whose concrete value depends on the month.
    Range(FieldValue, FieldValue),
    /// `a/b` — start at `a` (domain minimum when `None`, i.e. `*/b`) and
    /// repeat every `interval` units through the end of the domain.
    Step {
        start: Option<i32>,
        interval: u32,
    },
    /// Comma-separated union of singles, ranges and steps.
    List(Vec<FieldSpec>),
}

impl FieldSpec {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

/// Look up a weekday name or abbreviation (input already uppercased).
/// Returns the Sunday-zero day number.
pub(crate) fn weekday_from_name(s: &str) -> Option<u8> {
    match s {
        "SUN" | "SUNDAY" => Some(0),
        "MON" | "MONDAY" => Some(1),
        "TUE" | "TUESDAY" => Some(2),
        "WED" | "WEDNESDAY" => Some(3),
        "THU" | "THURSDAY" => Some(4),
        "FRI" | "FRIDAY" => Some(5),
        "SAT" | "SATURDAY" => Some(6),
        _ => None,
    }
}

/// Look up a month name or abbreviation (input already uppercased).
/// Returns the 1-based month number.
pub(crate) fn month_from_name(s: &str) -> Option<u8> {
    match s {
        "JAN" | "JANUARY" => Some(1),
        "FEB" | "FEBRUARY" => Some(2),
        "MAR" | "MARCH" => Some(3),
        "APR" | "APRIL" => Some(4),
        "MAY" => Some(5),
        "JUN" | "JUNE" => Some(6),
        "JUL" | "JULY" => Some(7),
        "AUG" | "AUGUST" => Some(8),
        "SEP" | "SEPTEMBER" => Some(9),
        "OCT" | "OCTOBER" => Some(10),
        "NOV" | "NOVEMBER" => Some(11),
        "DEC" | "DECEMBER" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_names_cover_both_forms() {
        assert_eq!(weekday_from_name("SUN"), Some(0));
        assert_eq!(weekday_from_name("SUNDAY"), Some(0));
        assert_eq!(weekday_from_name("SAT"), Some(6));
        assert_eq!(weekday_from_name("WEEE"), None);
    }

    #[test]
    fn month_names_cover_both_forms() {
        assert_eq!(month_from_name("JAN"), Some(1));
        assert_eq!(month_from_name("DECEMBER"), Some(12));
        assert_eq!(month_from_name("XXXX"), None);
    }

    #[test]
    fn field_domains() {
        assert_eq!(Field::Hour.max(), 23);
        assert_eq!(Field::DayOfMonth.min(), 1);
        assert_eq!(Field::DayOfWeek.max(), 7);
        assert!(Field::Minute.allows_step());
        assert!(!Field::DayOfMonth.allows_step());
    }
}
