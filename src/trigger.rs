//! The calendar trigger: validated schedule plus fire-time search.
//!
//! Construction parses and validates all seven fields eagerly, aggregating
//! every per-field error into one construction failure. Queries never fail;
//! a schedule with no matching instant in range answers `None`.
//!
//! The search is a cascading scan over resolved value sets, most significant
//! field first: year, month, day, then the time-of-day triple. All fields
//! but day-of-month resolve once at construction; day-of-month descriptors
//! (`last`, `-n`, ordinal weekdays) are re-resolved for every month the
//! cursor enters.

use std::collections::BTreeSet;

use jiff::civil::{date, DateTime};
use jiff::tz::TimeZone;
use jiff::{Span, Timestamp};

use crate::calendar::{days_in_month, weekday_num};
use crate::error::ScheduleError;
use crate::expr::ScheduleExpression;
use crate::field::{Field, FieldSpec};
use crate::parser;
use crate::resolve::{resolve, MonthContext};
use crate::validate;

/// Forward searches with an unconstrained year field give up this many
/// years past the seed.
const HORIZON_YEARS: i16 = 100;

/// Dummy context for fields whose resolution is date-independent.
const STATIC_CTX: MonthContext = MonthContext {
    year: 2000,
    month: 1,
};

/// A compiled schedule that can be queried for fire times.
#[derive(Debug, Clone)]
pub struct CalendarTrigger {
    expr: ScheduleExpression,
    tz: TimeZone,
    start: Timestamp,
    end: Option<Timestamp>,
    expired: bool,
    seconds: BTreeSet<i16>,
    minutes: BTreeSet<i16>,
    hours: BTreeSet<i16>,
    months: BTreeSet<i16>,
    /// `None` when the year field is the wildcard.
    years: Option<BTreeSet<i16>>,
    /// Sunday-zero weekday numbers; `None` when day-of-week is the wildcard.
    weekdays: Option<BTreeSet<i16>>,
    /// Kept as a spec rather than a set: day-of-month depends on the month.
    days: Option<FieldSpec>,
}

impl CalendarTrigger {
    /// Compile a schedule expression.
    ///
    /// Every field is parsed and validated here; when several fields are
    /// bad the error carries all of them. An `end` before `start` is not an
    /// error, it yields an [expired](Self::is_expired) trigger whose queries
    /// all answer `None`.
    pub fn new(expr: &ScheduleExpression) -> Result<Self, ScheduleError> {
        let mut errors = Vec::new();

        let second = checked(Field::Second, &expr.second, &mut errors);
        let minute = checked(Field::Minute, &expr.minute, &mut errors);
        let hour = checked(Field::Hour, &expr.hour, &mut errors);
        let day = checked(Field::DayOfMonth, &expr.day_of_month, &mut errors);
        let month = checked(Field::Month, &expr.month, &mut errors);
        let weekday = checked(Field::DayOfWeek, &expr.day_of_week, &mut errors);
        let year = checked(Field::Year, &expr.year, &mut errors);

        let tz = match expr.timezone.as_deref() {
            None => TimeZone::UTC,
            Some(name) => match TimeZone::get(name) {
                Ok(tz) => tz,
                Err(err) => {
                    errors.push(ScheduleError::timezone(name, err.to_string()));
                    TimeZone::UTC
                }
            },
        };

        if !errors.is_empty() {
            return Err(ScheduleError::aggregate(errors));
        }

        let start = expr.start.unwrap_or(Timestamp::UNIX_EPOCH);
        let end = expr.end;
        let expired = end.is_some_and(|end| end < start);

        Ok(Self {
            expr: expr.clone(),
            tz,
            start,
            end,
            expired,
            seconds: resolve(Field::Second, &second, STATIC_CTX),
            minutes: resolve(Field::Minute, &minute, STATIC_CTX),
            hours: resolve(Field::Hour, &hour, STATIC_CTX),
            months: resolve(Field::Month, &month, STATIC_CTX),
            years: (!year.is_wildcard()).then(|| resolve(Field::Year, &year, STATIC_CTX)),
            weekdays: (!weekday.is_wildcard())
                .then(|| resolve(Field::DayOfWeek, &weekday, STATIC_CTX)),
            days: (!day.is_wildcard()).then_some(day),
        })
    }

    /// The expression this trigger was compiled from.
    pub fn expression(&self) -> &ScheduleExpression {
        &self.expr
    }

    /// The timezone the civil fields are interpreted in.
    pub fn timezone(&self) -> &TimeZone {
        &self.tz
    }

    pub fn start_time(&self) -> Timestamp {
        self.start
    }

    pub fn end_time(&self) -> Option<Timestamp> {
        self.end
    }

    /// True when the end bound precedes the start bound. Expired triggers
    /// answer `None` to every query.
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Replace the end bound. A new end before `start` expires the trigger;
    /// a later one un-expires it.
    pub fn set_end_time(&mut self, end: Option<Timestamp>) {
        self.end = end;
        self.expr.end = end;
        self.expired = end.is_some_and(|end| end < self.start);
    }

    /// The earliest fire time strictly after `after` (and within the
    /// start/end bounds), or `None` when the schedule never fires again.
    pub fn next_fire_time(&self, after: Timestamp) -> Option<Timestamp> {
        if self.expired {
            return None;
        }
        self.next_from_second(after.as_second() + 1)
    }

    /// The latest fire time strictly before `before` (and within the
    /// start/end bounds).
    pub fn prev_fire_time(&self, before: Timestamp) -> Option<Timestamp> {
        if self.expired {
            return None;
        }
        // Latest whole second strictly before the query instant. With a
        // subsecond component the instant's own second still qualifies.
        let latest = if before.subsec_nanosecond() > 0 {
            before.as_second()
        } else {
            before.as_second() - 1
        };
        self.prev_from_second(latest)
    }

    /// The earliest fire time at or after the start bound.
    pub fn first_fire_time(&self) -> Option<Timestamp> {
        if self.expired {
            return None;
        }
        self.next_from_second(self.start.as_second())
    }

    /// The last instant the schedule ever fires.
    ///
    /// With an end bound this is the last fire time at or before it. Without
    /// one the answer exists only when the year field is constrained; a
    /// wildcard year recurs forever and yields `None`.
    pub fn final_fire_time(&self) -> Option<Timestamp> {
        if self.expired {
            return None;
        }
        if let Some(end) = self.end {
            return self.prev_from_second(end.as_second());
        }
        let max_year = *self.years.as_ref()?.iter().next_back()?;
        let seed = date(max_year, 12, 31).at(23, 59, 59, 0);
        let found = self.search_backward(seed)?;
        let out = found.to_zoned(self.tz.clone()).ok()?.timestamp();
        (out >= self.start).then_some(out)
    }

    /// Iterator over successive fire times strictly after `after`.
    pub fn fire_times_after(&self, after: Timestamp) -> FireTimes<'_> {
        FireTimes {
            trigger: self,
            cursor: Some(after),
        }
    }

    fn next_from_second(&self, second: i64) -> Option<Timestamp> {
        let second = second.max(self.start.as_second());
        let floor = Timestamp::from_second(second).ok()?;
        let mut seed = self.tz.to_datetime(floor);
        loop {
            let found = self.search_forward(seed)?;
            let out = found.to_zoned(self.tz.clone()).ok()?.timestamp();
            if out < floor.max(self.start) {
                // A repeated civil time in a backward transition maps to its
                // first occurrence, and a start bound with subsecond
                // precision sits just past the truncated seed. Either way the
                // hit lands before the cursor; advance the civil seed past it
                // and retry.
                seed = found.checked_add(Span::new().seconds(1)).ok()?;
                continue;
            }
            return match self.end {
                Some(end) if out > end => None,
                _ => Some(out),
            };
        }
    }

    fn prev_from_second(&self, latest: i64) -> Option<Timestamp> {
        let mut latest = latest;
        if let Some(end) = self.end {
            latest = latest.min(end.as_second());
        }
        if latest < self.start.as_second() {
            return None;
        }
        let ceiling = Timestamp::from_second(latest).ok()?;
        let mut seed = self.tz.to_datetime(ceiling);
        loop {
            let found = self.search_backward(seed)?;
            let out = found.to_zoned(self.tz.clone()).ok()?.timestamp();
            if out > ceiling {
                // A civil time inside a forward transition gap maps past the
                // cursor; step the civil seed back and retry.
                seed = found.checked_sub(Span::new().seconds(1)).ok()?;
                continue;
            }
            return (out >= self.start).then_some(out);
        }
    }

    fn search_forward(&self, seed: DateTime) -> Option<DateTime> {
        let seed_year = seed.year();
        let years: Vec<i16> = match &self.years {
            Some(set) => set.range(seed_year..).copied().collect(),
            // The civil calendar tops out at year 9999.
            None => (seed_year..=seed_year.saturating_add(HORIZON_YEARS).min(9999)).collect(),
        };

        for year in years {
            let month_lb = if year == seed_year {
                i16::from(seed.month())
            } else {
                1
            };
            for &month in self.months.range(month_lb..) {
                let month = month as i8;
                let on_seed_month = year == seed_year && month == seed.month();
                let day_lb = if on_seed_month { i16::from(seed.day()) } else { 1 };
                for &day in self.matching_days(year, month).range(day_lb..) {
                    let day = day as i8;
                    let from = (on_seed_month && day == seed.day()).then(|| {
                        (
                            i16::from(seed.hour()),
                            i16::from(seed.minute()),
                            i16::from(seed.second()),
                        )
                    });
                    if let Some((h, m, s)) = self.first_time_from(from) {
                        return Some(date(year, month, day).at(h as i8, m as i8, s as i8, 0));
                    }
                }
            }
        }
        None
    }

    fn search_backward(&self, seed: DateTime) -> Option<DateTime> {
        let seed_year = seed.year();
        let min_year = match &self.years {
            Some(set) => *set.iter().next()?,
            None => self.tz.to_datetime(self.start).year(),
        };
        let years: Vec<i16> = match &self.years {
            Some(set) => set.range(..=seed_year).rev().copied().collect(),
            None => (min_year..=seed_year).rev().collect(),
        };

        for year in years {
            let month_ub = if year == seed_year {
                i16::from(seed.month())
            } else {
                12
            };
            for &month in self.months.range(..=month_ub).rev() {
                let month = month as i8;
                let on_seed_month = year == seed_year && month == seed.month();
                let day_ub = if on_seed_month {
                    i16::from(seed.day())
                } else {
                    i16::from(days_in_month(year, month))
                };
                for &day in self.matching_days(year, month).range(..=day_ub).rev() {
                    let day = day as i8;
                    let until = (on_seed_month && day == seed.day()).then(|| {
                        (
                            i16::from(seed.hour()),
                            i16::from(seed.minute()),
                            i16::from(seed.second()),
                        )
                    });
                    if let Some((h, m, s)) = self.last_time_until(until) {
                        return Some(date(year, month, day).at(h as i8, m as i8, s as i8, 0));
                    }
                }
            }
        }
        None
    }

    /// Days of the given month matching both day specifications. When both
    /// day-of-month and day-of-week are constrained a day must satisfy the
    /// two of them together.
    fn matching_days(&self, year: i16, month: i8) -> BTreeSet<i16> {
        let ctx = MonthContext { year, month };
        let by_date = self
            .days
            .as_ref()
            .map(|spec| resolve(Field::DayOfMonth, spec, ctx));
        match (by_date, &self.weekdays) {
            (None, None) => (1..=i16::from(days_in_month(year, month))).collect(),
            (Some(days), None) => days,
            (None, Some(weekdays)) => (1..=i16::from(days_in_month(year, month)))
                .filter(|&d| weekdays.contains(&i16::from(weekday_num(year, month, d as i8))))
                .collect(),
            (Some(days), Some(weekdays)) => days
                .into_iter()
                .filter(|&d| weekdays.contains(&i16::from(weekday_num(year, month, d as i8))))
                .collect(),
        }
    }

    /// Earliest matching time-of-day triple, at or after `from` when given.
    /// The resolved time sets are never empty, so the unconstrained case
    /// always produces a value.
    fn first_time_from(&self, from: Option<(i16, i16, i16)>) -> Option<(i16, i16, i16)> {
        let Some((h, m, s)) = from else {
            return Some((
                *self.hours.iter().next()?,
                *self.minutes.iter().next()?,
                *self.seconds.iter().next()?,
            ));
        };
        for &hour in self.hours.range(h..) {
            let minute_lb = if hour == h { m } else { 0 };
            for &minute in self.minutes.range(minute_lb..) {
                let second_lb = if hour == h && minute == m { s } else { 0 };
                if let Some(&second) = self.seconds.range(second_lb..).next() {
                    return Some((hour, minute, second));
                }
            }
        }
        None
    }

    /// Latest matching time-of-day triple, at or before `until` when given.
    fn last_time_until(&self, until: Option<(i16, i16, i16)>) -> Option<(i16, i16, i16)> {
        let Some((h, m, s)) = until else {
            return Some((
                *self.hours.iter().next_back()?,
                *self.minutes.iter().next_back()?,
                *self.seconds.iter().next_back()?,
            ));
        };
        for &hour in self.hours.range(..=h).rev() {
            let minute_ub = if hour == h { m } else { 59 };
            for &minute in self.minutes.range(..=minute_ub).rev() {
                let second_ub = if hour == h && minute == m { s } else { 59 };
                if let Some(&second) = self.seconds.range(..=second_ub).next_back() {
                    return Some((hour, minute, second));
                }
            }
        }
        None
    }
}

fn checked(field: Field, raw: &str, errors: &mut Vec<ScheduleError>) -> FieldSpec {
    match parser::parse(field, raw)
        .and_then(|spec| validate::validate(field, &spec, raw).map(|()| spec))
    {
        Ok(spec) => spec,
        Err(err) => {
            errors.push(err);
            // Placeholder; construction fails once all fields are checked.
            FieldSpec::Wildcard
        }
    }
}

/// Iterator over a trigger's successive fire times.
///
/// Ends when the schedule runs out of matches (year constraint or end bound
/// exhausted, or the search horizon reached).
#[derive(Debug, Clone)]
pub struct FireTimes<'a> {
    trigger: &'a CalendarTrigger,
    cursor: Option<Timestamp>,
}

impl Iterator for FireTimes<'_> {
    type Item = Timestamp;

    fn next(&mut self) -> Option<Timestamp> {
        match self.trigger.next_fire_time(self.cursor?) {
            Some(next) => {
                self.cursor = Some(next);
                Some(next)
            }
            None => {
                self.cursor = None;
                None
            }
        }
    }
}
