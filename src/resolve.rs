//! Resolution of field specifications to concrete value sets.
//!
//! Most fields resolve once, independent of any date. Day-of-month is the
//! exception: `last`, negative offsets and ordinal weekdays denote different
//! days in different months, so its specification is re-resolved against a
//! [`MonthContext`] every time the search enters a new month.

use std::collections::BTreeSet;

use crate::calendar::{days_in_month, last_weekday_day, nth_weekday_day};
use crate::field::{Field, FieldSpec, FieldValue, Ordinal};

/// The month a day-of-month specification is being resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonthContext {
    pub(crate) year: i16,
    pub(crate) month: i8,
}

impl MonthContext {
    fn last_day(self) -> i16 {
        i16::from(days_in_month(self.year, self.month))
    }
}

/// Resolve a specification to the ordered set of matching values, clipped to
/// the field's domain. For day-of-month the domain's upper bound is the
/// length of the context month; values that fall outside (a `31` in
/// February, a missing fifth weekday) drop out of the set.
pub(crate) fn resolve(field: Field, spec: &FieldSpec, ctx: MonthContext) -> BTreeSet<i16> {
    let (min, max) = domain(field, ctx);
    let mut out = BTreeSet::new();
    collect(field, spec, ctx, min, max, &mut out);
    if field == Field::DayOfWeek {
        // 0 and 7 both name Sunday.
        out = out.into_iter().map(|d| d % 7).collect();
    }
    out
}

fn domain(field: Field, ctx: MonthContext) -> (i16, i16) {
    match field {
        Field::DayOfMonth => (1, ctx.last_day()),
        _ => (field.min() as i16, field.max() as i16),
    }
}

fn collect(
    field: Field,
    spec: &FieldSpec,
    ctx: MonthContext,
    min: i16,
    max: i16,
    out: &mut BTreeSet<i16>,
) {
    match spec {
        FieldSpec::Wildcard => {
            out.extend(min..=max);
        }
        FieldSpec::Single(value) => {
            if let Some(v) = resolve_value(value, ctx) {
                if (min..=max).contains(&v) {
                    out.insert(v);
                }
            }
        }
        FieldSpec::Range(from, to) => {
            let (Some(from), Some(to)) = (resolve_value(from, ctx), resolve_value(to, ctx))
            else {
                // An endpoint the month cannot produce empties the range.
                return;
            };
            collect_range(field, from, to, min, max, out);
        }
        FieldSpec::Step { start, interval } => {
            // Wide accumulator: validation bounds the interval, but the
            // arithmetic must not overflow for any input that got this far.
            let mut v = i64::from(start.map_or(min, |s| s as i16));
            while v <= i64::from(max) {
                out.insert(v as i16);
                v += i64::from(*interval);
            }
        }
        FieldSpec::List(items) => {
            for item in items {
                collect(field, item, ctx, min, max, out);
            }
        }
    }
}

fn collect_range(field: Field, from: i16, to: i16, min: i16, max: i16, out: &mut BTreeSet<i16>) {
    if field == Field::DayOfWeek && from != to && from % 7 == to % 7 {
        // "0-7" and "7-0" span the whole week, not a single Sunday.
        out.extend(min..=max);
        return;
    }
    if from <= to {
        out.extend(from.max(min)..=to.min(max));
    } else {
        // Wrapping range, e.g. "27-3" or "fri-tue".
        out.extend(from.max(min)..=max);
        out.extend(min..=to.min(max));
    }
}

fn resolve_value(value: &FieldValue, ctx: MonthContext) -> Option<i16> {
    match value {
        FieldValue::Number(n) => Some(*n as i16),
        FieldValue::Last => Some(ctx.last_day()),
        FieldValue::DaysBeforeLast(n) => Some(ctx.last_day() - (*n as i16 - 1)),
        FieldValue::NthWeekday { nth, weekday } => match nth {
            Ordinal::Nth(n) => {
                nth_weekday_day(ctx.year, ctx.month, *weekday, *n).map(i16::from)
            }
            Ordinal::Last => Some(i16::from(last_weekday_day(ctx.year, ctx.month, *weekday))),
        },
    }
}
