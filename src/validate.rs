//! Domain validation for parsed field specifications.
//!
//! The parser accepts anything the grammar can express; this pass rejects
//! values outside the field's domain (hour `24`, month `0`, year `87`) and
//! shapes a field cannot use (negative offsets outside day-of-month).

use crate::error::ScheduleError;
use crate::field::{Field, FieldSpec, FieldValue, Ordinal};

pub(crate) fn validate(field: Field, spec: &FieldSpec, raw: &str) -> Result<(), ScheduleError> {
    match spec {
        FieldSpec::Wildcard => Ok(()),
        FieldSpec::Single(value) => validate_value(field, value, raw),
        FieldSpec::Range(from, to) => {
            validate_value(field, from, raw)?;
            validate_value(field, to, raw)
        }
        FieldSpec::Step { start, interval } => {
            if *interval == 0 || *interval > field.max() as u32 {
                return Err(ScheduleError::domain(
                    field,
                    raw,
                    format!("step interval {interval} is outside 1..={}", field.max()),
                ));
            }
            if let Some(start) = start {
                validate_value(field, &FieldValue::Number(*start), raw)?;
            }
            Ok(())
        }
        FieldSpec::List(items) => {
            for item in items {
                validate(field, item, raw)?;
            }
            Ok(())
        }
    }
}

fn validate_value(field: Field, value: &FieldValue, raw: &str) -> Result<(), ScheduleError> {
    match value {
        FieldValue::Number(n) => {
            if *n < field.min() || *n > field.max() {
                return Err(ScheduleError::domain(
                    field,
                    raw,
                    format!(
                        "value {n} is outside {}..={}",
                        field.min(),
                        field.max()
                    ),
                ));
            }
            Ok(())
        }
        FieldValue::DaysBeforeLast(n) => {
            // Only reachable for day-of-month, the parser maps a leading
            // minus elsewhere to a plain negative number.
            if !(1..=7).contains(n) {
                return Err(ScheduleError::domain(
                    field,
                    raw,
                    format!("offset -{n} is outside -7..=-1"),
                ));
            }
            Ok(())
        }
        FieldValue::Last => Ok(()),
        FieldValue::NthWeekday { nth, weekday } => {
            if let Ordinal::Nth(n) = nth {
                if !(1..=5).contains(n) {
                    return Err(ScheduleError::domain(
                        field,
                        raw,
                        format!("ordinal {n} is outside 1..=5"),
                    ));
                }
            }
            debug_assert!(*weekday <= 6);
            Ok(())
        }
    }
}
