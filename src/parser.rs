//! Per-field grammar parser.
//!
//! Turns one raw field string into a [`FieldSpec`]: commas split lists,
//! a hyphen splits ranges (with care so ordinal tokens and leading negative
//! numbers survive), a slash splits step expressions. Whitespace is
//! insignificant and everything is case-insensitive.
//!
//! Parsing is a syntax concern only: in-grammar values that are out of the
//! field's domain (hour `24`, year `87`) parse fine and are rejected by the
//! validator. Structurally malformed tokens (`XXXX`, `2ndXXX`) fail here.

use crate::error::ScheduleError;
use crate::field::{month_from_name, weekday_from_name, Field, FieldSpec, FieldValue, Ordinal};

const ORDINALS: [&str; 5] = ["1ST", "2ND", "3RD", "4TH", "5TH"];

/// Parse a raw field string into a field specification.
pub fn parse(field: Field, raw: &str) -> Result<FieldSpec, ScheduleError> {
    let norm: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if norm.is_empty() {
        return Err(ScheduleError::syntax(field, raw, "expression is empty"));
    }
    if norm == "*" {
        return Ok(FieldSpec::Wildcard);
    }

    if norm.contains(',') {
        let items = norm
            .split(',')
            .map(|item| parse_item(field, item, raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FieldSpec::List(items))
    } else {
        parse_item(field, &norm, raw)
    }
}

/// Parse one list element (or a whole non-list field): a step, a range or a
/// single value.
fn parse_item(field: Field, item: &str, raw: &str) -> Result<FieldSpec, ScheduleError> {
    if item.is_empty() {
        return Err(ScheduleError::syntax(field, raw, "empty list element"));
    }
    if item == "*" {
        return Err(ScheduleError::syntax(
            field,
            raw,
            "'*' cannot appear inside a list",
        ));
    }

    if let Some((start, step)) = item.split_once('/') {
        if !field.allows_step() {
            return Err(ScheduleError::syntax(
                field,
                raw,
                "step values are only allowed for second, minute and hour",
            ));
        }
        let start = if start == "*" {
            None
        } else {
            Some(start.parse::<i32>().map_err(|_| {
                ScheduleError::syntax(field, raw, format!("unparseable step start '{start}'"))
            })?)
        };
        let interval = step.parse::<u32>().map_err(|_| {
            ScheduleError::syntax(field, raw, format!("unparseable step interval '{step}'"))
        })?;
        return Ok(FieldSpec::Step { start, interval });
    }

    if let Some(split) = range_split_index(item) {
        let from = parse_value(field, &item[..split], raw)?;
        let to = parse_value(field, &item[split + 1..], raw)?;
        return Ok(FieldSpec::Range(from, to));
    }

    Ok(FieldSpec::Single(parse_value(field, item, raw)?))
}

/// Index of the hyphen separating a range's endpoints, or `None` when the
/// token is not a range. A hyphen at position 0 is a sign (`-7`), as is a
/// hyphen directly after the separator (`-7--2`).
fn range_split_index(item: &str) -> Option<usize> {
    let bytes = item.as_bytes();
    (1..bytes.len()).find(|&i| bytes[i] == b'-' && bytes[i - 1] != b'-')
}

/// Parse a single endpoint or standalone token into a [`FieldValue`].
fn parse_value(field: Field, token: &str, raw: &str) -> Result<FieldValue, ScheduleError> {
    if token.is_empty() {
        return Err(ScheduleError::syntax(field, raw, "empty value"));
    }

    if field == Field::DayOfMonth {
        if token == "LAST" {
            return Ok(FieldValue::Last);
        }
        if let Some(rest) = token.strip_prefix('-') {
            let n = rest.parse::<u8>().map_err(|_| {
                ScheduleError::syntax(field, raw, format!("unparseable value '{token}'"))
            })?;
            return Ok(FieldValue::DaysBeforeLast(n));
        }
        if let Some(spec) = parse_ordinal_weekday(token) {
            return spec.map_err(|_| {
                ScheduleError::syntax(field, raw, format!("unknown weekday in '{token}'"))
            });
        }
    }

    if let Ok(n) = token.parse::<i32>() {
        return Ok(FieldValue::Number(n));
    }

    match field {
        Field::Month => month_from_name(token)
            .map(|m| FieldValue::Number(m as i32))
            .ok_or_else(|| {
                ScheduleError::syntax(field, raw, format!("unknown month name '{token}'"))
            }),
        Field::DayOfWeek => weekday_from_name(token)
            .map(|d| FieldValue::Number(d as i32))
            .ok_or_else(|| {
                ScheduleError::syntax(field, raw, format!("unknown weekday name '{token}'"))
            }),
        _ => Err(ScheduleError::syntax(
            field,
            raw,
            format!("unparseable value '{token}'"),
        )),
    }
}

/// Recognize `1st`..`5th`/`last` followed by a weekday name. Returns `None`
/// when the token does not start with an ordinal at all, and `Some(Err(..))`
/// when it does but the remainder is not a weekday.
fn parse_ordinal_weekday(token: &str) -> Option<Result<FieldValue, ()>> {
    for (i, prefix) in ORDINALS.iter().enumerate() {
        if let Some(rest) = token.strip_prefix(prefix) {
            return Some(match weekday_from_name(rest) {
                Some(weekday) => Ok(FieldValue::NthWeekday {
                    nth: Ordinal::Nth(i as u8 + 1),
                    weekday,
                }),
                None => Err(()),
            });
        }
    }
    // "LAST" alone was handled by the caller, so any remainder here must be
    // a weekday name.
    if let Some(rest) = token.strip_prefix("LAST") {
        return Some(match weekday_from_name(rest) {
            Some(weekday) => Ok(FieldValue::NthWeekday {
                nth: Ordinal::Last,
                weekday,
            }),
            None => Err(()),
        });
    }
    None
}
