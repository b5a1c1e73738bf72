//! Civil-calendar helpers shared by the resolver and the trigger.

use jiff::civil::date;

/// Number of days in the given month, leap years included.
pub(crate) fn days_in_month(year: i16, month: i8) -> i8 {
    date(year, month, 1).days_in_month()
}

/// Day of week for a civil date, Sunday-zero.
pub(crate) fn weekday_num(year: i16, month: i8, day: i8) -> u8 {
    date(year, month, day).weekday().to_sunday_zero_offset() as u8
}

/// Day of month of the nth occurrence of `weekday` (Sunday-zero) in the
/// given month, or `None` when the month has no nth occurrence.
pub(crate) fn nth_weekday_day(year: i16, month: i8, weekday: u8, nth: u8) -> Option<i8> {
    let first = first_weekday_day(year, month, weekday);
    let day = first + 7 * (nth as i8 - 1);
    (day <= days_in_month(year, month)).then_some(day)
}

/// Day of month of the last occurrence of `weekday` in the given month.
pub(crate) fn last_weekday_day(year: i16, month: i8, weekday: u8) -> i8 {
    let first = first_weekday_day(year, month, weekday);
    first + 7 * ((days_in_month(year, month) - first) / 7)
}

fn first_weekday_day(year: i16, month: i8, weekday: u8) -> i8 {
    let first = weekday_num(year, month, 1);
    1 + ((weekday as i8 - first as i8).rem_euclid(7))
}
