//! calcron — calendar-based schedule expressions.
//!
//! Declarative seven-field schedules (second, minute, hour, day-of-month,
//! month, day-of-week, year) with fire-time computation: next, previous,
//! first and final fire times within optional start/end bounds.
//!
//! # Examples
//!
//! ```
//! use calcron::ScheduleExpression;
//! use jiff::Timestamp;
//!
//! // Noon on the second Monday of every month.
//! let expr = ScheduleExpression {
//!     day_of_month: "2nd Mon".into(),
//!     hour: "12".into(),
//!     ..Default::default()
//! };
//! let trigger = expr.compile().unwrap();
//!
//! let after: Timestamp = "2010-07-01T00:00:00Z".parse().unwrap();
//! let next = trigger.next_fire_time(after).unwrap();
//! assert_eq!(next.to_string(), "2010-07-12T12:00:00Z");
//! ```

mod calendar;
pub mod error;
pub mod expr;
pub mod field;
pub mod parser;
mod resolve;
pub mod trigger;
mod validate;

pub use error::ScheduleError;
pub use expr::ScheduleExpression;
pub use field::{Field, FieldSpec, FieldValue, Ordinal};
pub use trigger::{CalendarTrigger, FireTimes};

// --- ScheduleExpression convenience methods ---

impl ScheduleExpression {
    /// Compile this expression into a queryable trigger.
    ///
    /// Equivalent to [`CalendarTrigger::new`].
    pub fn compile(&self) -> Result<CalendarTrigger, ScheduleError> {
        CalendarTrigger::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_is_trigger_construction() {
        let expr = ScheduleExpression::default();
        assert!(expr.compile().is_ok());
        let bad = ScheduleExpression {
            minute: "60".into(),
            ..Default::default()
        };
        assert!(bad.compile().is_err());
    }
}
