//! The declarative schedule expression supplied by callers.

use std::fmt;

use jiff::Timestamp;

/// A calendar-based schedule declaration.
///
/// Seven per-field specifications plus optional bounds and timezone. This is
/// a plain configuration struct: fill in the fields you care about and leave
/// the rest to [`Default`].
///
/// Defaults follow the EJB schedule expression: the three time-of-day fields
/// default to `"0"` (midnight), the four date fields to `"*"`. `start`
/// defaults to the Unix epoch, `end` to unbounded, `timezone` to UTC.
///
/// ```
/// use calcron::ScheduleExpression;
///
/// let expr = ScheduleExpression {
///     day_of_month: "2nd Mon".into(),
///     hour: "9".into(),
///     ..Default::default()
/// };
/// assert_eq!(expr.minute, "0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ScheduleExpression {
    pub second: String,
    pub minute: String,
    pub hour: String,
    pub day_of_month: String,
    pub month: String,
    pub day_of_week: String,
    pub year: String,
    /// Instant before which the schedule never fires. `None` means the epoch.
    pub start: Option<Timestamp>,
    /// Instant after which the schedule never fires. `None` means unbounded.
    pub end: Option<Timestamp>,
    /// IANA timezone name the civil fields are interpreted in. `None` means
    /// UTC, for deterministic behavior regardless of host configuration.
    pub timezone: Option<String>,
}

impl Default for ScheduleExpression {
    fn default() -> Self {
        Self {
            second: "0".into(),
            minute: "0".into(),
            hour: "0".into(),
            day_of_month: "*".into(),
            month: "*".into(),
            day_of_week: "*".into(),
            year: "*".into(),
            start: None,
            end: None,
            timezone: None,
        }
    }
}

impl ScheduleExpression {
    /// The raw field values joined with `;`, most significant first.
    pub fn raw_value(&self) -> String {
        format!(
            "{};{};{};{};{};{};{}",
            self.year,
            self.month,
            self.day_of_month,
            self.day_of_week,
            self.hour,
            self.minute,
            self.second
        )
    }
}

impl fmt::Display for ScheduleExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_value())
    }
}
