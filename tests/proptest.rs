use calcron::{CalendarTrigger, ScheduleExpression};
use jiff::tz::TimeZone;
use jiff::Timestamp;
use proptest::prelude::*;

fn arb_seed() -> impl Strategy<Value = Timestamp> {
    // 1970 through mid-2033.
    (0i64..2_000_000_000).prop_map(|s| Timestamp::from_second(s).unwrap())
}

proptest! {
    /// Fully fixed time fields come back verbatim in the computed instant.
    #[test]
    fn fixed_fields_are_reproduced(
        second in 0u8..60,
        minute in 0u8..60,
        hour in 0u8..24,
        day in 1u8..=28,
        seed in arb_seed(),
    ) {
        let expr = ScheduleExpression {
            second: second.to_string(),
            minute: minute.to_string(),
            hour: hour.to_string(),
            day_of_month: day.to_string(),
            ..Default::default()
        };
        let trigger = expr.compile().unwrap();
        let next = trigger.next_fire_time(seed).unwrap();
        prop_assert!(next > seed);

        let dt = TimeZone::UTC.to_datetime(next);
        prop_assert_eq!(dt.second() as u8, second);
        prop_assert_eq!(dt.minute() as u8, minute);
        prop_assert_eq!(dt.hour() as u8, hour);
        prop_assert_eq!(dt.day() as u8, day);
    }

    /// Successive fire times are strictly increasing.
    #[test]
    fn fire_times_strictly_increase(
        hour in 0u8..24,
        interval in 1u32..30,
        seed in arb_seed(),
    ) {
        let expr = ScheduleExpression {
            minute: format!("*/{interval}"),
            hour: hour.to_string(),
            ..Default::default()
        };
        let trigger = expr.compile().unwrap();
        let times: Vec<_> = trigger.fire_times_after(seed).take(5).collect();
        prop_assert_eq!(times.len(), 5);
        for pair in times.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        prop_assert!(times[0] > seed);
    }

    /// The previous fire time just past a computed instant is that instant.
    #[test]
    fn previous_inverts_next(day in 1u8..=28, seed in arb_seed()) {
        let expr = ScheduleExpression {
            day_of_month: day.to_string(),
            ..Default::default()
        };
        let trigger = expr.compile().unwrap();
        let next = trigger.next_fire_time(seed).unwrap();
        let just_past = Timestamp::from_second(next.as_second() + 1).unwrap();
        prop_assert_eq!(trigger.prev_fire_time(just_past), Some(next));
    }

    /// Arbitrary field strings either build or fail with an error, never panic.
    #[test]
    fn construction_never_panics(field in "[-*/, 0-9a-zA-Z]{0,12}") {
        let expr = ScheduleExpression {
            day_of_month: field,
            ..Default::default()
        };
        let _ = CalendarTrigger::new(&expr);
    }
}
