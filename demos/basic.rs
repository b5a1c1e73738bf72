//! Basic calcron API walkthrough: build, compile, query.

use calcron::ScheduleExpression;
use jiff::Timestamp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 09:30 on the last Friday of every month in 2026.
    let expr = ScheduleExpression {
        day_of_month: "Last Fri".into(),
        hour: "9".into(),
        minute: "30".into(),
        year: "2026".into(),
        ..Default::default()
    };
    let trigger = expr.compile()?;
    println!("Schedule: {expr}");

    // Compute the next fire time
    let now: Timestamp = "2026-06-15T08:00:00Z".parse()?;
    if let Some(next) = trigger.next_fire_time(now) {
        println!("Next fire time after {now}: {next}");
    }

    // Compute the next 5 fire times
    println!("\nNext 5 fire times:");
    for t in trigger.fire_times_after(now).take(5) {
        println!("  {t}");
    }

    // Year-constrained schedules have a final fire time
    if let Some(last) = trigger.final_fire_time() {
        println!("\nFinal fire time: {last}");
    }

    // The previous fire time walks backward
    if let Some(prev) = trigger.prev_fire_time(now) {
        println!("Previous fire time before {now}: {prev}");
    }

    Ok(())
}
