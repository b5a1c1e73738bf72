use calcron::ScheduleExpression;
use clap::Parser;
use jiff::Timestamp;
use std::process;

#[derive(Parser)]
#[command(name = "calcron", about = "Calendar-based schedule fire times", version)]
struct Cli {
    /// Schedule in raw form: "year;month;dayOfMonth;dayOfWeek;hour;minute;second"
    expression: Option<String>,

    /// Second field (default "0")
    #[arg(long)]
    second: Option<String>,

    /// Minute field (default "0")
    #[arg(long)]
    minute: Option<String>,

    /// Hour field (default "0")
    #[arg(long)]
    hour: Option<String>,

    /// Day-of-month field (default "*")
    #[arg(long)]
    day_of_month: Option<String>,

    /// Month field (default "*")
    #[arg(long)]
    month: Option<String>,

    /// Day-of-week field (default "*")
    #[arg(long)]
    day_of_week: Option<String>,

    /// Year field (default "*")
    #[arg(long)]
    year: Option<String>,

    /// IANA timezone name (default UTC)
    #[arg(long)]
    timezone: Option<String>,

    /// Start bound (RFC 3339 instant)
    #[arg(long)]
    start: Option<Timestamp>,

    /// End bound (RFC 3339 instant)
    #[arg(long)]
    end: Option<Timestamp>,

    /// Instant to search from (default: now)
    #[arg(long)]
    from: Option<Timestamp>,

    /// Number of fire times to show
    #[arg(short, long, default_value = "1")]
    n: u32,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Validate the expression without computing
    #[arg(long)]
    check: bool,

    /// Show the parsed expression as JSON
    #[arg(long)]
    parse: bool,

    /// Show the final fire time instead of upcoming ones
    #[arg(long = "final")]
    show_final: bool,
}

fn build_expression(cli: &Cli) -> Result<ScheduleExpression, String> {
    let mut expr = ScheduleExpression::default();

    if let Some(ref raw) = cli.expression {
        let parts: Vec<&str> = raw.split(';').collect();
        let [year, month, day_of_month, day_of_week, hour, minute, second] = parts[..] else {
            return Err(format!(
                "expected 7 ';'-separated fields (year;month;dayOfMonth;dayOfWeek;hour;minute;second), got {}",
                parts.len()
            ));
        };
        expr.year = year.to_string();
        expr.month = month.to_string();
        expr.day_of_month = day_of_month.to_string();
        expr.day_of_week = day_of_week.to_string();
        expr.hour = hour.to_string();
        expr.minute = minute.to_string();
        expr.second = second.to_string();
    }

    // Field flags override the positional expression.
    macro_rules! take {
        ($field:ident) => {
            if let Some(ref value) = cli.$field {
                expr.$field = value.clone();
            }
        };
    }
    take!(second);
    take!(minute);
    take!(hour);
    take!(day_of_month);
    take!(month);
    take!(day_of_week);
    take!(year);

    expr.timezone = cli.timezone.clone();
    expr.start = cli.start;
    expr.end = cli.end;
    Ok(expr)
}

fn main() {
    let cli = Cli::parse();

    let expr = match build_expression(&cli) {
        Ok(expr) => expr,
        Err(message) => {
            eprintln!("error: {message}");
            process::exit(2);
        }
    };

    let trigger = match expr.compile() {
        Ok(trigger) => trigger,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if cli.check {
        println!("\u{2713} valid");
        process::exit(0);
    }

    if cli.parse {
        match serde_json::to_string_pretty(&expr) {
            Ok(json) => {
                println!("{json}");
                process::exit(0);
            }
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                process::exit(1);
            }
        }
    }

    if cli.show_final {
        match trigger.final_fire_time() {
            Some(t) => println!("{t}"),
            None => {
                eprintln!("no final fire time");
                process::exit(0);
            }
        }
        process::exit(0);
    }

    let mut n = cli.n;
    if n > 1000 {
        eprintln!("warning: capped at 1000 fire times");
        n = 1000;
    }

    let from = cli.from.unwrap_or_else(Timestamp::now);
    let results: Vec<Timestamp> = trigger.fire_times_after(from).take(n as usize).collect();

    if results.is_empty() {
        eprintln!("no upcoming fire times");
        process::exit(0);
    }

    if cli.json {
        let iso_strings: Vec<String> = results.iter().map(|t| t.to_string()).collect();
        match serde_json::to_string(&iso_strings) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                process::exit(1);
            }
        }
    } else {
        for t in &results {
            println!("{t}");
        }
    }
}
