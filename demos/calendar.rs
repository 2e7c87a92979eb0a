//! Date range printer.
//!
//! Demonstrates required and optional positional arguments, a boolean flag,
//! and a value flag, each converted through a caller-supplied function whose
//! errors surface unchanged.
//!
//! # Usage
//!
//! ```bash
//! # only the required argument
//! cargo run -p tinyopt-demos --example calendar -- 2019-04-01
//! # an optional end date
//! cargo run -p tinyopt-demos --example calendar -- 2019-04-01 2019-04-20
//! # a flag with a value
//! cargo run -p tinyopt-demos --example calendar -- 2019-04-01 2019-04-20 --format %d/%m/%Y
//! # clustered short flags
//! cargo run -p tinyopt-demos --example calendar -- 2019-04-01 2019-04-20 -wf %a.%d/%m/%Y
//! ```

use std::process::ExitCode;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, Months, NaiveDate, Weekday};
use thiserror::Error;
use tinyopt_core::{ParseError, Parser, QueryError};

const USAGE: &str = "usage: calendar START [END] [-w|--weekdays] [-f|--format PATTERN]";

#[derive(Debug, Error)]
enum CalendarError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),
    #[error("invalid date format: {0}")]
    Format(String),
    #[error("end date out of range")]
    OutOfRange,
}

/// Pre-validated strftime pattern.
struct DateFormat<'a>(Vec<Item<'a>>);

fn parse_date(s: &str) -> Result<NaiveDate, CalendarError> {
    Ok(s.parse()?)
}

fn parse_format(pattern: &str) -> Result<DateFormat<'_>, CalendarError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(CalendarError::Format(pattern.to_string()));
    }
    Ok(DateFormat(items))
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CalendarError> {
    let parser = Parser::new()
        .short('w', "weekdays")
        .short('f', "format")
        .takes_value("format");
    let args = parser.parse_env()?;

    let start = args.at_with(0, parse_date)?;
    let end = match args.optional_at_with(1, parse_date)? {
        Some(end) => end,
        None => start
            .checked_add_months(Months::new(1))
            .ok_or(CalendarError::OutOfRange)?,
    };
    let skip_weekends = args.has("weekdays");
    let format = args.get_optional_with("format", parse_format)?;

    print_date_range(start, end, skip_weekends, format.as_ref());
    Ok(())
}

fn print_date_range(
    start: NaiveDate,
    end: NaiveDate,
    skip_weekends: bool,
    format: Option<&DateFormat<'_>>,
) {
    for date in start.iter_days().take_while(|date| *date <= end) {
        if skip_weekends && matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        match format {
            Some(DateFormat(items)) => println!("{}", date.format_with_items(items.iter())),
            None => println!("{date}"),
        }
    }
}
