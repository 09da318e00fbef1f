//! Syncs a date range and prints the observations as JSON lines.
//!
//! ```text
//! RUST_LOG=info cargo run --example sync_range -- 2006-12-28 2007-01-03
//! ```

use lpo_weather::{LpoError, LpoWeather};
use std::env;

fn main() -> Result<(), LpoError> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (start, end) = match args.as_slice() {
        [start, end] => (start.clone(), end.clone()),
        [day] => (day.clone(), day.clone()),
        _ => {
            eprintln!("usage: sync_range <start YYYY-MM-DD> [end YYYY-MM-DD]");
            std::process::exit(2);
        }
    };

    let mut client = LpoWeather::new()?;
    let outcome = client.sync_and_fetch(start, end)?;

    if let Some(warning) = outcome.range_warning() {
        eprintln!("warning: {warning}");
    }
    if let Some(summary) = outcome.failure_summary() {
        eprintln!("warning: {summary}");
    }

    eprintln!("{} observations", outcome.len());
    for observation in outcome {
        match serde_json::to_string(&observation) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("failed to encode {}: {e}", observation.date),
        }
    }
    Ok(())
}
