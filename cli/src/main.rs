//! CLI driving r-looplib effect loops through canned scenarios
//!
//! Each scenario dispatches a fixed list of actions into an installed store,
//! waits for every effect to settle, and prints the final model.
//!
//! # Examples
//!
//! ```bash
//! # help menu
//! r-loopcli --help
//!
//! # fetch three items, one at a time
//! r-loopcli --scenario fetch --count 3 --delay 100ms
//!
//! # watch every dispatch, including those triggered by effects
//! r-loopcli --scenario batch --log-dispatch
//! ```
use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use itertools::Itertools;
use log::*;

mod scenario;

use scenario::{Report, Scenario};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// CLI driving r-looplib effect loops through canned scenarios
struct Args {
    /// Scenario to run
    #[arg(short, long, value_enum, default_value_t = Scenario::Fetch)]
    scenario: Scenario,

    /// Number of items the scenario works on
    #[arg(short, long, default_value_t = 3)]
    count: u32,

    /// Delay applied to every simulated remote call (e.g. 250ms, 1s)
    #[arg(long, default_value = "250ms")]
    delay: humantime::Duration,

    /// Output final report in json instead of table text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Only print final output nothing else
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Logs every action reaching the store, including effect results
    #[arg(long, default_value_t = false)]
    log_dispatch: bool,

    /// Prints debug logs including those from r-looplib
    #[arg(long, default_value_t = false)]
    debug: bool,
}

#[doc(hidden)]
fn initialize_logger(args: &Args) -> Result<()> {
    let filter = if args.quiet {
        simplelog::LevelFilter::Error
    } else if args.debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    simplelog::TermLogger::init(
        filter,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[doc(hidden)]
fn print_args(args: &Args) {
    info!("configuration:");
    info!("scenario:     {:?}", args.scenario);
    info!("count:        {}", args.count);
    info!("delay:        {}", args.delay);
    info!("json:         {}", args.json);
    info!("quiet:        {}", args.quiet);
    info!("log_dispatch: {}", args.log_dispatch);
}

#[doc(hidden)]
fn print_report(args: &Args, report: &Report) -> Result<()> {
    info!("{} results:", report.scenario);

    if args.json {
        let j: String = serde_json::to_string(report)?;
        println!("{}", j);
    } else {
        let mut table = prettytable::Table::new();

        table.add_row(prettytable::row![
            "SCENARIO", "COUNT", "PENDING", "FETCHED", "ERROR",
        ]);

        table.add_row(prettytable::row![
            report.scenario,
            report.model.count,
            report.model.pending,
            report.model.fetched.iter().join(", "),
            report.error.as_deref().unwrap_or("-"),
        ]);

        table.printstd();
    }

    Ok(())
}

#[doc(hidden)]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    initialize_logger(&args)?;

    print_args(&args);

    let report = scenario::run(
        args.scenario,
        args.count,
        args.delay.into(),
        args.log_dispatch,
    )
    .await
    .map_err(|err| eyre!("failed to run scenario: {err}"))?;

    print_report(&args, &report)?;

    match &report.error {
        Some(err) => Err(eyre!("scenario {} failed: {}", report.scenario, err)),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "./main_tests.rs"]
mod tests;
