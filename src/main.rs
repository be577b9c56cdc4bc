//! # smsfilter CLI
//!
//! Interactive front end for the smsfilter library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use smsfilter::SmsFilterError;
use smsfilter::cli::Args;
use smsfilter::config::Config;
use smsfilter::console::Console;
use smsfilter::core::processor;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), SmsFilterError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    let config = Config::load(args.config.as_deref(), args.overrides())?;

    // Print header
    println!("📱 smsfilter v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:      {}", config.input_file_path.display());
    println!("💾 Filtered:   {}", config.output_file_path.display());
    println!("💾 Unsorted:   {}", config.unsorted_file_path.display());
    println!("📊 Statistics: {}", config.statistics_file_path.display());
    println!("📅 Dates:      {} ({} time)", config.date_format, config.timezone);
    println!();

    let mut console = Console::stdio();
    let summary = processor::run(&config, &mut console)?;

    println!();
    println!("✅ Done!");

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Rows read:   {}", summary.load.rows_read);
    if !summary.load.skipped.is_empty() {
        println!("   Skipped:     {} rows", summary.load.skipped.len());
    }
    println!("   Records:     {}", summary.records);
    println!(
        "   Matched:     {} ({:.1}%)",
        summary.matched,
        summary.match_ratio()
    );
    println!("   Users:       {}", summary.users);
    println!("   Ranges:      {}", summary.ranges.len());
    println!(
        "   Total time:  {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Diagnostics go to stderr so they never interleave with the prompts.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "smsfilter=debug"
    } else {
        "smsfilter=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
