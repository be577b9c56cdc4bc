//! Command-line interface definition using clap.
//!
//! Every configuration key can also be given as a flag; flags override the
//! configuration file key-by-key.
//!
//! ```rust
//! use clap::Parser;
//! use smsfilter::cli::Args;
//!
//! let args = Args::parse_from(["smsfilter", "--input", "sms.csv", "--utc"]);
//! let overrides = args.overrides();
//! assert_eq!(overrides.input_file_path.as_deref(), Some("sms.csv".as_ref()));
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::{PartialConfig, TimeZoneMode};

/// Filter an SMS-style CSV log by date ranges and users, and write
/// per-user interaction statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "smsfilter")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    smsfilter
    smsfilter --config filters/sms.toml
    smsfilter -i export.csv --date-column 4 --address-column 2 --utc
    RUST_LOG=smsfilter=debug smsfilter")]
pub struct Args {
    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Input CSV log
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Filtered output CSV
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Unsorted output CSV
    #[arg(long, value_name = "PATH")]
    pub unsorted: Option<PathBuf>,

    /// Statistics output JSON
    #[arg(long, value_name = "PATH")]
    pub statistics: Option<PathBuf>,

    /// Zero-based column holding the epoch-millisecond timestamp
    #[arg(long, value_name = "INDEX")]
    pub date_column: Option<usize>,

    /// Zero-based column holding the user address
    #[arg(long, value_name = "INDEX")]
    pub address_column: Option<usize>,

    /// strftime-style format for the selectable dates (e.g. %Y-%m-%d)
    #[arg(long, value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Convert timestamps to UTC instead of local time
    #[arg(long)]
    pub utc: bool,

    /// Show debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Configuration keys given on the command line.
    pub fn overrides(&self) -> PartialConfig {
        PartialConfig {
            input_file_path: self.input.clone(),
            output_file_path: self.output.clone(),
            unsorted_file_path: self.unsorted.clone(),
            statistics_file_path: self.statistics.clone(),
            date_column_index: self.date_column,
            address_column_index: self.address_column,
            date_format: self.date_format.clone(),
            timezone: self.utc.then_some(TimeZoneMode::Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_no_overrides() {
        let args = Args::parse_from(["smsfilter"]);
        assert_eq!(args.overrides(), PartialConfig::default());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "smsfilter",
            "-c",
            "cfg.toml",
            "-i",
            "in.csv",
            "-o",
            "out.csv",
            "--unsorted",
            "all.csv",
            "--statistics",
            "stats.json",
            "--date-column",
            "4",
            "--address-column",
            "2",
            "--date-format",
            "%d.%m.%Y",
            "--utc",
            "-v",
        ]);

        assert_eq!(args.config, Some(PathBuf::from("cfg.toml")));
        assert!(args.verbose);

        let overrides = args.overrides();
        assert_eq!(overrides.input_file_path, Some(PathBuf::from("in.csv")));
        assert_eq!(overrides.output_file_path, Some(PathBuf::from("out.csv")));
        assert_eq!(overrides.unsorted_file_path, Some(PathBuf::from("all.csv")));
        assert_eq!(overrides.statistics_file_path, Some(PathBuf::from("stats.json")));
        assert_eq!(overrides.date_column_index, Some(4));
        assert_eq!(overrides.address_column_index, Some(2));
        assert_eq!(overrides.date_format.as_deref(), Some("%d.%m.%Y"));
        assert_eq!(overrides.timezone, Some(TimeZoneMode::Utc));
    }

    #[test]
    fn test_rejects_negative_column() {
        assert!(Args::try_parse_from(["smsfilter", "--date-column", "-1"]).is_err());
    }
}
