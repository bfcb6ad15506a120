use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;

pub const DEFAULT_BACKING_STORE: &str = "BACKING_STORE.bin";

/// What to do when a page cannot be read from the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FaultPolicy {
    /// Stop the run with an error.
    #[default]
    Abort,
    /// Report the address, skip it and continue with the next one.
    Skip,
}

#[derive(Parser, Debug)]
#[command(name = "vmm")]
#[command(about = "Translates logical addresses through a TLB and page table with demand paging")]
#[command(version)]
pub struct Cli {
    /// File of whitespace separated logical addresses (0..=65535)
    pub input: PathBuf,

    /// Backing store file of concatenated 256-byte pages
    #[arg(short, long, default_value = DEFAULT_BACKING_STORE)]
    pub backing_store: PathBuf,

    /// Policy for backing store read failures during a page fault
    #[arg(long, value_enum, default_value_t = FaultPolicy::Abort)]
    pub on_fault_error: FaultPolicy,

    /// Do not print the statistics summary
    #[arg(long)]
    pub no_summary: bool,

    /// Increase logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub backing_store: PathBuf,
    pub fault_policy: FaultPolicy,
    pub summary: bool,
    pub log_level: LevelFilter,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let log_level = match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        Config {
            input: cli.input,
            backing_store: cli.backing_store,
            fault_policy: cli.on_fault_error,
            summary: !cli.no_summary,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Cli::try_parse_from(args).map(Config::from)
    }

    #[test]
    fn defaults() {
        let config = parse(&["vmm", "addresses.txt"]).unwrap();
        assert_eq!(config.input, PathBuf::from("addresses.txt"));
        assert_eq!(config.backing_store, PathBuf::from("BACKING_STORE.bin"));
        assert_eq!(config.fault_policy, FaultPolicy::Abort);
        assert!(config.summary);
        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn all_options() {
        let config = parse(&[
            "vmm",
            "-vv",
            "--backing-store",
            "pages.bin",
            "--on-fault-error",
            "skip",
            "--no-summary",
            "in.txt",
        ])
        .unwrap();
        assert_eq!(config.input, PathBuf::from("in.txt"));
        assert_eq!(config.backing_store, PathBuf::from("pages.bin"));
        assert_eq!(config.fault_policy, FaultPolicy::Skip);
        assert!(!config.summary);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn wrong_argument_count_is_a_usage_error() {
        let err = parse(&["vmm"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let err = parse(&["vmm", "a.txt", "b.txt"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unknown_policy_rejected() {
        assert!(parse(&["vmm", "--on-fault-error", "retry", "a.txt"]).is_err());
    }
}
