//! Usage: vmm [OPTIONS] <INPUT>
//!
//! Exit status: 0 success, 1 input file unavailable, 2 invalid invocation,
//! 3 invalid address in the input, 4 backing store unavailable, 5 backing
//! store read failed, 6 out of frames, 7 address or index out of range.

use std::process::ExitCode;

use backing_store::BackingStore;
use clap::Parser;
use log::info;
use vmm::config::{Cli, Config};
use vmm::input::read_addresses;
use vmm::{DefaultTranslator, Outcome};

fn main() -> ExitCode {
    let config = Config::from(Cli::parse());
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run(config: &Config) -> vmm::Result<()> {
    let addresses = read_addresses(&config.input)?;
    info!(
        "Read {} logical addresses from {}",
        addresses.len(),
        config.input.display()
    );
    let store = BackingStore::open(&config.backing_store)?;

    let mut translator = DefaultTranslator::new(store, config.fault_policy);
    let stats = translator.run(addresses, |outcome| match outcome {
        Outcome::Translated(translation) => println!("{}", translation),
        Outcome::Skipped { logical, error } => {
            eprintln!("Skipped Logical Address: {}, {}", logical, error)
        }
    })?;

    if config.summary {
        println!("{}", stats);
    }
    Ok(())
}
