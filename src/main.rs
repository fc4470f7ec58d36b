//! readspeed-presets binary
//!
//! For help: cargo run -- --help

use clap::Parser;
use readspeed_presets::{Cli, PresetError, run_with_cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_with_cli(&cli) {
        match e.downcast_ref::<PresetError>() {
            Some(err) => eprintln!("Error: {} ({})", err, err.error_code().code()),
            None => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}
