//! `regroup` — migrate static device groups between two monitoring
//! system instances.
//!
//! Configuration is prompt-driven: the session asks for a source key
//! file, a destination key file, and an optional group-name filter.
//! Every fatal error prints to stderr and exits with code 1; normal
//! completion exits 0.

mod prompt;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use regroup_core::client::RestClient;
use regroup_core::migrate;

/// Migrate static device groups and their member devices from one
/// monitoring system instance to another.
#[derive(Parser)]
#[command(
    name = "regroup",
    version,
    about = "Migrate static device groups and their member devices between monitoring system instances"
)]
struct Cli {}

fn main() {
    // No options beyond --help/--version; the session is interactive.
    let _ = Cli::parse();

    let source = client_from_prompt("Path to the source system key file:", "source");
    let destination = client_from_prompt("Path to the destination system key file:", "destination");
    let filter = ask_or_exit("Device group name filter (blank for all):");

    let mut stdout = std::io::stdout();
    if let Err(e) = migrate::run_migration(&source, &destination, &filter, &mut stdout) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn client_from_prompt(question: &str, label: &str) -> RestClient {
    let path = PathBuf::from(ask_or_exit(question));
    match RestClient::from_key_file(&path, label) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn ask_or_exit(question: &str) -> String {
    match prompt::ask(question) {
        Ok(answer) => answer,
        Err(e) => {
            eprintln!("error reading input: {e}");
            process::exit(1);
        }
    }
}
