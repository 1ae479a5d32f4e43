//! `linkvault` binary: the CLI lives in `cli/`, this file only invokes
//! `cli::run()` and sets the exit code.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
