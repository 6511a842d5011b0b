//! filekeep CLI entry point
//!
//! This is a minimal entrypoint that:
//! 1. Runs the CLI (argument parsing, config, dispatch)
//! 2. Reports failures as a JSON error response
//! 3. Exits with non-zero on failure

use filekeep::cli;

fn main() {
    if let Err(e) = cli::run() {
        if cli::write_error(e.code_str(), e.message()).is_err() {
            eprintln!("{}", e);
        }
        std::process::exit(1);
    }
}
