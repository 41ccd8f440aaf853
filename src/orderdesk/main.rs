//! Binary entry point. All CLI logic lives in the `cli` module; this file only maps a
//! failed run to a non-zero exit.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
