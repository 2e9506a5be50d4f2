//! # Blockworld Entry Point
//!
//! Runs the headless world engine driver from the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    match blockworld::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("blockworld: {err}");
            ExitCode::FAILURE
        }
    }
}
