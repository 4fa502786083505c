mod aggregate;
mod cli;
mod client;
mod config;
mod core;
mod errors;
mod models;
mod output;
mod stats;
mod status;

use status::ExitStatus;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Entry point - installs the Ctrl+C flag and calls core::run()
///
/// Returns ExitStatus directly, which implements std::process::Termination.
fn main() -> ExitStatus {
    // Set a flag instead of calling exit() so destructors still run;
    // a second Ctrl+C forces the exit
    ctrlc::set_handler(|| {
        eprintln!("\nInterrupted");
        if INTERRUPTED.swap(true, Ordering::SeqCst) {
            std::process::exit(ExitStatus::Interrupted as i32);
        }
    })
    .ok();

    let args: Vec<String> = std::env::args().collect();
    let status = core::run(args);

    if INTERRUPTED.load(Ordering::SeqCst) {
        return ExitStatus::Interrupted;
    }

    status
}
