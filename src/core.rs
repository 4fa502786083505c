//! Top-level execution logic
//!
//! Parses arguments, builds the runtime, runs the fetch/aggregate/report
//! pipeline and routes errors: usage errors print tersely on stdout, runtime
//! errors surface the underlying error on stderr.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::aggregate::aggregate;
use crate::cli::Args;
use crate::client::ApiClient;
use crate::config::FilterConfig;
use crate::errors::{MigstatError, Result};
use crate::output::Reporter;
use crate::status::ExitStatus;

/// Main entry point for the CLI.
pub fn run(args: Vec<String>) -> ExitStatus {
    init_logging();

    let parsed = match Args::try_parse_from(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.print().ok();
                return ExitStatus::Success;
            }
            // Same terse stdout form as value validation errors
            let rendered = e.to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or("invalid arguments")
                .trim_start_matches("error: ");
            println!("Error: {}", message);
            return ExitStatus::Error;
        }
    };

    let config = match FilterConfig::from_args(&parsed) {
        Ok(config) => config,
        Err(e) => return handle_error(e, parsed.traceback),
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return handle_error(e.into(), parsed.traceback),
    };

    match runtime.block_on(program(&parsed, &config)) {
        Ok(()) => ExitStatus::Success,
        Err(e) => handle_error(e, parsed.traceback),
    }
}

/// Fetch, aggregate and render.
async fn program(args: &Args, config: &FilterConfig) -> Result<()> {
    let client = ApiClient::new(&args.api_base)?;

    let institutions = client.institutions().await?;
    let decisions = client.decisions(config).await?;
    let rows = aggregate(&institutions, &decisions)?;

    let color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
    let reporter = Reporter::new(color);
    let stdout = std::io::stdout();
    reporter.render(&mut stdout.lock(), config, &rows)?;
    Ok(())
}

/// Usage errors go to stdout in the terse `Error: ...` form; everything else
/// surfaces the underlying error on stderr (Debug form under --traceback).
fn handle_error(error: MigstatError, traceback: bool) -> ExitStatus {
    if error.is_usage_error() {
        println!("Error: {}", error);
    } else if traceback {
        eprintln!("Error: {:?}", error);
    } else {
        eprintln!("Error: {}", error);
    }
    ExitStatus::Error
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("MIGSTAT_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
