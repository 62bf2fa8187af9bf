use redirgen_core::error::{PipelineError, SUMMARY_LINE};
use redirgen_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr so the CLI doesn't crash.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = Cli::run_from_args() {
        match err.downcast_ref::<PipelineError>() {
            Some(pipeline_err) => {
                tracing::debug!("run failed: {}", pipeline_err);
                for line in pipeline_err.diagnostics() {
                    eprintln!("{line}");
                }
            }
            None => eprintln!("redirgen error: {:#}", err),
        }
        eprintln!("{SUMMARY_LINE}");
        std::process::exit(1);
    }
}
