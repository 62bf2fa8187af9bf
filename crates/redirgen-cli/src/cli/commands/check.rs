//! `redirgen check` – validate the sheet without touching the output file.

use anyhow::Result;
use redirgen_core::config::{Identifiers, Settings};
use redirgen_core::error::PipelineError;
use redirgen_core::pipeline;
use redirgen_core::sheet::SheetSource;

pub fn run_check(ids: &Identifiers, settings: &Settings) -> Result<()> {
    let source = SheetSource::new(ids, &settings.source).map_err(PipelineError::from)?;
    let redirects = pipeline::check(&source)?;
    tracing::info!("{} redirect(s) valid", redirects.len());
    Ok(())
}
