//! `redirgen generate` – fetch, validate, write.

use anyhow::Result;
use redirgen_core::config::{Identifiers, Settings};
use redirgen_core::error::PipelineError;
use redirgen_core::pipeline;
use redirgen_core::sheet::SheetSource;
use std::path::Path;

pub fn run_generate(ids: &Identifiers, settings: &Settings, output: &Path) -> Result<()> {
    let source = SheetSource::new(ids, &settings.source).map_err(PipelineError::from)?;
    let written = pipeline::generate(&source, output)?;
    tracing::info!("generated {} redirect(s) from {}", written, source.url());
    Ok(())
}
