//! Error taxonomy for the generator pipeline.
//!
//! Configuration and fetch errors abort before any work is done; row errors are
//! collected over the whole sheet first; write errors abort after validation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::rules::RowDiagnostic;

/// Line printed after the diagnostics of every failed run.
pub const SUMMARY_LINE: &str =
    "Please check through the errors above to resolve the issues in this deploy.";

/// Missing or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required environment variables are unset or empty.
    #[error("missing environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot resolve XDG directories: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
}

/// Failure to retrieve or interpret the sheet.
#[derive(Debug, Error)]
pub enum SourceFetchError {
    #[error("invalid sheet URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] curl::Error),
    #[error("sheet request returned HTTP {0}")]
    Http(u32),
    #[error("response body is not UTF-8")]
    NotUtf8,
    #[error("response does not contain a gviz payload")]
    MissingPayload,
    #[error("malformed gviz payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sheet query failed: {0}")]
    Remote(String),
    #[error("sheet is missing column(s): {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
}

/// The output file could not be persisted.
#[derive(Debug, Error)]
#[error("failed to write {}: {source}", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Any fatal outcome of a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not read spreadsheet: {0}")]
    Fetch(#[from] SourceFetchError),
    #[error("{} spreadsheet error(s)", .0.len())]
    InvalidRows(Vec<RowDiagnostic>),
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl PipelineError {
    /// Operator-facing lines for this failure, in the order they should be printed.
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            PipelineError::Config(ConfigError::MissingEnv(names)) => names
                .iter()
                .map(|name| format!("ENV VAR ERROR - {name} is missing from the Environment Variables"))
                .collect(),
            PipelineError::Config(e) => vec![format!("CONFIG ERROR - {e}")],
            PipelineError::Fetch(e) => vec![format!("SOURCE ERROR - {e}")],
            PipelineError::InvalidRows(rows) => rows.iter().map(ToString::to_string).collect(),
            PipelineError::Write(e) => vec![format!("WRITE ERROR - {e}")],
        }
    }
}
