//! Sheet identifiers, read once from the environment at startup.

use crate::error::ConfigError;

pub const DOCUMENT_ID: &str = "DOCUMENT_ID";
pub const SHEET_ID: &str = "SHEET_ID";

/// Which spreadsheet document and which tab inside it to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifiers {
    pub document_id: String,
    pub sheet_id: String,
}

impl Identifiers {
    /// Read `DOCUMENT_ID` and `SHEET_ID` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup. Unset and empty values are both missing;
    /// every missing name is reported in one error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        match (get(DOCUMENT_ID), get(SHEET_ID)) {
            (Some(document_id), Some(sheet_id)) => Ok(Self {
                document_id,
                sheet_id,
            }),
            (document_id, sheet_id) => {
                let mut missing = Vec::new();
                if document_id.is_none() {
                    missing.push(DOCUMENT_ID);
                }
                if sheet_id.is_none() {
                    missing.push(SHEET_ID);
                }
                Err(ConfigError::MissingEnv(missing))
            }
        }
    }
}
