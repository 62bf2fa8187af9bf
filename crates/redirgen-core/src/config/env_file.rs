//! Minimal dotenv-style loader for `DOCUMENT_ID` / `SHEET_ID` during local runs.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::ConfigError;

/// Parse `KEY=VALUE` lines. Blank lines, `#` comments and lines without `=`
/// are skipped; an `export ` prefix is allowed; matching single or double
/// quotes around the value are removed.
pub fn parse_env_file(contents: &str) -> Vec<(String, String)> {
    contents.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return None;
    }
    Some((key.to_string(), parse_value(value.trim())))
}

fn parse_value(raw: &str) -> String {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 && bytes[0] == bytes[bytes.len() - 1] {
        match bytes[0] {
            b'"' => return raw[1..raw.len() - 1].replace("\\n", "\n"),
            b'\'' => return raw[1..raw.len() - 1].to_string(),
            _ => {}
        }
    }
    // Unquoted: ` #` starts a trailing comment.
    match raw.find(" #") {
        Some(i) => raw[..i].trim_end().to_string(),
        None => raw.to_string(),
    }
}

/// Load `path` into the process environment without overriding variables
/// that are already set. A missing file is not an error. Returns the number
/// of variables set.
///
/// Call before any threads are spawned.
pub fn load_env_file(path: &Path) -> Result<usize, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut applied = 0;
    for (key, value) in parse_env_file(&contents) {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
            applied += 1;
        }
    }
    tracing::debug!("applied {} variable(s) from {}", applied, path.display());
    Ok(applied)
}
