//! The single pass: fetch rows, validate all of them, then emit or fail.
//!
//! Nothing is written unless every row is valid.

use std::path::Path;

use crate::emit;
use crate::error::PipelineError;
use crate::row::Redirect;
use crate::rules;
use crate::sheet::RowSource;

/// Fetch and validate every row. Row failures are collected over the whole
/// sheet before returning [`PipelineError::InvalidRows`].
pub fn check<S: RowSource + ?Sized>(source: &S) -> Result<Vec<Redirect>, PipelineError> {
    let rows = source.fetch_rows()?;
    let report = rules::validate_rows(&rows);
    if !report.is_clean() {
        tracing::warn!(
            rows = rows.len(),
            errors = report.diagnostics.len(),
            "sheet has invalid rows"
        );
        return Err(PipelineError::InvalidRows(report.diagnostics));
    }
    tracing::debug!(rows = rows.len(), "all rows valid");
    Ok(report.valid)
}

/// [`check`], then render and atomically write the config to `output`.
/// Returns the number of redirects written.
pub fn generate<S: RowSource + ?Sized>(source: &S, output: &Path) -> Result<usize, PipelineError> {
    let redirects = check(source)?;
    let document = emit::render(&redirects);
    emit::write_atomic(output, &document)?;
    tracing::info!(
        redirects = redirects.len(),
        "wrote {}",
        output.display()
    );
    Ok(redirects.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceFetchError;
    use crate::row::RedirectRow;
    use crate::rules::{RowDiagnostic, RowField};
    use std::cell::Cell;
    use std::fs;

    struct StaticRows {
        rows: Vec<RedirectRow>,
        fetches: Cell<usize>,
    }

    impl StaticRows {
        fn new(rows: Vec<RedirectRow>) -> Self {
            Self {
                rows,
                fetches: Cell::new(0),
            }
        }
    }

    impl RowSource for StaticRows {
        fn fetch_rows(&self) -> Result<Vec<RedirectRow>, SourceFetchError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.rows.clone())
        }
    }

    struct FailingSource;

    impl RowSource for FailingSource {
        fn fetch_rows(&self) -> Result<Vec<RedirectRow>, SourceFetchError> {
            Err(SourceFetchError::Http(500))
        }
    }

    fn row(from: &str, to: &str, status: i64) -> RedirectRow {
        RedirectRow::new(from, to, Some(status))
    }

    #[test]
    fn single_valid_row_writes_one_block() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("netlify.toml");
        let source = StaticRows::new(vec![row("/a", "https://example.com", 301)]);

        assert_eq!(generate(&source, &out).unwrap(), 1);
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "[[redirects]]\n  from = \"/a\"\n  to = \"https://example.com\"\n  status = 301\n\n"
        );
        assert_eq!(source.fetches.get(), 1);
    }

    #[test]
    fn invalid_row_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("netlify.toml");
        let source = StaticRows::new(vec![row("a", "https://example.com", 301)]);

        match generate(&source, &out) {
            Err(PipelineError::InvalidRows(diags)) => {
                assert_eq!(diags, vec![RowDiagnostic { row: 1, field: RowField::From }]);
            }
            other => panic!("expected InvalidRows, got {other:?}"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn invalid_row_leaves_previous_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("netlify.toml");
        fs::write(&out, "previous").unwrap();
        let source = StaticRows::new(vec![
            row("/ok", "https://example.com", 301),
            row("/a", "https://example.com", 404),
        ]);

        let err = generate(&source, &out).unwrap_err();
        assert_eq!(
            err.diagnostics(),
            vec!["SPREADSHEET ERROR - Invalid Status Code on Spreadsheet Row 2"]
        );
        assert_eq!(fs::read_to_string(&out).unwrap(), "previous");
    }

    #[test]
    fn fetch_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("netlify.toml");
        assert!(matches!(
            generate(&FailingSource, &out),
            Err(PipelineError::Fetch(SourceFetchError::Http(500)))
        ));
        assert!(!out.exists());
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("netlify.toml");
        let source = StaticRows::new(vec![row("/a", "https://example.com", 301)]);
        assert!(matches!(generate(&source, &out), Err(PipelineError::Write(_))));
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("netlify.toml");
        let source = StaticRows::new(vec![
            row("/one", "https://example.com/1", 301),
            row("/two", "https://example.com/2", 302),
        ]);

        generate(&source, &out).unwrap();
        let first = fs::read(&out).unwrap();
        generate(&source, &out).unwrap();
        assert_eq!(fs::read(&out).unwrap(), first);
    }

    #[test]
    fn empty_sheet_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("netlify.toml");
        assert_eq!(generate(&StaticRows::new(Vec::new()), &out).unwrap(), 0);
        assert_eq!(fs::read_to_string(&out).unwrap(), "");
    }

    #[test]
    fn check_returns_redirects_without_writing() {
        let source = StaticRows::new(vec![
            row("/b", "https://example.com/b", 302),
            row("/a", "https://example.com/a", 301),
        ]);
        let redirects = check(&source).unwrap();
        let froms: Vec<_> = redirects.iter().map(|r| r.from.as_str()).collect();
        assert_eq!(froms, vec!["/b", "/a"]);
    }
}
