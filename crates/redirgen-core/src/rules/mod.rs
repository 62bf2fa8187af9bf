//! Row validation: three independent checks per row, collected over the whole sheet.

mod shape;

pub use shape::{is_absolute_url, is_relative_url};

use std::fmt;

use crate::row::{Redirect, RedirectRow};

/// Status codes a redirect may use.
pub const ALLOWED_STATUS_CODES: [i64; 2] = [301, 302];

/// True if `status` is one of [`ALLOWED_STATUS_CODES`].
pub fn is_allowed_status(status: i64) -> bool {
    ALLOWED_STATUS_CODES.contains(&status)
}

/// Which field of a row failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    From,
    To,
    Status,
}

impl RowField {
    fn label(self) -> &'static str {
        match self {
            RowField::From => "From URL",
            RowField::To => "To URL",
            RowField::Status => "Status Code",
        }
    }
}

/// One failed check on one row. `row` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowDiagnostic {
    pub row: usize,
    pub field: RowField,
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SPREADSHEET ERROR - Invalid {} on Spreadsheet Row {}",
            self.field.label(),
            self.row
        )
    }
}

/// Per-row result of the three checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub from_ok: bool,
    pub to_ok: bool,
    /// The status code when it is an allowed redirect status.
    pub status: Option<u16>,
}

impl ValidationOutcome {
    pub fn passed(&self) -> bool {
        self.from_ok && self.to_ok && self.status.is_some()
    }

    /// Failing fields in From, To, Status order.
    pub fn failures(&self) -> impl Iterator<Item = RowField> {
        [
            (self.from_ok, RowField::From),
            (self.to_ok, RowField::To),
            (self.status.is_some(), RowField::Status),
        ]
        .into_iter()
        .filter_map(|(ok, field)| (!ok).then_some(field))
    }

    /// The validated redirect; `Some` exactly when [`passed`](Self::passed).
    pub fn redirect(&self, row: &RedirectRow) -> Option<Redirect> {
        match self.status {
            Some(status) if self.from_ok && self.to_ok => Some(Redirect {
                from: row.from.clone(),
                to: row.to.clone(),
                status,
            }),
            _ => None,
        }
    }
}

/// Run all three checks on a row.
pub fn check_row(row: &RedirectRow) -> ValidationOutcome {
    ValidationOutcome {
        from_ok: is_relative_url(&row.from),
        to_ok: is_absolute_url(&row.to),
        status: row
            .status
            .filter(|s| is_allowed_status(*s))
            .and_then(|s| u16::try_from(s).ok()),
    }
}

/// Result of validating every row of a sheet.
#[derive(Debug, Default)]
pub struct Report {
    /// Rows that passed, in source order.
    pub valid: Vec<Redirect>,
    /// Every failed check, in source row order.
    pub diagnostics: Vec<RowDiagnostic>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Validate every row; never stops at the first failure.
pub fn validate_rows(rows: &[RedirectRow]) -> Report {
    let mut report = Report::default();
    for (index, row) in rows.iter().enumerate() {
        let outcome = check_row(row);
        match outcome.redirect(row) {
            Some(redirect) => report.valid.push(redirect),
            None => {
                let spreadsheet_row = index + 1;
                for field in outcome.failures() {
                    tracing::warn!(row = spreadsheet_row, ?field, "invalid redirect row");
                    report.diagnostics.push(RowDiagnostic {
                        row: spreadsheet_row,
                        field,
                    });
                }
            }
        }
    }
    report
}
