//! Row records flowing from the sheet through validation to the emitter.

/// One candidate redirect rule as read from the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RedirectRow {
    /// Site-relative source path. Empty when the cell was blank.
    pub from: String,
    /// Absolute destination URL. Empty when the cell was blank.
    pub to: String,
    /// Status code, or `None` when the cell was blank or not an integer.
    pub status: Option<i64>,
}

impl RedirectRow {
    pub fn new(from: impl Into<String>, to: impl Into<String>, status: Option<i64>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            status,
        }
    }
}

/// A row that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub from: String,
    pub to: String,
    pub status: u16,
}
