//! CLI command handlers.

mod check;
mod generate;

pub use check::run_check;
pub use generate::run_generate;
