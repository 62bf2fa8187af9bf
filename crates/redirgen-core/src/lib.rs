pub mod config;
pub mod logging;

pub mod emit;
pub mod error;
pub mod pipeline;
pub mod row;
pub mod rules;
pub mod sheet;
