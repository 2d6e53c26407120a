//! Command-line interface for vidfolio.

mod commands;
pub mod icons;

pub use commands::{is_verbose, run};
