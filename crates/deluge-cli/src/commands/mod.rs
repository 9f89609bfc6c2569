//! Subcommand implementations.

pub mod extent;
pub mod run;
pub mod validate;
