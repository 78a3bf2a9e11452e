//! CLI subcommand implementations.

pub mod configure;
pub mod doctor;
