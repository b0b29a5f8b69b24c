//! Subcommand implementations.

pub mod batch;
pub mod best;
pub mod predict;
pub mod prepare;
pub mod train;
