//! CLI library components for the roster importer.

pub mod logging;
pub mod pipeline;
