//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - JSON output and previous-run reads (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
