//! Domain types used throughout the pipelines.
//!
//! This module defines:
//!
//! - CSV rows and the realtime output payload (`ResgateRow`, `DataRow`, `Payload`)
//! - the historical output payload (`HistoryPayload`, `HistoryDay`, `HistoryItem`)
//! - title/type -> ticker base classification (`ticker`)

pub mod ticker;
pub mod types;

pub use ticker::{format_ticker, history_ticker_base, infer_ticker_base};
pub use types::*;
