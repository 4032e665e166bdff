//! Remote data sources.

pub mod portal;

pub use portal::{HistoryClient, PortalClient, last_pricing_date_from_html};
