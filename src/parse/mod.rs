//! Text-level parsers shared by both pipelines.
//!
//! - inline JavaScript variable extraction (`js_var`)
//! - portal timestamps (`timestamp`)
//! - pt-BR money/percent/date values (`locale`)

pub mod js_var;
pub mod locale;
pub mod timestamp;

pub use js_var::extract_js_var;
pub use locale::{LocaleError, parse_brl, parse_pt_number, parse_yield_percent, reformat_date};
pub use timestamp::{TimestampError, format_timestamp, now_sao_paulo, parse_portal_timestamp};
