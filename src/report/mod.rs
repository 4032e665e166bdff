//! Payload assembly: CSV rows -> normalized rows + run metadata.

use tracing::debug;

use crate::config::REALTIME_SOURCE;
use crate::domain::{DataRow, Meta, Payload, ResgateRow, format_ticker, infer_ticker_base};
use crate::parse::{parse_yield_percent, reformat_date};

pub mod format;
pub mod history;

pub use format::*;
pub use history::*;

/// Keep rows whose title contains `needle` (case-insensitive).
///
/// `needle` is expected lower-cased and trimmed (see `PortalConfig::with_contains`);
/// an empty needle keeps everything.
pub fn filter_contains(rows: Vec<ResgateRow>, needle: &str) -> Vec<ResgateRow> {
    if needle.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|r| r.titulo.to_lowercase().contains(needle))
        .collect()
}

/// Normalize CSV rows. Rows whose maturity cannot be reformatted are dropped.
pub fn build_data_rows(rows: &[ResgateRow]) -> Vec<DataRow> {
    let mut out = Vec::with_capacity(rows.len());
    for r in rows {
        let maturity = reformat_date(&r.vencimento);
        if maturity.is_empty() {
            debug!(titulo = %r.titulo, vencimento = %r.vencimento, "dropping row with unparsable maturity");
            continue;
        }

        out.push(DataRow {
            ticker: format_ticker(infer_ticker_base(&r.titulo), &maturity),
            preco_atual: r.preco_resgate,
            yield_atual: parse_yield_percent(&r.rendimento_anual),
        });
    }
    out
}

/// Assemble the realtime payload.
///
/// `last_price_change_at` is best-effort: pass an empty string when unknown.
pub fn assemble_payload(
    rows: &[ResgateRow],
    source_url: &str,
    last_run_at: String,
    last_price_change_at: String,
) -> Payload {
    let data = build_data_rows(rows);
    Payload {
        meta: Meta {
            source: REALTIME_SOURCE.to_string(),
            source_url: source_url.to_string(),
            last_run_at,
            last_price_change_at,
            rows: data.len(),
        },
        data,
    }
}
