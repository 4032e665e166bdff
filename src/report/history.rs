//! Historical series: base-date window, grouping and change detection.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::HISTORY_SOURCE;
use crate::domain::{DateRange, HistoryDay, HistoryItem, HistoryMeta, HistoryPayload};
use crate::io::ingest::HistoryRow;

/// Group rows by base date, keeping only the latest `days` distinct base dates.
///
/// Days come out in ascending date order, items sorted by ticker, numbers
/// rounded to 6 decimals so consecutive runs compare cleanly.
pub fn group_last_days(rows: &[HistoryRow], days: usize) -> Vec<HistoryDay> {
    let bases: BTreeSet<&str> = rows.iter().map(|r| r.data_base.as_str()).collect();
    let skip = bases.len().saturating_sub(days);
    let window: BTreeSet<&str> = bases.into_iter().skip(skip).collect();

    let mut grouped: BTreeMap<&str, Vec<HistoryItem>> = BTreeMap::new();
    for r in rows.iter().filter(|r| window.contains(r.data_base.as_str())) {
        grouped.entry(r.data_base.as_str()).or_default().push(HistoryItem {
            tipo_titulo: r.tipo_titulo.clone(),
            vencimento: r.vencimento.clone(),
            ticker: r.ticker.clone(),
            taxa_venda: r.taxa_venda,
            pu_venda: r.pu_venda,
        });
    }

    let out: Vec<HistoryDay> = grouped
        .into_iter()
        .map(|(data_base, items)| HistoryDay {
            data_base: data_base.to_string(),
            items,
        })
        .collect();
    normalize_days(out)
}

/// Canonical ordering/rounding applied both to fresh data and to the
/// previous file before comparing them.
pub fn normalize_days(mut days: Vec<HistoryDay>) -> Vec<HistoryDay> {
    for day in &mut days {
        for item in &mut day.items {
            item.taxa_venda = round6(item.taxa_venda);
            item.pu_venda = round6(item.pu_venda);
        }
        day.items.sort_by(|a, b| a.ticker.cmp(&b.ticker));
    }
    days.sort_by(|a, b| a.data_base.cmp(&b.data_base));
    days
}

/// Decide `last_data_change_at` from the previous run's output.
///
/// Returns the timestamp and whether the data changed.
pub fn resolve_last_change(
    data: &[HistoryDay],
    previous: Option<HistoryPayload>,
    run_ts: &str,
) -> (String, bool) {
    let Some(previous) = previous else {
        return (run_ts.to_string(), true);
    };

    if normalize_days(previous.data) != data {
        return (run_ts.to_string(), true);
    }

    let last = Some(previous.meta.last_data_change_at)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| run_ts.to_string());
    (last, false)
}

pub fn assemble_history_payload(
    data: Vec<HistoryDay>,
    source_url: &str,
    last_run_at: String,
    last_data_change_at: String,
) -> HistoryPayload {
    let range = DateRange {
        from: data.first().map(|d| d.data_base.clone()),
        to: data.last().map(|d| d.data_base.clone()),
    };

    HistoryPayload {
        meta: HistoryMeta {
            source: HISTORY_SOURCE.to_string(),
            source_url: source_url.to_string(),
            last_run_at,
            last_data_change_at,
            unique_databases: data.len(),
            range,
        },
        data,
    }
}

fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hrow(base: &str, ticker: &str, taxa: f64) -> HistoryRow {
        HistoryRow {
            data_base: base.to_string(),
            tipo_titulo: "Tesouro Selic".to_string(),
            vencimento: "2029-03-01".to_string(),
            ticker: ticker.to_string(),
            taxa_venda: taxa,
            pu_venda: 100.0,
        }
    }

    fn sample_rows() -> Vec<HistoryRow> {
        vec![
            hrow("2026-01-05", "LTN 2031-01-01", 12.0),
            hrow("2026-01-02", "LFT 2029-03-01", 0.1),
            hrow("2026-01-05", "LFT 2029-03-01", 0.0800000004),
            hrow("2026-01-03", "LFT 2029-03-01", 0.09),
        ]
    }

    #[test]
    fn keeps_latest_days_sorted() {
        let days = group_last_days(&sample_rows(), 2);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].data_base, "2026-01-03");
        assert_eq!(days[1].data_base, "2026-01-05");
        let tickers: Vec<&str> = days[1].items.iter().map(|i| i.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["LFT 2029-03-01", "LTN 2031-01-01"]);
        assert_eq!(days[1].items[0].taxa_venda, 0.08);
    }

    #[test]
    fn window_larger_than_history_keeps_all() {
        assert_eq!(group_last_days(&sample_rows(), 180).len(), 3);
        assert!(group_last_days(&[], 180).is_empty());
    }

    #[test]
    fn unchanged_data_keeps_previous_change_time() {
        let days = group_last_days(&sample_rows(), 180);
        let previous = assemble_history_payload(
            days.clone(),
            "u",
            "2026-01-05T10:00:00-03:00".to_string(),
            "2026-01-04T10:00:00-03:00".to_string(),
        );

        let (last, changed) = resolve_last_change(&days, Some(previous), "2026-01-06T10:00:00-03:00");
        assert!(!changed);
        assert_eq!(last, "2026-01-04T10:00:00-03:00");
    }

    #[test]
    fn changed_or_missing_previous_uses_run_time() {
        let days = group_last_days(&sample_rows(), 180);
        let (last, changed) = resolve_last_change(&days, None, "T1");
        assert!(changed);
        assert_eq!(last, "T1");

        let other = group_last_days(&sample_rows(), 1);
        let previous = assemble_history_payload(other, "u", "T0".to_string(), "T0".to_string());
        let (last, changed) = resolve_last_change(&days, Some(previous), "T1");
        assert!(changed);
        assert_eq!(last, "T1");
    }

    #[test]
    fn range_follows_data() {
        let days = group_last_days(&sample_rows(), 180);
        let payload = assemble_history_payload(days, "u", "T".to_string(), "T".to_string());
        assert_eq!(payload.meta.unique_databases, 3);
        assert_eq!(payload.meta.range.from.as_deref(), Some("2026-01-02"));
        assert_eq!(payload.meta.range.to.as_deref(), Some("2026-01-05"));
        assert_eq!(payload.meta.source, "tesourotransparente.gov.br (CKAN)");

        let empty = assemble_history_payload(Vec::new(), "u", "T".to_string(), "T".to_string());
        assert_eq!(empty.meta.range, DateRange { from: None, to: None });
    }
}
