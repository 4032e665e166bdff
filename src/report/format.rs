//! One-line terminal summaries printed after a successful run.

use std::path::Path;

use crate::domain::HistoryPayload;

/// Confirmation line for the realtime pipeline.
pub fn format_saved(path: &Path) -> String {
    format!("Salvou em {}", path.display())
}

/// Summary line for the history pipeline.
pub fn format_history_summary(path: &Path, payload: &HistoryPayload, changed: bool) -> String {
    let rows_total: usize = payload.data.iter().map(|d| d.items.len()).sum();
    let range = &payload.meta.range;
    format!(
        "OK: wrote {} dates={} rows_total={} changed={} range={}..{}",
        path.display(),
        payload.data.len(),
        rows_total,
        changed,
        range.from.as_deref().unwrap_or("-"),
        range.to.as_deref().unwrap_or("-"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HistoryDay, HistoryItem};
    use crate::report::assemble_history_payload;

    #[test]
    fn saved_line_names_path() {
        assert_eq!(
            format_saved(Path::new("output/td_realtime_resgatar.json")),
            "Salvou em output/td_realtime_resgatar.json"
        );
    }

    #[test]
    fn history_summary_counts_items() {
        let item = HistoryItem {
            tipo_titulo: "Tesouro Selic".to_string(),
            vencimento: "2029-03-01".to_string(),
            ticker: "LFT 2029-03-01".to_string(),
            taxa_venda: 0.08,
            pu_venda: 16990.12,
        };
        let data = vec![
            HistoryDay { data_base: "2026-01-02".to_string(), items: vec![item.clone(), item.clone()] },
            HistoryDay { data_base: "2026-01-05".to_string(), items: vec![item] },
        ];
        let payload = assemble_history_payload(data, "u", "T".to_string(), "T".to_string());

        assert_eq!(
            format_history_summary(Path::new("out.json"), &payload, true),
            "OK: wrote out.json dates=2 rows_total=3 changed=true range=2026-01-02..2026-01-05"
        );
    }
}
