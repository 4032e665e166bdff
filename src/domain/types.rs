//! Shared domain types.
//!
//! The output structs are serialized verbatim; field order here is the field
//! order in the JSON files, and the renamed keys are what the spreadsheet
//! consumers read.

use serde::{Deserialize, Serialize};

/// One row of the "resgatar" CSV export after sanitization.
#[derive(Debug, Clone, PartialEq)]
pub struct ResgateRow {
    pub titulo: String,
    pub rendimento_anual: String,
    /// Parsed redemption price; `0.0` when the raw text did not parse.
    pub preco_resgate: f64,
    pub vencimento: String,
    pub raw_preco_resgate: String,
}

/// Normalized realtime row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Preco_Atual")]
    pub preco_atual: f64,
    #[serde(rename = "Yield_Atual")]
    pub yield_atual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub source: String,
    pub source_url: String,
    pub last_run_at: String,
    /// Empty when the pricing page timestamp was unavailable.
    pub last_price_change_at: String,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub meta: Meta,
    pub data: Vec<DataRow>,
}

/// One priced instrument of a historical base date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(rename = "TipoTitulo")]
    pub tipo_titulo: String,
    #[serde(rename = "Vencimento")]
    pub vencimento: String,
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "TaxaVenda")]
    pub taxa_venda: f64,
    #[serde(rename = "PUVenda")]
    pub pu_venda: f64,
}

/// All instruments priced on one base date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryDay {
    #[serde(rename = "DataBase")]
    pub data_base: String,
    pub items: Vec<HistoryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMeta {
    pub source: String,
    pub source_url: String,
    pub last_run_at: String,
    pub last_data_change_at: String,
    pub unique_databases: usize,
    pub range: DateRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPayload {
    pub meta: HistoryMeta,
    pub data: Vec<HistoryDay>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn realtime_payload_uses_portal_keys_in_order() {
        let payload = Payload {
            meta: Meta {
                source: "TD_Scrape".to_string(),
                source_url: "u".to_string(),
                last_run_at: "2026-01-28T13:02:01-03:00".to_string(),
                last_price_change_at: String::new(),
                rows: 1,
            },
            data: vec![DataRow {
                ticker: "LFT 2029-03-01".to_string(),
                preco_atual: 17000.5,
                yield_atual: 0.0711,
            }],
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"meta":{"source":"TD_Scrape","source_url":"u","#,
                r#""last_run_at":"2026-01-28T13:02:01-03:00","last_price_change_at":"","rows":1},"#,
                r#""data":[{"Ticker":"LFT 2029-03-01","Preco_Atual":17000.5,"Yield_Atual":0.0711}]}"#
            )
        );
    }

    #[test]
    fn empty_range_serializes_as_null() {
        let range = DateRange { from: None, to: None };
        assert_eq!(serde_json::to_string(&range).unwrap(), r#"{"from":null,"to":null}"#);
    }
}
