//! CSV ingest for the two TD exports.
//!
//! Both files are `;`-separated pt-BR exports. Structural problems (unreadable
//! CSV, missing columns, no data) are fatal with exit code 3; row-level problems
//! skip or default the row.

use std::collections::HashMap;

use csv::StringRecord;
use tracing::debug;

use crate::domain::{ResgateRow, format_ticker, history_ticker_base};
use crate::error::AppError;
use crate::parse::{parse_brl, parse_pt_number, reformat_date};

pub const COL_TITULO: &str = "Título";
pub const COL_RENDIMENTO: &str = "Rendimento anual do título";
pub const COL_PRECO_RESGATE: &str = "Preço unitário de resgate";
/// Matched as a case-insensitive substring; the first matching header wins.
pub const COL_VENCIMENTO_FRAGMENT: &str = "vencimento";

pub const COL_TIPO_TITULO: &str = "Tipo Titulo";
pub const COL_DATA_VENCIMENTO: &str = "Data Vencimento";
pub const COL_DATA_BASE: &str = "Data Base";
pub const COL_TAXA_VENDA: &str = "Taxa Venda Manha";
pub const COL_PU_VENDA: &str = "PU Venda Manha";

/// Column positions of the redemption CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResgateColumns {
    titulo: usize,
    rendimento: usize,
    preco: usize,
    vencimento: usize,
}

impl ResgateColumns {
    fn max_index(&self) -> usize {
        self.titulo.max(self.rendimento).max(self.preco).max(self.vencimento)
    }
}

/// Parse the redemption ("resgatar") CSV into sanitized rows.
pub fn parse_resgate_csv(csv_text: &str) -> Result<Vec<ResgateRow>, AppError> {
    let records = read_records(csv_text)?;
    let Some((headers, data)) = records.split_first() else {
        return Err(AppError::input("CSV is empty or has no data rows."));
    };
    if data.is_empty() {
        return Err(AppError::input("CSV is empty or has no data rows."));
    }

    let headers = clean_headers(headers);
    let cols = resolve_resgate_columns(&headers)?;
    let max_idx = cols.max_index();

    let mut out = Vec::new();
    for (idx, record) in data.iter().enumerate() {
        // +2: 1-based, and the header is line 1.
        let line = idx + 2;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        if max_idx >= record.len() {
            debug!(line, fields = record.len(), "skipping short CSV row");
            continue;
        }

        let field = |i: usize| record.get(i).map(str::trim).unwrap_or_default().to_string();
        let titulo = field(cols.titulo);
        if titulo.is_empty() {
            continue;
        }
        let raw_preco = field(cols.preco);

        let preco = match parse_brl(&raw_preco) {
            Ok(v) => v,
            Err(e) => {
                debug!(line, error = %e, "unparsable redemption price, using 0");
                0.0
            }
        };

        out.push(ResgateRow {
            titulo,
            rendimento_anual: field(cols.rendimento),
            preco_resgate: preco,
            vencimento: field(cols.vencimento),
            raw_preco_resgate: raw_preco,
        });
    }

    Ok(out)
}

fn resolve_resgate_columns(headers: &[String]) -> Result<ResgateColumns, AppError> {
    let titulo = find_header(headers, COL_TITULO);
    let rendimento = find_header(headers, COL_RENDIMENTO);
    let preco = find_header(headers, COL_PRECO_RESGATE);
    let vencimento = find_header_containing(headers, COL_VENCIMENTO_FRAGMENT);

    match (titulo, rendimento, preco, vencimento) {
        (Some(titulo), Some(rendimento), Some(preco), Some(vencimento)) => Ok(ResgateColumns {
            titulo,
            rendimento,
            preco,
            vencimento,
        }),
        _ => Err(missing_columns_error(headers)),
    }
}

/// One row of the historical export, already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub data_base: String,
    pub tipo_titulo: String,
    pub vencimento: String,
    pub ticker: String,
    pub taxa_venda: f64,
    pub pu_venda: f64,
}

/// Parse the Tesouro Transparente price/rate history CSV.
///
/// Rows with an empty type, an unparsable date or an unparsable number are
/// skipped.
pub fn parse_history_csv(csv_text: &str) -> Result<Vec<HistoryRow>, AppError> {
    let records = read_records(csv_text)?;
    let Some((headers, data)) = records.split_first() else {
        return Err(AppError::input("History CSV is empty."));
    };

    let headers = clean_headers(headers);
    let header_map = build_header_map(&headers);
    let required = [COL_TIPO_TITULO, COL_DATA_VENCIMENTO, COL_DATA_BASE, COL_TAXA_VENDA, COL_PU_VENDA];
    if required.iter().any(|c| !header_map.contains_key(*c)) {
        return Err(missing_columns_error(&headers));
    }

    let mut out = Vec::new();
    for record in data {
        let get = |name: &str| {
            header_map
                .get(name)
                .and_then(|i| record.get(*i))
                .map(str::trim)
                .unwrap_or_default()
        };

        let tipo = get(COL_TIPO_TITULO);
        let vencimento = reformat_date(get(COL_DATA_VENCIMENTO));
        let data_base = reformat_date(get(COL_DATA_BASE));
        if tipo.is_empty() || vencimento.is_empty() || data_base.is_empty() {
            continue;
        }

        let (Ok(taxa_venda), Ok(pu_venda)) =
            (parse_pt_number(get(COL_TAXA_VENDA)), parse_pt_number(get(COL_PU_VENDA)))
        else {
            continue;
        };

        out.push(HistoryRow {
            ticker: format_ticker(history_ticker_base(tipo), &vencimento),
            data_base,
            tipo_titulo: tipo.to_string(),
            vencimento,
            taxa_venda,
            pu_venda,
        });
    }

    Ok(out)
}

fn read_records(csv_text: &str) -> Result<Vec<StringRecord>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_text.trim().as_bytes());

    reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::input(format!("Failed to parse CSV: {e}")))
}

fn clean_headers(headers: &StringRecord) -> Vec<String> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            // Excel-style exports prefix the first header with a BOM.
            let name = if idx == 0 { name.trim_start_matches('\u{feff}') } else { name };
            name.trim().to_string()
        })
        .collect()
}

fn build_header_map(headers: &[String]) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        map.entry(name.clone()).or_insert(idx);
    }
    map
}

fn find_header(headers: &[String], want: &str) -> Option<usize> {
    headers.iter().position(|h| h == want)
}

fn find_header_containing(headers: &[String], fragment: &str) -> Option<usize> {
    let fragment = fragment.to_lowercase();
    headers.iter().position(|h| h.to_lowercase().contains(&fragment))
}

fn missing_columns_error(headers: &[String]) -> AppError {
    AppError::input(format!("Expected columns not found. headers={headers:?}"))
}
