//! The two end-to-end pipelines.
//!
//! realtime: warm-up -> CSV download -> parse -> filter -> pricing timestamp -> JSON
//! history:  CSV download -> parse -> window/group -> change detection -> JSON

use tracing::{info, warn};

use crate::config::{HistoryConfig, PortalConfig};
use crate::data::{HistoryClient, PortalClient};
use crate::domain::{HistoryPayload, Payload};
use crate::error::AppError;
use crate::io::{parse_history_csv, parse_resgate_csv, read_previous_json, write_json};
use crate::parse::now_sao_paulo;
use crate::report::{assemble_history_payload, assemble_payload, filter_contains, group_last_days, resolve_last_change};

/// Outputs of one `td historico` run.
#[derive(Debug, Clone)]
pub struct HistoryRun {
    pub payload: HistoryPayload,
    pub changed: bool,
}

/// Fetch, normalize and write the realtime redemption payload.
pub fn run_resgatar(config: &PortalConfig) -> Result<Payload, AppError> {
    let client = PortalClient::new(config)?;

    client.warm_up();
    let body = client.fetch_resgatar_csv()?;

    let mut rows = parse_resgate_csv(&body)?;
    if let Some(needle) = config.contains.as_deref() {
        rows = filter_contains(rows, needle);
        info!(needle, kept = rows.len(), "applied title filter");
    }

    let run_ts = now_sao_paulo();

    let last_price_change_at = match client.fetch_last_market_pricing_date() {
        Ok(Some(ts)) => ts,
        Ok(None) => String::new(),
        Err(e) => {
            warn!(error = %e, "last market pricing date unavailable");
            String::new()
        }
    };

    let payload = assemble_payload(&rows, client.csv_url(), run_ts, last_price_change_at);
    write_json(&config.output_path, &payload)?;
    info!(rows = payload.meta.rows, path = %config.output_path.display(), "wrote realtime payload");

    Ok(payload)
}

/// Fetch the historical export and write the grouped series.
pub fn run_historico(config: &HistoryConfig) -> Result<HistoryRun, AppError> {
    let run_ts = now_sao_paulo();

    let client = HistoryClient::new(config)?;
    let body = client.fetch_csv()?;
    let rows = parse_history_csv(&body)?;
    info!(rows = rows.len(), "parsed history rows");

    let data = group_last_days(&rows, config.days);
    let previous: Option<HistoryPayload> = read_previous_json(&config.output_path);
    let (last_change_at, changed) = resolve_last_change(&data, previous, &run_ts);

    let payload = assemble_history_payload(data, client.csv_url(), run_ts, last_change_at);
    write_json(&config.output_path, &payload)?;
    info!(dates = payload.data.len(), changed, path = %config.output_path.display(), "wrote history payload");

    Ok(HistoryRun { payload, changed })
}
