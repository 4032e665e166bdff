//! Run configuration.
//!
//! Defaults point at the public portals. `from_env` loads `.env` (if any) and
//! lets `TD_PAGE_URL`, `TD_CSV_URL`, `TD_HIST_URL` and `TD_TIMEOUT_SECS`
//! override them; CLI flags are applied on top by `app`.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const URL_RENDIMENTO_TITULOS: &str =
    "https://www.tesourodireto.com.br/produtos/dados-sobre-titulos/rendimento-dos-titulos";
pub const URL_RESGATAR: &str =
    "https://www.tesourodireto.com.br/documents/d/guest/rendimento-resgatar-csv?download=true";
pub const URL_HISTORICO: &str = "https://www.tesourotransparente.gov.br/ckan/dataset/\
df56aa42-484a-4a59-8184-7676580c81e3/resource/\
796d2059-14e9-44e3-80c9-2d9e30b405c1/download/precotaxatesourodireto.csv";

pub const REALTIME_OUTPUT: &str = "output/td_realtime_resgatar.json";
pub const HISTORY_OUTPUT: &str = "output/td_hist.json";

pub const REALTIME_SOURCE: &str = "TD_Scrape";
pub const HISTORY_SOURCE: &str = "tesourotransparente.gov.br (CKAN)";

/// Name of the inline script variable carrying the last pricing time.
pub const PRICING_DATE_VAR: &str = "lastMarketPricingDate";

const DEFAULT_PORTAL_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_HISTORY_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_HISTORY_DAYS: usize = 180;

/// Realtime ("resgatar") pipeline settings.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub page_url: String,
    pub csv_url: String,
    pub timeout: Duration,
    pub output_path: PathBuf,
    /// Lower-cased, trimmed title filter; `None` disables filtering.
    pub contains: Option<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            page_url: URL_RENDIMENTO_TITULOS.to_string(),
            csv_url: URL_RESGATAR.to_string(),
            timeout: DEFAULT_PORTAL_TIMEOUT,
            output_path: PathBuf::from(REALTIME_OUTPUT),
            contains: None,
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        if let Some(url) = env_var("TD_PAGE_URL") {
            config.page_url = url;
        }
        if let Some(url) = env_var("TD_CSV_URL") {
            config.csv_url = url;
        }
        if let Some(timeout) = timeout_from_env()? {
            config.timeout = timeout;
        }
        Ok(config)
    }

    pub fn with_contains(mut self, contains: Option<&str>) -> Self {
        self.contains = contains
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        self
    }
}

/// Historical series pipeline settings.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    pub csv_url: String,
    pub timeout: Duration,
    pub output_path: PathBuf,
    pub days: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            csv_url: URL_HISTORICO.to_string(),
            timeout: DEFAULT_HISTORY_TIMEOUT,
            output_path: PathBuf::from(HISTORY_OUTPUT),
            days: DEFAULT_HISTORY_DAYS,
        }
    }
}

impl HistoryConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        if let Some(url) = env_var("TD_HIST_URL") {
            config.csv_url = url;
        }
        if let Some(timeout) = timeout_from_env()? {
            config.timeout = timeout;
        }
        Ok(config)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn timeout_from_env() -> Result<Option<Duration>, AppError> {
    let Some(raw) = env_var("TD_TIMEOUT_SECS") else {
        return Ok(None);
    };
    parse_timeout_secs(&raw).map(Some)
}

fn parse_timeout_secs(raw: &str) -> Result<Duration, AppError> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::output(format!(
            "Invalid TD_TIMEOUT_SECS '{raw}' (expected a positive number of seconds)."
        ))),
    }
}
