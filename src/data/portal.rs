//! HTTP access to the Tesouro Direto portal and the Tesouro Transparente export.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, HeaderMap, HeaderValue, REFERER};
use tracing::{debug, info, warn};

use crate::config::{HistoryConfig, PRICING_DATE_VAR, PortalConfig};
use crate::error::AppError;
use crate::parse::{extract_js_var, format_timestamp, parse_portal_timestamp};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

const COMMON_ACCEPT: &str = "text/html,application/json;q=0.9,*/*;q=0.8";
const COMMON_ACCEPT_LANGUAGE: &str = "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7";
const HTML_ACCEPT: &str = "text/html,*/*;q=0.8";
const PAGE_ACCEPT_LANGUAGE: &str = "pt-BR,pt;q=0.9";
const CSV_ACCEPT: &str = "text/csv,*/*";

/// Blocking client for the TD yield page and its CSV export.
///
/// Requests are issued in program order; there are no retries. The cookie
/// jar keeps whatever session the warm-up visit hands out.
pub struct PortalClient {
    client: Client,
    page_url: String,
    csv_url: String,
}

impl PortalClient {
    pub fn new(config: &PortalConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(COMMON_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(COMMON_ACCEPT_LANGUAGE));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        Ok(Self {
            client: build_client(headers, config.timeout)?,
            page_url: config.page_url.clone(),
            csv_url: config.csv_url.clone(),
        })
    }

    /// Visit the HTML page so the portal sets its cookies. Failures are ignored.
    pub fn warm_up(&self) {
        match self.client.get(&self.page_url).header(ACCEPT, HTML_ACCEPT).send() {
            Ok(resp) => debug!(status = %resp.status(), "warm-up request done"),
            Err(e) => warn!(error = %e, "warm-up request failed"),
        }
    }

    /// Download the redemption CSV as text. Any failure is fatal to the run.
    pub fn fetch_resgatar_csv(&self) -> Result<String, AppError> {
        let resp = self
            .client
            .get(&self.csv_url)
            .header(REFERER, self.page_url.as_str())
            .send()
            .map_err(|e| AppError::network(format!("Failed to download CSV: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::network(format!(
                "HTTP {} while downloading CSV.",
                resp.status().as_u16()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::network(format!("Failed to read CSV body: {e}")))?;
        info!(bytes = body.len(), "downloaded redemption CSV");
        Ok(body)
    }

    /// Fetch the yield page and read the last market pricing time from it.
    ///
    /// `Ok(None)` means the page has no such variable; errors are network,
    /// status or timestamp-format problems. Callers treat both as "unknown".
    pub fn fetch_last_market_pricing_date(&self) -> Result<Option<String>, AppError> {
        let resp = self
            .client
            .get(&self.page_url)
            .header(ACCEPT_LANGUAGE, PAGE_ACCEPT_LANGUAGE)
            .send()
            .map_err(|e| AppError::network(format!("Failed to fetch yield page: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::network(format!(
                "HTTP {} while fetching yield page.",
                resp.status().as_u16()
            )));
        }

        let html = resp
            .text()
            .map_err(|e| AppError::network(format!("Failed to read yield page: {e}")))?;

        last_pricing_date_from_html(&html)
    }

    pub fn csv_url(&self) -> &str {
        &self.csv_url
    }
}

/// Extract and normalize the pricing timestamp embedded in the yield page.
pub fn last_pricing_date_from_html(html: &str) -> Result<Option<String>, AppError> {
    let Some(raw) = extract_js_var(html, PRICING_DATE_VAR) else {
        debug!(var = PRICING_DATE_VAR, "pricing date variable not present");
        return Ok(None);
    };
    let ts = parse_portal_timestamp(&raw).map_err(|e| AppError::input(e.to_string()))?;
    Ok(Some(format_timestamp(&ts)))
}

/// Client for the Tesouro Transparente historical export.
pub struct HistoryClient {
    client: Client,
    csv_url: String,
}

impl HistoryClient {
    pub fn new(config: &HistoryConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(CSV_ACCEPT));

        Ok(Self {
            client: build_client(headers, config.timeout)?,
            csv_url: config.csv_url.clone(),
        })
    }

    pub fn fetch_csv(&self) -> Result<String, AppError> {
        let resp = self
            .client
            .get(&self.csv_url)
            .send()
            .map_err(|e| AppError::network(format!("Failed to download history CSV: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::network(format!(
                "HTTP {} while downloading history CSV.",
                resp.status().as_u16()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::network(format!("Failed to read history CSV body: {e}")))?;
        info!(bytes = body.len(), "downloaded history CSV");
        Ok(body)
    }

    pub fn csv_url(&self) -> &str {
        &self.csv_url
    }
}

fn build_client(headers: HeaderMap, timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .default_headers(headers)
        .cookie_store(true)
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::output(format!("Failed to build HTTP client: {e}")))
}
