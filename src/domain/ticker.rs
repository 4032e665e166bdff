//! Instrument title -> ticker base.
//!
//! The rule order is business logic: compound rules (`prefixado` + `juros`)
//! must come before their single-keyword counterparts.

/// Base used when no rule matches.
pub const FALLBACK_BASE: &str = "TD";

/// One ordered classification rule. A title matches when it contains every
/// `all_of` keyword and, if `any_of` is non-empty, at least one of those.
#[derive(Debug, Clone, Copy)]
pub struct TickerRule {
    pub all_of: &'static [&'static str],
    pub any_of: &'static [&'static str],
    pub base: &'static str,
}

impl TickerRule {
    fn matches(&self, lowered: &str) -> bool {
        self.all_of.iter().all(|k| lowered.contains(k))
            && (self.any_of.is_empty() || self.any_of.iter().any(|k| lowered.contains(k)))
    }
}

/// Realtime classifier rules, first match wins.
pub const TICKER_RULES: &[TickerRule] = &[
    TickerRule { all_of: &["selic"], any_of: &[], base: "LFT" },
    TickerRule { all_of: &["prefixado", "juros"], any_of: &[], base: "NTN-F" },
    TickerRule { all_of: &["prefixado"], any_of: &[], base: "LTN" },
    TickerRule { all_of: &["ipca", "juros"], any_of: &[], base: "NTN-B" },
    TickerRule { all_of: &["ipca"], any_of: &[], base: "NTN-B P" },
    TickerRule { all_of: &["igpm", "juros"], any_of: &[], base: "NTN-C" },
    TickerRule { all_of: &["renda+"], any_of: &[], base: "NTN-B1 R+" },
    TickerRule { all_of: &[], any_of: &["educa+", "educa"], base: "NTN-B1 E+" },
];

/// Map a free-text TD title to its ticker base. Total: falls back to `TD`.
pub fn infer_ticker_base(titulo: &str) -> &'static str {
    let lowered = titulo.trim().to_lowercase();
    TICKER_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.base)
        .unwrap_or(FALLBACK_BASE)
}

/// Exact instrument-type names used by the Tesouro Transparente history export.
const HISTORY_TYPE_MAP: &[(&str, &str)] = &[
    ("Tesouro Educa+", "NTN-B1 E+"),
    ("Tesouro Selic", "LFT"),
    ("Tesouro Prefixado", "LTN"),
    ("Tesouro IPCA+ com Juros Semestrais", "NTN-B"),
    ("Tesouro IPCA+", "NTN-B P"),
    ("Tesouro IGPM+ com Juros Semestrais", "NTN-C"),
    ("Tesouro Prefixado com Juros Semestrais", "NTN-F"),
    ("Tesouro Renda+ Aposentadoria Extra", "NTN-B1 R+"),
];

/// Map a history-export instrument type to its base; unknown types map to
/// themselves.
pub fn history_ticker_base(tipo: &str) -> &str {
    HISTORY_TYPE_MAP
        .iter()
        .find(|(name, _)| *name == tipo)
        .map(|(_, base)| *base)
        .unwrap_or(tipo)
}

/// `<base> <yyyy-mm-dd>`.
pub fn format_ticker(base: &str, maturity_ymd: &str) -> String {
    format!("{base} {maturity_ymd}")
}
