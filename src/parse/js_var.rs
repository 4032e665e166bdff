//! Extraction of inline `var <name> = "<literal>"` assignments from HTML.
//!
//! The TD yield page renders an empty placeholder element and fills it from a
//! script block, e.g. ``var lastMarketPricingDate = `2026-01-28T13:02:01.613` ``.

use regex::Regex;

/// Return the first literal assigned to `var <name>`.
///
/// Backtick, double and single quotes are accepted. No unescaping is done, and
/// `None` means the assignment was not found.
pub fn extract_js_var(html: &str, name: &str) -> Option<String> {
    let pattern = format!(
        r#"(?m)\bvar\s+{}\s*=\s*(?:`([^`]+)`|"([^"]+)"|'([^']+)')"#,
        regex::escape(name)
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(html)?;

    (1..=3)
        .filter_map(|i| caps.get(i))
        .map(|m| m.as_str().trim().to_string())
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <p class="lastMarketPricingDate"></p>
        <script>
            var lastMarketPricingDate = `2026-01-28T13:02:01.613`
            var other = "x";
        </script>
    "#;

    #[test]
    fn extracts_backtick_literal() {
        assert_eq!(
            extract_js_var(PAGE, "lastMarketPricingDate").as_deref(),
            Some("2026-01-28T13:02:01.613")
        );
    }

    #[test]
    fn extracts_double_and_single_quotes() {
        assert_eq!(extract_js_var(PAGE, "other").as_deref(), Some("x"));
        let html = "var d='  2026-01-01T00:00:00 ';";
        assert_eq!(extract_js_var(html, "d").as_deref(), Some("2026-01-01T00:00:00"));
    }

    #[test]
    fn first_match_wins() {
        let html = "var a = \"one\"; var a = \"two\";";
        assert_eq!(extract_js_var(html, "a").as_deref(), Some("one"));
    }

    #[test]
    fn missing_variable_is_none() {
        assert_eq!(extract_js_var(PAGE, "nope"), None);
        assert_eq!(extract_js_var("<html></html>", "lastMarketPricingDate"), None);
        // Only a prefix of another identifier.
        assert_eq!(extract_js_var("var otherx = 'y'", "other"), None);
    }

    #[test]
    fn name_is_matched_literally() {
        let html = "var a_b = 'z'";
        assert_eq!(extract_js_var(html, "a.b"), None);
    }
}
