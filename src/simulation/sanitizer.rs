//! Input sanitization: ordered pattern replacement followed by HTML escaping.

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::simulation::patterns::{Severity, ThreatPattern, THREAT_PATTERNS};

/// Replacement for matched dangerous content, substituted before escaping.
pub const PLACEHOLDER: &str = "[FILTERED]";

/// Raised when a catalogue entry fails to compile. With the built-in
/// catalogue this is caught by tests, but the error is still propagated so
/// startup fails loudly rather than serving with a partial scanner.
#[derive(Debug, Error)]
#[error("threat pattern '{name}' failed to compile: {source}")]
pub struct PatternError {
    pub name: &'static str,
    #[source]
    pub source: regex::Error,
}

/// One catalogue entry that matched the input.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ThreatMatch {
    pub name: &'static str,
    pub label: &'static str,
    pub severity: Severity,
}

/// The outcome of [`Sanitizer::sanitize`].
#[derive(Debug, Clone, Serialize)]
pub struct SanitizationResult {
    /// The working copy after replacement and escaping.
    pub sanitized_text: String,
    /// Matched patterns in catalogue order, at most one entry per pattern.
    pub matched_threats: Vec<ThreatMatch>,
}

impl SanitizationResult {
    pub fn is_clean(&self) -> bool {
        self.matched_threats.is_empty()
    }

    /// Labels only, in report order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.matched_threats.iter().map(|t| t.label).collect()
    }
}

/// Scans free text against the static threat catalogue.
///
/// Patterns are applied strictly in declaration order, each replacing all of
/// its matches in the working copy before the next pattern runs. The
/// application is sequential, not simultaneous: once an earlier pattern has
/// substituted the placeholder, a later pattern only sees what is left.
pub struct Sanitizer {
    compiled: Vec<(Regex, &'static ThreatPattern)>,
}

impl Sanitizer {
    /// Compile the built-in catalogue.
    pub fn new() -> Result<Self, PatternError> {
        let mut compiled = Vec::with_capacity(THREAT_PATTERNS.len());
        for pat in THREAT_PATTERNS {
            let regex = Regex::new(pat.pattern).map_err(|source| PatternError {
                name: pat.name,
                source,
            })?;
            compiled.push((regex, pat));
        }
        Ok(Self { compiled })
    }

    /// Scan `input`, replace every match with [`PLACEHOLDER`], then
    /// HTML-escape the result. Total over all inputs; a non-empty
    /// `matched_threats` is a normal outcome, not an error.
    pub fn sanitize(&self, input: &str) -> SanitizationResult {
        let mut working = input.to_string();
        let mut matched_threats = Vec::new();

        for (regex, pat) in &self.compiled {
            if regex.is_match(&working) {
                warn!(
                    pattern = %pat.name,
                    severity = %pat.severity,
                    "threat pattern matched"
                );
                matched_threats.push(ThreatMatch {
                    name: pat.name,
                    label: pat.label,
                    severity: pat.severity,
                });
                working = regex.replace_all(&working, PLACEHOLDER).into_owned();
            }
        }

        SanitizationResult {
            sanitized_text: escape_html(&working),
            matched_threats,
        }
    }
}

/// Escape the four HTML-significant characters `<`, `>`, `"`, `'`.
///
/// `&` is left alone on purpose: escaping it would turn already-escaped
/// entities into `&amp;lt;` and break the fixed-point property that
/// sanitizing sanitized text is the identity.
pub fn escape_html(input: &str) -> String {
    input
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> Sanitizer {
        Sanitizer::new().expect("built-in catalogue must compile")
    }

    #[test]
    fn empty_input_is_clean_and_empty() {
        let result = sanitizer().sanitize("");
        assert_eq!(result.sanitized_text, "");
        assert!(result.is_clean());
    }

    #[test]
    fn plain_text_passes_through_unchanged() {
        let result = sanitizer().sanitize("plain text");
        assert_eq!(result.sanitized_text, "plain text");
        assert!(result.is_clean());
    }

    #[test]
    fn script_tag_is_reported_and_removed() {
        let result = sanitizer().sanitize("<script>alert(1)</script>");
        assert!(result.labels().contains(&"Script element injection (XSS)"));
        assert!(
            !result.sanitized_text.contains("<script>"),
            "no literal script tag may survive: {}",
            result.sanitized_text
        );
        assert!(result.sanitized_text.contains(PLACEHOLDER));
    }

    #[test]
    fn benign_markup_is_escaped_but_not_flagged() {
        let result = sanitizer().sanitize(r#"<b class="x">bold & 'fine'</b>"#);
        assert!(result.is_clean());
        assert_eq!(
            result.sanitized_text,
            "&lt;b class=&quot;x&quot;&gt;bold & &#x27;fine&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn each_pattern_reported_once_despite_repeats() {
        let result = sanitizer().sanitize("../a ../b ../c");
        assert_eq!(result.labels(), vec!["Path traversal sequence"]);
        assert_eq!(result.sanitized_text.matches(PLACEHOLDER).count(), 3);
    }

    #[test]
    fn threats_reported_in_catalogue_order() {
        // Input order is traversal first, SQL second; the report follows
        // catalogue order, which is the reverse.
        let result = sanitizer().sanitize("../etc UNION SELECT 1");
        assert_eq!(
            result.labels(),
            vec!["UNION-based SQL injection", "Path traversal sequence"]
        );
    }

    #[test]
    fn earlier_replacement_hides_later_match() {
        // The whole script element is consumed first, so the command
        // substitution inside it is never seen. Sequential application is
        // intended behavior, not a bug.
        let result = sanitizer().sanitize("<script>run($(whoami))</script>");
        assert_eq!(result.labels(), vec!["Script element injection (XSS)"]);
    }

    #[test]
    fn sanitizing_twice_is_identity() {
        let s = sanitizer();
        let inputs = &[
            "",
            "plain text",
            "<script>alert('x')</script>",
            "' OR '1'='1 and $(id) and ../../../etc/passwd",
            r#"<img src=x onerror=alert(1)> {{7*7}} | sh"#,
        ];
        for input in inputs {
            let first = s.sanitize(input);
            let second = s.sanitize(&first.sanitized_text);
            assert!(
                second.is_clean(),
                "re-sanitizing {input:?} reported {:?}",
                second.labels()
            );
            assert_eq!(
                second.sanitized_text, first.sanitized_text,
                "escaping must be a fixed point for {input:?}"
            );
        }
    }

    #[test]
    fn result_serializes_for_the_api() {
        let result = sanitizer().sanitize("<script>alert(1)</script>");
        let json = serde_json::to_value(&result).expect("should serialize");
        assert_eq!(json["matched_threats"][0]["name"], "script_element");
        assert_eq!(json["matched_threats"][0]["severity"], "critical");
    }

    #[test]
    fn escape_covers_exactly_four_characters() {
        assert_eq!(escape_html(r#"<>"'&"#), "&lt;&gt;&quot;&#x27;&");
    }
}
