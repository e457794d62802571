//! Security response header catalogue.
//!
//! The catalogue serves double duty: middleware stamps every entry onto
//! every response, and the `/api/headers` endpoint reports it so the UI can
//! explain what each header does. Names are kept lowercase so they can be
//! used directly as static header names.

use serde::Serialize;

/// One security header and why it is set.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SecurityHeader {
    pub name: &'static str,
    pub value: &'static str,
    pub purpose: &'static str,
}

pub static SECURITY_HEADERS: &[SecurityHeader] = &[
    SecurityHeader {
        name: "x-content-type-options",
        value: "nosniff",
        purpose: "Stops browsers from MIME-sniffing responses into executable types",
    },
    SecurityHeader {
        name: "x-frame-options",
        value: "DENY",
        purpose: "Blocks framing of the page, preventing clickjacking",
    },
    SecurityHeader {
        name: "content-security-policy",
        value: "default-src 'self'",
        purpose: "Restricts scripts, styles, and other resources to the same origin",
    },
    SecurityHeader {
        name: "referrer-policy",
        value: "no-referrer",
        purpose: "Keeps the URL of this page out of outbound requests",
    },
    SecurityHeader {
        name: "strict-transport-security",
        value: "max-age=31536000; includeSubDomains",
        purpose: "Tells browsers to only reach this host over HTTPS",
    },
];
