//! CSRF token simulation: single-use tokens, one outstanding per client.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use uuid::Uuid;

/// Outcome of presenting a token for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CsrfOutcome {
    /// Token matched and was consumed. Presenting it again is a replay.
    Accepted,
    /// A token is outstanding but a different value was presented. The
    /// outstanding token survives, so a typo does not burn it.
    Mismatch,
    /// No token outstanding: none was ever issued, or it was already spent.
    NoTokenIssued,
}

impl CsrfOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CsrfOutcome::Accepted)
    }
}

/// One client's CSRF state. Issuing always replaces the previous token.
#[derive(Debug, Default)]
pub struct CsrfSession {
    outstanding: Option<String>,
}

impl CsrfSession {
    pub fn issue(&mut self) -> String {
        let token = Uuid::new_v4().to_string();
        self.outstanding = Some(token.clone());
        token
    }

    pub fn validate(&mut self, presented: &str) -> CsrfOutcome {
        match self.outstanding.take() {
            None => CsrfOutcome::NoTokenIssued,
            Some(expected) if expected == presented => CsrfOutcome::Accepted,
            Some(expected) => {
                self.outstanding = Some(expected);
                CsrfOutcome::Mismatch
            }
        }
    }
}

/// Per-client CSRF sessions, keyed like the rate limiter (peer IP).
pub struct CsrfVault {
    sessions: Mutex<HashMap<String, CsrfSession>>,
}

impl CsrfVault {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn issue(&self, key: &str) -> String {
        let mut sessions = self.sessions.lock().expect("csrf vault mutex poisoned");
        sessions.entry(key.to_string()).or_default().issue()
    }

    pub fn validate(&self, key: &str, presented: &str) -> CsrfOutcome {
        let mut sessions = self.sessions.lock().expect("csrf vault mutex poisoned");
        match sessions.get_mut(key) {
            Some(session) => session.validate(presented),
            None => CsrfOutcome::NoTokenIssued,
        }
    }
}

impl Default for CsrfVault {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_validates_once() {
        let mut session = CsrfSession::default();
        let token = session.issue();
        assert_eq!(session.validate(&token), CsrfOutcome::Accepted);
        // Replay: the token was consumed.
        assert_eq!(session.validate(&token), CsrfOutcome::NoTokenIssued);
    }

    #[test]
    fn mismatch_keeps_token_alive() {
        let mut session = CsrfSession::default();
        let token = session.issue();
        assert_eq!(session.validate("wrong"), CsrfOutcome::Mismatch);
        assert_eq!(session.validate(&token), CsrfOutcome::Accepted);
    }

    #[test]
    fn validate_without_issue_is_rejected() {
        let mut session = CsrfSession::default();
        assert_eq!(session.validate("anything"), CsrfOutcome::NoTokenIssued);
    }

    #[test]
    fn reissue_invalidates_previous_token() {
        let mut session = CsrfSession::default();
        let first = session.issue();
        let second = session.issue();
        assert_ne!(first, second);
        assert_eq!(session.validate(&first), CsrfOutcome::Mismatch);
        assert_eq!(session.validate(&second), CsrfOutcome::Accepted);
    }

    #[test]
    fn vault_keys_clients_independently() {
        let vault = CsrfVault::new();
        let a = vault.issue("10.0.0.1");
        assert_eq!(vault.validate("10.0.0.2", &a), CsrfOutcome::NoTokenIssued);
        assert_eq!(vault.validate("10.0.0.1", &a), CsrfOutcome::Accepted);
    }
}
