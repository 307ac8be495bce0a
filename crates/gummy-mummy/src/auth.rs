use std::collections::HashMap;
use std::sync::Mutex;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

use crate::profile::ClientId;

/// Credential lifetime policy. Passed explicitly at construction so tests can
/// run with very short (or already elapsed) expiries.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub ttl: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(24),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("credential is not recognized")]
    Invalid,
    #[error("credential has expired")]
    Expired,
}

#[derive(Debug, Clone, Copy)]
struct IssuedToken {
    client_id: ClientId,
    expires_at: DateTime<Utc>,
}

/// Issues and validates opaque bearer credentials bound to a client id.
///
/// Tokens are 32 random bytes, base64url-encoded, held in an issuer-local
/// table. They do not survive a process restart; re-registration is the
/// documented recovery path.
pub struct TokenIssuer {
    config: TokenConfig,
    issued: Mutex<HashMap<String, IssuedToken>>,
}

impl TokenIssuer {
    pub fn new(config: TokenConfig) -> Self {
        Self {
            config,
            issued: Mutex::new(HashMap::new()),
        }
    }

    /// Mint a fresh credential for `client_id`, valid for the configured ttl.
    /// Expired entries are swept here so the table stays bounded by the number
    /// of live credentials rather than the number of registrations ever made.
    pub fn issue(&self, client_id: ClientId) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);

        let now = Utc::now();
        let record = IssuedToken {
            client_id,
            expires_at: now + self.config.ttl,
        };

        let mut issued = self.issued.lock().expect("token table poisoned");
        issued.retain(|_, entry| entry.expires_at > now);
        issued.insert(token.clone(), record);

        token
    }

    /// Resolve a credential back to its client id, or report why it no
    /// longer maps to one. Expired entries are dropped on sight.
    pub fn validate(&self, token: &str) -> Result<ClientId, AuthError> {
        let mut issued = self.issued.lock().expect("token table poisoned");

        let record = match issued.get(token) {
            Some(record) => *record,
            None => return Err(AuthError::Invalid),
        };

        if record.expires_at <= Utc::now() {
            issued.remove(token);
            return Err(AuthError::Expired);
        }

        Ok(record.client_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_resolves_to_its_client() {
        let issuer = TokenIssuer::new(TokenConfig::default());
        let token = issuer.issue(42);
        assert_eq!(issuer.validate(&token), Ok(42));
        // Validation is repeatable until expiry.
        assert_eq!(issuer.validate(&token), Ok(42));
    }

    #[test]
    fn unknown_token_is_invalid() {
        let issuer = TokenIssuer::new(TokenConfig::default());
        assert_eq!(issuer.validate("not-a-token"), Err(AuthError::Invalid));
    }

    #[test]
    fn elapsed_ttl_reports_expired_then_invalid() {
        let issuer = TokenIssuer::new(TokenConfig {
            ttl: Duration::minutes(-1),
        });
        let token = issuer.issue(7);
        assert_eq!(issuer.validate(&token), Err(AuthError::Expired));
        // The entry was evicted, so a second attempt no longer matches.
        assert_eq!(issuer.validate(&token), Err(AuthError::Invalid));
    }

    #[test]
    fn issuing_sweeps_entries_past_their_expiry() {
        let issuer = TokenIssuer::new(TokenConfig {
            ttl: Duration::minutes(-1),
        });
        let stale = issuer.issue(3);
        // A later issue drops the already-expired entry, so the stale token
        // reads as unknown rather than expired.
        issuer.issue(4);
        assert_eq!(issuer.validate(&stale), Err(AuthError::Invalid));
    }

    #[test]
    fn tokens_are_unique_per_issue() {
        let issuer = TokenIssuer::new(TokenConfig::default());
        let first = issuer.issue(1);
        let second = issuer.issue(1);
        assert_ne!(first, second);
    }
}
