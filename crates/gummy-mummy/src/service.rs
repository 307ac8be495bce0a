use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::auth::{AuthError, TokenIssuer};
use crate::engine::{AdviceEngine, Assessment, Payload, Section};
use crate::profile::{ClientId, NewClient};
use crate::store::{ArchiveEntry, ClientRepository, StoreError, SubmissionArchive};

/// Registration bounds carried over from the original intake form.
const MIN_MOTHER_AGE: i64 = 15;
const MAX_MOTHER_AGE: i64 = 60;

/// Facade composing the client registry, token issuer, advice engine, and
/// submission archive. One instance serves all requests.
pub struct AdviceService<C, S> {
    clients: Arc<C>,
    archive: Arc<S>,
    tokens: Arc<TokenIssuer>,
    engine: Arc<AdviceEngine>,
}

/// Confirmation returned after a successful registration.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub ok: bool,
    pub client_id: ClientId,
    pub message: String,
    pub token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("no profile found for client {0}")]
    ClientNotFound(ClientId),
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to encode evaluation for the archive: {0}")]
    Encode(#[from] serde_json::Error),
}

impl<C, S> AdviceService<C, S>
where
    C: ClientRepository + 'static,
    S: SubmissionArchive + 'static,
{
    pub fn new(
        clients: Arc<C>,
        archive: Arc<S>,
        tokens: Arc<TokenIssuer>,
        engine: Arc<AdviceEngine>,
    ) -> Self {
        Self {
            clients,
            archive,
            tokens,
            engine,
        }
    }

    /// Store a new profile and hand back a bearer credential for it.
    pub fn register(&self, client: NewClient) -> Result<Registration, ServiceError> {
        if let Some(age) = client.age {
            if !(MIN_MOTHER_AGE..=MAX_MOTHER_AGE).contains(&age) {
                return Err(ServiceError::Validation("age must be between 15 and 60"));
            }
        }
        if matches!(client.baby_age_months, Some(months) if months < 0) {
            return Err(ServiceError::Validation(
                "baby_age_months must not be negative",
            ));
        }

        let profile = self.clients.insert(&client)?;
        let token = self.tokens.issue(profile.id);

        let message = match &profile.name {
            Some(name) => format!("Welcome {name} — your details were saved."),
            None => "Welcome — your details were saved.".to_string(),
        };

        info!(client_id = profile.id, "registered new client");

        Ok(Registration {
            ok: true,
            client_id: profile.id,
            message,
            token,
        })
    }

    /// Evaluate one section submission for the credential's owner, archiving
    /// the raw payload/result pair before returning the assessment.
    pub fn assess(
        &self,
        token: &str,
        section_name: &str,
        payload: Payload,
    ) -> Result<Assessment, ServiceError> {
        let client_id = self.tokens.validate(token)?;
        let profile = self
            .clients
            .fetch(client_id)?
            .ok_or(ServiceError::ClientNotFound(client_id))?;

        let section = Section::from_name(section_name);
        info!(client_id, section = section.name(), "evaluating section submission");

        let assessment = self.engine.evaluate(&section, Some(&profile), &payload);

        self.archive.append(ArchiveEntry {
            client_id,
            // The submitted name, not the parsed variant, so typos stay auditable.
            section: section_name.to_string(),
            payload: Value::Object(payload),
            result: serde_json::to_value(&assessment)?,
            recorded_at: Utc::now(),
        })?;

        Ok(assessment)
    }
}
