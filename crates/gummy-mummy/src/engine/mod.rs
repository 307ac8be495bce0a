//! Deterministic rule engine mapping section submissions to scored advice.

pub mod narrative;
mod sections;
pub mod types;

pub use narrative::Narrator;
pub use types::{Assessment, Payload, SectionAssessment, Urgency, SCORE_CEILING, SCORE_FLOOR};

use serde_json::Value;

use crate::profile::ClientProfile;

/// Questionnaire topics recognized by the engine.
///
/// Unrecognized names are kept verbatim so the archive reflects exactly what
/// the client sent; they are answered with the fallback assessment rather
/// than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Mothercare,
    Sleep,
    Feeding,
    Hygiene,
    Triage,
    Development,
    Unknown(String),
}

impl Section {
    pub fn from_name(raw: &str) -> Self {
        match raw {
            "mothercare" => Section::Mothercare,
            "sleep" => Section::Sleep,
            "feeding" => Section::Feeding,
            "hygiene" => Section::Hygiene,
            "triage" => Section::Triage,
            "development" => Section::Development,
            other => Section::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Section::Mothercare => "mothercare",
            Section::Sleep => "sleep",
            Section::Feeding => "feeding",
            Section::Hygiene => "hygiene",
            Section::Triage => "triage",
            Section::Development => "development",
            Section::Unknown(raw) => raw,
        }
    }
}

/// Stateless evaluator: scoring is a pure function of the submission and the
/// stored profile; only the narrative sentence choice draws randomness.
pub struct AdviceEngine {
    narrator: Narrator,
}

impl Default for AdviceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AdviceEngine {
    pub fn new() -> Self {
        Self {
            narrator: Narrator::from_entropy(),
        }
    }

    /// Engine with a pinned narrative sequence, for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self {
            narrator: Narrator::seeded(seed),
        }
    }

    /// Evaluate one submission. Never fails: malformed fields default, and
    /// unknown sections produce the fallback assessment.
    pub fn evaluate(
        &self,
        section: &Section,
        profile: Option<&ClientProfile>,
        payload: &Payload,
    ) -> Assessment {
        let baby_age_months = resolve_baby_age(profile, payload);

        let fragment = match section {
            Section::Mothercare => sections::mothercare::assess(payload, baby_age_months),
            Section::Sleep => sections::sleep::assess(payload, baby_age_months),
            Section::Feeding => sections::feeding::assess(payload, baby_age_months),
            Section::Hygiene => sections::stubs::hygiene(),
            Section::Triage => sections::stubs::triage(),
            Section::Development => sections::stubs::development(),
            Section::Unknown(_) => sections::stubs::unknown(),
        };

        self.narrator
            .compose(fragment, profile, payload, baby_age_months)
    }
}

/// Payload-supplied age wins over the stored profile; anonymous callers with
/// no age at all read as zero months.
fn resolve_baby_age(profile: Option<&ClientProfile>, payload: &Payload) -> i64 {
    payload
        .get("baby_age_months")
        .and_then(|value| match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        })
        .or_else(|| profile.and_then(|p| p.baby_age_months))
        .unwrap_or(0)
}
