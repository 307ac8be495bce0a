use serde::{Deserialize, Serialize};

/// Arbitrary key-value questionnaire payload as submitted by the client.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Every rule's score is clamped to this window, no matter how many
/// penalties stack up.
pub const SCORE_FLOOR: f64 = 10.0;
pub const SCORE_CEILING: f64 = 100.0;

pub(crate) fn clamp_score(raw: f64) -> f64 {
    raw.clamp(SCORE_FLOOR, SCORE_CEILING)
}

/// Coarse triage signal guiding how quickly further help should be sought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Moderate,
    High,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Moderate => "moderate",
            Urgency::High => "high",
        }
    }
}

/// Rule output before narrative framing: the deterministic part of an
/// evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionAssessment {
    pub score: f64,
    pub status: &'static str,
    pub urgency: Urgency,
    pub diagnosis: &'static str,
    pub advice: String,
}

/// Full evaluation returned to the caller and archived verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub score: f64,
    pub status: String,
    pub advice: String,
    pub urgency: Urgency,
    pub details: Payload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
}
