//! Fixed placeholder results for sections whose questionnaires are not yet
//! modeled, plus the fallback for unrecognized section names. These are
//! deliberately constants, not computations.

use crate::engine::types::{SectionAssessment, Urgency};

const HYGIENE_SCORE: f64 = 85.0;
const HYGIENE_ADVICE: &str =
    "**Assessment:** the hygiene routine is appropriate. Keep up the daily care.";

const TRIAGE_SCORE: f64 = 90.0;
const TRIAGE_ADVICE: &str =
    "**Assessment:** the situation is stable. Continue routine monitoring.";

const DEVELOPMENT_SCORE: f64 = 80.0;
const DEVELOPMENT_ADVICE: &str =
    "**Assessment:** your baby is growing well. Keep offering age-appropriate stimulation.";

const UNKNOWN_SCORE: f64 = 50.0;
const UNKNOWN_ADVICE: &str =
    "Please choose a valid section: mothercare, sleep, feeding, hygiene, triage, or development.";

pub(crate) fn hygiene() -> SectionAssessment {
    SectionAssessment {
        score: HYGIENE_SCORE,
        status: "good",
        urgency: Urgency::Low,
        diagnosis: "hygiene care is adequate",
        advice: HYGIENE_ADVICE.to_string(),
    }
}

pub(crate) fn triage() -> SectionAssessment {
    SectionAssessment {
        score: TRIAGE_SCORE,
        status: "stable",
        urgency: Urgency::Low,
        diagnosis: "no emergency symptoms",
        advice: TRIAGE_ADVICE.to_string(),
    }
}

pub(crate) fn development() -> SectionAssessment {
    SectionAssessment {
        score: DEVELOPMENT_SCORE,
        status: "on track",
        urgency: Urgency::Low,
        diagnosis: "development within the typical range",
        advice: DEVELOPMENT_ADVICE.to_string(),
    }
}

/// Unrecognized section names get a well-formed answer, never an error.
pub(crate) fn unknown() -> SectionAssessment {
    SectionAssessment {
        score: UNKNOWN_SCORE,
        status: "unknown",
        urgency: Urgency::Low,
        diagnosis: "unrecognized section",
        advice: UNKNOWN_ADVICE.to_string(),
    }
}
