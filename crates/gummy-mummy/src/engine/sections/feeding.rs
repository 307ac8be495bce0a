use serde::Deserialize;
use serde_json::Value;

use super::{lenient_count, lenient_flag, lenient_number, lenient_text};
use crate::engine::types::{clamp_score, Payload, SectionAssessment, Urgency};

/// Rough intake estimate for formula-fed babies, in mL per month of age.
const EXPECTED_FORMULA_ML_PER_MONTH: f64 = 150.0;

/// Feeding questionnaire. Defaults describe an uneventful breastfeeding
/// routine: no latch pain, eight feeds a day, no solids yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FeedingInput {
    /// "breast" or "formula". Default "breast".
    #[serde(default, deserialize_with = "lenient_text")]
    feeding_type: Option<String>,
    /// Pain while latching. Default false.
    #[serde(default, deserialize_with = "lenient_flag")]
    pain_with_latch: Option<bool>,
    /// Daily formula intake in mL. Default 0.
    #[serde(default, deserialize_with = "lenient_number")]
    formula_amount_ml_per_day: Option<f64>,
    /// Whether solid foods have been started. Default false.
    #[serde(default, deserialize_with = "lenient_flag")]
    solids_introduced: Option<bool>,
    /// Feeds per day. Default 8.
    #[serde(default, deserialize_with = "lenient_count")]
    feeds_per_day: Option<i64>,
}

impl FeedingInput {
    fn from_payload(payload: &Payload) -> Self {
        serde_json::from_value(Value::Object(payload.clone())).unwrap_or_default()
    }
}

pub(crate) fn assess(payload: &Payload, baby_age_months: i64) -> SectionAssessment {
    let input = FeedingInput::from_payload(payload);
    let feeding_type = input.feeding_type.as_deref().unwrap_or("breast");
    let pain = input.pain_with_latch.unwrap_or(false);
    let formula_ml = input.formula_amount_ml_per_day.unwrap_or(0.0);
    let solids_introduced = input.solids_introduced.unwrap_or(false);
    let feeds_per_day = input.feeds_per_day.unwrap_or(8);

    let mut raw = 80.0;

    match feeding_type {
        "breast" => {
            if pain {
                raw -= 25.0;
            }
            if feeds_per_day < 6 && baby_age_months < 6 {
                raw -= 10.0;
            }
        }
        "formula" => {
            let expected_ml = baby_age_months as f64 * EXPECTED_FORMULA_ML_PER_MONTH;
            if formula_ml < expected_ml * 0.7 {
                raw -= 20.0;
            }
        }
        _ => {}
    }

    if baby_age_months > 6 && !solids_introduced {
        raw -= 15.0;
    } else if baby_age_months < 4 && solids_introduced {
        // Premature solids are penalized just as hard as delayed ones.
        raw -= 20.0;
    }

    let score = clamp_score(raw);

    let (status, urgency, diagnosis, mut advice) = if pain {
        (
            "painful latch",
            Urgency::High,
            "latch difficulty or engorgement",
            "**Assessment:** pain during breastfeeding calls for a **lactation consultant**."
                .to_string(),
        )
    } else if baby_age_months > 6 && !solids_introduced {
        (
            "delayed solids",
            Urgency::Moderate,
            "solid foods are overdue",
            "**Assessment:** the baby is past 6 months. Solid foods should be started."
                .to_string(),
        )
    } else if score <= 50.0 {
        (
            "feeding needs attention",
            Urgency::Moderate,
            "feeding routine needs improvement",
            "**Assessment:** several feeding issues need follow-up.".to_string(),
        )
    } else {
        (
            "adequate",
            Urgency::Low,
            "feeding pattern is suitable",
            "**Assessment:** the baby's feeding routine looks suitable.".to_string(),
        )
    };

    let mut tips: Vec<&str> = Vec::new();
    if feeding_type == "breast" && pain {
        tips.push(
            "**Latch:** try different nursing positions and check for a deep, comfortable latch.",
        );
    }
    if baby_age_months > 6 && !solids_introduced {
        tips.push("**Solids:** start with soft foods such as mashed banana or rice.");
    }
    if feeds_per_day < 6 && baby_age_months < 6 {
        tips.push("**Frequency:** increase to 8-12 feeds a day for young infants.");
    }

    if !tips.is_empty() {
        advice.push_str("\n\n");
        advice.push_str(&tips.join("\n"));
    }

    SectionAssessment {
        score,
        status,
        urgency,
        diagnosis,
        advice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Payload {
        value.as_object().expect("payload is an object").clone()
    }

    #[test]
    fn latch_pain_dominates_the_diagnosis() {
        let result = assess(
            &payload(json!({ "feeding_type": "breast", "pain_with_latch": true })),
            2,
        );
        assert_eq!(result.score, 55.0);
        assert_eq!(result.urgency, Urgency::High);
        assert!(result.diagnosis.contains("latch"));
        assert!(result.advice.contains("**Latch:**"));
    }

    #[test]
    fn low_formula_volume_is_penalized() {
        // Expected at 4 months: 600 mL; 0.7 * 600 = 420 > 300.
        let result = assess(
            &payload(json!({
                "feeding_type": "formula",
                "formula_amount_ml_per_day": 300
            })),
            4,
        );
        assert_eq!(result.score, 60.0);
        assert_eq!(result.urgency, Urgency::Low);
        assert_eq!(result.status, "adequate");
    }

    #[test]
    fn delayed_solids_flag_moderate_urgency() {
        let result = assess(&payload(json!({ "feeding_type": "breast" })), 8);
        assert_eq!(result.score, 65.0);
        assert_eq!(result.status, "delayed solids");
        assert_eq!(result.urgency, Urgency::Moderate);
        assert!(result.advice.contains("**Solids:**"));
    }

    #[test]
    fn premature_solids_are_penalized() {
        let result = assess(
            &payload(json!({ "feeding_type": "breast", "solids_introduced": true })),
            2,
        );
        assert_eq!(result.score, 60.0);
        assert_eq!(result.status, "adequate");
    }

    #[test]
    fn stacked_penalties_drop_into_the_generic_moderate_band() {
        // Breast, pain (-25), 4 feeds at 3 months (-10), solids at 3 months
        // (-20): 80 - 55 = 25 <= 50, but pain still wins the diagnosis.
        let result = assess(
            &payload(json!({
                "feeding_type": "breast",
                "pain_with_latch": true,
                "feeds_per_day": 4,
                "solids_introduced": true
            })),
            3,
        );
        assert_eq!(result.score, 25.0);
        assert_eq!(result.status, "painful latch");
        assert_eq!(result.urgency, Urgency::High);
    }

    #[test]
    fn defaults_alone_score_adequate() {
        let result = assess(&payload(json!({})), 2);
        assert_eq!(result.score, 80.0);
        assert_eq!(result.status, "adequate");
        assert_eq!(result.urgency, Urgency::Low);
    }
}
