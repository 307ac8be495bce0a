use serde::Deserialize;
use serde_json::Value;

use super::{lenient_flag, lenient_number};
use crate::engine::types::{clamp_score, Payload, SectionAssessment, Urgency};

/// Maternal well-being questionnaire. Defaults assume a neutral, coping
/// mother: zero reported stress, eating well.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MothercareInput {
    /// Self-reported anxiety, 0-10 scale. Default 0.
    #[serde(default, deserialize_with = "lenient_number")]
    anxiety_level: Option<f64>,
    /// Self-reported sadness, 0-10 scale. Default 0.
    #[serde(default, deserialize_with = "lenient_number")]
    sadness_level: Option<f64>,
    /// Hours of rest per day. Default 0.
    #[serde(default, deserialize_with = "lenient_number")]
    resting_hours: Option<f64>,
    /// Times per week someone helps out. Default 0.
    #[serde(default, deserialize_with = "lenient_number")]
    support_frequency: Option<f64>,
    /// Whether she is managing balanced meals. Default true.
    #[serde(default, deserialize_with = "lenient_flag")]
    eating_well: Option<bool>,
}

impl MothercareInput {
    fn from_payload(payload: &Payload) -> Self {
        serde_json::from_value(Value::Object(payload.clone())).unwrap_or_default()
    }
}

pub(crate) fn assess(payload: &Payload, _baby_age_months: i64) -> SectionAssessment {
    let input = MothercareInput::from_payload(payload);
    let anxiety = input.anxiety_level.unwrap_or(0.0);
    let sadness = input.sadness_level.unwrap_or(0.0);
    let rest = input.resting_hours.unwrap_or(0.0);
    let support = input.support_frequency.unwrap_or(0.0);
    let eating_well = input.eating_well.unwrap_or(true);

    let mental_risk = anxiety + sadness;
    let mut raw = 100.0 - mental_risk * 3.0;

    if rest < 5.0 {
        raw -= 15.0;
    }
    if support < 1.0 {
        raw -= 10.0;
    }
    if !eating_well {
        raw -= 5.0;
    }

    let score = clamp_score(raw);

    let (status, urgency, diagnosis, mut advice) = if mental_risk >= 14.0 || score <= 40.0 {
        (
            "needs urgent psychological support",
            Urgency::High,
            "marked elevation in anxiety and sadness",
            "**Assessment:** anxiety and sadness are running very high. Please see a \
             **mental-health specialist or physician** promptly to review your wellbeing."
                .to_string(),
        )
    } else if mental_risk >= 8.0 || score <= 60.0 {
        (
            "monitoring and emotional support",
            Urgency::Moderate,
            "moderate level of emotional exhaustion",
            "**Assessment:** a moderate level of emotional exhaustion. Our recommendation: \
             build some non-negotiable rest into your day."
                .to_string(),
        )
    } else {
        (
            "stable",
            Urgency::Low,
            "emotional state relatively stable",
            "**Assessment:** your emotional state is stable. Keep up your self-care routine."
                .to_string(),
        )
    };

    let mut tips: Vec<&str> = Vec::new();
    if rest < 5.0 {
        tips.push("**Rest:** you are sleeping under 5 hours. Try to sleep whenever the baby sleeps.");
    }
    if support < 1.0 {
        tips.push("**Support:** ask family or friends for help at least once a week.");
    }
    if !eating_well {
        tips.push("**Nutrition:** keep meals balanced to restore your energy.");
    }
    if anxiety > 7.0 {
        tips.push("**Anxiety:** try five minutes of deep-breathing exercises daily.");
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
