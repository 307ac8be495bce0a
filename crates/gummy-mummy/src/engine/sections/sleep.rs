use serde::Deserialize;
use serde_json::Value;

use super::{lenient_count, lenient_flag, lenient_number};
use crate::engine::types::{clamp_score, Payload, SectionAssessment, Urgency};

/// Infant sleep questionnaire. Defaults assume nothing was recorded (zero
/// hours) but a self-settling baby.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SleepInput {
    /// Total sleep across 24 hours. Default 0.
    #[serde(default, deserialize_with = "lenient_number")]
    total_sleep_24h: Option<f64>,
    /// Longest uninterrupted block, in hours. Default 0.
    #[serde(default, deserialize_with = "lenient_number")]
    longest_sleep_block_h: Option<f64>,
    /// Whether the baby falls asleep without help. Default true.
    #[serde(default, deserialize_with = "lenient_flag")]
    falls_asleep_alone: Option<bool>,
    /// Night wake-ups. Default 0.
    #[serde(default, deserialize_with = "lenient_count")]
    night_wake_ups: Option<i64>,
}

impl SleepInput {
    fn from_payload(payload: &Payload) -> Self {
        serde_json::from_value(Value::Object(payload.clone())).unwrap_or_default()
    }
}

/// Age-banded ideal total sleep (hours per 24h).
fn ideal_range(baby_age_months: i64) -> (f64, f64) {
    if baby_age_months <= 3 {
        (14.0, 17.0)
    } else if baby_age_months <= 11 {
        (12.0, 15.0)
    } else {
        (11.0, 14.0)
    }
}

pub(crate) fn assess(payload: &Payload, baby_age_months: i64) -> SectionAssessment {
    let input = SleepInput::from_payload(payload);
    let total = input.total_sleep_24h.unwrap_or(0.0);
    let longest = input.longest_sleep_block_h.unwrap_or(0.0);
    let falls_asleep_alone = input.falls_asleep_alone.unwrap_or(true);
    let wake_ups = input.night_wake_ups.unwrap_or(0);

    let (ideal_min, ideal_max) = ideal_range(baby_age_months);
    let ideal_avg = (ideal_min + ideal_max) / 2.0;

    let mut raw = (100.0 - (total - ideal_avg).abs() * 8.0).max(0.0);

    if longest < 4.0 && baby_age_months > 4 {
        raw -= 15.0;
    }
    if !falls_asleep_alone && baby_age_months > 6 {
        raw -= 10.0;
    }
    if wake_ups > 3 {
        raw -= (wake_ups - 3) as f64 * 5.0;
    }

    let score = clamp_score(raw);

    let (status, urgency, diagnosis, mut advice) = if total < ideal_min * 0.8 {
        (
            "severe deficit",
            Urgency::Moderate,
            "sleep hours well below the typical range",
            format!(
                "**Assessment:** the baby is sleeping only {total} hours \
                 (typical range: {ideal_min}-{ideal_max} hours)."
            ),
        )
    } else if total < ideal_min {
        (
            "slightly below expected",
            Urgency::Low,
            "mild shortfall in sleep hours",
            format!(
                "**Assessment:** sleep is close to typical \
                 ({total} of {ideal_min}-{ideal_max} hours)."
            ),
        )
    } else {
        (
            "normal",
            Urgency::Low,
            "sleep pattern within the typical range",
            "**Assessment:** the baby's sleep falls within the typical range.".to_string(),
        )
    };

    let mut tips: Vec<&str> = Vec::new();
    if longest < 4.0 && baby_age_months > 4 {
        tips.push(
            "**Longest stretch:** work toward a 4-6 hour block by lowering stimulation at night.",
        );
    }
    if !falls_asleep_alone {
        tips.push(
            "**Self-settling:** put the baby down drowsy but awake so they learn to fall asleep alone.",
        );
    }
    if wake_ups > 3 {
        tips.push("**Night waking:** shorten daytime naps if they run long.");
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
    fn two_month_old_within_band_is_normal() {
        let result = assess(&payload(json!({ "total_sleep_24h": 16 })), 2);
        // |16 - 15.5| * 8 = 4 off the top; no penalties apply at this age.
        assert_eq!(result.score, 96.0);
        assert_eq!(result.status, "normal");
        assert_eq!(result.urgency, Urgency::Low);
    }

    #[test]
    fn midpoint_sleep_scores_a_clean_hundred() {
        let result = assess(&payload(json!({ "total_sleep_24h": 15.5 })), 2);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.status, "normal");
    }

    #[test]
    fn severe_deficit_below_eighty_percent_of_minimum() {
        // ideal_min = 14, 8 < 11.2.
        let result = assess(&payload(json!({ "total_sleep_24h": 8 })), 2);
        assert_eq!(result.status, "severe deficit");
        assert_eq!(result.urgency, Urgency::Moderate);
        assert!(result.advice.contains("14-17"));
    }

    #[test]
    fn slight_shortfall_stays_low_urgency() {
        let result = assess(&payload(json!({ "total_sleep_24h": 13 })), 2);
        assert_eq!(result.status, "slightly below expected");
        assert_eq!(result.urgency, Urgency::Low);
    }

    #[test]
    fn penalties_stack_for_older_babies() {
        // 8 months: band 12-15, avg 13.5. total 13.5 => base 100.
        // longest 3 < 4 (age > 4): -15; no self-settling (age > 6): -10;
        // 5 wake-ups: -(5-3)*5 = -10. Final 65.
        let result = assess(
            &payload(json!({
                "total_sleep_24h": 13.5,
                "longest_sleep_block_h": 3,
                "falls_asleep_alone": false,
                "night_wake_ups": 5
            })),
            8,
        );
        assert_eq!(result.score, 65.0);
        assert!(result.advice.contains("**Longest stretch:**"));
        assert!(result.advice.contains("**Self-settling:**"));
        assert!(result.advice.contains("**Night waking:**"));
    }

    #[test]
    fn age_bands_shift_with_months() {
        assert_eq!(ideal_range(0), (14.0, 17.0));
        assert_eq!(ideal_range(3), (14.0, 17.0));
        assert_eq!(ideal_range(4), (12.0, 15.0));
        assert_eq!(ideal_range(11), (12.0, 15.0));
        assert_eq!(ideal_range(12), (11.0, 14.0));
    }
}
