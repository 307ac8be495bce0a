//! End-to-end specifications for the advice engine: score clamping, the
//! documented rule vectors, the unknown-section fallback, and determinism of
//! everything except the narrative framing.

use gummy_mummy::engine::{AdviceEngine, Payload, Section, Urgency, SCORE_CEILING, SCORE_FLOOR};
use serde_json::json;

fn payload(value: serde_json::Value) -> Payload {
    value.as_object().expect("payload is an object").clone()
}

fn all_sections() -> Vec<Section> {
    vec![
        Section::Mothercare,
        Section::Sleep,
        Section::Feeding,
        Section::Hygiene,
        Section::Triage,
        Section::Development,
        Section::Unknown("xyz".to_string()),
    ]
}

#[test]
fn every_rule_clamps_scores_into_range() {
    let engine = AdviceEngine::seeded(3);
    let adversarial = [
        payload(json!({})),
        payload(json!({
            "anxiety_level": 10, "sadness_level": 10, "resting_hours": 0,
            "support_frequency": 0, "eating_well": false
        })),
        payload(json!({
            "total_sleep_24h": 0, "longest_sleep_block_h": 0,
            "falls_asleep_alone": false, "night_wake_ups": 30,
            "baby_age_months": 18
        })),
        payload(json!({
            "feeding_type": "breast", "pain_with_latch": true,
            "feeds_per_day": 1, "solids_introduced": true, "baby_age_months": 2
        })),
        // Wrong-typed fields read as defaults, never as failures.
        payload(json!({
            "anxiety_level": "extreme", "total_sleep_24h": [], "pain_with_latch": "yes"
        })),
    ];

    for section in all_sections() {
        for body in &adversarial {
            let result = engine.evaluate(&section, None, body);
            assert!(
                (SCORE_FLOOR..=SCORE_CEILING).contains(&result.score),
                "section {} produced out-of-range score {}",
                section.name(),
                result.score
            );
        }
    }
}

#[test]
fn mothercare_crisis_vector_hits_the_floor() {
    let engine = AdviceEngine::seeded(0);
    let result = engine.evaluate(
        &Section::Mothercare,
        None,
        &payload(json!({
            "anxiety_level": 10,
            "sadness_level": 10,
            "resting_hours": 3,
            "support_frequency": 0,
            "eating_well": false
        })),
    );
    assert_eq!(result.score, 10.0);
    assert_eq!(result.urgency, Urgency::High);
}

#[test]
fn sleep_within_band_is_normal_and_low_urgency() {
    let engine = AdviceEngine::seeded(0);
    let result = engine.evaluate(
        &Section::Sleep,
        None,
        &payload(json!({ "baby_age_months": 2, "total_sleep_24h": 16 })),
    );
    assert_eq!(result.status, "normal");
    assert_eq!(result.urgency, Urgency::Low);
    assert_eq!(result.score, 96.0);
}

#[test]
fn sleep_severe_deficit_vector() {
    let engine = AdviceEngine::seeded(0);
    let result = engine.evaluate(
        &Section::Sleep,
        None,
        &payload(json!({ "baby_age_months": 2, "total_sleep_24h": 8 })),
    );
    assert_eq!(result.status, "severe deficit");
    assert_eq!(result.urgency, Urgency::Moderate);
}

#[test]
fn feeding_latch_pain_vector() {
    let engine = AdviceEngine::seeded(0);
    let result = engine.evaluate(
        &Section::Feeding,
        None,
        &payload(json!({ "feeding_type": "breast", "pain_with_latch": true })),
    );
    assert_eq!(result.score, 55.0);
    assert_eq!(result.urgency, Urgency::High);
    assert!(result.diagnosis.expect("diagnosis present").contains("latch"));
}

#[test]
fn unknown_section_never_raises_and_prompts_for_a_valid_one() {
    let engine = AdviceEngine::seeded(0);
    let result = engine.evaluate(&Section::from_name("xyz"), None, &payload(json!({})));
    assert_eq!(result.score, 50.0);
    assert_eq!(result.status, "unknown");
    assert_eq!(result.urgency, Urgency::Low);
    assert!(result.advice.contains("valid section"));
}

#[test]
fn identical_inputs_yield_identical_rule_output() {
    let engine = AdviceEngine::new();
    let body = payload(json!({
        "feeding_type": "formula",
        "formula_amount_ml_per_day": 400,
        "baby_age_months": 5
    }));

    let first = engine.evaluate(&Section::Feeding, None, &body);
    let second = engine.evaluate(&Section::Feeding, None, &body);

    assert_eq!(first.score, second.score);
    assert_eq!(first.status, second.status);
    assert_eq!(first.urgency, second.urgency);
    assert_eq!(first.diagnosis, second.diagnosis);
    assert_eq!(first.details, second.details);
}

#[test]
fn equal_seeds_reproduce_the_full_advice_text() {
    let body = payload(json!({ "total_sleep_24h": 13, "baby_age_months": 2 }));
    let first = AdviceEngine::seeded(42).evaluate(&Section::Sleep, None, &body);
    let second = AdviceEngine::seeded(42).evaluate(&Section::Sleep, None, &body);
    assert_eq!(first.advice, second.advice);
}

#[test]
fn details_echo_the_submitted_payload() {
    let engine = AdviceEngine::seeded(0);
    let body = payload(json!({ "total_sleep_24h": 12, "custom_note": "naps in stroller" }));
    let result = engine.evaluate(&Section::Sleep, None, &body);
    assert_eq!(result.details, body);
}
