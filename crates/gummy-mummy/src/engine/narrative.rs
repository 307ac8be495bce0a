//! Narrative framing around a rule's assessment: a warm introduction, a
//! short profile recap, the rule's advice, and a closing encouragement.
//!
//! Sentence choice is the only randomness in the engine and sits behind a
//! seedable source so tests can pin the full output.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::types::{Assessment, Payload, SectionAssessment};
use crate::profile::ClientProfile;

const INTROS: [&str; 3] = [
    "You are doing a wonderful job despite the challenges. Here is an in-depth assessment with advice:",
    "Thank you for sharing your details. Here is a careful analysis with recommendations:",
    "We are here to support you. This is your personalized assessment:",
];

const ENCOURAGEMENTS: [&str; 4] = [
    "Remember that a short rest is better than none: set aside 10 minutes for yourself.",
    "You are not alone; ask for help whenever you need it.",
    "Small progress counts. Be kind to yourself today.",
    "Enjoy the little moments. This stage will not last forever!",
];

/// Picks intro and closing sentences from fixed pools.
pub struct Narrator {
    rng: Mutex<StdRng>,
}

impl Narrator {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick(&self, pool: &'static [&'static str]) -> &'static str {
        let mut rng = self.rng.lock().expect("narrator rng poisoned");
        pool[rng.gen_range(0..pool.len())]
    }

    pub(crate) fn compose(
        &self,
        fragment: SectionAssessment,
        profile: Option<&ClientProfile>,
        payload: &Payload,
        baby_age_months: i64,
    ) -> Assessment {
        let intro = self.pick(&INTROS);
        let encouragement = self.pick(&ENCOURAGEMENTS);
        let note = profile_note(profile, baby_age_months);

        let advice = format!(
            "{intro}{note}\n\n{}\n\n---\n**Motivational message:** {encouragement}",
            fragment.advice
        );

        Assessment {
            score: fragment.score,
            status: fragment.status.to_string(),
            advice,
            urgency: fragment.urgency,
            details: payload.clone(),
            diagnosis: Some(fragment.diagnosis.to_string()),
        }
    }
}

/// Parenthesized recap of what we know about the mother, in fixed order.
/// Empty when nothing applies (including the anonymous, age-zero case).
fn profile_note(profile: Option<&ClientProfile>, baby_age_months: i64) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(profile) = profile {
        if let Some(name) = &profile.name {
            parts.push(name.clone());
        }
        if profile.is_first_child {
            parts.push("first pregnancy".to_string());
        }
    }

    if baby_age_months != 0 {
        parts.push(format!("baby age is {baby_age_months} months"));
    }

    if profile.map(|p| p.is_breastfeeding).unwrap_or(false) {
        parts.push("currently breastfeeding".to_string());
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(" — ({})", parts.join(" · "))
    }
}
