//! Cultural compatibility scoring between a resource and a requester.

use crate::model::{DispatchRequest, Resource};

/// Dialects treated as code-mixed with English. A resource that speaks
/// English can serve these preferences reasonably well even without the
/// exact dialect.
const CODE_MIXED_DIALECTS: &[&str] = &["hinglish", "tanglish", "manglish", "kanglish", "benglish"];

/// Score how well a resource matches the requester's language, region,
/// and festival expectations.
///
/// Additive: base 0.5, plus bonuses for an exact language match (or an
/// English fallback for code-mixed preferences), regional familiarity,
/// cultural sensitivity, and mutual festival awareness. Clipped to
/// [0, 1]. Pure and stable: the score never decreases when an additional
/// bonus condition is satisfied.
pub fn compatibility(resource: &Resource, request: &DispatchRequest) -> f64 {
    let mut score = 0.5;

    let preference = request.customer.language_preference.as_str();
    if resource.cultural.speaks(preference) {
        score += 0.3;
    } else if is_code_mixed(preference) && resource.cultural.speaks("english") {
        score += 0.2;
    }

    let region = request.cultural_context.region.as_str();
    if resource
        .cultural
        .regional_familiarity
        .iter()
        .any(|known| known.eq_ignore_ascii_case(region))
    {
        score += 0.2;
    }

    // 0-10 sensitivity rating scaled into a small bonus.
    score += (resource.performance.cultural_sensitivity / 10.0) * 0.1;

    if request.cultural_context.festival_awareness && resource.cultural.festival_awareness {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}

fn is_code_mixed(preference: &str) -> bool {
    CODE_MIXED_DIALECTS
        .iter()
        .any(|dialect| dialect.eq_ignore_ascii_case(preference.trim()))
}
