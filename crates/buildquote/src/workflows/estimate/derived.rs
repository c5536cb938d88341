use super::domain::{AnswerMap, AnswerValue, Scalar};

pub const NEW_OPENING_WIDTH: &str = "new_opening_width";
pub const NEW_OPENING_SUPPORT: &str = "new_opening_support";
pub const NEW_OPENING_STEEL_LENGTH: &str = "new_opening_steel_length";
pub const NEW_OPENING_LINTEL_LENGTH: &str = "new_opening_lintel_length";

pub const EXISTING_OPENING_WIDTH: &str = "existing_opening_width";
pub const EXISTING_OPENING_SUPPORT: &str = "existing_opening_support";
pub const EXISTING_OPENING_STEEL_LENGTH: &str = "existing_opening_steel_length";
pub const EXISTING_OPENING_LINTEL_LENGTH: &str = "existing_opening_lintel_length";

pub const SUPPORT_STEEL: &str = "steel";
pub const SUPPORT_LINTEL: &str = "lintel";

/// 150 mm bearing at each end of a support spanning a structural opening.
pub const SUPPORT_BEARING_M: f64 = 0.3;

struct OpeningKeys {
    width: &'static str,
    support: &'static str,
    steel_length: &'static str,
    lintel_length: &'static str,
}

const OPENING_GROUPS: [OpeningKeys; 2] = [
    OpeningKeys {
        width: NEW_OPENING_WIDTH,
        support: NEW_OPENING_SUPPORT,
        steel_length: NEW_OPENING_STEEL_LENGTH,
        lintel_length: NEW_OPENING_LINTEL_LENGTH,
    },
    OpeningKeys {
        width: EXISTING_OPENING_WIDTH,
        support: EXISTING_OPENING_SUPPORT,
        steel_length: EXISTING_OPENING_STEEL_LENGTH,
        lintel_length: EXISTING_OPENING_LINTEL_LENGTH,
    },
];

/// Produce the next answer snapshot after a single answer change, filling in
/// the support length that corresponds to the currently selected support
/// type whenever an opening's width and support type are both known.
///
/// Only the length field matching the selected support is written; the other
/// support's length is left untouched. A length the estimator entered by
/// hand is never overwritten. Missing, non-numeric, or non-positive widths
/// produce no derived update.
pub fn apply_derived_updates(changed_key: &str, answers: &AnswerMap) -> AnswerMap {
    let mut next = answers.clone();

    let Some(group) = OPENING_GROUPS
        .iter()
        .find(|group| group.width == changed_key || group.support == changed_key)
    else {
        return next;
    };

    let Some(width) = next.number(group.width).filter(|width| *width > 0.0) else {
        return next;
    };

    let target = match next.scalar(group.support) {
        Some(Scalar::Text(kind)) if kind.as_str() == SUPPORT_STEEL => group.steel_length,
        Some(Scalar::Text(kind)) if kind.as_str() == SUPPORT_LINTEL => group.lintel_length,
        _ => return next,
    };

    if next.is_manual(target) {
        return next;
    }

    let length = to_two_dp(width + SUPPORT_BEARING_M);
    next.insert_derived(target, AnswerValue::scalar(length));
    next
}

fn to_two_dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
