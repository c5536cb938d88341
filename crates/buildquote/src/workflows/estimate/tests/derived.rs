use super::common::*;
use crate::workflows::estimate::derived::{
    apply_derived_updates, EXISTING_OPENING_STEEL_LENGTH, EXISTING_OPENING_SUPPORT,
    EXISTING_OPENING_WIDTH, NEW_OPENING_LINTEL_LENGTH, NEW_OPENING_STEEL_LENGTH,
    NEW_OPENING_SUPPORT, NEW_OPENING_WIDTH,
};
use crate::workflows::estimate::domain::{AnswerSource, AnswerValue};

#[test]
fn width_and_support_produce_the_matching_length() {
    let answers = answers_with(vec![
        (NEW_OPENING_WIDTH, AnswerValue::scalar(2.4)),
        (NEW_OPENING_SUPPORT, AnswerValue::scalar("steel")),
    ]);

    let next = apply_derived_updates(NEW_OPENING_WIDTH, &answers);

    assert_eq!(next.number(NEW_OPENING_STEEL_LENGTH), Some(2.7));
    assert_eq!(next.number(NEW_OPENING_LINTEL_LENGTH), None);
    assert_eq!(
        next.source(NEW_OPENING_STEEL_LENGTH),
        Some(AnswerSource::Derived)
    );
}

#[test]
fn switching_support_fills_the_other_length_and_keeps_the_first() {
    let answers = answers_with(vec![
        (NEW_OPENING_WIDTH, AnswerValue::scalar(2.4)),
        (NEW_OPENING_SUPPORT, AnswerValue::scalar("steel")),
    ]);
    let steel_filled = apply_derived_updates(NEW_OPENING_WIDTH, &answers);

    let mut switched = steel_filled.clone();
    switched.insert_manual(NEW_OPENING_SUPPORT, AnswerValue::scalar("lintel"));
    let next = apply_derived_updates(NEW_OPENING_SUPPORT, &switched);

    assert_eq!(next.number(NEW_OPENING_LINTEL_LENGTH), Some(2.7));
    // the steel figure is left in place, not cleared
    assert_eq!(next.number(NEW_OPENING_STEEL_LENGTH), Some(2.7));
}

#[test]
fn manual_length_survives_later_width_edits() {
    let mut answers = answers_with(vec![
        (NEW_OPENING_WIDTH, AnswerValue::scalar(2.4)),
        (NEW_OPENING_SUPPORT, AnswerValue::scalar("steel")),
    ]);
    answers.insert_manual(NEW_OPENING_STEEL_LENGTH, AnswerValue::scalar(3.3));

    let next = apply_derived_updates(NEW_OPENING_WIDTH, &answers);

    assert_eq!(next.number(NEW_OPENING_STEEL_LENGTH), Some(3.3));
    assert!(next.is_manual(NEW_OPENING_STEEL_LENGTH));
}

#[test]
fn auto_filled_length_tracks_width_changes() {
    let answers = answers_with(vec![
        (NEW_OPENING_WIDTH, AnswerValue::scalar(2.4)),
        (NEW_OPENING_SUPPORT, AnswerValue::scalar("steel")),
    ]);
    let mut next = apply_derived_updates(NEW_OPENING_WIDTH, &answers);
    assert_eq!(next.number(NEW_OPENING_STEEL_LENGTH), Some(2.7));

    next.insert_manual(NEW_OPENING_WIDTH, AnswerValue::scalar(3.0));
    let widened = apply_derived_updates(NEW_OPENING_WIDTH, &next);

    assert_eq!(widened.number(NEW_OPENING_STEEL_LENGTH), Some(3.3));
}

#[test]
fn numeric_string_width_is_tolerated() {
    let answers = answers_with(vec![
        (NEW_OPENING_WIDTH, AnswerValue::scalar("2.4")),
        (NEW_OPENING_SUPPORT, AnswerValue::scalar("steel")),
    ]);

    let next = apply_derived_updates(NEW_OPENING_SUPPORT, &answers);
    assert_eq!(next.number(NEW_OPENING_STEEL_LENGTH), Some(2.7));
}

#[test]
fn missing_or_invalid_width_is_a_no_op() {
    let no_width = answers_with(vec![(NEW_OPENING_SUPPORT, AnswerValue::scalar("steel"))]);
    let next = apply_derived_updates(NEW_OPENING_SUPPORT, &no_width);
    assert_eq!(next.get(NEW_OPENING_STEEL_LENGTH), None);

    let unparseable = answers_with(vec![
        (NEW_OPENING_WIDTH, AnswerValue::scalar("about three")),
        (NEW_OPENING_SUPPORT, AnswerValue::scalar("steel")),
    ]);
    let next = apply_derived_updates(NEW_OPENING_WIDTH, &unparseable);
    assert_eq!(next.get(NEW_OPENING_STEEL_LENGTH), None);

    let negative = answers_with(vec![
        (NEW_OPENING_WIDTH, AnswerValue::scalar(-2.0)),
        (NEW_OPENING_SUPPORT, AnswerValue::scalar("steel")),
    ]);
    let next = apply_derived_updates(NEW_OPENING_WIDTH, &negative);
    assert_eq!(next.get(NEW_OPENING_STEEL_LENGTH), None);
}

#[test]
fn missing_support_type_is_a_no_op() {
    let answers = answers_with(vec![(NEW_OPENING_WIDTH, AnswerValue::scalar(2.4))]);
    let next = apply_derived_updates(NEW_OPENING_WIDTH, &answers);

    assert_eq!(next.get(NEW_OPENING_STEEL_LENGTH), None);
    assert_eq!(next.get(NEW_OPENING_LINTEL_LENGTH), None);
}

#[test]
fn unrelated_key_changes_leave_the_snapshot_alone() {
    let answers = answers_with(vec![
        ("roof_type", AnswerValue::scalar("flat")),
        (NEW_OPENING_WIDTH, AnswerValue::scalar(2.4)),
        (NEW_OPENING_SUPPORT, AnswerValue::scalar("steel")),
    ]);

    let next = apply_derived_updates("roof_type", &answers);
    assert_eq!(next, answers);
}

#[test]
fn opening_groups_are_tracked_independently() {
    let answers = answers_with(vec![
        (NEW_OPENING_WIDTH, AnswerValue::scalar(2.4)),
        (NEW_OPENING_SUPPORT, AnswerValue::scalar("steel")),
        (EXISTING_OPENING_WIDTH, AnswerValue::scalar(1.8)),
        (EXISTING_OPENING_SUPPORT, AnswerValue::scalar("steel")),
    ]);

    let next = apply_derived_updates(EXISTING_OPENING_WIDTH, &answers);

    assert_eq!(next.number(EXISTING_OPENING_STEEL_LENGTH), Some(2.1));
    // the new-opening group is untouched by an existing-opening change
    assert_eq!(next.get(NEW_OPENING_STEEL_LENGTH), None);
}
