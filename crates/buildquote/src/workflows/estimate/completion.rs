use super::blueprint::{EstimateTemplate, QuestionStep, StepKind};
use super::domain::{AnswerMap, AnswerValue};
use super::question::{Question, QuestionControl};
use super::visibility::is_visible;

/// A step is complete when every visible, effectively required question in
/// it is answered. The two composite steps carry their answers under a
/// single block key and use positivity checks instead.
pub fn is_step_complete(step: &QuestionStep, answers: &AnswerMap) -> bool {
    match step.kind {
        StepKind::Dimensions => answers
            .dimensions()
            .map(|block| block.length_m > 0.0 && block.width_m > 0.0)
            .unwrap_or(false),
        StepKind::Measurements => answers
            .measurements()
            .map(|block| {
                block.external_length_m > 0.0
                    && block.external_width_m > 0.0
                    && block.floor_area_m2 > 0.0
            })
            .unwrap_or(false),
        StepKind::Form => step.questions.iter().all(|question| {
            !is_visible(question, answers)
                || !question.is_effectively_required()
                || is_answered(question, answers)
        }),
    }
}

/// The estimate can be generated once every step in the template is
/// complete, in template order.
pub fn can_generate(template: &EstimateTemplate, answers: &AnswerMap) -> bool {
    template
        .steps()
        .iter()
        .all(|step| is_step_complete(step, answers))
}

/// Share of visible, effectively required questions already answered,
/// rounded to the nearest whole percent. An empty requirement set counts
/// as fully complete.
pub fn completion_percent(template: &EstimateTemplate, answers: &AnswerMap) -> u8 {
    let mut required = 0u32;
    let mut answered = 0u32;

    for question in template.questions() {
        if !question.is_effectively_required() || !is_visible(question, answers) {
            continue;
        }
        required += 1;
        if is_answered(question, answers) {
            answered += 1;
        }
    }

    if required == 0 {
        return 100;
    }

    ((f64::from(answered) / f64::from(required)) * 100.0).round() as u8
}

pub(crate) fn is_answered(question: &Question, answers: &AnswerMap) -> bool {
    let Some(value) = answers.get(&question.id) else {
        return false;
    };

    match question.control {
        QuestionControl::MultiSelect => {
            matches!(value, AnswerValue::Many(selected) if !selected.is_empty())
        }
        QuestionControl::CardGrid | QuestionControl::Select => match value {
            AnswerValue::Scalar(scalar) => !scalar.is_blank(),
            AnswerValue::Many(selected) => !selected.is_empty(),
            _ => false,
        },
    }
}
