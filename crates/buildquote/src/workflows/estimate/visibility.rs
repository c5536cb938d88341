use super::domain::{AnswerMap, AnswerValue};
use super::question::{Dependency, DependencyCondition, Question, VisibilityRule};

/// Decide whether a question should be shown for the current answers.
pub fn is_visible(question: &Question, answers: &AnswerMap) -> bool {
    rule_holds(&question.visibility, answers)
}

fn rule_holds(rule: &VisibilityRule, answers: &AnswerMap) -> bool {
    match rule {
        VisibilityRule::Always => true,
        VisibilityRule::Condition(dependency) => dependency_holds(dependency, answers),
        VisibilityRule::All(rules) => rules.iter().all(|rule| rule_holds(rule, answers)),
        VisibilityRule::Any(rules) => rules.iter().any(|rule| rule_holds(rule, answers)),
    }
}

/// A referenced answer that is missing, unanswered, or a composite block
/// never matches: `equals`/`in` fail and `notEquals`/`notIn` hold. An
/// `equals` against a list-valued dependency value degrades to membership.
fn dependency_holds(dependency: &Dependency, answers: &AnswerMap) -> bool {
    let wanted = dependency.value.scalars();
    let matched = match answers.get(&dependency.question_id) {
        Some(AnswerValue::Scalar(actual)) => wanted.contains(actual),
        Some(AnswerValue::Many(selected)) => {
            selected.iter().any(|scalar| wanted.contains(scalar))
        }
        _ => false,
    };

    match dependency.condition {
        DependencyCondition::Equals | DependencyCondition::In => matched,
        DependencyCondition::NotEquals | DependencyCondition::NotIn => !matched,
        DependencyCondition::Unrecognized => true,
    }
}
