use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use super::domain::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionControl {
    CardGrid,
    MultiSelect,
    Select,
}

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub label: String,
    pub value: Scalar,
}

impl QuestionOption {
    pub fn new(id: &str, label: &str, value: impl Into<Scalar>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyCondition {
    Equals,
    NotEquals,
    In,
    NotIn,
    /// A condition this build does not recognise evaluates as satisfied, so
    /// a template data error can never hide a question.
    Unrecognized,
}

impl<'de> Deserialize<'de> for DependencyCondition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "equals" => Self::Equals,
            "notEquals" => Self::NotEquals,
            "in" => Self::In,
            "notIn" => Self::NotIn,
            _ => Self::Unrecognized,
        })
    }
}

/// The value side of a dependency: a single scalar or a set of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyValue {
    One(Scalar),
    Many(Vec<Scalar>),
}

impl DependencyValue {
    /// Normalized view of the value as a set of scalars.
    pub fn scalars(&self) -> &[Scalar] {
        match self {
            DependencyValue::One(scalar) => std::slice::from_ref(scalar),
            DependencyValue::Many(scalars) => scalars,
        }
    }
}

/// A condition on another question's answer that gates visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub question_id: String,
    pub condition: DependencyCondition,
    pub value: DependencyValue,
}

impl Dependency {
    pub fn equals(question_id: &str, value: impl Into<Scalar>) -> Self {
        Self {
            question_id: question_id.to_string(),
            condition: DependencyCondition::Equals,
            value: DependencyValue::One(value.into()),
        }
    }

    pub fn not_equals(question_id: &str, value: impl Into<Scalar>) -> Self {
        Self {
            question_id: question_id.to_string(),
            condition: DependencyCondition::NotEquals,
            value: DependencyValue::One(value.into()),
        }
    }

    pub fn any_of<I, S>(question_id: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        Self {
            question_id: question_id.to_string(),
            condition: DependencyCondition::In,
            value: DependencyValue::Many(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn none_of<I, S>(question_id: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        Self {
            question_id: question_id.to_string(),
            condition: DependencyCondition::NotIn,
            value: DependencyValue::Many(values.into_iter().map(Into::into).collect()),
        }
    }
}

/// Composite visibility rule: arbitrary nesting of AND/OR groups over
/// dependencies, so no evaluator code needs to know specific question ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisibilityRule {
    Always,
    Condition(Dependency),
    All(Vec<VisibilityRule>),
    Any(Vec<VisibilityRule>),
}

impl VisibilityRule {
    pub fn when(dependency: Dependency) -> Self {
        VisibilityRule::Condition(dependency)
    }

    /// AND across a plain dependency list, the common template shape.
    pub fn all_of<I>(dependencies: I) -> Self
    where
        I: IntoIterator<Item = Dependency>,
    {
        VisibilityRule::All(
            dependencies
                .into_iter()
                .map(VisibilityRule::Condition)
                .collect(),
        )
    }

    /// OR across a dependency list, for questions shared between
    /// mutually exclusive sub-flows.
    pub fn any_of<I>(dependencies: I) -> Self
    where
        I: IntoIterator<Item = Dependency>,
    {
        VisibilityRule::Any(
            dependencies
                .into_iter()
                .map(VisibilityRule::Condition)
                .collect(),
        )
    }

    pub fn is_conditional(&self) -> bool {
        !matches!(self, VisibilityRule::Always)
    }
}

impl Default for VisibilityRule {
    fn default() -> Self {
        VisibilityRule::Always
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub label: String,
    pub control: QuestionControl,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub visibility: VisibilityRule,
}

impl Question {
    pub fn new(id: &str, label: &str, control: QuestionControl) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            control,
            options: Vec::new(),
            required: false,
            visibility: VisibilityRule::Always,
        }
    }

    pub fn with_options(mut self, options: Vec<QuestionOption>) -> Self {
        self.options = options;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn visible_when(mut self, rule: VisibilityRule) -> Self {
        self.visibility = rule;
        self
    }

    /// A question shown only under a condition must be answered once shown,
    /// even when its declared `required` flag is false.
    pub fn is_effectively_required(&self) -> bool {
        self.required || self.visibility.is_conditional()
    }
}
