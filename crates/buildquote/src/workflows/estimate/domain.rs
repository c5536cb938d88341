use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Composite answer key holding the dimension entry block.
pub const DIMENSIONS_KEY: &str = "dimensions";

/// Composite answer key holding the site measurement block.
pub const MEASUREMENTS_KEY: &str = "measurements";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EstimateId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    Draft,
    InProgress,
    ReadyToGenerate,
}

impl EstimateStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in progress",
            Self::ReadyToGenerate => "ready to generate",
        }
    }
}

/// A single answer atom: every option value and scalar answer is one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Numeric reading of the scalar. Numeric strings parse; anything else
    /// reads as absent rather than failing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(value) => Some(*value),
            Scalar::Text(raw) => raw.trim().parse().ok(),
            Scalar::Bool(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(raw) if raw.trim().is_empty())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Raw plan dimensions captured on the dimension entry step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionValues {
    #[serde(default)]
    pub length_m: f64,
    #[serde(default)]
    pub width_m: f64,
}

/// Surveyed external measurements captured on the site measurement step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeasurementValues {
    #[serde(default)]
    pub external_length_m: f64,
    #[serde(default)]
    pub external_width_m: f64,
    #[serde(default)]
    pub floor_area_m2: f64,
    #[serde(default)]
    pub eaves_height_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_height_m: Option<f64>,
}

/// One slot in the answer map. Composite blocks are typed variants rather
/// than loose JSON objects so their shape is checked at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Scalar(Scalar),
    Many(Vec<Scalar>),
    Measurements(MeasurementValues),
    Dimensions(DimensionValues),
}

impl AnswerValue {
    pub fn scalar(value: impl Into<Scalar>) -> Self {
        AnswerValue::Scalar(value.into())
    }

    pub fn many<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        AnswerValue::Many(values.into_iter().map(Into::into).collect())
    }
}

/// Records whether a value was typed in or auto-calculated, so derived
/// updates never clobber a figure the estimator entered by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Manual,
    Derived,
}

/// Flat answer snapshot keyed by question id or composite block key.
///
/// Every engine operation treats a snapshot as immutable input and produces
/// the next snapshot. Insertion order is irrelevant; keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerMap {
    values: HashMap<String, AnswerValue>,
    #[serde(default)]
    provenance: HashMap<String, AnswerSource>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_manual(&mut self, key: impl Into<String>, value: AnswerValue) {
        let key = key.into();
        self.provenance.insert(key.clone(), AnswerSource::Manual);
        self.values.insert(key, value);
    }

    pub fn insert_derived(&mut self, key: impl Into<String>, value: AnswerValue) {
        let key = key.into();
        self.provenance.insert(key.clone(), AnswerSource::Derived);
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    pub fn scalar(&self, key: &str) -> Option<&Scalar> {
        match self.values.get(key) {
            Some(AnswerValue::Scalar(scalar)) => Some(scalar),
            _ => None,
        }
    }

    pub fn list(&self, key: &str) -> Option<&[Scalar]> {
        match self.values.get(key) {
            Some(AnswerValue::Many(selected)) => Some(selected),
            _ => None,
        }
    }

    /// Numeric reading of a scalar answer; non-numeric answers read as absent.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.scalar(key).and_then(Scalar::as_number)
    }

    pub fn dimensions(&self) -> Option<&DimensionValues> {
        match self.values.get(DIMENSIONS_KEY) {
            Some(AnswerValue::Dimensions(block)) => Some(block),
            _ => None,
        }
    }

    pub fn measurements(&self) -> Option<&MeasurementValues> {
        match self.values.get(MEASUREMENTS_KEY) {
            Some(AnswerValue::Measurements(block)) => Some(block),
            _ => None,
        }
    }

    pub fn source(&self, key: &str) -> Option<AnswerSource> {
        self.provenance.get(key).copied()
    }

    pub fn is_manual(&self, key: &str) -> bool {
        self.source(key) == Some(AnswerSource::Manual)
    }

    pub fn merge(&mut self, other: AnswerMap) {
        self.values.extend(other.values);
        self.provenance.extend(other.provenance);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.values.iter()
    }
}
