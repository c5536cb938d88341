use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofType {
    Flat,
    Pitched,
}

/// Raw dimensional inputs for the take-off calculator.
///
/// Everything beyond the external envelope is optional and falls back to
/// the practice-standard figures in `Default`, so a partially surveyed site
/// still yields a complete take-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementInputs {
    pub external_length_m: f64,
    pub external_width_m: f64,
    pub eaves_height_m: f64,
    pub ceiling_height_m: Option<f64>,
    pub roof_type: Option<RoofType>,
    /// Explicit roof factor; when absent the factor follows the roof type.
    pub roof_factor: Option<f64>,
    pub soffit_overhang_mm: f64,
    pub gable_overhang_mm: f64,
    pub wall_thickness_mm: f64,
    pub foundation_width_mm: f64,
    pub foundation_depth_mm: f64,
    pub excavation_depth_mm: f64,
    pub concrete_depth_mm: f64,
    pub dpc_level_mm: f64,
    pub openings_area_m2: f64,
    pub roof_pitch_degrees: f64,
}

impl Default for MeasurementInputs {
    fn default() -> Self {
        Self {
            external_length_m: 0.0,
            external_width_m: 0.0,
            eaves_height_m: 0.0,
            ceiling_height_m: None,
            roof_type: None,
            roof_factor: None,
            soffit_overhang_mm: 200.0,
            gable_overhang_mm: 200.0,
            // 100 outer leaf + 100 cavity + 100 inner leaf
            wall_thickness_mm: 300.0,
            foundation_width_mm: 600.0,
            foundation_depth_mm: 1000.0,
            excavation_depth_mm: 1000.0,
            concrete_depth_mm: 750.0,
            dpc_level_mm: 150.0,
            openings_area_m2: 0.0,
            roof_pitch_degrees: 0.0,
        }
    }
}
