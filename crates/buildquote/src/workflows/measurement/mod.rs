//! Dimensional take-off: turns a handful of surveyed building dimensions
//! into the derived areas, perimeters, and volumes used across an estimate.

mod calculator;
mod inputs;

pub use calculator::{compute_measurements, EstimateMeasurements};
pub use inputs::{MeasurementInputs, RoofType};
