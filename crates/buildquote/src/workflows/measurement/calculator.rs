use serde::{Deserialize, Serialize};

use super::inputs::{MeasurementInputs, RoofType};

const FLAT_ROOF_FACTOR: f64 = 1.05;
const PITCHED_ROOF_FACTOR: f64 = 1.15;
const MM_PER_M: f64 = 1000.0;
// Blockwork carries on past the DPC to the first course above it.
const BLOCKWORK_ABOVE_DPC_MM: f64 = 250.0;

/// Derived site quantities for one estimate.
///
/// Fully recomputed from its inputs on every change and never partially
/// mutated; two calls with identical inputs produce identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateMeasurements {
    pub floor_area_m2: f64,
    pub perimeter_m: f64,
    pub internal_length_m: f64,
    pub internal_width_m: f64,
    pub internal_floor_area_m2: f64,
    pub external_wall_area_m2: f64,
    pub internal_wall_area_m2: f64,
    pub net_wall_area_m2: f64,
    pub openings_area_m2: f64,
    pub roof_area_m2: f64,
    pub roof_factor: f64,
    pub roof_pitch_degrees: f64,
    pub foundation_concrete_volume_m3: f64,
    pub excavation_volume_m3: f64,
    pub outer_skin_length_m: f64,
    pub inner_skin_length_m: f64,
    pub outer_skin_below_dpc_area_m2: f64,
    pub inner_skin_below_dpc_area_m2: f64,
    pub below_dpc_brick_height_mm: f64,
    pub below_dpc_block_height_mm: f64,
    pub fascia_length_m: f64,
    pub soffit_length_m: f64,
    pub eaves_length_m: f64,
    pub bargeboard_length_m: f64,
    pub rake_soffit_length_m: f64,
    pub ceiling_insulation_area_m2: f64,
}

/// Compute the full take-off from raw dimensions. Total: missing optional
/// inputs fall back to their documented defaults and no input combination
/// fails. Areas and lengths are rounded to two decimal places.
pub fn compute_measurements(inputs: &MeasurementInputs) -> EstimateMeasurements {
    let length = inputs.external_length_m;
    let width = inputs.external_width_m;

    let floor_area = length * width;
    let perimeter = 2.0 * (length + width);

    let wall_thickness_m = inputs.wall_thickness_mm / MM_PER_M;
    let internal_length = (length - 2.0 * wall_thickness_m).max(0.0);
    let internal_width = (width - 2.0 * wall_thickness_m).max(0.0);
    let internal_floor_area = internal_length * internal_width;
    let internal_girth = 2.0 * (internal_length + internal_width);

    let external_wall_area = perimeter * inputs.eaves_height_m;
    let internal_wall_height = inputs.ceiling_height_m.unwrap_or(inputs.eaves_height_m);
    let internal_wall_area = internal_girth * internal_wall_height;
    let net_wall_area = (external_wall_area - inputs.openings_area_m2).max(0.0);

    let soffit_m = inputs.soffit_overhang_mm / MM_PER_M;
    let gable_m = inputs.gable_overhang_mm / MM_PER_M;
    let pitched = matches!(inputs.roof_type, Some(RoofType::Pitched));
    let roof_factor = inputs.roof_factor.unwrap_or(if pitched {
        PITCHED_ROOF_FACTOR
    } else {
        FLAT_ROOF_FACTOR
    });
    // An unset roof type measures as flat.
    let roof_area = if pitched {
        (length + 2.0 * soffit_m) * (width + 2.0 * gable_m) * roof_factor
    } else {
        (length + 2.0 * soffit_m) * (width + 2.0 * soffit_m)
    };

    let foundation_width_m = inputs.foundation_width_mm / MM_PER_M;
    let foundation_concrete_volume =
        perimeter * foundation_width_m * (inputs.concrete_depth_mm / MM_PER_M);
    let excavation_volume =
        perimeter * foundation_width_m * (inputs.excavation_depth_mm / MM_PER_M);

    let dpc_m = inputs.dpc_level_mm / MM_PER_M;

    let (bargeboard_length, rake_soffit_length) = if pitched {
        (2.0 * length, 2.0 * length)
    } else {
        (0.0, 0.0)
    };

    EstimateMeasurements {
        floor_area_m2: to_two_dp(floor_area),
        perimeter_m: to_two_dp(perimeter),
        internal_length_m: to_two_dp(internal_length),
        internal_width_m: to_two_dp(internal_width),
        internal_floor_area_m2: to_two_dp(internal_floor_area),
        external_wall_area_m2: to_two_dp(external_wall_area),
        internal_wall_area_m2: to_two_dp(internal_wall_area),
        net_wall_area_m2: to_two_dp(net_wall_area),
        openings_area_m2: to_two_dp(inputs.openings_area_m2),
        roof_area_m2: to_two_dp(roof_area),
        roof_factor,
        roof_pitch_degrees: inputs.roof_pitch_degrees,
        foundation_concrete_volume_m3: to_two_dp(foundation_concrete_volume),
        excavation_volume_m3: to_two_dp(excavation_volume),
        outer_skin_length_m: to_two_dp(perimeter),
        inner_skin_length_m: to_two_dp(internal_girth),
        outer_skin_below_dpc_area_m2: to_two_dp(perimeter * dpc_m),
        inner_skin_below_dpc_area_m2: to_two_dp(internal_girth * dpc_m),
        below_dpc_brick_height_mm: inputs.dpc_level_mm,
        below_dpc_block_height_mm: inputs.dpc_level_mm + BLOCKWORK_ABOVE_DPC_MM,
        fascia_length_m: to_two_dp(perimeter),
        soffit_length_m: to_two_dp(perimeter),
        eaves_length_m: to_two_dp(perimeter),
        bargeboard_length_m: to_two_dp(bargeboard_length),
        rake_soffit_length_m: to_two_dp(rake_soffit_length),
        ceiling_insulation_area_m2: to_two_dp(internal_floor_area),
    }
}

fn to_two_dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surveyed_inputs() -> MeasurementInputs {
        MeasurementInputs {
            external_length_m: 6.0,
            external_width_m: 4.0,
            eaves_height_m: 2.4,
            roof_type: Some(RoofType::Flat),
            ..MeasurementInputs::default()
        }
    }

    #[test]
    fn flat_roof_worked_example() {
        let measurements = compute_measurements(&surveyed_inputs());

        assert_eq!(measurements.floor_area_m2, 24.0);
        assert_eq!(measurements.perimeter_m, 20.0);
        assert_eq!(measurements.external_wall_area_m2, 48.0);
        // 6.4 x 4.4 with the default 200 mm soffit overhang
        assert_eq!(measurements.roof_area_m2, 28.16);
        assert_eq!(measurements.roof_factor, 1.05);
    }

    #[test]
    fn internal_envelope_follows_wall_thickness() {
        let measurements = compute_measurements(&surveyed_inputs());

        assert_eq!(measurements.internal_length_m, 5.4);
        assert_eq!(measurements.internal_width_m, 3.4);
        assert_eq!(measurements.internal_floor_area_m2, 18.36);
        assert_eq!(measurements.ceiling_insulation_area_m2, 18.36);
        assert_eq!(measurements.inner_skin_length_m, 17.6);
    }

    #[test]
    fn groundworks_quantities_use_default_trench() {
        let measurements = compute_measurements(&surveyed_inputs());

        // 20 m run x 600 mm trench x 750 mm pour
        assert_eq!(measurements.foundation_concrete_volume_m3, 9.0);
        // same trench dug to 1000 mm
        assert_eq!(measurements.excavation_volume_m3, 12.0);
        assert_eq!(measurements.outer_skin_below_dpc_area_m2, 3.0);
        assert_eq!(measurements.inner_skin_below_dpc_area_m2, 2.64);
        assert_eq!(measurements.below_dpc_brick_height_mm, 150.0);
        assert_eq!(measurements.below_dpc_block_height_mm, 400.0);
    }

    #[test]
    fn pitched_roof_applies_factor_and_gable_overhang() {
        let mut inputs = surveyed_inputs();
        inputs.roof_type = Some(RoofType::Pitched);
        let measurements = compute_measurements(&inputs);

        // (6.4 x 4.4) x 1.15
        assert_eq!(measurements.roof_area_m2, 32.38);
        assert_eq!(measurements.roof_factor, 1.15);
        assert_eq!(measurements.bargeboard_length_m, 12.0);
        assert_eq!(measurements.rake_soffit_length_m, 12.0);
    }

    #[test]
    fn roof_factor_override_wins() {
        let mut inputs = surveyed_inputs();
        inputs.roof_type = Some(RoofType::Pitched);
        inputs.roof_factor = Some(1.3);
        let measurements = compute_measurements(&inputs);

        assert_eq!(measurements.roof_factor, 1.3);
        assert_eq!(measurements.roof_area_m2, 36.61);
    }

    #[test]
    fn unset_roof_type_measures_as_flat() {
        let mut inputs = surveyed_inputs();
        inputs.roof_type = None;
        let measurements = compute_measurements(&inputs);

        assert_eq!(measurements.roof_area_m2, 28.16);
        assert_eq!(measurements.bargeboard_length_m, 0.0);
        assert_eq!(measurements.rake_soffit_length_m, 0.0);
    }

    #[test]
    fn ceiling_height_falls_back_to_eaves() {
        let with_eaves = compute_measurements(&surveyed_inputs());
        assert_eq!(with_eaves.internal_wall_area_m2, 42.24);

        let mut inputs = surveyed_inputs();
        inputs.ceiling_height_m = Some(2.1);
        let with_ceiling = compute_measurements(&inputs);
        assert_eq!(with_ceiling.internal_wall_area_m2, 36.96);
    }

    #[test]
    fn openings_reduce_net_wall_area_but_never_below_zero() {
        let mut inputs = surveyed_inputs();
        inputs.openings_area_m2 = 6.5;
        assert_eq!(compute_measurements(&inputs).net_wall_area_m2, 41.5);

        inputs.openings_area_m2 = 500.0;
        assert_eq!(compute_measurements(&inputs).net_wall_area_m2, 0.0);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let inputs = surveyed_inputs();
        assert_eq!(compute_measurements(&inputs), compute_measurements(&inputs));
    }

    #[test]
    fn growing_the_envelope_never_shrinks_derived_areas() {
        let base = compute_measurements(&surveyed_inputs());

        let mut longer = surveyed_inputs();
        longer.external_length_m = 7.5;
        let grown = compute_measurements(&longer);

        assert!(grown.floor_area_m2 >= base.floor_area_m2);
        assert!(grown.perimeter_m >= base.perimeter_m);
        assert!(grown.roof_area_m2 >= base.roof_area_m2);

        let mut wider = surveyed_inputs();
        wider.external_width_m = 5.2;
        let grown = compute_measurements(&wider);

        assert!(grown.floor_area_m2 >= base.floor_area_m2);
        assert!(grown.perimeter_m >= base.perimeter_m);
        assert!(grown.roof_area_m2 >= base.roof_area_m2);
    }

    #[test]
    fn internal_floor_never_exceeds_gross_floor() {
        let measurements = compute_measurements(&surveyed_inputs());
        assert!(measurements.internal_floor_area_m2 <= measurements.floor_area_m2);

        let mut zero_walls = surveyed_inputs();
        zero_walls.wall_thickness_mm = 0.0;
        let measurements = compute_measurements(&zero_walls);
        assert_eq!(
            measurements.internal_floor_area_m2,
            measurements.floor_area_m2
        );
    }

    #[test]
    fn tiny_footprint_clamps_internal_envelope_to_zero() {
        let mut inputs = surveyed_inputs();
        inputs.external_length_m = 0.4;
        inputs.external_width_m = 0.5;
        let measurements = compute_measurements(&inputs);

        assert_eq!(measurements.internal_length_m, 0.0);
        assert_eq!(measurements.internal_width_m, 0.0);
        assert_eq!(measurements.internal_floor_area_m2, 0.0);
    }
}
