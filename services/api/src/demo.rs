use crate::infra::{parse_date, parse_dimension, parse_roof_type, InMemoryEstimateRepository};
use chrono::NaiveDate;
use buildquote::error::AppError;
use buildquote::workflows::estimate::{
    AnswerSubmission, AnswerValue, DimensionValues, EstimateIntakeService, EstimateProgressView,
    MeasurementValues, NewEstimateRequest, DIMENSIONS_KEY, MEASUREMENTS_KEY,
};
use buildquote::workflows::measurement::{
    compute_measurements, EstimateMeasurements, MeasurementInputs, RoofType,
};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MeasureArgs {
    /// External length in metres
    #[arg(long, value_parser = parse_dimension)]
    pub(crate) length: f64,
    /// External width in metres
    #[arg(long, value_parser = parse_dimension)]
    pub(crate) width: f64,
    /// Eaves height in metres
    #[arg(long, value_parser = parse_dimension)]
    pub(crate) eaves: f64,
    /// Internal ceiling height in metres (defaults to the eaves height)
    #[arg(long, value_parser = parse_dimension)]
    pub(crate) ceiling: Option<f64>,
    /// Roof construction: flat or pitched
    #[arg(long, value_parser = parse_roof_type)]
    pub(crate) roof: Option<RoofType>,
    /// Total area of window and door openings in square metres
    #[arg(long, value_parser = parse_dimension)]
    pub(crate) openings_area: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Site reference shown on the demo estimate
    #[arg(long)]
    pub(crate) site: Option<String>,
    /// Survey date recorded on the estimate (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) surveyed_on: Option<NaiveDate>,
    /// Walk the pitched-roof variant of the script
    #[arg(long)]
    pub(crate) pitched: bool,
}

pub(crate) fn run_measure(args: MeasureArgs) -> Result<(), AppError> {
    let inputs = MeasurementInputs {
        external_length_m: args.length,
        external_width_m: args.width,
        eaves_height_m: args.eaves,
        ceiling_height_m: args.ceiling,
        roof_type: args.roof,
        openings_area_m2: args.openings_area.unwrap_or(0.0),
        ..MeasurementInputs::default()
    };

    let measurements = compute_measurements(&inputs);
    println!("Measurement take-off");
    println!("====================");
    render_measurements(&measurements);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryEstimateRepository::default());
    let service = EstimateIntakeService::new(repository);

    let site = args
        .site
        .unwrap_or_else(|| "12 Kiln Lane (demo)".to_string());
    let record = service.open(NewEstimateRequest {
        site_reference: site.clone(),
        created_on: args.surveyed_on,
    })?;

    println!(
        "Opened estimate {} for {site}, surveyed {}",
        record.estimate_id.0, record.created_on
    );
    println!();

    let mut last_view = None;
    for (key, value) in demo_script(args.pitched) {
        let view = service.record_answer(
            &record.estimate_id,
            AnswerSubmission {
                key: key.to_string(),
                value,
            },
        )?;
        println!(
            "  answered {key:<28} -> {:>3}% complete{}",
            view.completion_percent,
            if view.can_generate { ", ready" } else { "" }
        );
        last_view = Some(view);
    }

    if let Some(view) = last_view {
        println!();
        render_progress(&view);
    }

    println!();
    println!("Take-off from surveyed measurements");
    println!("-----------------------------------");
    let measurements = service.measurements(&record.estimate_id)?;
    render_measurements(&measurements);

    Ok(())
}

fn demo_script(pitched: bool) -> Vec<(&'static str, AnswerValue)> {
    let mut script = vec![
        ("project_type", AnswerValue::scalar("single_storey_extension")),
        ("property_age", AnswerValue::scalar("pre_1930")),
        (
            "roof_type",
            AnswerValue::scalar(if pitched { "pitched" } else { "flat" }),
        ),
    ];

    if pitched {
        script.push(("roof_covering", AnswerValue::scalar("natural_slate")));
    } else {
        script.push(("flat_roof_finish", AnswerValue::scalar("grp")));
    }

    script.extend([
        ("wall_construction", AnswerValue::scalar("cavity")),
        ("external_finish", AnswerValue::many(["facing_brick"])),
        ("new_opening", AnswerValue::scalar(true)),
        ("new_opening_width", AnswerValue::scalar(2.4)),
        // selecting the steel auto-fills the steel length and reveals the
        // structural calculations question
        ("new_opening_support", AnswerValue::scalar("steel")),
        ("structural_calcs", AnswerValue::scalar("engineer_appointed")),
        ("existing_opening", AnswerValue::scalar(false)),
        ("internal_finish", AnswerValue::many(["plaster_skim"])),
        ("heating_changes", AnswerValue::many(["radiators"])),
        (
            DIMENSIONS_KEY,
            AnswerValue::Dimensions(DimensionValues {
                length_m: 6.0,
                width_m: 4.0,
            }),
        ),
        (
            MEASUREMENTS_KEY,
            AnswerValue::Measurements(MeasurementValues {
                external_length_m: 6.0,
                external_width_m: 4.0,
                floor_area_m2: 24.0,
                eaves_height_m: 2.4,
                ceiling_height_m: None,
            }),
        ),
    ]);

    script
}

fn render_progress(view: &EstimateProgressView) {
    println!("Step progress ({}% complete)", view.completion_percent);
    for step in &view.steps {
        println!(
            "  [{}] {} ({} visible questions)",
            if step.complete { "x" } else { " " },
            step.title,
            step.visible_questions.len()
        );
    }
    println!(
        "Status: {}{}",
        view.status,
        if view.can_generate {
            " - estimate can be generated"
        } else {
            ""
        }
    );
}

fn render_measurements(measurements: &EstimateMeasurements) {
    println!("  floor area            {:>8.2} m2", measurements.floor_area_m2);
    println!("  perimeter             {:>8.2} m", measurements.perimeter_m);
    println!(
        "  internal floor area   {:>8.2} m2",
        measurements.internal_floor_area_m2
    );
    println!(
        "  external wall area    {:>8.2} m2",
        measurements.external_wall_area_m2
    );
    println!(
        "  net wall area         {:>8.2} m2",
        measurements.net_wall_area_m2
    );
    println!(
        "  roof area             {:>8.2} m2 (factor {:.2})",
        measurements.roof_area_m2, measurements.roof_factor
    );
    println!(
        "  foundation concrete   {:>8.2} m3",
        measurements.foundation_concrete_volume_m3
    );
    println!(
        "  excavation            {:>8.2} m3",
        measurements.excavation_volume_m3
    );
    println!(
        "  fascia / soffit run   {:>8.2} m",
        measurements.fascia_length_m
    );
    println!(
        "  ceiling insulation    {:>8.2} m2",
        measurements.ceiling_insulation_area_m2
    );
}
