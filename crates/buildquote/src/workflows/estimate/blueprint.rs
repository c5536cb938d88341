use serde::{Deserialize, Serialize};

use super::derived::{
    EXISTING_OPENING_LINTEL_LENGTH, EXISTING_OPENING_STEEL_LENGTH, EXISTING_OPENING_SUPPORT,
    EXISTING_OPENING_WIDTH, NEW_OPENING_LINTEL_LENGTH, NEW_OPENING_STEEL_LENGTH,
    NEW_OPENING_SUPPORT, NEW_OPENING_WIDTH, SUPPORT_LINTEL, SUPPORT_STEEL,
};
use super::question::{
    Dependency, Question, QuestionControl, QuestionOption, VisibilityRule,
};

/// Question id carrying the roof construction choice; the measurement
/// take-off reads it to pick the roof formula.
pub const ROOF_TYPE: &str = "roof_type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Ordinary question list; completion is per-question.
    Form,
    /// Plan dimension entry; complete when length and width are positive.
    Dimensions,
    /// Site measurement entry; complete when external length, external
    /// width, and floor area are all positive.
    Measurements,
}

/// One step of the intake wizard. Identity and question list are fixed at
/// template-definition time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionStep {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: StepKind,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionStep {
    pub fn form(id: &str, title: &str, questions: Vec<Question>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            kind: StepKind::Form,
            questions,
        }
    }

    pub fn dimensions(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            kind: StepKind::Dimensions,
            questions: Vec::new(),
        }
    }

    pub fn measurements(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            kind: StepKind::Measurements,
            questions: Vec::new(),
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateTemplate {
    steps: Vec<QuestionStep>,
}

impl EstimateTemplate {
    pub fn new(steps: Vec<QuestionStep>) -> Self {
        Self { steps }
    }

    /// The built-in residential building-works intake template.
    pub fn standard() -> Self {
        Self {
            steps: standard_steps(),
        }
    }

    pub fn steps(&self) -> &[QuestionStep] {
        &self.steps
    }

    pub fn step(&self, id: &str) -> Option<&QuestionStep> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|question| question.id == id)
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.steps.iter().flat_map(|step| step.questions.iter())
    }
}

fn standard_steps() -> Vec<QuestionStep> {
    vec![
        QuestionStep::form(
            "project",
            "Project",
            vec![
                Question::new("project_type", "What are we building?", QuestionControl::CardGrid)
                    .required()
                    .with_options(vec![
                        QuestionOption::new(
                            "single_storey_extension",
                            "Single-storey extension",
                            "single_storey_extension",
                        ),
                        QuestionOption::new(
                            "double_storey_extension",
                            "Double-storey extension",
                            "double_storey_extension",
                        ),
                        QuestionOption::new(
                            "garage_conversion",
                            "Garage conversion",
                            "garage_conversion",
                        ),
                        QuestionOption::new("loft_conversion", "Loft conversion", "loft_conversion"),
                    ]),
                Question::new("property_age", "Property age", QuestionControl::Select)
                    .required()
                    .with_options(vec![
                        QuestionOption::new("pre_1930", "Pre-1930", "pre_1930"),
                        QuestionOption::new("inter_war", "1930s-1940s", "inter_war"),
                        QuestionOption::new("post_war", "1950s-1970s", "post_war"),
                        QuestionOption::new("modern", "1980s or later", "modern"),
                    ]),
                Question::new(
                    "conservation_area",
                    "Is the property in a conservation area?",
                    QuestionControl::Select,
                )
                .with_options(vec![
                    QuestionOption::new("yes", "Yes", true),
                    QuestionOption::new("no", "No", false),
                ]),
            ],
        )
        .describe("Basic facts about the property and the works."),
        QuestionStep::form(
            "structure",
            "Structure",
            vec![
                Question::new(ROOF_TYPE, "Roof construction", QuestionControl::CardGrid)
                    .required()
                    .with_options(vec![
                        QuestionOption::new("flat", "Flat roof", "flat"),
                        QuestionOption::new("pitched", "Pitched roof", "pitched"),
                    ]),
                Question::new("roof_covering", "Roof covering", QuestionControl::Select)
                    .visible_when(VisibilityRule::when(Dependency::equals(ROOF_TYPE, "pitched")))
                    .with_options(vec![
                        QuestionOption::new("natural_slate", "Natural slate", "natural_slate"),
                        QuestionOption::new("concrete_tile", "Concrete tile", "concrete_tile"),
                        QuestionOption::new("clay_tile", "Clay tile", "clay_tile"),
                    ]),
                Question::new("flat_roof_finish", "Flat roof finish", QuestionControl::Select)
                    .visible_when(VisibilityRule::when(Dependency::equals(ROOF_TYPE, "flat")))
                    .with_options(vec![
                        QuestionOption::new("grp", "GRP fibreglass", "grp"),
                        QuestionOption::new("epdm", "EPDM rubber", "epdm"),
                        QuestionOption::new("felt", "Torch-on felt", "felt"),
                    ]),
                Question::new("wall_construction", "Wall construction", QuestionControl::Select)
                    .required()
                    .with_options(vec![
                        QuestionOption::new("cavity", "Cavity wall", "cavity"),
                        QuestionOption::new("solid", "Solid wall", "solid"),
                    ]),
                Question::new("external_finish", "External finish", QuestionControl::MultiSelect)
                    .required()
                    .with_options(vec![
                        QuestionOption::new("facing_brick", "Facing brick", "facing_brick"),
                        QuestionOption::new("render", "Render", "render"),
                        QuestionOption::new("timber_cladding", "Timber cladding", "timber_cladding"),
                        QuestionOption::new("stone", "Natural stone", "stone"),
                    ]),
            ],
        ),
        QuestionStep::form(
            "openings",
            "Structural openings",
            vec![
                Question::new(
                    "new_opening",
                    "Are we forming a new structural opening?",
                    QuestionControl::CardGrid,
                )
                .required()
                .with_options(vec![
                    QuestionOption::new("yes", "Yes", true),
                    QuestionOption::new("no", "No", false),
                ]),
                Question::new(NEW_OPENING_WIDTH, "New opening width", QuestionControl::Select)
                    .visible_when(VisibilityRule::when(Dependency::equals("new_opening", true)))
                    .with_options(width_options()),
                Question::new(NEW_OPENING_SUPPORT, "New opening support", QuestionControl::CardGrid)
                    .visible_when(VisibilityRule::when(Dependency::equals("new_opening", true)))
                    .with_options(support_options()),
                Question::new(
                    NEW_OPENING_STEEL_LENGTH,
                    "Steel beam length",
                    QuestionControl::Select,
                )
                .visible_when(VisibilityRule::when(Dependency::equals(
                    NEW_OPENING_SUPPORT,
                    SUPPORT_STEEL,
                )))
                .with_options(support_length_options()),
                Question::new(
                    NEW_OPENING_LINTEL_LENGTH,
                    "Lintel length",
                    QuestionControl::Select,
                )
                .visible_when(VisibilityRule::when(Dependency::equals(
                    NEW_OPENING_SUPPORT,
                    SUPPORT_LINTEL,
                )))
                .with_options(support_length_options()),
                Question::new(
                    "existing_opening",
                    "Are we widening an existing opening?",
                    QuestionControl::CardGrid,
                )
                .required()
                .with_options(vec![
                    QuestionOption::new("yes", "Yes", true),
                    QuestionOption::new("no", "No", false),
                ]),
                Question::new(
                    EXISTING_OPENING_WIDTH,
                    "Widened opening width",
                    QuestionControl::Select,
                )
                .visible_when(VisibilityRule::when(Dependency::equals(
                    "existing_opening",
                    true,
                )))
                .with_options(width_options()),
                Question::new(
                    EXISTING_OPENING_SUPPORT,
                    "Widened opening support",
                    QuestionControl::CardGrid,
                )
                .visible_when(VisibilityRule::when(Dependency::equals(
                    "existing_opening",
                    true,
                )))
                .with_options(support_options()),
                Question::new(
                    EXISTING_OPENING_STEEL_LENGTH,
                    "Steel beam length",
                    QuestionControl::Select,
                )
                .visible_when(VisibilityRule::when(Dependency::equals(
                    EXISTING_OPENING_SUPPORT,
                    SUPPORT_STEEL,
                )))
                .with_options(support_length_options()),
                Question::new(
                    EXISTING_OPENING_LINTEL_LENGTH,
                    "Lintel length",
                    QuestionControl::Select,
                )
                .visible_when(VisibilityRule::when(Dependency::equals(
                    EXISTING_OPENING_SUPPORT,
                    SUPPORT_LINTEL,
                )))
                .with_options(support_length_options()),
                // Shown when either sub-flow specifies a steel, whichever
                // one the estimator is in.
                Question::new(
                    "structural_calcs",
                    "Structural calculations",
                    QuestionControl::Select,
                )
                .visible_when(VisibilityRule::any_of(vec![
                    Dependency::equals(NEW_OPENING_SUPPORT, SUPPORT_STEEL),
                    Dependency::equals(EXISTING_OPENING_SUPPORT, SUPPORT_STEEL),
                ]))
                .with_options(vec![
                    QuestionOption::new(
                        "engineer_appointed",
                        "Structural engineer appointed",
                        "engineer_appointed",
                    ),
                    QuestionOption::new(
                        "design_required",
                        "Design still required",
                        "design_required",
                    ),
                    QuestionOption::new("calcs_supplied", "Calculations supplied", "calcs_supplied"),
                ]),
            ],
        )
        .describe("Beams, lintels, and the structural work behind them."),
        QuestionStep::dimensions("dimensions", "Plan dimensions")
            .describe("Overall plan length and width of the new works."),
        QuestionStep::measurements("site_measurements", "Site measurements")
            .describe("Surveyed external dimensions used for the take-off."),
        QuestionStep::form(
            "finishes",
            "Finishes",
            vec![
                Question::new("internal_finish", "Internal wall finish", QuestionControl::MultiSelect)
                    .required()
                    .with_options(vec![
                        QuestionOption::new("plaster_skim", "Plaster skim", "plaster_skim"),
                        QuestionOption::new("dry_lining", "Dry lining", "dry_lining"),
                        QuestionOption::new("exposed_brick", "Exposed brick", "exposed_brick"),
                    ]),
                Question::new("heating_changes", "Heating changes", QuestionControl::MultiSelect)
                    .required()
                    .with_options(vec![
                        QuestionOption::new("radiators", "Extend radiators", "radiators"),
                        QuestionOption::new("underfloor", "Underfloor heating", "underfloor"),
                        QuestionOption::new("none", "No heating changes", "none"),
                    ]),
                Question::new("underfloor_zones", "Underfloor zoning", QuestionControl::Select)
                    .visible_when(VisibilityRule::when(Dependency::any_of(
                        "heating_changes",
                        ["underfloor"],
                    )))
                    .with_options(vec![
                        QuestionOption::new("single_zone", "Single zone", "single_zone"),
                        QuestionOption::new("multi_zone", "Multiple zones", "multi_zone"),
                    ]),
                Question::new("glazing", "Glazing preference", QuestionControl::Select).with_options(
                    vec![
                        QuestionOption::new(
                            "aluminium",
                            "Anthracite aluminium",
                            "aluminium",
                        ),
                        QuestionOption::new("upvc", "uPVC", "upvc"),
                        QuestionOption::new("timber", "Timber", "timber"),
                    ],
                ),
            ],
        ),
    ]
}

fn width_options() -> Vec<QuestionOption> {
    vec![
        QuestionOption::new("w_1200", "1.2 m", 1.2),
        QuestionOption::new("w_1800", "1.8 m", 1.8),
        QuestionOption::new("w_2400", "2.4 m", 2.4),
        QuestionOption::new("w_3000", "3.0 m", 3.0),
        QuestionOption::new("w_3600", "3.6 m", 3.6),
    ]
}

fn support_options() -> Vec<QuestionOption> {
    vec![
        QuestionOption::new(SUPPORT_STEEL, "Steel beam", SUPPORT_STEEL),
        QuestionOption::new(SUPPORT_LINTEL, "Concrete lintel", SUPPORT_LINTEL),
    ]
}

fn support_length_options() -> Vec<QuestionOption> {
    vec![
        QuestionOption::new("l_1500", "1.5 m", 1.5),
        QuestionOption::new("l_2100", "2.1 m", 2.1),
        QuestionOption::new("l_2700", "2.7 m", 2.7),
        QuestionOption::new("l_3300", "3.3 m", 3.3),
        QuestionOption::new("l_3900", "3.9 m", 3.9),
    ]
}
