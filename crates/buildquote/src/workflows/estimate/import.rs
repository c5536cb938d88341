use std::io::Read;

use serde::Deserialize;

use super::blueprint::EstimateTemplate;
use super::derived::apply_derived_updates;
use super::domain::{AnswerMap, AnswerValue, Scalar};
use super::question::QuestionControl;

/// Outcome of replaying a legacy spreadsheet export into an answer map.
#[derive(Debug)]
pub struct LegacyImport {
    pub answers: AnswerMap,
    pub imported: usize,
    /// Question ids present in the export but absent from the template.
    pub skipped: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LegacyImportError {
    #[error("legacy export is not valid CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct LegacyRow {
    question_id: String,
    answer: String,
}

/// Parse a `question_id,answer` CSV export from the legacy intake
/// spreadsheet. Multi-select answers are `|`-separated; numeric and boolean
/// strings become typed scalars. Rows for question ids the template does
/// not know are skipped and reported, not fatal.
pub fn import_legacy_answers<R: Read>(
    template: &EstimateTemplate,
    reader: R,
) -> Result<LegacyImport, LegacyImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut answers = AnswerMap::new();
    let mut imported = 0usize;
    let mut skipped = Vec::new();

    for row in csv_reader.deserialize::<LegacyRow>() {
        let row = row?;
        let Some(question) = template.question(&row.question_id) else {
            skipped.push(row.question_id);
            continue;
        };

        answers.insert_manual(
            row.question_id.clone(),
            parse_answer(question.control, &row.answer),
        );
        answers = apply_derived_updates(&row.question_id, &answers);
        imported += 1;
    }

    Ok(LegacyImport {
        answers,
        imported,
        skipped,
    })
}

fn parse_answer(control: QuestionControl, raw: &str) -> AnswerValue {
    match control {
        QuestionControl::MultiSelect => AnswerValue::Many(
            raw.split('|')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(parse_scalar)
                .collect(),
        ),
        QuestionControl::CardGrid | QuestionControl::Select => {
            AnswerValue::Scalar(parse_scalar(raw))
        }
    }
}

fn parse_scalar(raw: &str) -> Scalar {
    if let Ok(flag) = raw.parse::<bool>() {
        return Scalar::Bool(flag);
    }
    if let Ok(number) = raw.parse::<f64>() {
        return Scalar::Number(number);
    }
    Scalar::Text(raw.to_string())
}
