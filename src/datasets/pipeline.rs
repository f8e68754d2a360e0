//! JSON lines in, JSON-LD lines out
//!
//! One recipe per line. Lines that cannot become a recipe are logged and
//! skipped; only IO failures abort a run.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::DataSet;
use super::error::{DatasetError, DatasetResult};
use crate::config::DatatransConfig;
use crate::schema::DataClass;
use crate::serialize::to_json_ld;
use crate::structured_data::{Recipe, RecipeOptions, SCHEMA_ORG_CONTEXT};

/// Outcome of a conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    /// Non-blank input lines
    pub read: usize,
    pub written: usize,
    pub skipped: usize,
    /// Every warning, prefixed with its line number
    pub warnings: Vec<String>,
}

impl ConversionReport {
    fn skip(&mut self, error: DatasetError) {
        warn!("Skipping recipe: {}", error);
        self.skipped += 1;
        self.warnings.push(error.to_string());
    }
}

fn convert_line(
    dataset: DataSet,
    line_number: usize,
    line: &str,
    options: &RecipeOptions,
    report: &mut ConversionReport,
) -> DatasetResult<String> {
    let source = match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(source)) => source,
        Ok(_) => return Err(DatasetError::NotAnObject { line: line_number }),
        Err(e) => {
            return Err(DatasetError::Json {
                line: line_number,
                message: e.to_string(),
            });
        }
    };

    let adapted = dataset.adapt(&source);
    for message in &adapted.warnings {
        warn!(line = line_number, dataset = %dataset, "{}", message);
        report.warnings.push(format!("line {}: {}", line_number, message));
    }

    let recipe = Recipe::build(Value::Object(adapted.mapping), options)
        .map_err(|source| DatasetError::Construction {
            line: line_number,
            source,
        })?
        .with_context(SCHEMA_ORG_CONTEXT);
    for message in recipe.warnings() {
        report.warnings.push(format!("line {}: {}", line_number, message));
    }

    to_json_ld(&recipe).map_err(|source| DatasetError::Serialize {
        line: line_number,
        source,
    })
}

/// Convert a JSON-lines stream, writing one JSON-LD object per line
pub fn convert_reader<R: BufRead, W: Write>(
    dataset: DataSet,
    reader: R,
    mut writer: W,
    options: &RecipeOptions,
) -> DatasetResult<ConversionReport> {
    let mut report = ConversionReport::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        report.read += 1;

        match convert_line(dataset, index + 1, &line, options, &mut report) {
            Ok(json_ld) => {
                writeln!(writer, "{}", json_ld)?;
                report.written += 1;
            }
            Err(e) => report.skip(e),
        }
    }
    writer.flush()?;

    info!(
        "Converted {} of {} {} recipes ({} skipped, {} warnings)",
        report.written,
        report.read,
        dataset,
        report.skipped,
        report.warnings.len()
    );
    Ok(report)
}

/// Convert `input` into `output`, replacing whatever `output` held
pub fn convert_file(
    dataset: DataSet,
    input: &Path,
    output: &Path,
    options: &RecipeOptions,
) -> DatasetResult<ConversionReport> {
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    convert_reader(dataset, reader, writer, options)
}

/// Convert a dataset's asset file next to itself, per `config`
pub fn convert_dataset(
    dataset: DataSet,
    config: &DatatransConfig,
) -> DatasetResult<ConversionReport> {
    convert_file(
        dataset,
        &dataset.asset_path(config),
        &dataset.output_path(config),
        &config.recipe_options(),
    )
}
