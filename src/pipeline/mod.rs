//! End-to-end run: outlier scan, bias analysis/correction, ranking, reports.

pub mod stage1_outliers;
pub mod stage2_bias;
pub mod stage3_rank;
pub mod stage4_report;

use std::path::Path;

use tracing::info;

use crate::analysis::ranking::RankingResult;
use crate::input::InputBundle;
use crate::model::thresholds::BiasThresholds;
use stage1_outliers::{Stage1Inputs, Stage1Output, run_stage1};
use stage2_bias::{Stage2Inputs, Stage2Output, run_stage2};
use stage3_rank::{Stage3Inputs, run_stage3};
use stage4_report::{ReportError, Stage4Input, write_reports};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("dataset has no evaluations")]
    NoEvaluations,
    #[error("unknown criterion {name:?} (available: {available})")]
    UnknownCriterion { name: String, available: String },
    #[error(transparent)]
    Report(#[from] ReportError),
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub thresholds: BiasThresholds,
    pub criterion: Option<String>,
    pub analysis_only: bool,
    pub drop_outliers: bool,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub criterion: String,
    pub outliers: Stage1Output,
    pub bias: Stage2Output,
    pub ranking: RankingResult,
}

pub fn run_pipeline(
    bundle: &InputBundle,
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    let criterion = resolve_criterion(bundle, config.criterion.as_deref())?;
    let scores = bundle
        .criterion_scores(&criterion)
        .ok_or(PipelineError::NoEvaluations)?;
    info!(criterion = %criterion, people = scores.len(), "running bias pipeline");

    let outliers = run_stage1(&Stage1Inputs {
        criterion: &criterion,
        scores,
        z_threshold: config.thresholds.outlier_z,
        drop_outliers: config.drop_outliers,
    });

    let bias = run_stage2(&Stage2Inputs {
        scores: &outliers.scores,
        withheld: &outliers.withheld,
        groups: &bundle.groups,
        thresholds: &config.thresholds,
        apply_correction: !config.analysis_only,
    });

    let ranking = run_stage3(&Stage3Inputs {
        evaluations: &bundle.evaluations,
        criteria: &bundle.criteria,
        people: &bundle.people,
        corrected_criterion: &criterion,
        corrected_scores: &bias.final_scores,
    });

    Ok(PipelineOutput {
        criterion,
        outliers,
        bias,
        ranking,
    })
}

pub fn write_pipeline_reports(
    bundle: &InputBundle,
    config: &PipelineConfig,
    output: &PipelineOutput,
    out_dir: &Path,
) -> Result<(), PipelineError> {
    let original_scores = bundle
        .criterion_scores(&output.criterion)
        .ok_or(PipelineError::NoEvaluations)?;
    let input = Stage4Input {
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        input_path: bundle.source_path.display().to_string(),
        criterion: &output.criterion,
        thresholds: &config.thresholds,
        analysis_only: config.analysis_only,
        drop_outliers: config.drop_outliers,
        original_scores,
        final_scores: &output.bias.final_scores,
        groups: &bundle.groups,
        outliers: &output.outliers,
        correction: &output.bias.correction,
        ranking: &output.ranking,
    };
    write_reports(&input, out_dir)?;
    Ok(())
}

fn resolve_criterion(bundle: &InputBundle, requested: Option<&str>) -> Result<String, PipelineError> {
    match requested {
        Some(name) if bundle.evaluations.contains_key(name) => Ok(name.to_string()),
        Some(name) => Err(PipelineError::UnknownCriterion {
            name: name.to_string(),
            available: bundle
                .evaluations
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        }),
        None => bundle
            .default_criterion()
            .map(str::to_string)
            .ok_or(PipelineError::NoEvaluations),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
