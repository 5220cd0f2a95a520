use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::analysis::ranking::RankingResult;
use crate::model::group::GroupLabel;
use crate::model::results::CorrectionResult;
use crate::model::thresholds::BiasThresholds;
use crate::pipeline::stage1_outliers::Stage1Output;
use crate::report::json::{OutlierSummary, SummaryData, ToolMeta, VerdictSummary, render_summary_json};
use crate::report::text::{render_correction_report, render_outlier_section, render_ranking_report};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Stage4Input<'a> {
    pub tool_name: String,
    pub tool_version: String,
    pub input_path: String,
    pub criterion: &'a str,
    pub thresholds: &'a BiasThresholds,
    pub analysis_only: bool,
    pub drop_outliers: bool,

    pub original_scores: &'a BTreeMap<String, f64>,
    pub final_scores: &'a BTreeMap<String, f64>,
    pub groups: &'a BTreeMap<String, GroupLabel>,

    pub outliers: &'a Stage1Output,
    pub correction: &'a CorrectionResult,
    pub ranking: &'a RankingResult,
}

pub fn write_reports(input: &Stage4Input<'_>, out_dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir).map_err(|source| ReportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &build_report_text(input))?;

    let summary_path = out_dir.join("summary.json");
    let summary = build_summary(input);
    let json = render_summary_json(&summary)?;
    write_text(&summary_path, &json)?;

    let scores_path = out_dir.join("adjusted_scores.tsv");
    with_file(&scores_path, |w| write_scores_tsv(input, w))?;

    let ranking_path = out_dir.join("ranking.tsv");
    with_file(&ranking_path, |w| write_ranking_tsv(input, w))?;

    info!(out_dir = %out_dir.display(), "reports written");
    Ok(())
}

pub fn build_report_text(input: &Stage4Input<'_>) -> String {
    let mut out = String::new();
    let removed: &[String] = if input.drop_outliers {
        &input.outliers.flagged
    } else {
        &[]
    };
    out.push_str(&render_outlier_section(
        input.criterion,
        &input.outliers.result,
        removed,
    ));
    out.push('\n');
    out.push_str(&render_correction_report(input.correction));
    out.push('\n');
    out.push_str(&render_ranking_report(input.ranking, input.thresholds.top_n));
    out
}

fn build_summary<'a>(input: &'a Stage4Input<'a>) -> SummaryData<'a> {
    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        input: input.input_path.clone(),
        criterion: input.criterion.to_string(),
        config: input.thresholds,
        analysis_only: input.analysis_only,
        outliers: Some(OutlierSummary {
            criterion: input.criterion.to_string(),
            dropped: input.drop_outliers,
            removed_ids: input.outliers.withheld.keys().cloned().collect(),
            result: input.outliers.result.clone(),
        }),
        correction: input.correction,
        verdict: VerdictSummary::from_correction(input.correction),
        ranking_top: input.ranking.top_n(input.thresholds.top_n),
        top_group_distribution: input.ranking.group_distribution(input.thresholds.top_n),
    }
}

fn write_scores_tsv(input: &Stage4Input<'_>, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "id\tgroup\toriginal\tadjusted\tstatus")?;
    for (id, original) in input.original_scores {
        let group = input
            .groups
            .get(id)
            .copied()
            .unwrap_or(GroupLabel::Unspecified);
        let adjusted = input.final_scores.get(id).copied().unwrap_or(*original);
        let status = if input.outliers.withheld.contains_key(id) {
            "withheld"
        } else if adjusted != *original {
            "adjusted"
        } else {
            "unchanged"
        };
        writeln!(
            w,
            "{}\t{}\t{:.2}\t{:.2}\t{}",
            id, group, original, adjusted, status
        )?;
    }
    Ok(())
}

fn write_ranking_tsv(input: &Stage4Input<'_>, w: &mut dyn Write) -> std::io::Result<()> {
    let mut header = vec![
        "position".to_string(),
        "id".to_string(),
        "name".to_string(),
        "group".to_string(),
        "final_score".to_string(),
    ];
    header.extend(input.ranking.criteria.iter().map(|c| c.name.clone()));
    writeln!(w, "{}", header.join("\t"))?;

    for score in &input.ranking.scores {
        let mut row = vec![
            score.position.to_string(),
            score.id.clone(),
            score.name.clone().unwrap_or_default(),
            score.group.unwrap_or(GroupLabel::Unspecified).to_string(),
            format!("{:.2}", score.final_score),
        ];
        for criterion in &input.ranking.criteria {
            row.push(
                score
                    .scores_by_criterion
                    .get(&criterion.name)
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_default(),
            );
        }
        writeln!(w, "{}", row.join("\t"))?;
    }
    Ok(())
}

fn with_file(
    path: &Path,
    body: impl FnOnce(&mut dyn Write) -> std::io::Result<()>,
) -> Result<(), ReportError> {
    let result = File::create(path).and_then(|file| {
        let mut w = BufWriter::new(file);
        body(&mut w)?;
        w.flush()
    });
    result.map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_text(path: &Path, contents: &str) -> Result<(), ReportError> {
    with_file(path, |w| w.write_all(contents.as_bytes()))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
