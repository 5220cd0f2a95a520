use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::outliers::OutlierResult;
use crate::analysis::ranking::PersonScore;
use crate::model::group::GroupLabel;
use crate::model::results::{BiasVerdict, CorrectionResult};
use crate::model::thresholds::BiasThresholds;

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlierSummary {
    pub criterion: String,
    pub dropped: bool,
    pub removed_ids: Vec<String>,
    pub result: OutlierResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerdictSummary {
    pub pre: BiasVerdict,
    pub post: Option<BiasVerdict>,
    pub correction_applied: bool,
    pub bias_reduction_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData<'a> {
    pub tool: ToolMeta,
    pub input: String,
    pub criterion: String,
    pub config: &'a BiasThresholds,
    pub analysis_only: bool,
    pub outliers: Option<OutlierSummary>,
    pub correction: &'a CorrectionResult,
    pub verdict: VerdictSummary,
    pub ranking_top: &'a [PersonScore],
    pub top_group_distribution: BTreeMap<GroupLabel, usize>,
}

impl VerdictSummary {
    pub fn from_correction(result: &CorrectionResult) -> Self {
        Self {
            pre: result.pre.verdict(),
            post: result.post.as_ref().map(|p| p.verdict()),
            correction_applied: result.was_applied(),
            bias_reduction_pct: result.bias_reduction_pct(),
        }
    }
}

pub fn render_summary_json(data: &SummaryData<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
