use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::analysis::outliers::{OutlierDetector, OutlierResult};

#[derive(Debug, Clone)]
pub struct Stage1Inputs<'a> {
    pub criterion: &'a str,
    pub scores: &'a BTreeMap<String, f64>,
    pub z_threshold: f64,
    pub drop_outliers: bool,
}

#[derive(Debug, Clone)]
pub struct Stage1Output {
    /// Scores handed to bias analysis (outliers removed when dropping).
    pub scores: BTreeMap<String, f64>,
    /// Ids flagged as outliers, in key order.
    pub flagged: Vec<String>,
    /// Ids actually withheld from bias analysis.
    pub withheld: BTreeMap<String, f64>,
    pub result: OutlierResult,
}

pub fn run_stage1(inputs: &Stage1Inputs<'_>) -> Stage1Output {
    let detector = OutlierDetector::new(inputs.z_threshold);
    let (kept, flagged, result) = detector.filter_scores(inputs.scores);

    info!(
        criterion = inputs.criterion,
        mean = result.mean,
        std_dev = result.std_dev,
        outliers = flagged.len(),
        "z-score outlier scan"
    );

    if !inputs.drop_outliers || flagged.is_empty() {
        return Stage1Output {
            scores: inputs.scores.clone(),
            flagged,
            withheld: BTreeMap::new(),
            result,
        };
    }

    warn!(
        removed = flagged.len(),
        "withholding outliers from bias analysis: {}",
        flagged.join(", ")
    );
    let withheld = flagged
        .iter()
        .filter_map(|id| inputs.scores.get(id).map(|s| (id.clone(), *s)))
        .collect();

    Stage1Output {
        scores: kept,
        flagged,
        withheld,
        result,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_outliers.rs"]
mod tests;
