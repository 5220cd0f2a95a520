//! Gender bias detection and reweighting correction for performance
//! evaluations.
//!
//! The core lives in [`analysis`]: [`DistributionAnalyzer`] compares the
//! score distributions of the two canonical groups and flags disparity,
//! [`ScoreCorrector`] rescales the disadvantaged group toward the baseline
//! mean and re-runs the analysis to report efficacy.
//!
//! ```
//! use std::collections::BTreeMap;
//! use hr_biasqc::{GroupLabel, ScoreCorrector};
//!
//! let scores = BTreeMap::from([("ana".to_string(), 7.0), ("rui".to_string(), 8.0)]);
//! let groups = BTreeMap::from([
//!     ("ana".to_string(), GroupLabel::Female),
//!     ("rui".to_string(), GroupLabel::Male),
//! ]);
//! let result = ScoreCorrector::default().apply_reweighting(&scores, &groups, true);
//! assert!(result.pre.bias_detected);
//! assert_eq!(result.scores_adjusted["ana"], 8.0);
//! ```

pub mod analysis;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;

pub use analysis::{DistributionAnalyzer, GroupedScores, OutlierDetector, ScoreCorrector};
pub use model::{
    AnalysisResult, BiasThresholds, BiasVerdict, CorrectionResult, DistributionStats, GroupLabel,
    TTestKind,
};
