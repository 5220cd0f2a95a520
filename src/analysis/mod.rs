pub mod analyzer;
pub mod corrector;
pub mod distribution;
pub mod outliers;
pub mod ranking;
pub mod ttest;

pub use analyzer::{DistributionAnalyzer, GroupedScores, partition_by_group};
pub use corrector::ScoreCorrector;
pub use outliers::{OutlierDetector, OutlierResult};
pub use ranking::{Criterion, RankingCalculator, RankingResult};
