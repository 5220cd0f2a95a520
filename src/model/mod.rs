pub mod group;
pub mod person;
pub mod results;
pub mod stats;
pub mod thresholds;

pub use group::{GROUP_A, GROUP_B, GroupLabel};
pub use person::Person;
pub use results::{AnalysisResult, BiasVerdict, CorrectionResult};
pub use stats::DistributionStats;
pub use thresholds::{BiasThresholds, TTestKind, ThresholdError};
