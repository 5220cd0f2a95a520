use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TTestKind {
    /// Pooled-variance Student t-test.
    Student,
    /// Unequal-variance Welch t-test.
    Welch,
}

impl TTestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TTestKind::Student => "student",
            TTestKind::Welch => "welch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("invalid threshold {0} (must be >= 0)")]
    Threshold(f64),
    #[error("invalid alpha {0} (must be in (0, 1))")]
    Alpha(f64),
    #[error("invalid score ceiling {0} (must be > 0)")]
    ScoreCeiling(f64),
    #[error("invalid outlier threshold {0} (must be > 0)")]
    OutlierZ(f64),
}

#[derive(Debug, Clone, Serialize)]
pub struct BiasThresholds {
    /// Minimum |relative difference| to flag bias (strict `>`).
    pub threshold: f64,
    pub alpha: f64,
    pub test: TTestKind,
    pub score_ceiling: f64,
    pub outlier_z: f64,
    pub top_n: usize,
}

impl BiasThresholds {
    pub fn default_v1() -> Self {
        Self {
            threshold: 0.05,
            alpha: 0.05,
            test: TTestKind::Student,
            score_ceiling: 10.0,
            outlier_z: 3.0,
            top_n: 10,
        }
    }

    pub fn welch_v1() -> Self {
        let mut base = Self::default_v1();
        base.test = TTestKind::Welch;
        base
    }

    pub fn validate(&self) -> Result<(), ThresholdError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ThresholdError::Threshold(self.threshold));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ThresholdError::Alpha(self.alpha));
        }
        if !self.score_ceiling.is_finite() || self.score_ceiling <= 0.0 {
            return Err(ThresholdError::ScoreCeiling(self.score_ceiling));
        }
        if !self.outlier_z.is_finite() || self.outlier_z <= 0.0 {
            return Err(ThresholdError::OutlierZ(self.outlier_z));
        }
        Ok(())
    }
}

impl Default for BiasThresholds {
    fn default() -> Self {
        Self::default_v1()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/thresholds.rs"]
mod tests;
