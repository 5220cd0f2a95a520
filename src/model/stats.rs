use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DistributionStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n-1); zero when `count <= 1`.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q25: f64,
    pub q75: f64,
}

impl DistributionStats {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iqr(&self) -> f64 {
        self.q75 - self.q25
    }
}
