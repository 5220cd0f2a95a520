use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::analysis::distribution::{mean, sample_std_dev};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OutlierError {
    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierResult {
    pub indices: Vec<usize>,
    pub z_scores: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
    pub threshold: f64,
}

/// Z-score detector: a value is an outlier when `|x - mean| / sd > threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierDetector {
    pub threshold: f64,
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self { threshold: 3.0 }
    }
}

impl OutlierDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn detect(&self, values: &[f64]) -> OutlierResult {
        if values.is_empty() {
            return OutlierResult {
                indices: Vec::new(),
                z_scores: Vec::new(),
                mean: 0.0,
                std_dev: 0.0,
                threshold: self.threshold,
            };
        }

        let m = mean(values);
        let sd = sample_std_dev(values);
        if sd == 0.0 {
            return OutlierResult {
                indices: Vec::new(),
                z_scores: vec![0.0; values.len()],
                mean: m,
                std_dev: 0.0,
                threshold: self.threshold,
            };
        }

        let z_scores: Vec<f64> = values.iter().map(|v| (v - m) / sd).collect();
        let indices = z_scores
            .iter()
            .enumerate()
            .filter(|(_, z)| z.abs() > self.threshold)
            .map(|(i, _)| i)
            .collect();

        OutlierResult {
            indices,
            z_scores,
            mean: m,
            std_dev: sd,
            threshold: self.threshold,
        }
    }

    /// Drops the values flagged in `result`, returning the kept values and the
    /// removed indices.
    pub fn remove(&self, values: &[f64], result: &OutlierResult) -> (Vec<f64>, Vec<usize>) {
        let flagged: BTreeSet<usize> = result.indices.iter().copied().collect();
        let kept = values
            .iter()
            .enumerate()
            .filter(|(i, _)| !flagged.contains(i))
            .map(|(_, v)| *v)
            .collect();
        (kept, result.indices.clone())
    }

    pub fn detect_and_remove(&self, values: &[f64]) -> (Vec<f64>, OutlierResult) {
        let result = self.detect(values);
        let (kept, _) = self.remove(values, &result);
        (kept, result)
    }

    /// Runs the detector on every column of a row-major table.
    pub fn detect_per_dimension(&self, rows: &[Vec<f64>]) -> Result<Vec<OutlierResult>, OutlierError> {
        let Some(first) = rows.first() else {
            return Ok(Vec::new());
        };
        let dims = first.len();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != dims {
                return Err(OutlierError::RaggedRows {
                    row,
                    expected: dims,
                    found: values.len(),
                });
            }
        }

        Ok((0..dims)
            .map(|dim| {
                let column: Vec<f64> = rows.iter().map(|r| r[dim]).collect();
                self.detect(&column)
            })
            .collect())
    }

    /// Rows flagged as outliers in at least `min_dimensions` columns.
    pub fn detect_global(
        &self,
        rows: &[Vec<f64>],
        min_dimensions: usize,
    ) -> Result<Vec<usize>, OutlierError> {
        let per_dim = self.detect_per_dimension(rows)?;
        let mut counts = vec![0usize; rows.len()];
        for result in &per_dim {
            for &idx in &result.indices {
                counts[idx] += 1;
            }
        }
        Ok(counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c >= min_dimensions)
            .map(|(i, _)| i)
            .collect())
    }

    /// Map-level helper: returns the kept scores and the removed ids (key order).
    pub fn filter_scores(
        &self,
        scores: &BTreeMap<String, f64>,
    ) -> (BTreeMap<String, f64>, Vec<String>, OutlierResult) {
        let values: Vec<f64> = scores.values().copied().collect();
        let result = self.detect(&values);
        let flagged: BTreeSet<usize> = result.indices.iter().copied().collect();

        let mut kept = BTreeMap::new();
        let mut removed = Vec::new();
        for (i, (id, &score)) in scores.iter().enumerate() {
            if flagged.contains(&i) {
                removed.push(id.clone());
            } else {
                kept.insert(id.clone(), score);
            }
        }
        (kept, removed, result)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/outliers.rs"]
mod tests;
