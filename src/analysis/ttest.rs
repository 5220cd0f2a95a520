//! Two-sided independent two-sample t-tests.
//!
//! The p-value is read from the Student t distribution in `statrs`. Any
//! degenerate configuration (fewer than two samples in a group, zero
//! standard error, non-finite degrees of freedom) is reported as "not
//! significant" with `p = 1.0` instead of an error.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::analysis::distribution::{mean, sample_variance};
use crate::model::thresholds::TTestKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestOutcome {
    pub statistic: f64,
    pub df: f64,
    pub p_value: f64,
}

impl TTestOutcome {
    fn not_significant() -> Self {
        Self {
            statistic: 0.0,
            df: 0.0,
            p_value: 1.0,
        }
    }
}

/// Compares `sample` against `reference`; a positive statistic means
/// `sample` has the larger mean.
pub fn two_sample_ttest(sample: &[f64], reference: &[f64], kind: TTestKind) -> TTestOutcome {
    let n1 = sample.len();
    let n2 = reference.len();
    if n1 < 2 || n2 < 2 {
        return TTestOutcome::not_significant();
    }

    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let v1 = sample_variance(sample);
    let v2 = sample_variance(reference);

    let (se, df) = match kind {
        TTestKind::Student => {
            let df = n1f + n2f - 2.0;
            let pooled = ((n1f - 1.0) * v1 + (n2f - 1.0) * v2) / df;
            ((pooled * (1.0 / n1f + 1.0 / n2f)).sqrt(), df)
        }
        TTestKind::Welch => {
            let a = v1 / n1f;
            let b = v2 / n2f;
            let den = a * a / (n1f - 1.0) + b * b / (n2f - 1.0);
            let df = if den > 0.0 { (a + b).powi(2) / den } else { 0.0 };
            ((a + b).sqrt(), df)
        }
    };

    if !se.is_finite() || se <= 0.0 || !df.is_finite() || df <= 0.0 {
        return TTestOutcome::not_significant();
    }

    let statistic = (mean(sample) - mean(reference)) / se;
    let p_value = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * (1.0 - dist.cdf(statistic.abs()))).clamp(0.0, 1.0),
        Err(_) => return TTestOutcome::not_significant(),
    };
    if !p_value.is_finite() {
        return TTestOutcome::not_significant();
    }

    TTestOutcome {
        statistic,
        df,
        p_value,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/ttest.rs"]
mod tests;
