//! Descriptive statistics for worked examples.
//!
//! Median, mean, and range over small in-memory samples, plus the
//! qualitative spread comparison used to justify standard-deviation
//! answers without computing one.

use crate::error::StatsError;
use crate::model::Sample;

/// Tolerance for treating two derived statistics as equal.
const EPSILON: f64 = 1e-9;

/// Median of a non-empty slice of finite values.
///
/// Odd length: the middle sorted value. Even length: the mean of the two
/// central sorted values. Input order is irrelevant; duplicates compare
/// equal under the total order.
pub fn median(values: &[f64]) -> Result<f64, StatsError> {
    let sorted = sorted_finite(values)?;
    let n = sorted.len();
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Arithmetic mean of a non-empty slice of finite values.
pub fn mean(values: &[f64]) -> Result<f64, StatsError> {
    check_finite(values)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Range (max minus min) of a non-empty slice of finite values.
pub fn range(values: &[f64]) -> Result<f64, StatsError> {
    let sorted = sorted_finite(values)?;
    Ok(sorted[sorted.len() - 1] - sorted[0])
}

fn check_finite(values: &[f64]) -> Result<(), StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
        return Err(StatsError::NonFinite(idx));
    }
    Ok(())
}

fn sorted_finite(values: &[f64]) -> Result<Vec<f64>, StatsError> {
    check_finite(values)?;
    let mut sorted = values.to_vec();
    // Values are all finite at this point, so total_cmp is a plain
    // ascending numeric order.
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

impl Sample {
    /// Median of the sample's values.
    pub fn median(&self) -> Result<f64, StatsError> {
        median(&self.values())
    }

    /// Mean of the sample's values.
    pub fn mean(&self) -> Result<f64, StatsError> {
        mean(&self.values())
    }

    /// Range of the sample's values.
    pub fn range(&self) -> Result<f64, StatsError> {
        range(&self.values())
    }
}

/// Outcome of a qualitative spread comparison between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadComparison {
    /// The first sample is more spread out.
    FirstWider,
    /// The second sample is more spread out.
    SecondWider,
    /// The heuristic cannot order the two samples.
    Inconclusive,
}

/// Compare the spread of two non-empty samples without computing a
/// standard deviation.
///
/// This is a heuristic for generating explanatory text, never a numeric
/// answer key. Equal-sized samples are compared by the sum of absolute
/// deviations from each sample's mean, which orders standard deviations
/// correctly when sizes match. For unequal sizes the ranges are compared,
/// tie-broken by the fraction of values farther than a quarter-range from
/// the mean; remaining ties are [`SpreadComparison::Inconclusive`].
pub fn compare_spread(a: &Sample, b: &Sample) -> Result<SpreadComparison, StatsError> {
    let va = a.values();
    let vb = b.values();
    check_finite(&va)?;
    check_finite(&vb)?;

    if va.len() == vb.len() {
        let sum_a = abs_deviation_sum(&va);
        let sum_b = abs_deviation_sum(&vb);
        return Ok(order(sum_a, sum_b));
    }

    let range_a = range(&va)?;
    let range_b = range(&vb)?;
    match order(range_a, range_b) {
        SpreadComparison::Inconclusive => {
            Ok(order(far_fraction(&va), far_fraction(&vb)))
        }
        decided => Ok(decided),
    }
}

fn order(a: f64, b: f64) -> SpreadComparison {
    if a > b + EPSILON {
        SpreadComparison::FirstWider
    } else if b > a + EPSILON {
        SpreadComparison::SecondWider
    } else {
        SpreadComparison::Inconclusive
    }
}

fn abs_deviation_sum(values: &[f64]) -> f64 {
    let m = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - m).abs()).sum()
}

/// Fraction of values farther than a quarter of the range from the mean.
fn far_fraction(values: &[f64]) -> f64 {
    let m = values.iter().sum::<f64>() / values.len() as f64;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let span = sorted[sorted.len() - 1] - sorted[0];
    if span <= EPSILON {
        return 0.0;
    }
    let cutoff = span / 4.0;
    values.iter().filter(|v| (*v - m).abs() > cutoff).count() as f64 / values.len() as f64
}
