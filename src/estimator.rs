//! Online Bayesian estimation of a 1-D Gaussian under an improper prior.
//!
//! The estimator keeps only sufficient statistics (sample count, running sum,
//! running sum of squares), so adding a sample is O(1) and two estimators fed
//! the same samples are bitwise equal regardless of insertion batching. Under
//! the improper (non-informative) prior the posterior mean is the sample mean
//! and the posterior variance is the population variance of the observed
//! samples; the variance is undefined, not zero, below two samples.

use crate::error::DemError;

/// Posterior estimate of a height distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightEstimate {
    /// Posterior mean (sample mean).
    pub mean: f64,
    /// Posterior variance (population variance of the samples).
    pub variance: f64,
    /// Number of samples the estimate is based on.
    pub sample_count: usize,
}

/// Incremental improper-prior Gaussian estimator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImproperGaussian {
    count: usize,
    sum: f64,
    sum_sq: f64,
}

impl ImproperGaussian {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores an estimator from persisted sufficient statistics.
    pub(crate) fn from_parts(count: usize, sum: f64, sum_sq: f64) -> Self {
        Self { count, sum, sum_sq }
    }

    /// Sufficient statistics as `(count, sum, sum_sq)`.
    pub(crate) fn parts(&self) -> (usize, f64, f64) {
        (self.count, self.sum, self.sum_sq)
    }

    /// Folds one observation into the sufficient statistics. Never fails.
    pub fn add_sample(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    pub fn sample_count(&self) -> usize {
        self.count
    }

    /// Posterior mean, defined from the first sample on.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    /// Population variance of the observed samples, `None` below two samples.
    ///
    /// Clamped at zero to absorb floating-point cancellation on
    /// near-constant data.
    pub fn variance(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        let mean = self.sum / self.count as f64;
        Some((self.sum_sq / self.count as f64 - mean * mean).max(0.0))
    }

    /// Full posterior estimate.
    ///
    /// Fails with [`DemError::InsufficientSamples`] below two samples; the
    /// reported count distinguishes the empty cell (`count == 0`) from the
    /// single-sample cell whose mean alone is available via [`Self::mean`].
    pub fn estimate(&self) -> Result<HeightEstimate, DemError> {
        match self.variance() {
            Some(variance) => Ok(HeightEstimate {
                mean: self.sum / self.count as f64,
                variance,
                sample_count: self.count,
            }),
            None => Err(DemError::InsufficientSamples { count: self.count }),
        }
    }
}
