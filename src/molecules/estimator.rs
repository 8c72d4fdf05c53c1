//! Property estimators
//!
//! Opaque callables backing the temperature/pressure dependent molecule
//! properties. Estimator data is plain and serializable so hosts can supply
//! it through configuration.

use serde::{Deserialize, Serialize};

/// A one-dimensional property estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Estimator {
    /// Always returns the same value
    Constant(f64),
    /// `slope * x + intercept`
    Linear { slope: f64, intercept: f64 },
    /// Piecewise-linear interpolation over `(x, y)` samples sorted by `x`;
    /// clamped at the ends
    Samples(Vec<(f64, f64)>),
}

impl Estimator {
    pub fn get(&self, x: f64) -> f64 {
        match self {
            Estimator::Constant(value) => *value,
            Estimator::Linear { slope, intercept } => slope * x + intercept,
            Estimator::Samples(samples) => {
                if samples.is_empty() {
                    return 0.0;
                }
                if x <= samples[0].0 {
                    return samples[0].1;
                }
                let last = samples[samples.len() - 1];
                if x >= last.0 {
                    return last.1;
                }
                for window in samples.windows(2) {
                    let (x0, y0) = window[0];
                    let (x1, y1) = window[1];
                    if x <= x1 {
                        return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
                    }
                }
                last.1
            }
        }
    }

    /// Two-argument lookup. The carried data is one-dimensional; the second
    /// argument is accepted for interface parity and ignored.
    pub fn get2(&self, x: f64, _y: f64) -> f64 {
        self.get(x)
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Estimator::Constant(0.0)
    }
}
