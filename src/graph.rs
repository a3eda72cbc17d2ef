//! Sampling expressions over a range of `x`, producing the series a plotting front-end draws.

use alloc::vec::Vec;
use log::warn;
use num_traits::Float;

use crate::{evaluate::Evaluable, node::tree::Expression};

/// The range of `x` to sample over. The defaults match a plot of `-10 <= x <= 10`, with enough
/// points for a smooth curve.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct SampleRange {
    pub min_x: f64,
    pub max_x: f64,
    pub delta_x: f64,
}

impl Default for SampleRange {
    fn default() -> Self {
        Self { min_x: -10.0, max_x: 10.0, delta_x: 0.01 }
    }
}

impl SampleRange {
    /// The largest number of points which a single range will produce.
    pub const MAX_POINTS: usize = 1_000_000;

    /// The number of sample points in this range: every `min_x + i * delta_x` which does not
    /// exceed `max_x`. A range with a non-positive or non-finite step, or with `max_x < min_x`,
    /// has no points.
    pub fn len(&self) -> usize {
        let valid = self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.delta_x.is_finite()
            && self.delta_x > 0.0
            && self.max_x >= self.min_x;
        if !valid {
            return 0;
        }

        // Tolerate rounding error in the division, so the end of the range isn't lost
        let steps = Float::floor((self.max_x - self.min_x) / self.delta_x + 1e-9);
        if steps >= Self::MAX_POINTS as f64 {
            warn!("sample range {:?} has too many points, truncating to {}", self, Self::MAX_POINTS);
            return Self::MAX_POINTS;
        }

        steps as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sample values of `x`. Each is computed from its index rather than by repeatedly adding
    /// the step, so error does not accumulate across the range.
    pub fn xs(&self) -> impl Iterator<Item = f64> {
        let Self { min_x, delta_x, .. } = *self;
        (0..self.len()).map(move |i| min_x + i as f64 * delta_x)
    }
}

#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A sequence of points, in increasing order of `x`.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Series {
    pub points: Vec<Point>,
}

/// The series for an expression, and optionally for its derivative.
#[derive(PartialEq, Debug, Clone)]
pub struct Plot {
    pub function: Series,
    pub derivative: Option<Series>,
}

/// Evaluates `evaluable` at every point of `range`.
pub fn sample(evaluable: &impl Evaluable, range: &SampleRange) -> Series {
    Series {
        points: range.xs().map(|x| Point { x, y: evaluable.evaluate(x) }).collect(),
    }
}

/// Samples `expression` over `range`, along with its derivative if `with_derivative` is set.
pub fn plot(expression: &Expression, range: &SampleRange, with_derivative: bool) -> Plot {
    Plot {
        function: sample(expression, range),
        derivative: if with_derivative {
            Some(sample(&expression.differentiate(), range))
        } else {
            None
        },
    }
}
