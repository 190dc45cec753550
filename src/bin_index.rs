//! Pure mapping from a weight to its logarithmic group and back.

use crate::error::SamplerError;

/// Assigns weights to groups by `g = floor(log2(w / w_min))`.
///
/// `G = max(1, floor(log2(w_max / w_min)) + 1)` groups cover the whole
/// `[w_min, w_max]` range; group `g` covers the half-open interval
/// `[w_min * 2^g, w_min * 2^(g+1))`, with the last group's actual ceiling
/// capped at `w_max`.
#[derive(Debug, Clone, Copy)]
pub struct BinIndex {
    w_min: f64,
    w_max: f64,
    num_groups: usize,
}

impl BinIndex {
    /// Builds a `BinIndex` over `[w_min, w_max]`.
    ///
    /// # Panics
    /// Panics if `w_min` is not positive or `w_max < w_min`; these are
    /// construction-time contract violations, not runtime error conditions.
    pub fn new(w_min: f64, w_max: f64) -> Self {
        assert!(w_min > 0.0, "w_min must be positive");
        assert!(w_max >= w_min, "w_max must be >= w_min");
        let ratio = w_max / w_min;
        let num_groups = if ratio < 2.0 {
            1
        } else {
            (ratio.log2().floor() as usize) + 1
        };
        Self {
            w_min,
            w_max,
            num_groups,
        }
    }

    pub fn w_min(&self) -> f64 {
        self.w_min
    }

    pub fn w_max(&self) -> f64 {
        self.w_max
    }

    /// Number of groups `G`.
    pub fn num_groups(&self) -> usize {
        self.num_groups
    }

    /// Returns the group index for `w`, clamped to `[0, G-1]`.
    ///
    /// # Errors
    /// Returns [`SamplerError::OutOfRangeWeight`] if `w` is not in `[w_min, w_max]`.
    pub fn group_of(&self, w: f64) -> Result<usize, SamplerError> {
        if !(w >= self.w_min && w <= self.w_max) {
            return Err(SamplerError::OutOfRangeWeight {
                weight: w,
                min: self.w_min,
                max: self.w_max,
            });
        }
        let g = (w / self.w_min).log2().floor() as isize;
        let g = g.clamp(0, self.num_groups as isize - 1) as usize;
        Ok(g)
    }

    /// Returns the rejection ceiling `w* = w_min * 2^(g+1)` used by the
    /// composition-and-rejection sampler. The last group's actual maximum
    /// element weight may sit below `w*`; that only affects acceptance
    /// probability, never correctness.
    pub fn upper_bound_of(&self, g: usize) -> f64 {
        self.w_min * 2f64.powi(g as i32 + 1)
    }
}
