use thiserror::Error;

/// Errors surfaced by the public operations of [`crate::WeightedSamplingSet`].
///
/// Sampling from an empty set is not an error (see [`crate::WeightedSamplingSet::sample`]);
/// every other contract violation listed here is reported synchronously and never
/// swallowed internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SamplerError {
    /// A weight argument fell outside the configured `[w_min, w_max]` range.
    #[error("weight {weight} is outside the configured range [{min}, {max}]")]
    OutOfRangeWeight { weight: f64, min: f64, max: f64 },

    /// `insert` was called for an element already present in the set.
    #[error("element already present in the set")]
    DuplicateElement,

    /// `set_weight` or `erase` was called for an element absent from the set.
    #[error("element not present in the set")]
    MissingElement,
}
