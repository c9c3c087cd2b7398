//! Errors raised when the analytical model is evaluated outside its domain.
use thiserror::Error;

/// A precondition of one of the model formulas did not hold.
///
/// Every variant carries the offending value so that the caller can report exactly what was
/// wrong. None of these are recoverable: the formula in question has no meaningful result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// The cross-seed overlap is not a fraction in `[0, 1)`.
    #[error("seed overlap (theta) must be in [0, 1), got {theta}")]
    OverlapOutOfRange {
        /// The supplied overlap fraction
        theta: f64,
    },

    /// Coverage is measured against an empty population.
    #[error("population must be greater than zero, got {population}")]
    EmptyPopulation {
        /// The supplied population size
        population: u64,
    },

    /// Hop distance to the nearest seed is undefined without any seeds.
    #[error("seed count must be greater than zero, got {seed_count}")]
    NoSeeds {
        /// The supplied seed count
        seed_count: u64,
    },

    /// The estimate overflowed; the hop depth is too large for the branching factor.
    #[error("estimate for {hops} hops is not finite (got {value})")]
    NonFiniteEstimate {
        /// The hop depth being evaluated
        hops: u32,
        /// The non-finite value which was produced
        value: f64,
    },

    /// A coverage target which can never be met, or is met trivially.
    #[error("target coverage must be in the range (0, 1], got {target}")]
    TargetOutOfRange {
        /// The supplied target coverage fraction
        target: f64,
    },

    /// Seeds reach nothing, so no number of them meets a coverage target.
    #[error("coverage target {target} cannot be reached within {hops} hops")]
    UnreachableTarget {
        /// The supplied target coverage fraction
        target: f64,
        /// The hop depth being evaluated
        hops: u32,
    },
}

/// Shorthand for results of model evaluations.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Check that a population can be used as the denominator of a coverage fraction
pub(crate) fn check_population(population: u64) -> Result<()> {
    if population == 0 {
        return Err(DomainError::EmptyPopulation { population });
    }

    Ok(())
}

/// Check that there is at least one seed to measure distances from
pub(crate) fn check_seed_count(seed_count: u64) -> Result<()> {
    if seed_count == 0 {
        return Err(DomainError::NoSeeds { seed_count });
    }

    Ok(())
}
