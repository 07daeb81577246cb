//! # Error Types
//!
//! This module defines the error type shared by every stage of the genetic
//! algorithm: configuration validation, fitness evaluation, parent selection
//! and survivor replacement.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use bitwise_ga::error::{GeneticError, Result};
//!
//! fn check_size(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(GeneticError::InvalidConfiguration(
//!             "Population size cannot be zero".to_string(),
//!         ));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(check_size(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use bitwise_ga::error::{GeneticError, OptionExt};
//!
//! fn find_best_candidate(candidates: &[i32]) -> bitwise_ga::error::Result<i32> {
//!     candidates.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running the genetic algorithm.
///
/// Configuration errors are raised once, when the run is constructed. The
/// remaining variants abort a single generation step; the committed population
/// and history are left as they were before the step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// The supplied parameters cannot describe a valid run.
    #[error("Configuration error: {0}")]
    InvalidConfiguration(String),

    /// Roulette-wheel selection cannot normalize the population's fitness.
    #[error("Degenerate fitness: {0}")]
    DegenerateFitness(String),

    /// A replacement policy would leave the population without individuals.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Parent and child links of the current generation do not resolve.
    #[error("Lineage error: {0}")]
    BrokenLineage(String),

    /// A fitness evaluator produced a negative or non-finite score.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),
}

/// A specialized Result type for genetic algorithm operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
///
/// ## Examples
///
/// ```rust
/// use bitwise_ga::error::{GeneticError, OptionExt};
///
/// let empty: Option<u8> = None;
/// assert_eq!(
///     empty.ok_or_else_genetic(|| GeneticError::EmptyPopulation),
///     Err(GeneticError::EmptyPopulation)
/// );
/// ```
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GeneticError::InvalidConfiguration("Genotype length cannot be zero".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: Genotype length cannot be zero"
        );

        let err = GeneticError::DegenerateFitness("total fitness is zero".to_string());
        assert_eq!(err.to_string(), "Degenerate fitness: total fitness is zero");

        assert!(GeneticError::EmptyPopulation
            .to_string()
            .contains("empty population"));
    }

    #[test]
    fn test_option_ext() {
        assert_eq!(Some(3).ok_or_else_genetic(|| GeneticError::EmptyPopulation), Ok(3));
        let missing: Option<i32> = None;
        assert_eq!(
            missing.ok_or_else_genetic(|| GeneticError::EmptyPopulation),
            Err(GeneticError::EmptyPopulation)
        );
    }
}
