//! # Parameters
//!
//! The `Parameters` struct holds the immutable configuration of a run:
//! population and genotype sizes, the search interval, operator rates, and the
//! replacement policy selectors.
//!
//! ## Example
//!
//! ```rust
//! use bitwise_ga::evolution::options::{CrowdingPolicy, Parameters, SurvivorPolicy};
//!
//! let params = Parameters::builder()
//!     .population_size(40)
//!     .genotype_length(16)
//!     .interval(0.0, 128.0)
//!     .parent_selection_cutoff(20)
//!     .survivor_policy(SurvivorPolicy::Age)
//!     .build();
//!
//! assert!(params.validate().is_ok());
//!
//! let crowded = Parameters::builder()
//!     .use_crowding(true)
//!     .crowding_policy(CrowdingPolicy::Probabilistic)
//!     .build();
//! assert!(crowded.use_crowding());
//! ```
//!
//! ## Enums
//!
//! - `SurvivorPolicy`: elitism over parents and offspring, or age-based
//!   replacement filled from the offspring.
//! - `CrowdingPolicy`: how a matched parent/child pair is resolved when
//!   crowding replaces the survivor policy.
//! - `MutationCoupling`: whether sibling offspring share one random draw per
//!   locus during mutation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use crate::crowding::CrowdingPolicy;
use crate::{
    error::{GeneticError, Result},
    individual::Interval,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurvivorPolicy {
    /// Keep the fittest of the population and its offspring.
    #[default]
    Elitism,
    /// Retire old individuals and fill their slots with the fittest offspring.
    Age,
}

/// How the mutation decisions of two sibling offspring relate at each locus.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationCoupling {
    /// One draw `m` per locus: the first offspring flips when
    /// `m > 1 - rate`, the second when `m < rate`. For rates up to 0.5 the
    /// siblings never mutate the same locus.
    #[default]
    Correlated,
    /// Two independent draws per locus, each compared against the rate.
    Independent,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    population_size: usize,
    genotype_length: usize,
    interval: (f64, f64),
    parent_selection_cutoff: usize,
    mutation_chance: f64,
    crossover_chance: f64,
    survivor_age_cutoff: usize,
    minimum_age_replacement: usize,
    best_n_individuals: usize,
    survivor_policy: SurvivorPolicy,
    crowding_policy: CrowdingPolicy,
    use_crowding: bool,
    mutation_coupling: MutationCoupling,
    /// Minimum batch size evaluated on the rayon pool
    parallel_threshold: usize,
}

impl Parameters {
    /// Returns a builder for creating a `Parameters` instance.
    ///
    /// Every field left unset takes its value from [`Parameters::default`].
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn genotype_length(&self) -> usize {
        self.genotype_length
    }

    /// The raw `(lo, hi)` bounds.
    pub fn bounds(&self) -> (f64, f64) {
        self.interval
    }

    /// The validated search interval.
    pub fn interval(&self) -> Result<Interval> {
        Interval::new(self.interval.0, self.interval.1)
    }

    pub fn parent_selection_cutoff(&self) -> usize {
        self.parent_selection_cutoff
    }

    pub fn mutation_chance(&self) -> f64 {
        self.mutation_chance
    }

    pub fn crossover_chance(&self) -> f64 {
        self.crossover_chance
    }

    pub fn survivor_age_cutoff(&self) -> usize {
        self.survivor_age_cutoff
    }

    pub fn minimum_age_replacement(&self) -> usize {
        self.minimum_age_replacement
    }

    pub fn best_n_individuals(&self) -> usize {
        self.best_n_individuals
    }

    pub fn survivor_policy(&self) -> SurvivorPolicy {
        self.survivor_policy
    }

    pub fn crowding_policy(&self) -> CrowdingPolicy {
        self.crowding_policy
    }

    pub fn use_crowding(&self) -> bool {
        self.use_crowding
    }

    pub fn mutation_coupling(&self) -> MutationCoupling {
        self.mutation_coupling
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Checks every parameter and reports the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::InvalidConfiguration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.genotype_length == 0 {
            return Err(GeneticError::InvalidConfiguration(
                "Genotype length cannot be zero".to_string(),
            ));
        }

        self.interval()?;

        for (name, rate) in [
            ("Mutation chance", self.mutation_chance),
            ("Crossover chance", self.crossover_chance),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(GeneticError::InvalidConfiguration(format!(
                    "{} must lie in [0, 1], got {}",
                    name, rate
                )));
            }
        }

        for (name, cutoff) in [
            ("Parent selection cutoff", self.parent_selection_cutoff),
            ("Minimum age replacement", self.minimum_age_replacement),
            ("Best-N individuals", self.best_n_individuals),
        ] {
            if cutoff > self.population_size {
                return Err(GeneticError::InvalidConfiguration(format!(
                    "{} ({}) exceeds population size ({})",
                    name, cutoff, self.population_size
                )));
            }
        }

        if self.best_n_individuals == 0 {
            return Err(GeneticError::InvalidConfiguration(
                "Best-N individuals cannot be zero".to_string(),
            ));
        }

        if self.parallel_threshold == 0 {
            return Err(GeneticError::InvalidConfiguration(
                "Parallel threshold cannot be zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            population_size: 20,
            genotype_length: 15,
            interval: (0.0, 128.0),
            parent_selection_cutoff: 10,
            mutation_chance: 0.01,
            crossover_chance: 0.7,
            survivor_age_cutoff: 3,
            minimum_age_replacement: 2,
            best_n_individuals: 5,
            survivor_policy: SurvivorPolicy::Elitism,
            crowding_policy: CrowdingPolicy::Deterministic,
            use_crowding: false,
            mutation_coupling: MutationCoupling::Correlated,
            parallel_threshold: 1000, // Default parallel threshold
        }
    }
}

/// Builder for `Parameters`.
///
/// Provides a fluent interface for constructing `Parameters` instances.
#[derive(Debug, Clone, Default)]
pub struct ParametersBuilder {
    population_size: Option<usize>,
    genotype_length: Option<usize>,
    interval: Option<(f64, f64)>,
    parent_selection_cutoff: Option<usize>,
    mutation_chance: Option<f64>,
    crossover_chance: Option<f64>,
    survivor_age_cutoff: Option<usize>,
    minimum_age_replacement: Option<usize>,
    best_n_individuals: Option<usize>,
    survivor_policy: Option<SurvivorPolicy>,
    crowding_policy: Option<CrowdingPolicy>,
    use_crowding: Option<bool>,
    mutation_coupling: Option<MutationCoupling>,
    parallel_threshold: Option<usize>,
}

impl ParametersBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn genotype_length(mut self, value: usize) -> Self {
        self.genotype_length = Some(value);
        self
    }

    pub fn interval(mut self, lo: f64, hi: f64) -> Self {
        self.interval = Some((lo, hi));
        self
    }

    pub fn parent_selection_cutoff(mut self, value: usize) -> Self {
        self.parent_selection_cutoff = Some(value);
        self
    }

    pub fn mutation_chance(mut self, value: f64) -> Self {
        self.mutation_chance = Some(value);
        self
    }

    pub fn crossover_chance(mut self, value: f64) -> Self {
        self.crossover_chance = Some(value);
        self
    }

    pub fn survivor_age_cutoff(mut self, value: usize) -> Self {
        self.survivor_age_cutoff = Some(value);
        self
    }

    pub fn minimum_age_replacement(mut self, value: usize) -> Self {
        self.minimum_age_replacement = Some(value);
        self
    }

    pub fn best_n_individuals(mut self, value: usize) -> Self {
        self.best_n_individuals = Some(value);
        self
    }

    pub fn survivor_policy(mut self, value: SurvivorPolicy) -> Self {
        self.survivor_policy = Some(value);
        self
    }

    pub fn crowding_policy(mut self, value: CrowdingPolicy) -> Self {
        self.crowding_policy = Some(value);
        self
    }

    pub fn use_crowding(mut self, value: bool) -> Self {
        self.use_crowding = Some(value);
        self
    }

    pub fn mutation_coupling(mut self, value: MutationCoupling) -> Self {
        self.mutation_coupling = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `Parameters` instance. Validation happens when a run is
    /// constructed, or explicitly through [`Parameters::validate`].
    pub fn build(self) -> Parameters {
        let defaults = Parameters::default();
        Parameters {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            genotype_length: self.genotype_length.unwrap_or(defaults.genotype_length),
            interval: self.interval.unwrap_or(defaults.interval),
            parent_selection_cutoff: self
                .parent_selection_cutoff
                .unwrap_or(defaults.parent_selection_cutoff),
            mutation_chance: self.mutation_chance.unwrap_or(defaults.mutation_chance),
            crossover_chance: self.crossover_chance.unwrap_or(defaults.crossover_chance),
            survivor_age_cutoff: self
                .survivor_age_cutoff
                .unwrap_or(defaults.survivor_age_cutoff),
            minimum_age_replacement: self
                .minimum_age_replacement
                .unwrap_or(defaults.minimum_age_replacement),
            best_n_individuals: self
                .best_n_individuals
                .unwrap_or(defaults.best_n_individuals),
            survivor_policy: self.survivor_policy.unwrap_or(defaults.survivor_policy),
            crowding_policy: self.crowding_policy.unwrap_or(defaults.crowding_policy),
            use_crowding: self.use_crowding.unwrap_or(defaults.use_crowding),
            mutation_coupling: self.mutation_coupling.unwrap_or(defaults.mutation_coupling),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_error(params: Parameters) -> String {
        match params.validate() {
            Err(GeneticError::InvalidConfiguration(msg)) => msg,
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert!(Parameters::default().validate().is_ok());
    }

    #[test]
    fn test_builder_overrides_defaults() {
        let params = Parameters::builder()
            .population_size(4)
            .genotype_length(4)
            .parent_selection_cutoff(4)
            .best_n_individuals(2)
            .build();

        assert_eq!(params.population_size(), 4);
        assert_eq!(params.genotype_length(), 4);
        assert_eq!(params.best_n_individuals(), 2);
        assert_eq!(params.bounds(), (0.0, 128.0));
        assert_eq!(params.mutation_coupling(), MutationCoupling::Correlated);
    }

    #[test]
    fn test_zero_sizes_are_rejected() {
        let msg = config_error(Parameters::builder().population_size(0).build());
        assert!(msg.contains("Population size cannot be zero"));

        let msg = config_error(Parameters::builder().genotype_length(0).build());
        assert!(msg.contains("Genotype length cannot be zero"));
    }

    #[test]
    fn test_inverted_interval_is_rejected() {
        config_error(Parameters::builder().interval(10.0, 0.0).build());
    }

    #[test]
    fn test_rates_outside_unit_interval_are_rejected() {
        let msg = config_error(Parameters::builder().mutation_chance(1.5).build());
        assert!(msg.contains("Mutation chance"));

        let msg = config_error(Parameters::builder().crossover_chance(-0.1).build());
        assert!(msg.contains("Crossover chance"));

        config_error(Parameters::builder().crossover_chance(f64::NAN).build());
    }

    #[test]
    fn test_cutoffs_above_population_are_rejected() {
        let msg = config_error(
            Parameters::builder()
                .population_size(4)
                .parent_selection_cutoff(5)
                .best_n_individuals(2)
                .minimum_age_replacement(1)
                .build(),
        );
        assert!(msg.contains("Parent selection cutoff"));

        let msg = config_error(
            Parameters::builder()
                .population_size(4)
                .parent_selection_cutoff(4)
                .best_n_individuals(5)
                .minimum_age_replacement(1)
                .build(),
        );
        assert!(msg.contains("Best-N"));
    }

    #[test]
    fn test_zero_best_n_is_rejected() {
        config_error(Parameters::builder().best_n_individuals(0).build());
    }
}
