//! # ReplacementStrategy
//!
//! The survivor policy and the crowding switch in [`Parameters`] are resolved
//! once, when a run is constructed, into a single `ReplacementStrategy`. The
//! generation step then applies it without looking at the flags again.

use tracing::warn;

use crate::{
    crowding::Crowding,
    error::{GeneticError, Result},
    evolution::options::{Parameters, SurvivorPolicy},
    individual::Individual,
    rng::RandomNumberGenerator,
    selection::{AgeBasedSelection, ElitistSelection},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementStrategy {
    /// Keep the fittest of the current population and the offspring.
    Elitism,
    /// Retire by age, then fill the freed slots with the fittest offspring.
    AgeBased(AgeBasedSelection),
    /// Let offspring compete with their own parents.
    Crowding(Crowding),
}

impl ReplacementStrategy {
    pub fn from_parameters(params: &Parameters) -> Self {
        if params.use_crowding() {
            return ReplacementStrategy::Crowding(Crowding::new(params.crowding_policy()));
        }

        match params.survivor_policy() {
            SurvivorPolicy::Elitism => ReplacementStrategy::Elitism,
            SurvivorPolicy::Age => ReplacementStrategy::AgeBased(AgeBasedSelection::new(
                params.survivor_age_cutoff(),
                params.minimum_age_replacement(),
            )),
        }
    }

    /// Builds the next population from the current one and its offspring.
    ///
    /// `selected` is the parent selection of this generation, which crowding
    /// walks in order. The result holds `target` individuals whenever the
    /// pool allows it.
    ///
    /// # Errors
    ///
    /// `EmptyPopulation` if nobody would survive, and any lineage error raised
    /// by crowding.
    pub fn apply(
        &self,
        population: Vec<Individual>,
        offspring: Vec<Individual>,
        selected: &[usize],
        target: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>> {
        let elitism = ElitistSelection::new();

        let next = match self {
            ReplacementStrategy::Elitism => {
                let mut pool = population;
                pool.extend(offspring);
                elitism.select(pool, target)
            }
            ReplacementStrategy::AgeBased(age) => {
                let outcome = age.select(population);
                let freed = outcome.freed();
                let mut next = outcome.survivors;
                next.extend(elitism.select(offspring, freed));

                let missing = target.saturating_sub(next.len());
                if missing > 0 {
                    warn!(
                        missing,
                        "not enough offspring to fill retired slots, keeping the fittest retirees"
                    );
                    next.extend(elitism.select(outcome.removed, missing));
                }
                next
            }
            ReplacementStrategy::Crowding(crowding) => {
                let mut next = population;
                crowding.replace(&mut next, offspring, selected, rng)?;
                next
            }
        };

        if next.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        Ok(next)
    }
}
