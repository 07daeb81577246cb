use tracing::trace;

use crate::{
    error::{GeneticError, Result},
    evolution::{options::MutationCoupling, Challenge, Parameters},
    genotype::Genotype,
    individual::{IdAllocator, Individual, Interval},
    rng::RandomNumberGenerator,
};

/// Single-point crossover with bit-flip mutation.
///
/// [`breed`](Self::breed) walks every ordered pair `(i, j)` of the selected
/// parents, `i` in the outer loop, including `i == j`. A pair is skipped as
/// soon as either member has reproduced this generation; otherwise one draw
/// below the crossover chance mates the pair. Mating an individual with
/// itself yields two copies of its genotype before mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinglePointBreeder {
    crossover_chance: f64,
    mutation_chance: f64,
    coupling: MutationCoupling,
}

impl SinglePointBreeder {
    pub fn new(crossover_chance: f64, mutation_chance: f64, coupling: MutationCoupling) -> Self {
        Self {
            crossover_chance,
            mutation_chance,
            coupling,
        }
    }

    pub fn from_parameters(params: &Parameters) -> Self {
        Self::new(
            params.crossover_chance(),
            params.mutation_chance(),
            params.mutation_coupling(),
        )
    }

    /// Breeds the selected parents and returns every offspring produced.
    ///
    /// `selected` holds indices into `population`. Parents that mate get their
    /// children ids recorded; offspring record both parent ids.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if an index in `selected` is out of
    /// range for `population`; nothing is bred in that case.
    pub fn breed<C>(
        &self,
        population: &mut [Individual],
        selected: &[usize],
        interval: &Interval,
        challenge: &C,
        ids: &mut IdAllocator,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>>
    where
        C: Challenge + ?Sized,
    {
        if let Some(&idx) = selected.iter().find(|&&idx| idx >= population.len()) {
            return Err(GeneticError::InvalidConfiguration(format!(
                "selected index {} is out of range for a population of {}",
                idx,
                population.len()
            )));
        }

        let mut offspring = Vec::new();

        for &first in selected {
            for &second in selected {
                if population[first].has_reproduced() || population[second].has_reproduced() {
                    continue;
                }

                if rng.uniform() >= self.crossover_chance {
                    continue;
                }

                let (child1, child2) = self.mate(
                    &population[first],
                    &population[second],
                    interval,
                    challenge,
                    ids,
                    rng,
                )?;
                let children = [child1.id(), child2.id()];
                population[first].set_children(children);
                population[second].set_children(children);

                trace!(
                    parent1 = %population[first].id(),
                    parent2 = %population[second].id(),
                    child1 = %children[0],
                    child2 = %children[1],
                    "crossover"
                );
                offspring.push(child1);
                offspring.push(child2);
            }
        }

        Ok(offspring)
    }

    /// Crosses two parents at a uniform point in `[0, L]` and mutates both
    /// offspring.
    pub fn mate<C>(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        interval: &Interval,
        challenge: &C,
        ids: &mut IdAllocator,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Individual, Individual)>
    where
        C: Challenge + ?Sized,
    {
        let point = rng.index_inclusive(parent1.genotype().len());
        let (mut genotype1, mut genotype2) =
            parent1.genotype().crossover(parent2.genotype(), point);
        self.mutate(&mut genotype1, &mut genotype2, rng);

        let parents = [parent1.id(), parent2.id()];
        let child1 = Individual::offspring(ids.next_id(), genotype1, parents, interval, challenge)?;
        let child2 = Individual::offspring(ids.next_id(), genotype2, parents, interval, challenge)?;
        Ok((child1, child2))
    }

    /// Flips bits of two sibling genotypes according to the mutation chance
    /// and the configured [`MutationCoupling`].
    pub fn mutate(
        &self,
        first: &mut Genotype,
        second: &mut Genotype,
        rng: &mut RandomNumberGenerator,
    ) {
        for locus in 0..first.len() {
            match self.coupling {
                MutationCoupling::Correlated => {
                    let draw = rng.uniform();
                    if draw > 1.0 - self.mutation_chance {
                        first.flip(locus);
                    }
                    if draw < self.mutation_chance {
                        second.flip(locus);
                    }
                }
                MutationCoupling::Independent => {
                    if rng.uniform() < self.mutation_chance {
                        first.flip(locus);
                    }
                    if rng.uniform() < self.mutation_chance {
                        second.flip(locus);
                    }
                }
            }
        }
    }
}
