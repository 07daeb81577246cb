//! Initial population generation.

use crate::{
    error::{GeneticError, Result},
    evolution::Challenge,
    genotype::Genotype,
    individual::{evaluate_batch, IdAllocator, Individual, Interval},
    rng::RandomNumberGenerator,
};

/// Produces `size` individuals with `genotype_length` uniform random bits each.
///
/// Bits are drawn sequentially from `rng`, so a seeded generator always yields
/// the same population. Evaluation of the drawn genotypes may run in parallel
/// once `size` reaches `parallel_threshold`.
pub fn generate_initial_population<C>(
    size: usize,
    genotype_length: usize,
    interval: &Interval,
    challenge: &C,
    ids: &mut IdAllocator,
    rng: &mut RandomNumberGenerator,
    parallel_threshold: usize,
) -> Result<Vec<Individual>>
where
    C: Challenge + ?Sized,
{
    if size == 0 {
        return Err(GeneticError::InvalidConfiguration(
            "Population size cannot be zero".to_string(),
        ));
    }

    if genotype_length == 0 {
        return Err(GeneticError::InvalidConfiguration(
            "Genotype length cannot be zero".to_string(),
        ));
    }

    let genotypes = (0..size)
        .map(|_| (ids.next_id(), Genotype::random(genotype_length, rng)))
        .collect();

    evaluate_batch(genotypes, interval, challenge, parallel_threshold)
}
