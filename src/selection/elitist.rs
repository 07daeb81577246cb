use std::cmp::Ordering;

use crate::individual::Individual;

/// A survivor selection strategy that keeps the fittest individuals.
///
/// Individuals are ranked by fitness, highest first. The sort is stable, so
/// individuals with equal fitness keep their relative order from the pool.
///
/// # Examples
///
/// ```
/// use bitwise_ga::evolution::SineChallenge;
/// use bitwise_ga::individual::{IdAllocator, Individual, Interval};
/// use bitwise_ga::selection::ElitistSelection;
///
/// let interval = Interval::new(0.0, 128.0).unwrap();
/// let mut ids = IdAllocator::new();
/// let pool: Vec<Individual> = ["0000", "0001", "1010"]
///     .iter()
///     .map(|bits| {
///         Individual::new(ids.next_id(), bits.parse().unwrap(), &interval, &SineChallenge)
///             .unwrap()
///     })
///     .collect();
///
/// let best = ElitistSelection::new().select(pool, 1);
/// assert_eq!(best.len(), 1);
/// assert_eq!(best[0].genotype().to_string(), "0001");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElitistSelection;

impl ElitistSelection {
    pub fn new() -> Self {
        Self
    }

    /// Indices of the `cutoff` fittest individuals, fittest first.
    pub fn rank(&self, pool: &[Individual], cutoff: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..pool.len()).collect();
        indices.sort_by(|&a, &b| descending(pool[a].fitness(), pool[b].fitness()));
        indices.truncate(cutoff);
        indices
    }

    /// Keeps the `cutoff` fittest individuals of `pool`, fittest first.
    pub fn select(&self, mut pool: Vec<Individual>, cutoff: usize) -> Vec<Individual> {
        pool.sort_by(|a, b| descending(a.fitness(), b.fitness()));
        pool.truncate(cutoff);
        pool
    }

    /// Mean fitness of the `cutoff` fittest individuals, or `None` for an
    /// empty pool or a zero cutoff.
    pub fn mean_fitness(&self, pool: &[Individual], cutoff: usize) -> Option<f64> {
        let top = self.rank(pool, cutoff);
        if top.is_empty() {
            return None;
        }
        let sum: f64 = top.iter().map(|&idx| pool[idx].fitness()).sum();
        Some(sum / top.len() as f64)
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
