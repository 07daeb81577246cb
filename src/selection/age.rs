use std::cmp::Reverse;

use crate::individual::Individual;

/// Outcome of an age-based survivor selection.
#[derive(Debug, Clone, Default)]
pub struct AgeSelection {
    /// Individuals that stay, in their original population order.
    pub survivors: Vec<Individual>,
    /// Individuals retired this generation: first the ones past the age
    /// cutoff, then the ones removed to reach the minimum, oldest first.
    pub removed: Vec<Individual>,
}

impl AgeSelection {
    /// Number of slots the offspring have to fill.
    pub fn freed(&self) -> usize {
        self.removed.len()
    }
}

/// A survivor selection strategy that retires individuals by age.
///
/// Everyone older than `survivor_age` is removed. When that frees fewer than
/// `minimum_replacement` slots, the oldest remaining individuals are removed
/// as well until the minimum is met or nobody is left.
///
/// # Examples
///
/// ```
/// use bitwise_ga::selection::AgeBasedSelection;
///
/// let selection = AgeBasedSelection::new(3, 2);
/// assert_eq!(selection.survivor_age(), 3);
/// assert_eq!(selection.minimum_replacement(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBasedSelection {
    survivor_age: usize,
    minimum_replacement: usize,
}

impl AgeBasedSelection {
    pub fn new(survivor_age: usize, minimum_replacement: usize) -> Self {
        Self {
            survivor_age,
            minimum_replacement,
        }
    }

    pub fn survivor_age(&self) -> usize {
        self.survivor_age
    }

    pub fn minimum_replacement(&self) -> usize {
        self.minimum_replacement
    }

    pub fn select(&self, population: Vec<Individual>) -> AgeSelection {
        let (kept, mut removed): (Vec<Individual>, Vec<Individual>) = population
            .into_iter()
            .partition(|individual| individual.age() <= self.survivor_age);

        let shortfall = self.minimum_replacement.saturating_sub(removed.len());
        if shortfall == 0 {
            return AgeSelection {
                survivors: kept,
                removed,
            };
        }

        // Stable by age descending: among equals the earlier individual goes first.
        let mut by_age: Vec<usize> = (0..kept.len()).collect();
        by_age.sort_by_key(|&idx| Reverse(kept[idx].age()));
        let mut retire = vec![false; kept.len()];
        let forced: Vec<usize> = by_age.into_iter().take(shortfall).collect();
        for &idx in &forced {
            retire[idx] = true;
        }

        let mut forced_out: Vec<Option<Individual>> = Vec::with_capacity(kept.len());
        let mut survivors = Vec::with_capacity(kept.len().saturating_sub(shortfall));
        for (idx, individual) in kept.into_iter().enumerate() {
            if retire[idx] {
                forced_out.push(Some(individual));
            } else {
                forced_out.push(None);
                survivors.push(individual);
            }
        }
        removed.extend(forced.into_iter().filter_map(|idx| forced_out[idx].take()));

        AgeSelection { survivors, removed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::SineChallenge;
    use crate::individual::{IdAllocator, Interval};

    fn population(ages: &[usize]) -> Vec<Individual> {
        let interval = Interval::new(0.0, 128.0).unwrap();
        let mut ids = IdAllocator::new();
        ages.iter()
            .map(|&age| {
                let genotype = "0101".parse().unwrap();
                let mut individual =
                    Individual::new(ids.next_id(), genotype, &interval, &SineChallenge).unwrap();
                for _ in 0..age {
                    individual.grow_older();
                }
                individual
            })
            .collect()
    }

    fn ages(individuals: &[Individual]) -> Vec<usize> {
        individuals.iter().map(Individual::age).collect()
    }

    #[test]
    fn test_removes_individuals_past_cutoff() {
        let result = AgeBasedSelection::new(2, 1).select(population(&[1, 3, 2, 5]));

        assert_eq!(ages(&result.survivors), vec![1, 2]);
        assert_eq!(ages(&result.removed), vec![3, 5]);
        assert_eq!(result.freed(), 2);
    }

    #[test]
    fn test_forces_removal_of_oldest_to_reach_minimum() {
        let result = AgeBasedSelection::new(2, 1).select(population(&[1, 2, 0, 1]));

        assert_eq!(result.freed(), 1);
        assert_eq!(ages(&result.removed), vec![2]);
        assert_eq!(ages(&result.survivors), vec![1, 0, 1]);
    }

    #[test]
    fn test_forced_removal_tops_up_aged_out() {
        let result = AgeBasedSelection::new(2, 3).select(population(&[4, 1, 2, 0, 2]));

        assert_eq!(result.freed(), 3);
        assert_eq!(ages(&result.removed), vec![4, 2, 2]);
        assert_eq!(ages(&result.survivors), vec![1, 0]);
    }

    #[test]
    fn test_forced_removal_among_equal_ages_is_stable() {
        let population = population(&[1, 1, 1]);
        let first = population[0].id();

        let result = AgeBasedSelection::new(5, 1).select(population);

        assert_eq!(result.removed[0].id(), first);
    }

    #[test]
    fn test_minimum_larger_than_population_removes_everyone() {
        let result = AgeBasedSelection::new(5, 10).select(population(&[0, 1]));

        assert!(result.survivors.is_empty());
        assert_eq!(result.freed(), 2);
    }
}
