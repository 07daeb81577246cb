//! # Crowding
//!
//! Crowding replaces parents with their own offspring instead of ranking the
//! whole population. Each child is matched with the parent whose genotype it
//! resembles most, and the pair competes for that parent's slot. The
//! population size never changes.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    error::{GeneticError, OptionExt, Result},
    individual::{Individual, IndividualId},
    rng::RandomNumberGenerator,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrowdingPolicy {
    /// The fitter of parent and child survives; exact ties are a coin flip.
    #[default]
    Deterministic,
    /// The child survives with probability `child / (parent + child)`.
    Probabilistic,
}

/// Which member of a matched pair keeps the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Survivor {
    Parent,
    Child,
}

impl CrowdingPolicy {
    /// Decides between a parent and the child matched with it.
    pub fn resolve(
        &self,
        parent: &Individual,
        child: &Individual,
        rng: &mut RandomNumberGenerator,
    ) -> Survivor {
        match self {
            CrowdingPolicy::Deterministic => {
                if parent.fitness() > child.fitness() {
                    Survivor::Parent
                } else if parent.fitness() == child.fitness() {
                    if rng.bit() {
                        Survivor::Child
                    } else {
                        Survivor::Parent
                    }
                } else {
                    Survivor::Child
                }
            }
            CrowdingPolicy::Probabilistic => {
                let probability = child_survival_probability(parent.fitness(), child.fitness());
                if rng.uniform() < probability {
                    Survivor::Child
                } else {
                    Survivor::Parent
                }
            }
        }
    }
}

/// `child / (parent + child)`; two zero-fitness contenders split evenly.
pub fn child_survival_probability(parent_fitness: f64, child_fitness: f64) -> f64 {
    let total = parent_fitness + child_fitness;
    if total == 0.0 {
        0.5
    } else {
        child_fitness / total
    }
}

/// Nearest-genotype crowding over the parents drawn this generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Crowding {
    policy: CrowdingPolicy,
}

impl Crowding {
    pub fn new(policy: CrowdingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CrowdingPolicy {
        self.policy
    }

    /// Lets each reproducing pair of parents compete with its two children.
    ///
    /// `selected` holds the indices drawn by parent selection, in draw order.
    /// Parents are visited in that order; a pair is handled once, when its
    /// first member is reached. Pairs whose second member was already visited,
    /// which includes an individual mated with itself, keep their slots. The
    /// pairing of children to parents minimizes the total Hamming distance;
    /// on a tie the children are matched crosswise.
    ///
    /// Returns the number of slots taken over by children.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if an index in `selected` is out of
    /// range for `population`, and `BrokenLineage` if a parent's children are
    /// missing from `offspring`.
    pub fn replace(
        &self,
        population: &mut [Individual],
        offspring: Vec<Individual>,
        selected: &[usize],
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        let slots: HashMap<IndividualId, usize> = population
            .iter()
            .enumerate()
            .map(|(idx, individual)| (individual.id(), idx))
            .collect();
        let mut offspring: HashMap<IndividualId, Individual> = offspring
            .into_iter()
            .map(|child| (child.id(), child))
            .collect();
        let mut visited: HashSet<IndividualId> = HashSet::new();
        let mut replaced = 0;

        for &idx in selected {
            let parent = population.get(idx).ok_or_else_genetic(|| {
                GeneticError::InvalidConfiguration(format!(
                    "selected index {} is out of range for a population of {}",
                    idx,
                    population.len()
                ))
            })?;
            let Some([first_child, second_child]) = parent.children() else {
                continue;
            };
            if !visited.insert(parent.id()) {
                continue;
            }

            let child1 = offspring.get(&first_child).ok_or_else_genetic(|| {
                GeneticError::BrokenLineage(format!(
                    "child {} of {} is missing",
                    first_child,
                    parent.id()
                ))
            })?;
            let child2 = offspring.get(&second_child).ok_or_else_genetic(|| {
                GeneticError::BrokenLineage(format!(
                    "child {} of {} is missing",
                    second_child,
                    parent.id()
                ))
            })?;
            let [parent_a, parent_b] = child1.parents().ok_or_else_genetic(|| {
                GeneticError::BrokenLineage(format!("child {} has no parents", first_child))
            })?;

            let sibling = if parent_a == parent.id() { parent_b } else { parent_a };
            if !visited.insert(sibling) {
                continue;
            }

            let slot_a = lookup(&slots, parent_a)?;
            let slot_b = lookup(&slots, parent_b)?;
            let (a, b) = (&population[slot_a], &population[slot_b]);

            let straight = child1.distance(a) + child2.distance(b);
            let crossed = child2.distance(a) + child1.distance(b);
            let (for_a, for_b) = if straight < crossed {
                (child1, child2)
            } else {
                (child2, child1)
            };

            let outcome_a = self.policy.resolve(a, for_a, rng);
            let outcome_b = self.policy.resolve(b, for_b, rng);
            trace!(
                parent_a = %a.id(),
                parent_b = %b.id(),
                child_a = %for_a.id(),
                child_b = %for_b.id(),
                ?outcome_a,
                ?outcome_b,
                "crowding"
            );

            let (for_a, for_b) = (for_a.id(), for_b.id());
            let contests = [(slot_a, for_a, outcome_a), (slot_b, for_b, outcome_b)];
            for (slot, child_id, outcome) in contests {
                if outcome == Survivor::Child {
                    let child = offspring.remove(&child_id).ok_or_else_genetic(|| {
                        GeneticError::BrokenLineage(format!(
                            "child {} was already placed",
                            child_id
                        ))
                    })?;
                    population[slot] = child;
                    replaced += 1;
                }
            }
        }

        Ok(replaced)
    }
}

fn lookup(slots: &HashMap<IndividualId, usize>, id: IndividualId) -> Result<usize> {
    slots
        .get(&id)
        .copied()
        .ok_or_else_genetic(|| {
            GeneticError::BrokenLineage(format!("parent {} is not in the population", id))
        })
}
