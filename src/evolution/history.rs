//! # GenerationHistory
//!
//! A write-once record of every committed generation, kept for reporting. The
//! evolutionary step never reads it back. Snapshots only carry what an
//! external plotter needs: the decoded value, fitness, age and genotype of
//! each individual.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::individual::Individual;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualSnapshot {
    pub value: f64,
    pub fitness: f64,
    pub age: usize,
    /// The genotype as a string of `0` and `1`.
    pub genotype: String,
}

impl From<&Individual> for IndividualSnapshot {
    fn from(individual: &Individual) -> Self {
        Self {
            value: individual.value(),
            fitness: individual.fitness(),
            age: individual.age(),
            genotype: individual.genotype().to_string(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSnapshot {
    generation: usize,
    individuals: Vec<IndividualSnapshot>,
}

impl GenerationSnapshot {
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn individuals(&self) -> &[IndividualSnapshot] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Mean fitness of the generation, `0.0` when it is empty.
    pub fn average_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        self.individuals.iter().map(|i| i.fitness).sum::<f64>() / self.individuals.len() as f64
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationHistory {
    snapshots: BTreeMap<usize, GenerationSnapshot>,
}

impl GenerationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freezes `population` as `generation`. An index that was already
    /// recorded keeps its original snapshot.
    pub(crate) fn record(&mut self, generation: usize, population: &[Individual]) {
        self.snapshots
            .entry(generation)
            .or_insert_with(|| GenerationSnapshot {
                generation,
                individuals: population.iter().map(IndividualSnapshot::from).collect(),
            });
    }

    pub fn get(&self, generation: usize) -> Option<&GenerationSnapshot> {
        self.snapshots.get(&generation)
    }

    pub fn latest(&self) -> Option<&GenerationSnapshot> {
        self.snapshots.values().next_back()
    }

    /// Snapshots in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &GenerationSnapshot> {
        self.snapshots.values()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// `(generation, mean fitness)` for every recorded generation.
    pub fn average_fitness_series(&self) -> Vec<(usize, f64)> {
        self.snapshots
            .values()
            .map(|snapshot| (snapshot.generation, snapshot.average_fitness()))
            .collect()
    }
}
