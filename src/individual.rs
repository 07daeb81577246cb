//! # Individual
//!
//! An `Individual` couples a [`Genotype`] with the values derived from it: the
//! decoded phenotype and its fitness. It also tracks its age and, for the
//! current generation only, the ids of its parents and children.
//!
//! Lineage is stored as [`IndividualId`]s rather than references. The driver
//! resolves ids against the current population and offspring pool, and clears
//! every link at the start of a generation.

use std::fmt;

use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{GeneticError, Result},
    evolution::Challenge,
    genotype::Genotype,
};

/// Opaque identifier, unique within a run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndividualId(u64);

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out increasing ids.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> IndividualId {
        let id = IndividualId(self.next);
        self.next += 1;
        id
    }
}

/// The closed search interval `[lo, hi]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Creates an interval, rejecting inverted or non-finite bounds.
    pub fn new(lo: f64, hi: f64) -> Result<Self> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(GeneticError::InvalidConfiguration(format!(
                "Interval bounds must be finite, got [{}, {}]",
                lo, hi
            )));
        }
        if hi < lo {
            return Err(GeneticError::InvalidConfiguration(format!(
                "Interval upper bound {} is below lower bound {}",
                hi, lo
            )));
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// `lo + (hi - lo) * v / 2^L`, a value in `[lo, hi)`.
    pub fn decode(&self, genotype: &Genotype) -> f64 {
        self.lo + (self.hi - self.lo) * genotype.unit_fraction()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    id: IndividualId,
    genotype: Genotype,
    value: f64,
    fitness: f64,
    age: usize,
    parents: Option<[IndividualId; 2]>,
    children: Option<[IndividualId; 2]>,
}

impl Individual {
    /// Decodes `genotype` over `interval` and scores it with `challenge`.
    ///
    /// The individual starts at age 0 with no lineage.
    pub fn new<C>(
        id: IndividualId,
        genotype: Genotype,
        interval: &Interval,
        challenge: &C,
    ) -> Result<Self>
    where
        C: Challenge + ?Sized,
    {
        let value = interval.decode(&genotype);
        let fitness = challenge.score(value);
        if !fitness.is_finite() || fitness < 0.0 {
            return Err(GeneticError::FitnessCalculation(format!(
                "Fitness must be finite and non-negative, got {} for phenotype {}",
                fitness, value
            )));
        }
        Ok(Self {
            id,
            genotype,
            value,
            fitness,
            age: 0,
            parents: None,
            children: None,
        })
    }

    /// Creates an offspring of `parents`.
    pub fn offspring<C>(
        id: IndividualId,
        genotype: Genotype,
        parents: [IndividualId; 2],
        interval: &Interval,
        challenge: &C,
    ) -> Result<Self>
    where
        C: Challenge + ?Sized,
    {
        let mut child = Self::new(id, genotype, interval, challenge)?;
        child.parents = Some(parents);
        Ok(child)
    }

    pub fn id(&self) -> IndividualId {
        self.id
    }

    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    /// The decoded phenotype.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn age(&self) -> usize {
        self.age
    }

    pub fn parents(&self) -> Option<[IndividualId; 2]> {
        self.parents
    }

    pub fn children(&self) -> Option<[IndividualId; 2]> {
        self.children
    }

    /// True once the individual produced offspring in the current generation.
    pub fn has_reproduced(&self) -> bool {
        self.children.is_some()
    }

    pub fn grow_older(&mut self) {
        self.age += 1;
    }

    pub(crate) fn set_children(&mut self, children: [IndividualId; 2]) {
        self.children = Some(children);
    }

    /// Drops both lineage links; called at every generation boundary.
    pub(crate) fn clear_lineage(&mut self) {
        self.parents = None;
        self.children = None;
    }

    pub fn distance(&self, other: &Individual) -> usize {
        self.genotype.hamming_distance(&other.genotype)
    }
}

/// Builds individuals from already drawn genotypes.
///
/// Decoding and scoring are pure, so batches of at least `parallel_threshold`
/// genotypes are evaluated on the rayon pool. Output order matches input order.
pub fn evaluate_batch<C>(
    genotypes: Vec<(IndividualId, Genotype)>,
    interval: &Interval,
    challenge: &C,
    parallel_threshold: usize,
) -> Result<Vec<Individual>>
where
    C: Challenge + ?Sized,
{
    if genotypes.len() >= parallel_threshold {
        genotypes
            .into_par_iter()
            .map(|(id, genotype)| Individual::new(id, genotype, interval, challenge))
            .collect()
    } else {
        genotypes
            .into_iter()
            .map(|(id, genotype)| Individual::new(id, genotype, interval, challenge))
            .collect()
    }
}
