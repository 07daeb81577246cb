//! # Genotype
//!
//! A `Genotype` is a fixed-length string of bits. Every individual of a run
//! carries a genotype of the same length; the operators in this module never
//! change that length.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rng::RandomNumberGenerator;

/// A fixed-length bit string, most significant bit first.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Genotype {
    bits: Vec<bool>,
}

impl Genotype {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Draws `length` independent fair bits.
    pub fn random(length: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            bits: (0..length).map(|_| rng.bit()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// The genotype read as a big-endian binary fraction `v / 2^L`, in `[0, 1)`.
    ///
    /// Exact for lengths up to the 53 bits of an `f64` mantissa.
    pub fn unit_fraction(&self) -> f64 {
        let mut weight = 0.5;
        let mut fraction = 0.0;
        for &bit in &self.bits {
            if bit {
                fraction += weight;
            }
            weight *= 0.5;
        }
        fraction
    }

    /// Number of positions where the two genotypes differ.
    ///
    /// Positions beyond the shorter genotype are not compared; within a run
    /// all genotypes share one length.
    pub fn hamming_distance(&self, other: &Genotype) -> usize {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Single-point crossover: both offspring take their prefix `[0, point)`
    /// from one parent and the suffix from the other.
    pub fn crossover(&self, other: &Genotype, point: usize) -> (Genotype, Genotype) {
        let point = point.min(self.len());
        let first = self.bits[..point]
            .iter()
            .chain(other.bits[point..].iter())
            .copied()
            .collect();
        let second = other.bits[..point]
            .iter()
            .chain(self.bits[point..].iter())
            .copied()
            .collect();
        (Genotype::new(first), Genotype::new(second))
    }

    pub fn flip(&mut self, locus: usize) {
        if let Some(bit) = self.bits.get_mut(locus) {
            *bit = !*bit;
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Genotype {
    type Err = crate::error::GeneticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(crate::error::GeneticError::InvalidConfiguration(format!(
                    "Genotype strings may only contain '0' and '1', found '{}'",
                    other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Genotype::new)
    }
}
