//! # Breeding
//!
//! Reproduction turns the parents drawn by roulette-wheel selection into
//! offspring through single-point crossover followed by per-locus mutation.
//! Each individual reproduces at most once per generation.
pub mod single_point;

pub use single_point::SinglePointBreeder;
