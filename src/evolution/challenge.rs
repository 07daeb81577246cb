/// Scores the decoded phenotype of an individual.
///
/// Scores must be finite and non-negative so that roulette-wheel selection
/// stays well defined; individuals whose score violates this are rejected with
/// [`GeneticError::FitnessCalculation`](crate::error::GeneticError::FitnessCalculation).
pub trait Challenge: Send + Sync {
    fn score(&self, value: f64) -> f64;
}

/// `sin(x) + 1`, which maps every phenotype into `[0, 2]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SineChallenge;

impl Challenge for SineChallenge {
    fn score(&self, value: f64) -> f64 {
        value.sin() + 1.0
    }
}
