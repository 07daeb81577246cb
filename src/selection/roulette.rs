use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// A selection strategy that selects parents through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection) selects
/// individuals with probability proportional to their share of the population's
/// total fitness. Selection is with replacement, so a fit individual may be
/// picked several times.
///
/// # Examples
///
/// ```
/// use bitwise_ga::evolution::SineChallenge;
/// use bitwise_ga::individual::{IdAllocator, Individual, Interval};
/// use bitwise_ga::rng::RandomNumberGenerator;
/// use bitwise_ga::selection::RouletteWheelSelection;
///
/// let interval = Interval::new(0.0, 128.0).unwrap();
/// let mut ids = IdAllocator::new();
/// let population: Vec<Individual> = ["0001", "0100", "1100"]
///     .iter()
///     .map(|bits| {
///         Individual::new(ids.next_id(), bits.parse().unwrap(), &interval, &SineChallenge)
///             .unwrap()
///     })
///     .collect();
///
/// let mut rng = RandomNumberGenerator::from_seed(42);
/// let selected = RouletteWheelSelection::new()
///     .select(&population, 5, &mut rng)
///     .unwrap();
///
/// assert_eq!(selected.len(), 5);
/// assert!(selected.iter().all(|&idx| idx < population.len()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    pub fn new() -> Self {
        Self
    }

    /// Calculates the cumulative selection probabilities for each individual.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateFitness` if the population is empty or its fitness
    /// sum is zero or not finite.
    pub fn calculate_probabilities(&self, fitness: &[f64]) -> Result<Vec<f64>> {
        if fitness.is_empty() {
            return Err(GeneticError::DegenerateFitness(
                "Cannot build a roulette wheel over an empty population".to_string(),
            ));
        }

        let sum: f64 = fitness.iter().sum();

        if sum == 0.0 || !sum.is_finite() {
            return Err(GeneticError::DegenerateFitness(format!(
                "Roulette wheel selection requires a positive finite fitness sum, got {}",
                sum
            )));
        }

        let mut probs = Vec::with_capacity(fitness.len());
        let mut cumulative = 0.0;
        for &f in fitness {
            cumulative += f / sum;
            probs.push(cumulative);
        }

        Ok(probs)
    }

    /// Index of the first bucket strictly above `draw`.
    ///
    /// Rounding can leave the last bucket just below 1.0; a draw above it
    /// falls back to the last individual.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateFitness` if `cumulative_probs` is empty.
    pub fn select_individual(&self, cumulative_probs: &[f64], draw: f64) -> Result<usize> {
        let last = cumulative_probs.len().checked_sub(1).ok_or_else(|| {
            GeneticError::DegenerateFitness(
                "Cannot draw from an empty roulette wheel".to_string(),
            )
        })?;

        Ok(cumulative_probs
            .iter()
            .position(|&prob| draw < prob)
            .unwrap_or(last))
    }

    /// Draws `num_to_select` parents and returns their indices in draw order.
    pub fn select(
        &self,
        population: &[Individual],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        let fitness: Vec<f64> = population.iter().map(Individual::fitness).collect();
        let cumulative_probs = self.calculate_probabilities(&fitness)?;

        let selected = rng
            .fetch_uniform(0.0, 1.0, num_to_select)
            .into_iter()
            .map(|draw| self.select_individual(&cumulative_probs, draw))
            .collect::<Result<Vec<usize>>>()?;

        trace!(?selected, "roulette wheel selection");
        Ok(selected)
    }
}
