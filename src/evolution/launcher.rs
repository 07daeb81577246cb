use tracing::debug;

use super::{
    challenge::{Challenge, SineChallenge},
    history::GenerationHistory,
    options::Parameters,
    replacement::ReplacementStrategy,
};
use crate::{
    breeding::SinglePointBreeder,
    error::{GeneticError, OptionExt, Result},
    genotype::Genotype,
    individual::{evaluate_batch, IdAllocator, Individual, Interval},
    population::generate_initial_population,
    rng::RandomNumberGenerator,
    selection::{ElitistSelection, RouletteWheelSelection},
};

/// Drives a run one generation at a time.
///
/// The launcher owns the live population, the random source and the
/// generation history. Each call to [`step`](Self::step) performs one
/// generation:
///
/// 1. every individual ages by one and forgets last generation's lineage,
/// 2. roulette-wheel selection draws the parent pool,
/// 3. the pool breeds, each individual at most once,
/// 4. the configured [`ReplacementStrategy`] builds the next population,
/// 5. the result is recorded in the history and the best-average metric is
///    recomputed.
///
/// A failing step returns its error and leaves the committed population,
/// history and metric untouched.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<Chall = SineChallenge>
where
    Chall: Challenge,
{
    params: Parameters,
    interval: Interval,
    challenge: Chall,
    replacement: ReplacementStrategy,
    selection: RouletteWheelSelection,
    breeder: SinglePointBreeder,
    ids: IdAllocator,
    rng: RandomNumberGenerator,
    population: Vec<Individual>,
    generation: usize,
    history: GenerationHistory,
    best_average: f64,
}

impl<Chall> EvolutionLauncher<Chall>
where
    Chall: Challenge,
{
    /// Validates `params` and draws a random initial population.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for invalid parameters, `FitnessCalculation` if
    /// the challenge scores an initial individual negatively.
    pub fn new(
        params: Parameters,
        challenge: Chall,
        mut rng: RandomNumberGenerator,
    ) -> Result<Self> {
        params.validate()?;
        let interval = params.interval()?;
        let mut ids = IdAllocator::new();
        let population = generate_initial_population(
            params.population_size(),
            params.genotype_length(),
            &interval,
            &challenge,
            &mut ids,
            &mut rng,
            params.parallel_threshold(),
        )?;

        Self::assemble(params, interval, challenge, ids, rng, population)
    }

    /// Validates `params` and starts from the given genotypes instead of a
    /// random population.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` unless exactly `population_size` genotypes of
    /// `genotype_length` bits are supplied.
    pub fn with_population(
        params: Parameters,
        challenge: Chall,
        genotypes: Vec<Genotype>,
        rng: RandomNumberGenerator,
    ) -> Result<Self> {
        params.validate()?;
        if genotypes.len() != params.population_size() {
            return Err(GeneticError::InvalidConfiguration(format!(
                "Expected {} initial genotypes, got {}",
                params.population_size(),
                genotypes.len()
            )));
        }
        if let Some(bad) = genotypes
            .iter()
            .find(|g| g.len() != params.genotype_length())
        {
            return Err(GeneticError::InvalidConfiguration(format!(
                "Initial genotype {} does not have length {}",
                bad,
                params.genotype_length()
            )));
        }

        let interval = params.interval()?;
        let mut ids = IdAllocator::new();
        let genotypes = genotypes.into_iter().map(|g| (ids.next_id(), g)).collect();
        let population =
            evaluate_batch(genotypes, &interval, &challenge, params.parallel_threshold())?;

        Self::assemble(params, interval, challenge, ids, rng, population)
    }

    fn assemble(
        params: Parameters,
        interval: Interval,
        challenge: Chall,
        ids: IdAllocator,
        rng: RandomNumberGenerator,
        population: Vec<Individual>,
    ) -> Result<Self> {
        let best_average = Self::best_average_of(&population, params.best_n_individuals())?;
        let mut history = GenerationHistory::new();
        history.record(1, &population);

        Ok(Self {
            replacement: ReplacementStrategy::from_parameters(&params),
            selection: RouletteWheelSelection::new(),
            breeder: SinglePointBreeder::from_parameters(&params),
            params,
            interval,
            challenge,
            ids,
            rng,
            population,
            generation: 1,
            history,
            best_average,
        })
    }

    /// Advances the run by one generation.
    pub fn step(&mut self) -> Result<()> {
        let mut population = self.population.clone();
        for individual in population.iter_mut() {
            individual.grow_older();
            individual.clear_lineage();
        }

        let selected = self.selection.select(
            &population,
            self.params.parent_selection_cutoff(),
            &mut self.rng,
        )?;

        let offspring = self.breeder.breed(
            &mut population,
            &selected,
            &self.interval,
            &self.challenge,
            &mut self.ids,
            &mut self.rng,
        )?;
        let offspring_count = offspring.len();

        let next = self.replacement.apply(
            population,
            offspring,
            &selected,
            self.params.population_size(),
            &mut self.rng,
        )?;
        let best_average = Self::best_average_of(&next, self.params.best_n_individuals())?;

        self.generation += 1;
        self.history.record(self.generation, &next);
        self.population = next;
        self.best_average = best_average;

        debug!(
            generation = self.generation,
            selected = selected.len(),
            offspring = offspring_count,
            population = self.population.len(),
            best_average = self.best_average,
            "generation complete"
        );
        Ok(())
    }

    /// Advances the run by `generations` steps, stopping at the first error.
    pub fn run(&mut self, generations: usize) -> Result<()> {
        for _ in 0..generations {
            self.step()?;
        }
        Ok(())
    }

    fn best_average_of(population: &[Individual], best_n: usize) -> Result<f64> {
        ElitistSelection::new()
            .mean_fitness(population, best_n)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn replacement(&self) -> ReplacementStrategy {
        self.replacement
    }

    /// Index of the current generation; the initial population is generation 1.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    pub fn history(&self) -> &GenerationHistory {
        &self.history
    }

    /// Mean fitness of the `best_n_individuals` fittest individuals.
    pub fn best_average(&self) -> f64 {
        self.best_average
    }

    /// Mean fitness of the whole current population.
    pub fn average_fitness(&self) -> f64 {
        self.population.iter().map(Individual::fitness).sum::<f64>() / self.population.len() as f64
    }

    /// The fittest individual; the earliest one wins a tie.
    pub fn best(&self) -> Result<&Individual> {
        ElitistSelection::new()
            .rank(&self.population, 1)
            .first()
            .map(|&idx| &self.population[idx])
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }
}
