use bitwise_ga::{
    evolution::{
        Challenge, CrowdingPolicy, EvolutionLauncher, MutationCoupling, Parameters, SineChallenge,
        SurvivorPolicy,
    },
    genotype::Genotype,
    rng::RandomNumberGenerator,
    GeneticError,
};

fn policies() -> Vec<(SurvivorPolicy, bool, CrowdingPolicy)> {
    vec![
        (SurvivorPolicy::Elitism, false, CrowdingPolicy::Deterministic),
        (SurvivorPolicy::Age, false, CrowdingPolicy::Deterministic),
        (SurvivorPolicy::Elitism, true, CrowdingPolicy::Deterministic),
        (SurvivorPolicy::Elitism, true, CrowdingPolicy::Probabilistic),
    ]
}

fn params(survivor: SurvivorPolicy, crowding: bool, policy: CrowdingPolicy) -> Parameters {
    Parameters::builder()
        .population_size(20)
        .genotype_length(15)
        .interval(0.0, 128.0)
        .parent_selection_cutoff(10)
        .mutation_chance(0.05)
        .crossover_chance(0.7)
        .survivor_age_cutoff(2)
        .minimum_age_replacement(2)
        .best_n_individuals(5)
        .survivor_policy(survivor)
        .use_crowding(crowding)
        .crowding_policy(policy)
        .build()
}

#[test]
fn test_invariants_hold_for_every_policy() {
    for (survivor, crowding, policy) in policies() {
        for seed in 0..5 {
            let mut launcher = EvolutionLauncher::new(
                params(survivor, crowding, policy),
                SineChallenge,
                RandomNumberGenerator::from_seed(seed),
            )
            .unwrap();

            for _ in 0..15 {
                launcher.step().unwrap();

                assert_eq!(launcher.population().len(), 20);
                for individual in launcher.population() {
                    assert_eq!(individual.genotype().len(), 15);
                    assert!((0.0..=2.0).contains(&individual.fitness()));
                    assert_eq!(individual.fitness(), individual.value().sin() + 1.0);
                    assert!((0.0..128.0).contains(&individual.value()));
                }
            }
            assert_eq!(launcher.history().len(), 16);
        }
    }
}

#[test]
fn test_best_average_is_mean_of_top_n() {
    let mut launcher = EvolutionLauncher::new(
        params(SurvivorPolicy::Elitism, false, CrowdingPolicy::Deterministic),
        SineChallenge,
        RandomNumberGenerator::from_seed(9),
    )
    .unwrap();
    launcher.run(5).unwrap();

    let mut fitness: Vec<f64> = launcher.population().iter().map(|i| i.fitness()).collect();
    fitness.sort_by(|a, b| b.partial_cmp(a).unwrap());
    let expected = fitness.iter().take(5).sum::<f64>() / 5.0;

    assert!((launcher.best_average() - expected).abs() < 1e-12);
}

#[test]
fn test_elitism_never_loses_the_best() {
    let mut launcher = EvolutionLauncher::new(
        params(SurvivorPolicy::Elitism, false, CrowdingPolicy::Deterministic),
        SineChallenge,
        RandomNumberGenerator::from_seed(21),
    )
    .unwrap();

    let mut previous = launcher.best().unwrap().fitness();
    for _ in 0..20 {
        launcher.step().unwrap();
        let best = launcher.best().unwrap().fitness();
        assert!(best >= previous);
        previous = best;
    }
}

#[test]
fn test_small_scenario_with_seeded_population() {
    // N=4, L=4, [0, 128]: "0001" decodes to 8, the fittest 4-bit point.
    let params = Parameters::builder()
        .population_size(4)
        .genotype_length(4)
        .interval(0.0, 128.0)
        .parent_selection_cutoff(4)
        .crossover_chance(1.0)
        .mutation_chance(0.0)
        .survivor_policy(SurvivorPolicy::Elitism)
        .best_n_individuals(2)
        .build();
    let genotypes: Vec<Genotype> = ["0001", "0001", "0000", "1000"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();

    for seed in [0, 1, 42] {
        let mut launcher = EvolutionLauncher::with_population(
            params.clone(),
            SineChallenge,
            genotypes.clone(),
            RandomNumberGenerator::from_seed(seed),
        )
        .unwrap();

        launcher.step().unwrap();

        // With certain crossover every drawn parent mates with itself and,
        // without mutation, breeds exact copies. The two "0001" originals
        // therefore always make the top two.
        assert_eq!(launcher.population().len(), 4);
        assert_eq!(launcher.best_average(), 8.0f64.sin() + 1.0);
        assert_eq!(launcher.population()[0].genotype().to_string(), "0001");
        assert_eq!(launcher.population()[1].genotype().to_string(), "0001");
        assert_eq!(launcher.population()[0].age(), 1);
    }
}

#[test]
fn test_small_scenario_with_random_population() {
    let params = Parameters::builder()
        .population_size(4)
        .genotype_length(4)
        .interval(0.0, 128.0)
        .parent_selection_cutoff(4)
        .crossover_chance(1.0)
        .mutation_chance(0.0)
        .survivor_policy(SurvivorPolicy::Elitism)
        .best_n_individuals(2)
        .build();
    let mut launcher =
        EvolutionLauncher::new(params, SineChallenge, RandomNumberGenerator::from_seed(7)).unwrap();
    let initial_best = launcher.best().unwrap().fitness();

    launcher.step().unwrap();

    let mut fitness: Vec<f64> = launcher.population().iter().map(|i| i.fitness()).collect();
    fitness.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert_eq!(launcher.population().len(), 4);
    assert_eq!(launcher.best_average(), (fitness[0] + fitness[1]) / 2.0);
    // Offspring are copies, and elitism keeps the original fittest individual.
    assert_eq!(fitness[0], initial_best);
}

#[test]
fn test_same_seed_reproduces_the_run() {
    let run = |seed: u64| {
        let mut launcher = EvolutionLauncher::new(
            params(SurvivorPolicy::Age, false, CrowdingPolicy::Deterministic),
            SineChallenge,
            RandomNumberGenerator::from_seed(seed),
        )
        .unwrap();
        launcher.run(10).unwrap();
        launcher.history().clone()
    };

    assert_eq!(run(5), run(5));
}

#[test]
fn test_independent_mutation_coupling_runs() {
    let params = Parameters::builder()
        .mutation_coupling(MutationCoupling::Independent)
        .mutation_chance(0.2)
        .build();
    let mut launcher =
        EvolutionLauncher::new(params, SineChallenge, RandomNumberGenerator::from_seed(3)).unwrap();

    launcher.run(5).unwrap();
    assert_eq!(launcher.population().len(), 20);
}

#[test]
fn test_degenerate_fitness_aborts_the_step() {
    struct FlatChallenge;

    impl Challenge for FlatChallenge {
        fn score(&self, _value: f64) -> f64 {
            0.0
        }
    }

    let mut launcher = EvolutionLauncher::new(
        Parameters::default(),
        FlatChallenge,
        RandomNumberGenerator::from_seed(1),
    )
    .unwrap();
    let before = launcher.population().to_vec();

    let result = launcher.step();

    assert!(matches!(result, Err(GeneticError::DegenerateFitness(_))));
    assert_eq!(launcher.generation(), 1);
    assert_eq!(launcher.history().len(), 1);
    assert_eq!(launcher.population(), before.as_slice());
}

#[test]
fn test_average_fitness_series_tracks_history() {
    let mut launcher = EvolutionLauncher::new(
        Parameters::default(),
        SineChallenge,
        RandomNumberGenerator::from_seed(12),
    )
    .unwrap();
    launcher.run(4).unwrap();

    let series = launcher.history().average_fitness_series();
    assert_eq!(
        series.iter().map(|(g, _)| *g).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );
    let (_, last) = series[series.len() - 1];
    assert!((last - launcher.average_fitness()).abs() < 1e-12);
}

#[test]
fn test_logging_smoke() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let params = Parameters::builder().use_crowding(true).build();
        let rng = RandomNumberGenerator::from_seed(2);
        let mut launcher = EvolutionLauncher::new(params, SineChallenge, rng).unwrap();
        launcher.run(2).unwrap();
    });
}
