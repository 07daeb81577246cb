#![cfg(feature = "serde")]

use bitwise_ga::{
    evolution::{CrowdingPolicy, EvolutionLauncher, GenerationHistory, Parameters, SurvivorPolicy},
    rng::RandomNumberGenerator,
    SineChallenge,
};

#[test]
fn test_parameters_round_trip_through_json() {
    let params = Parameters::builder()
        .population_size(30)
        .survivor_policy(SurvivorPolicy::Age)
        .crowding_policy(CrowdingPolicy::Probabilistic)
        .build();

    let json = serde_json::to_string(&params).unwrap();
    let restored: Parameters = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, params);
}

#[test]
fn test_history_exports_to_json() {
    let mut launcher = EvolutionLauncher::new(
        Parameters::default(),
        SineChallenge,
        RandomNumberGenerator::from_seed(8),
    )
    .unwrap();
    launcher.run(2).unwrap();

    let json = serde_json::to_value(launcher.history()).unwrap();
    let snapshots = json["snapshots"].as_object().unwrap();
    assert_eq!(snapshots.len(), 3);
    assert!(snapshots["1"]["individuals"][0]["fitness"].is_f64());

    let restored: GenerationHistory = serde_json::from_value(json).unwrap();
    assert_eq!(restored.len(), 3);
}
