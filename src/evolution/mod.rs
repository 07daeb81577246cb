pub mod challenge;
pub mod history;
pub mod launcher;
pub mod options;
pub mod replacement;

pub use challenge::{Challenge, SineChallenge};
pub use history::{GenerationHistory, GenerationSnapshot, IndividualSnapshot};
pub use launcher::EvolutionLauncher;
pub use options::{CrowdingPolicy, MutationCoupling, Parameters, ParametersBuilder, SurvivorPolicy};
pub use replacement::ReplacementStrategy;
