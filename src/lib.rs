pub mod breeding;
pub mod crowding;
pub mod error;
pub mod evolution;
pub mod genotype;
pub mod individual;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionLauncher, Parameters, SineChallenge};
pub use genotype::Genotype;
pub use individual::Individual;
pub use rng::RandomNumberGenerator;
