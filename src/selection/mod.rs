pub mod age;
pub mod elitist;
pub mod roulette;

pub use age::{AgeBasedSelection, AgeSelection};
pub use elitist::ElitistSelection;
pub use roulette::RouletteWheelSelection;
