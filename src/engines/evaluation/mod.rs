pub mod grid;
pub mod simulator;

pub use grid::TrailMap;
pub use simulator::{AntOracle, FitnessOracle};
