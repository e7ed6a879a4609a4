pub mod evolution_engine;
pub mod generator;
pub mod hall_of_fame;
pub mod individual;
pub mod operators;
pub mod primitive_set;
pub mod program;
pub mod progress;

pub use evolution_engine::EvolutionEngine;
pub use generator::{generate, GrowthPolicy};
pub use hall_of_fame::{EliteProgram, HallOfFame};
pub use individual::Individual;
pub use primitive_set::{Primitive, PrimitiveId, PrimitiveKind, PrimitiveSet};
pub use program::{ProgramNode, ProgramTree};
pub use progress::{ConsoleProgressCallback, ProgressCallback, SilentProgressCallback};
