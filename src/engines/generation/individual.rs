use super::program::ProgramTree;
use crate::types::Fitness;

/// A population member: a program tree plus its fitness once evaluated.
/// Fitness is unset on construction and must be invalidated whenever the
/// genotype changes, so stale scores never leak across variations.
#[derive(Debug, Clone)]
pub struct Individual {
    pub program: ProgramTree,
    pub fitness: Option<Fitness>,
}

impl Individual {
    pub fn new(program: ProgramTree) -> Self {
        Self {
            program,
            fitness: None,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }
}
