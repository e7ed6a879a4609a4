use super::individual::Individual;
use super::program::ProgramTree;
use crate::error::{EvotrailError, Result};
use crate::types::Fitness;
use std::cmp::Ordering;
use std::collections::HashSet;

/// An archived best-ever program with the canonical form used for
/// deduplication.
#[derive(Clone, Debug)]
pub struct EliteProgram {
    pub program: ProgramTree,
    pub fitness: Fitness,
    pub canonical: String,
}

/// Bounded archive of the best distinct individuals seen across all
/// generations, sorted descending by fitness. Identical genotypes are
/// archived at most once; with a deterministic oracle a duplicate genotype
/// can never carry a better fitness than the archived copy.
pub struct HallOfFame {
    entries: Vec<EliteProgram>,
    max_size: usize,
    seen_signatures: HashSet<String>,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_size,
            seen_signatures: HashSet::new(),
        }
    }

    /// Attempt to archive an evaluated individual. Returns `false` when the
    /// genotype is already archived; fails with `MissingFitness` for an
    /// unevaluated candidate.
    pub fn try_add(&mut self, individual: &Individual) -> Result<bool> {
        let fitness = individual.fitness.clone().ok_or_else(|| {
            EvotrailError::MissingFitness("archive candidate has no fitness".to_string())
        })?;

        let canonical = individual.program.canonical_string();
        if self.seen_signatures.contains(&canonical) {
            return Ok(false);
        }

        self.entries.push(EliteProgram {
            program: individual.program.clone(),
            fitness,
            canonical: canonical.clone(),
        });
        self.seen_signatures.insert(canonical);
        self.sort_and_trim();

        Ok(true)
    }

    fn sort_and_trim(&mut self) {
        // stable sort: an equal-fitness newcomer never displaces an older entry
        self.entries
            .sort_by(|a, b| b.fitness.compare(&a.fitness));
        while self.entries.len() > self.max_size {
            if let Some(removed) = self.entries.pop() {
                self.seen_signatures.remove(&removed.canonical);
            }
        }
    }

    pub fn get_all(&self) -> &[EliteProgram] {
        &self.entries
    }

    pub fn best(&self) -> Option<&EliteProgram> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
