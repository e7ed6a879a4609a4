use super::generator::{self, GrowthPolicy};
use super::individual::Individual;
use super::primitive_set::PrimitiveSet;
use super::program::ProgramTree;
use crate::error::{EvotrailError, Result};
use crate::types::Fitness;
use rand::Rng;
use std::cmp::Ordering;

/// Subtree crossover: pick one node uniformly in a copy of each parent and
/// swap the subtrees rooted there. Whole subtrees are arity-self-contained,
/// so the child-count invariant survives the exchange. No depth limit is
/// applied here; unbounded growth across generations is the caller's
/// problem to cap.
pub fn crossover<R: Rng>(
    parent_a: &ProgramTree,
    parent_b: &ProgramTree,
    rng: &mut R,
) -> Result<(ProgramTree, ProgramTree)> {
    let size_a = parent_a.size();
    let size_b = parent_b.size();
    if size_a == 0 || size_b == 0 {
        return Err(EvotrailError::EmptyTree);
    }

    let mut child_a = parent_a.clone();
    let mut child_b = parent_b.clone();
    let index_a = rng.gen_range(0..size_a);
    let index_b = rng.gen_range(0..size_b);

    let slot_a = child_a.node_mut(index_a).ok_or(EvotrailError::EmptyTree)?;
    let slot_b = child_b.node_mut(index_b).ok_or(EvotrailError::EmptyTree)?;
    std::mem::swap(slot_a, slot_b);

    Ok((child_a, child_b))
}

/// Subtree mutation: replace one uniformly chosen subtree in a copy of the
/// parent with a freshly generated one. The parent itself is left
/// untouched.
pub fn subtree_mutation<R: Rng>(
    parent: &ProgramTree,
    set: &PrimitiveSet,
    policy: GrowthPolicy,
    min_depth: usize,
    max_depth: usize,
    rng: &mut R,
) -> Result<ProgramTree> {
    let size = parent.size();
    if size == 0 {
        return Err(EvotrailError::EmptyTree);
    }

    let mut child = parent.clone();
    let index = rng.gen_range(0..size);
    let replacement = generator::generate(set, policy, min_depth, max_depth, rng)?;
    child
        .replace_subtree(index, replacement.root)
        .ok_or(EvotrailError::EmptyTree)?;
    Ok(child)
}

/// Tournament selection: best of `tournament_size` uniform samples drawn
/// with replacement; ties go to the first candidate drawn.
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> Result<&'a Individual> {
    if population.is_empty() {
        return Err(EvotrailError::Configuration(
            "Cannot select from an empty population".to_string(),
        ));
    }

    let mut best = &population[rng.gen_range(0..population.len())];
    let mut best_fitness = require_fitness(best)?;

    for _ in 1..tournament_size {
        let candidate = &population[rng.gen_range(0..population.len())];
        let fitness = require_fitness(candidate)?;
        if fitness.compare(best_fitness) == Ordering::Greater {
            best = candidate;
            best_fitness = fitness;
        }
    }

    Ok(best)
}

/// Repeat tournament selection `k` times, yielding an ordered sequence of
/// parent clones.
pub fn select_tournament<R: Rng>(
    population: &[Individual],
    k: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Result<Vec<Individual>> {
    (0..k)
        .map(|_| tournament_selection(population, tournament_size, rng).map(Individual::clone))
        .collect()
}

fn require_fitness(individual: &Individual) -> Result<&Fitness> {
    individual.fitness.as_ref().ok_or_else(|| {
        EvotrailError::MissingFitness("selection sampled an unevaluated individual".to_string())
    })
}
