use super::primitive_set::{PrimitiveId, PrimitiveSet};
use super::program::{ProgramNode, ProgramTree};
use crate::error::{EvotrailError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Expansion policy for randomly generated program trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthPolicy {
    /// Draw a target height uniformly from `[min_depth, max_depth]`, then
    /// expand every branch with functions to exactly that height and end it
    /// with a terminal.
    Full,
    /// Choose uniformly among functions and terminals at each node; only
    /// functions below `min_depth`, only terminals at `max_depth`.
    Grow,
}

/// Build a random tree under the given depth bounds. Every path reaches a
/// terminal by `max_depth` and every node gets exactly `arity` children.
pub fn generate<R: Rng>(
    set: &PrimitiveSet,
    policy: GrowthPolicy,
    min_depth: usize,
    max_depth: usize,
    rng: &mut R,
) -> Result<ProgramTree> {
    if max_depth < min_depth {
        return Err(EvotrailError::Configuration(format!(
            "Max depth {} is below min depth {}",
            max_depth, min_depth
        )));
    }
    if set.terminals().is_empty() {
        return Err(EvotrailError::EmptyPrimitiveSet(
            "no terminals registered, generation could never terminate".to_string(),
        ));
    }

    let root = match policy {
        GrowthPolicy::Full => {
            let height = rng.gen_range(min_depth..=max_depth);
            expand_full(set, height, rng)?
        }
        GrowthPolicy::Grow => expand_grow(set, 0, min_depth, max_depth, rng)?,
    };
    Ok(ProgramTree::new(root))
}

fn expand_full<R: Rng>(set: &PrimitiveSet, remaining: usize, rng: &mut R) -> Result<ProgramNode> {
    if remaining == 0 {
        return Ok(ProgramNode::leaf(pick(set.terminals(), rng)));
    }
    let id = pick_function(set, rng)?;
    let arity = set.get(id).arity;
    let mut children = Vec::with_capacity(arity);
    for _ in 0..arity {
        children.push(expand_full(set, remaining - 1, rng)?);
    }
    Ok(ProgramNode::new(id, children))
}

fn expand_grow<R: Rng>(
    set: &PrimitiveSet,
    depth: usize,
    min_depth: usize,
    max_depth: usize,
    rng: &mut R,
) -> Result<ProgramNode> {
    let id = if depth >= max_depth {
        pick(set.terminals(), rng)
    } else if depth < min_depth {
        pick_function(set, rng)?
    } else {
        let functions = set.functions().len();
        let choice = rng.gen_range(0..functions + set.terminals().len());
        if choice < functions {
            set.functions()[choice]
        } else {
            set.terminals()[choice - functions]
        }
    };

    let arity = set.get(id).arity;
    let mut children = Vec::with_capacity(arity);
    for _ in 0..arity {
        children.push(expand_grow(set, depth + 1, min_depth, max_depth, rng)?);
    }
    Ok(ProgramNode::new(id, children))
}

fn pick<R: Rng>(ids: &[PrimitiveId], rng: &mut R) -> PrimitiveId {
    ids[rng.gen_range(0..ids.len())]
}

fn pick_function<R: Rng>(set: &PrimitiveSet, rng: &mut R) -> Result<PrimitiveId> {
    if set.functions().is_empty() {
        return Err(EvotrailError::EmptyPrimitiveSet(
            "no functions registered but one is required at this depth".to_string(),
        ));
    }
    Ok(pick(set.functions(), rng))
}
