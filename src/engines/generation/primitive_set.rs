use crate::error::{EvotrailError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Index of a primitive within the [`PrimitiveSet`] that issued it. Ids are
/// only meaningful for the set that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimitiveId(usize);

impl PrimitiveId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Function,
    Terminal,
}

/// A named operation of fixed arity usable as a tree node. Arity never
/// changes after registration; terminals always have arity 0.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub name: String,
    pub arity: usize,
    pub kind: PrimitiveKind,
}

/// The closed vocabulary all program trees are built from. Populated during
/// setup, then shared read-only for the rest of the run.
#[derive(Debug, Default)]
pub struct PrimitiveSet {
    primitives: Vec<Primitive>,
    by_name: HashMap<String, PrimitiveId>,
    functions: Vec<PrimitiveId>,
    terminals: Vec<PrimitiveId>,
}

impl PrimitiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, name: &str, arity: usize) -> Result<PrimitiveId> {
        if arity == 0 {
            return Err(EvotrailError::Configuration(format!(
                "Function {} must take at least one argument",
                name
            )));
        }
        self.insert(name, arity, PrimitiveKind::Function)
    }

    pub fn add_terminal(&mut self, name: &str) -> Result<PrimitiveId> {
        self.insert(name, 0, PrimitiveKind::Terminal)
    }

    fn insert(&mut self, name: &str, arity: usize, kind: PrimitiveKind) -> Result<PrimitiveId> {
        if self.by_name.contains_key(name) {
            return Err(EvotrailError::DuplicatePrimitive(name.to_string()));
        }
        let id = PrimitiveId(self.primitives.len());
        self.primitives.push(Primitive {
            name: name.to_string(),
            arity,
            kind,
        });
        self.by_name.insert(name.to_string(), id);
        match kind {
            PrimitiveKind::Function => self.functions.push(id),
            PrimitiveKind::Terminal => self.terminals.push(id),
        }
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Result<&Primitive> {
        self.id_of(name).map(|id| self.get(id))
    }

    pub fn id_of(&self, name: &str) -> Result<PrimitiveId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| EvotrailError::UnknownPrimitive(name.to_string()))
    }

    pub fn get(&self, id: PrimitiveId) -> &Primitive {
        &self.primitives[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> {
        self.primitives
            .iter()
            .enumerate()
            .map(|(index, primitive)| (PrimitiveId(index), primitive))
    }

    pub fn functions(&self) -> &[PrimitiveId] {
        &self.functions
    }

    pub fn terminals(&self) -> &[PrimitiveId] {
        &self.terminals
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
