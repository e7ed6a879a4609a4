use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Multi-objective fitness with per-objective signed weights.
///
/// The weight sign encodes the optimization direction: positive weights
/// maximize the objective, negative weights minimize it. Two fitness values
/// compare by sign-adjusted lexicographic order over the weighted
/// objectives, so the first objective dominates and later ones break ties.
/// Weights are fixed per fitness class for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    values: Vec<f64>,
    weights: Vec<f64>,
}

impl Fitness {
    pub fn new(values: Vec<f64>, weights: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), weights.len());
        Self { values, weights }
    }

    /// Single-objective fitness with weight +1.
    pub fn maximizing(value: f64) -> Self {
        Self::new(vec![value], vec![1.0])
    }

    /// Single-objective fitness with weight -1.
    pub fn minimizing(value: f64) -> Self {
        Self::new(vec![value], vec![-1.0])
    }

    /// Raw objective values, unweighted.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn weighted(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().zip(&self.weights).map(|(v, w)| v * w)
    }

    /// Scalar summary (sum of weighted objectives), for reporting only.
    pub fn score(&self) -> f64 {
        self.weighted().sum()
    }

    /// Sign-adjusted lexicographic comparison over weighted objectives.
    pub fn compare(&self, other: &Fitness) -> Ordering {
        for (a, b) in self.weighted().zip(other.weighted()) {
            match a.partial_cmp(&b).unwrap_or(Ordering::Equal) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Fitness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

/// Grid cell kind. Compared by value, never by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Food,
}

/// Cardinal heading of the foraging agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub fn left(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    pub fn right(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// Row/column delta of one step, applied modulo the grid dimensions.
    pub fn step(self) -> (isize, isize) {
        match self {
            Heading::North => (-1, 0),
            Heading::East => (0, 1),
            Heading::South => (1, 0),
            Heading::West => (0, -1),
        }
    }
}
