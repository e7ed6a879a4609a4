use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvotrailError {
    #[error("Unknown primitive: {0}")]
    UnknownPrimitive(String),

    #[error("Duplicate primitive: {0}")]
    DuplicatePrimitive(String),

    #[error("Unusable primitive set: {0}")]
    EmptyPrimitiveSet(String),

    #[error("Operator applied to a tree with no nodes")]
    EmptyTree,

    #[error("Missing fitness: {0}")]
    MissingFitness(String),

    #[error("Malformed grid: {0}")]
    MalformedGrid(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EvotrailError>;
