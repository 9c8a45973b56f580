use thiserror::Error;

/// Failures surfaced by an engine behind the [`crate::engine::TreeEngine`] contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Engine construction failed: {0}")]
    Construct(String),

    #[error("Engine render failed: {0}")]
    Render(String),
}

/// Adapter-level errors. Missing data and missing engine instances are
/// documented no-op conditions, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Engine operation failed: {0}")]
    Engine(#[from] EngineError),

    #[error("View has already been mounted")]
    AlreadyMounted,

    #[error("Operation requires a mounted view")]
    NotMounted,

    #[error("View has been destroyed")]
    Destroyed,
}

pub type TreeResult<T> = Result<T, TreeError>;
