use reflow_surface::SurfaceError;
use thiserror::Error;

/// Boxed error returned by a failed mutation.
pub type MutationError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("a reconciliation is already in flight")]
    Busy,

    #[error("mutation failed: {0}")]
    Mutation(MutationError),

    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),
}

pub type ReconcileResult<T> = Result<T, ReconcileError>;
