use thiserror::Error;

use crate::rewrite::RewriteError;

/// Top-level error type for the edit pipeline.
///
/// The core transformations (generate, parse, score) are total and never
/// produce errors; everything here originates at the pipeline boundary or
/// in the external rewrite collaborator.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rewrite error: {0}")]
    Rewrite(#[from] RewriteError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
