//! Convenience result type alias for Vectra.

use crate::error::AppError;

/// A specialized `Result` type for Vectra operations.
pub type AppResult<T> = Result<T, AppError>;
