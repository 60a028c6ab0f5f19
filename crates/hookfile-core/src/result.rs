//! Convenience result type alias for hookfile.

use crate::error::AppError;

/// A specialized `Result` type for hookfile operations.
pub type AppResult<T> = Result<T, AppError>;
