//! Convenience result type alias for SecureDocs.

use crate::error::AppError;

/// A specialized `Result` type for SecureDocs operations.
pub type AppResult<T> = Result<T, AppError>;
