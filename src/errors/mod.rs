//! Error types for the gridiron-stats service

pub mod types;

pub use types::{AppError, SourceError, WebError};

/// Convenience result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;
