//! Error types for LAZYLOAD operations

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Boxed error type carried by a failing computation.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure raised by a registered computation.
///
/// The wrapper is transparent: its `Display` and `source()` are those of the
/// error the computation produced, and the original can be recovered with
/// [`ComputationError::downcast_ref`] or [`ComputationError::into_inner`].
#[derive(Debug)]
pub struct ComputationError(BoxError);

impl ComputationError {
    /// Wrap any error (or a plain message) produced by a computation.
    pub fn new(err: impl Into<BoxError>) -> Self {
        Self(err.into())
    }

    /// Borrow the original error as a concrete type.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Unwrap into the original boxed error.
    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

impl fmt::Display for ComputationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for ComputationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all LAZYLOAD errors.
#[derive(Debug, Error)]
pub enum LazyError {
    #[error("LazyLoader: uninitialized value requested: {key}")]
    NotRegistered { key: String },

    #[error("LazyLoader: unknown method {name}()")]
    UnknownOperation { name: String },

    #[error("LazyLoader: {name}() expects {expected}")]
    InvalidArguments { name: String, expected: String },

    #[error(transparent)]
    Computation(#[from] ComputationError),

    #[error("LazyLoader: cannot fingerprint arguments for {key}: {reason}")]
    Fingerprint { key: String, reason: String },

    #[error("LazyLoader: cannot decode value of {key}: {reason}")]
    Decode { key: String, reason: String },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl LazyError {
    /// Whether this error was raised by the stored computation itself.
    pub fn is_computation(&self) -> bool {
        matches!(self, LazyError::Computation(_))
    }
}

/// Result type alias for LAZYLOAD operations.
pub type LazyResult<T> = Result<T, LazyError>;

// =============================================================================
// TESTS
// =============================================================================
