//! Error kinds raised by the estimation engine.

use thiserror::Error;

/// Errors raised synchronously at construction or invocation.
///
/// A simulation in which no sample survives the validity filter is not an
/// error; it reports an undefined mean recovery instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The control points do not form a usable recovery curve.
    #[error("invalid control curve: {0}")]
    InvalidCurve(String),
    /// Distribution, sweep, or scenario parameters are outside their valid domain.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
