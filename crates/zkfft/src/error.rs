//! Error kinds surfaced by every transform, conversion and pool operation.

use thiserror::Error;

/// Errors produced by the FFT engine.
///
/// All failures are deterministic for a given input except [`FftError::EngineClosed`]
/// and [`FftError::TaskAborted`], which depend on the pool lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FftError {
    /// Buffer length is zero or not a power of two.
    #[error("invalid transform length {len}: must be a non-zero power of two")]
    InvalidLength {
        /// Offending buffer length.
        len: usize,
    },
    /// The requested root-of-unity order cannot be reached in this field.
    #[error("unsupported order 2^{required}: at most 2^{available} is reachable")]
    UnsupportedOrder {
        /// log2 of the requested order.
        required: u32,
        /// log2 of the largest order available to the call.
        available: u32,
    },
    /// Inversion of the additive identity.
    #[error("division by zero")]
    DivisionByZero,
    /// A supplied point does not satisfy the curve equation.
    #[error("point at index {index} is not on the curve")]
    MalformedPoint {
        /// Position of the point in the input buffer.
        index: usize,
    },
    /// The engine's execution pool has been shut down.
    #[error("engine closed")]
    EngineClosed,
    /// Byte input is not the canonical encoding of a field element.
    #[error("non-canonical field encoding (expected {expected} bytes < modulus, got {got} bytes)")]
    NonCanonicalEncoding {
        /// Required encoding width in bytes.
        expected: usize,
        /// Width of the supplied input in bytes.
        got: usize,
    },
    /// The worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    PoolStartup(String),
    /// A pool task dropped its result channel without answering.
    #[error("transform task aborted before producing a result")]
    TaskAborted,
}

/// Crate-wide result alias.
pub type Result<T, E = FftError> = core::result::Result<T, E>;
