//! Radix-2 FFT/IFFT over prime fields and short-Weierstrass curve groups.
//!
//! - [`FieldDomain`]: any arkworks prime field, plus its 2-adicity `s`.
//! - [`RootTable`]: lazily cached primitive `2^k`-th roots and inverses.
//! - `radix2`: iterative decimation-in-time butterflies after a bit-reversal.
//! - `extended`: four-step decomposition for lengths above the usable order.
//! - [`GroupEntry`] / [`PointBuffer`]: the same network over curve points,
//!   with affine or Jacobian buffers on either side.
//! - [`FftEngine`]: the public surface, backed by a [`ParallelExecutor`].
//!
//! ```no_run
//! use zkfft::{EngineConfig, FftEngine, Goldilocks};
//!
//! let engine = FftEngine::<Goldilocks>::new(EngineConfig::default())?;
//! let coeffs: Vec<Goldilocks> = (1..=8u64).map(Goldilocks::from).collect();
//! let evals = engine.forward_field(&coeffs)?;
//! assert_eq!(engine.inverse_field(&evals)?, coeffs);
//! engine.close();
//! # Ok::<(), zkfft::FftError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown
)]
#![allow(clippy::module_name_repetitions)]

pub mod bitrev;
pub mod config;
pub mod coords;
pub mod engine;
pub mod entry;
pub mod error;
pub mod executor;
pub mod field;
pub mod goldilocks;
pub mod group;
pub mod naive;
pub mod radix2;
pub mod roots;
pub mod transform;

mod extended; // four-step path; reached through `transform`

pub use config::EngineConfig;
pub use coords::{PointBuffer, Repr};
pub use engine::FftEngine;
pub use entry::FftEntry;
pub use error::{FftError, Result};
pub use executor::{ParallelExecutor, TaskHandle};
pub use field::FieldDomain;
pub use goldilocks::Goldilocks;
pub use group::GroupEntry;
pub use roots::RootTable;
pub use transform::{Direction, TransformOptions};
