//! Path selection between the standard and the extended transform.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::{scale_all, scale_by_powers, FftEntry};
use crate::error::{FftError, Result};
use crate::field::inverse_of_len;
use crate::roots::RootTable;
use crate::{extended, radix2, FieldDomain};

/// Transform direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Coefficients → evaluations.
    Forward,
    /// Evaluations → coefficients (scaled by `n^-1`).
    Inverse,
}

impl Direction {
    /// The opposite direction.
    #[inline]
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Forward => Self::Inverse,
            Self::Inverse => Self::Forward,
        }
    }
}

/// Per-call knobs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Largest root order (log2) the standard path may use; `None` = field `s`.
    ///
    /// Lengths above it go through the extended decomposition. Values above
    /// `s` are clamped to `s`.
    pub max_order: Option<u32>,
}

impl TransformOptions {
    /// Restrict the usable order to `k`.
    #[must_use]
    pub const fn with_max_order(k: u32) -> Self {
        Self { max_order: Some(k) }
    }

    /// The usable order for field `F`.
    #[must_use]
    pub fn usable_order<F: FieldDomain>(&self) -> u32 {
        let s = F::two_adicity();
        self.max_order.map_or(s, |k| k.min(s))
    }
}

/// `log2(n)` for a non-zero power of two, else [`FftError::InvalidLength`].
pub fn log2_len(n: usize) -> Result<u32> {
    if n == 0 || !n.is_power_of_two() {
        return Err(FftError::InvalidLength { len: n });
    }
    Ok(n.trailing_zeros())
}

/// Transform `a` in place, choosing the standard or extended path.
///
/// With `parallel` set the caller must already be inside the worker pool
/// (rayon uses whichever pool it is running on).
pub fn transform_in_place<F: FieldDomain, E: FftEntry<F>>(
    roots: &RootTable<F>,
    a: &mut [E],
    direction: Direction,
    opts: TransformOptions,
    parallel: bool,
) -> Result<()> {
    let n = a.len();
    let log_n = log2_len(n)?;
    if log_n == 0 {
        return Ok(());
    }

    let usable = opts.usable_order::<F>();
    if log_n <= usable {
        debug!(n, ?direction, parallel, path = "radix2", "transform");
        radix2::network(roots, a, direction, parallel)?;
    } else {
        debug!(n, ?direction, parallel, usable, path = "extended", "transform");
        extended::network(roots, a, direction, usable, parallel)?;
    }

    if direction == Direction::Inverse {
        scale_all(a, inverse_of_len::<F>(n)?, parallel);
    }
    Ok(())
}

/// Evaluate on the coset `shift·H`: scale entry `j` by `shift^j`, then forward.
pub fn coset_forward_in_place<F: FieldDomain, E: FftEntry<F>>(
    roots: &RootTable<F>,
    a: &mut [E],
    shift: F,
    opts: TransformOptions,
    parallel: bool,
) -> Result<()> {
    log2_len(a.len())?;
    if shift.is_zero() {
        return Err(FftError::DivisionByZero);
    }
    scale_by_powers(a, shift, parallel);
    transform_in_place(roots, a, Direction::Forward, opts, parallel)
}

/// Inverse of [`coset_forward_in_place`].
pub fn coset_inverse_in_place<F: FieldDomain, E: FftEntry<F>>(
    roots: &RootTable<F>,
    a: &mut [E],
    shift: F,
    opts: TransformOptions,
    parallel: bool,
) -> Result<()> {
    let shift_inv = shift.try_inverse()?;
    transform_in_place(roots, a, Direction::Inverse, opts, parallel)?;
    scale_by_powers(a, shift_inv, parallel);
    Ok(())
}
