//! In-place radix-2 Cooley–Tukey transform over any [`FftEntry`].
//!
//! The forward transform maps coefficients → evaluations over the `2^k`
//! subgroup, the inverse maps evaluations → coefficients. Both run the same
//! decimation-in-time network (bit-reverse, then `k` butterfly stages); the
//! inverse reads inverse twiddles and finishes with a `n^-1` scaling.
//!
//! Twiddles are built once per call from the shared [`RootTable`]: stage `s`
//! of half-width `h` reads the flat `n/2` table with stride `n / 2h`.

use rayon::prelude::*;

use crate::bitrev::bit_reverse_permute;
use crate::entry::{scale_all, FftEntry};
use crate::error::{FftError, Result};
use crate::field::inverse_of_len;
use crate::roots::RootTable;
use crate::transform::{log2_len, Direction};
use crate::FieldDomain;

/// Below this half-width a single butterfly block is not split across threads.
const PAR_BLOCK_MIN: usize = 1 << 10;

#[inline]
fn butterfly<F: FieldDomain, E: FftEntry<F>>(i: usize, u: &mut E, v: &mut E, tw: &[F], stride: usize) {
    // DIT butterfly: (u, v) -> (u + w*v, u - w*v); w = 1 for i = 0.
    let t = if i == 0 { *v } else { v.scale(&tw[i * stride]) };
    let lo = u.plus(&t);
    let hi = u.minus(&t);
    *u = lo;
    *v = hi;
}

fn butterfly_block<F: FieldDomain, E: FftEntry<F>>(
    block: &mut [E],
    half: usize,
    tw: &[F],
    stride: usize,
    parallel: bool,
) {
    let (lo, hi) = block.split_at_mut(half);
    if parallel && half >= PAR_BLOCK_MIN {
        lo.par_iter_mut()
            .zip(hi.par_iter_mut())
            .enumerate()
            .for_each(|(i, (u, v))| butterfly(i, u, v, tw, stride));
    } else {
        lo.iter_mut()
            .zip(hi.iter_mut())
            .enumerate()
            .for_each(|(i, (u, v))| butterfly(i, u, v, tw, stride));
    }
}

/// Unscaled network: bit-reverse `a`, then run every butterfly stage.
///
/// `twiddles` must be the `a.len() / 2` powers of the root of order `a.len()`
/// (see [`RootTable::twiddles`]).
pub(crate) fn butterfly_network<F: FieldDomain, E: FftEntry<F>>(
    a: &mut [E],
    twiddles: &[F],
    parallel: bool,
) {
    let n = a.len();
    if n <= 1 {
        return;
    }
    debug_assert!(n.is_power_of_two(), "network size must be a power of two");
    debug_assert_eq!(twiddles.len(), n / 2);

    bit_reverse_permute(a);

    let mut half = 1usize;
    while half < n {
        let len = half << 1;
        let stride = n / len;
        if parallel {
            a.par_chunks_mut(len)
                .for_each(|block| butterfly_block(block, half, twiddles, stride, true));
        } else {
            a.chunks_mut(len)
                .for_each(|block| butterfly_block(block, half, twiddles, stride, false));
        }
        half = len;
    }
}

/// Unscaled network sized from the root table; `log2(a.len())` must not exceed `s`.
pub(crate) fn network<F: FieldDomain, E: FftEntry<F>>(
    roots: &RootTable<F>,
    a: &mut [E],
    direction: Direction,
    parallel: bool,
) -> Result<()> {
    let log_n = log2_len(a.len())?;
    let twiddles = roots.twiddles(log_n, direction)?;
    butterfly_network(a, &twiddles, parallel);
    Ok(())
}

/// Standard-path transform in place, single-threaded.
///
/// Fails with [`FftError::InvalidLength`] for a zero or non-power-of-two
/// length and with [`FftError::UnsupportedOrder`] when `log2(n) > s`.
pub fn radix2_in_place<F: FieldDomain, E: FftEntry<F>>(
    roots: &RootTable<F>,
    a: &mut [E],
    direction: Direction,
) -> Result<()> {
    let log_n = log2_len(a.len())?;
    if log_n > roots.max_order() {
        return Err(FftError::UnsupportedOrder {
            required: log_n,
            available: roots.max_order(),
        });
    }
    network(roots, a, direction, false)?;
    if direction == Direction::Inverse {
        scale_all(a, inverse_of_len::<F>(a.len())?, false);
    }
    Ok(())
}
