//! Four-step decomposition for lengths above the usable root order.
//!
//! With `N = N1·N2`, `N1 = 2^usable`, input index `n = N2·n1 + n2` and output
//! index `k = k1 + N1·k2`:
//!
//! ```text
//! X[k1 + N1·k2] = Σ_n2 w_N2^(n2·k2) · ( w_N^(n2·k1) · Σ_n1 x[N2·n1 + n2] · w_N1^(n1·k1) )
//! ```
//!
//! 1. `N2` inner transforms of length `N1` over the stride-`N2` columns,
//! 2. twiddle by `w_N^(n2·k1)`,
//! 3. `N1` outer transforms of length `N2` (recursing while `N2 > 2^usable`),
//! 4. transposed write-back.
//!
//! All roots are powers of the canonical `w_N` from the [`RootTable`], so the
//! output is identical to the direct radix-2 network of length `N`. The
//! network is unscaled; the caller applies `N^-1` once for inverses.

use rayon::prelude::*;
use tracing::trace;

use crate::entry::{scale_by_powers, FftEntry};
use crate::error::{FftError, Result};
use crate::radix2::butterfly_network;
use crate::roots::RootTable;
use crate::transform::{log2_len, Direction};
use crate::{radix2, FieldDomain};

/// Unscaled transform of `a` using only sub-networks of order `<= usable`.
///
/// Fails with [`FftError::UnsupportedOrder`] when the field has no root of
/// order `a.len()` or when `usable == 0` for `a.len() > 1`.
pub(crate) fn network<F: FieldDomain, E: FftEntry<F>>(
    roots: &RootTable<F>,
    a: &mut [E],
    direction: Direction,
    usable: u32,
    parallel: bool,
) -> Result<()> {
    let n = a.len();
    let log_n = log2_len(n)?;
    if log_n <= usable {
        return radix2::network(roots, a, direction, parallel);
    }
    if usable == 0 {
        return Err(FftError::UnsupportedOrder {
            required: log_n,
            available: 0,
        });
    }

    // Twiddle root of the full order; errors if the field has none.
    let w_n = roots.root(log_n, direction)?;
    let n1 = 1usize << usable;
    let n2 = n >> usable;
    let inner_tw = roots.twiddles(usable, direction)?;
    trace!(n, n1, n2, ?direction, "four-step decomposition");

    // Steps 1 + 2: column `n2` holds x[N2·n1 + n2] for n1 in 0..N1.
    let mut cols: Vec<Vec<E>> = (0..n2)
        .map(|c| (0..n1).map(|r| a[r * n2 + c]).collect())
        .collect();
    let inner = |(c, col): (usize, &mut Vec<E>)| {
        butterfly_network(col.as_mut_slice(), &inner_tw, false);
        scale_by_powers(col.as_mut_slice(), w_n.pow([c as u64]), false);
    };
    if parallel {
        cols.par_iter_mut().enumerate().for_each(inner);
    } else {
        cols.iter_mut().enumerate().for_each(inner);
    }

    // Step 3: row `k1` gathers Y[n2][k1] across columns.
    let mut rows: Vec<Vec<E>> = (0..n1)
        .map(|k1| cols.iter().map(|col| col[k1]).collect())
        .collect();
    drop(cols);
    if parallel {
        rows.par_iter_mut()
            .try_for_each(|row| network(roots, row, direction, usable, false))?;
    } else {
        rows.iter_mut()
            .try_for_each(|row| network(roots, row, direction, usable, false))?;
    }

    // Step 4.
    for (k1, row) in rows.iter().enumerate() {
        for (k2, x) in row.iter().enumerate() {
            a[k1 + n1 * k2] = *x;
        }
    }
    Ok(())
}
