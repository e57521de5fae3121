//! Direct **O(n²)** DFT, used as an oracle for the fast paths.

use crate::entry::FftEntry;
use crate::error::Result;
use crate::field::inverse_of_len;
use crate::FieldDomain;

/// `y_k = Σ_j a_j · ω^(j·k)`.
#[must_use]
pub fn dft<F: FieldDomain, E: FftEntry<F>>(a: &[E], omega: F) -> Vec<E> {
    let n = a.len();
    let mut out = Vec::with_capacity(n);
    let mut w_k = F::one(); // ω^k
    for _ in 0..n {
        let mut acc = E::identity();
        let mut w = F::one(); // ω^(j·k)
        for x in a {
            acc = acc.plus(&x.scale(&w));
            w *= w_k;
        }
        out.push(acc);
        w_k *= omega;
    }
    out
}

/// `a_j = n^-1 · Σ_k y_k · ω^(-j·k)`.
///
/// Fails with [`crate::FftError::DivisionByZero`] if `ω` or `n` is zero in the field.
pub fn idft<F: FieldDomain, E: FftEntry<F>>(y: &[E], omega: F) -> Result<Vec<E>> {
    if y.is_empty() {
        return Ok(Vec::new());
    }
    let inv_n = inverse_of_len::<F>(y.len())?;
    let omega_inv = omega.try_inverse()?;
    Ok(dft(y, omega_inv)
        .into_iter()
        .map(|x| x.scale(&inv_n))
        .collect())
}
