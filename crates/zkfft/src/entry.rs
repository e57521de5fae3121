//! The "vector entry" algebra every transform is written against.
//!
//! A transform only needs an additive group with an action of the scalar
//! field. Field elements act on themselves by multiplication; curve points
//! (see [`crate::group::GroupEntry`]) act by double-and-add.

use rayon::prelude::*;

use crate::FieldDomain;

/// Additive module over the scalar field `F`.
pub trait FftEntry<F: FieldDomain>: Copy + Send + Sync + 'static {
    /// Additive identity.
    fn identity() -> Self;

    /// `self + rhs`.
    fn plus(&self, rhs: &Self) -> Self;

    /// `self - rhs`.
    fn minus(&self, rhs: &Self) -> Self;

    /// `by * self`.
    fn scale(&self, by: &F) -> Self;
}

impl<F: FieldDomain> FftEntry<F> for F {
    #[inline]
    fn identity() -> Self {
        F::zero()
    }

    #[inline]
    fn plus(&self, rhs: &Self) -> Self {
        *self + rhs
    }

    #[inline]
    fn minus(&self, rhs: &Self) -> Self {
        *self - rhs
    }

    #[inline]
    fn scale(&self, by: &F) -> Self {
        *self * by
    }
}

/// Multiply every entry by `by` in place; `by == 1` is skipped.
pub(crate) fn scale_all<F: FieldDomain, E: FftEntry<F>>(a: &mut [E], by: F, parallel: bool) {
    if by.is_one() {
        return;
    }
    if parallel {
        a.par_iter_mut().for_each(|x| *x = x.scale(&by));
    } else {
        a.iter_mut().for_each(|x| *x = x.scale(&by));
    }
}

/// Multiply entry `j` by `base^j` in place.
pub(crate) fn scale_by_powers<F: FieldDomain, E: FftEntry<F>>(
    a: &mut [E],
    base: F,
    parallel: bool,
) {
    let mut pows = Vec::with_capacity(a.len());
    let mut cur = F::one();
    for _ in 0..a.len() {
        pows.push(cur);
        cur *= base;
    }
    let op = |(x, p): (&mut E, &F)| {
        if !p.is_one() {
            *x = x.scale(p);
        }
    };
    if parallel {
        a.par_iter_mut().zip(pows.par_iter()).for_each(op);
    } else {
        a.iter_mut().zip(pows.iter()).for_each(op);
    }
}
