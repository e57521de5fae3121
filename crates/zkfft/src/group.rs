//! Group-element transforms: the field network lifted to curve points.
//!
//! Entry addition is the curve group law on Jacobian points and the scalar
//! action is double-and-add by a scalar-field element. The point at infinity
//! is the additive identity throughout.

use core::fmt;

use ark_ec::short_weierstrass::{Projective, SWCurveConfig};
use ark_ec::Group;
use ark_ff::{BitIteratorBE, PrimeField, Zero};

use crate::coords::{PointBuffer, Repr};
use crate::entry::FftEntry;
use crate::error::Result;
use crate::roots::RootTable;
use crate::transform::{transform_in_place, Direction, TransformOptions};

/// Jacobian point used as a transform entry.
pub struct GroupEntry<P: SWCurveConfig>(pub Projective<P>);

impl<P: SWCurveConfig> Clone for GroupEntry<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: SWCurveConfig> Copy for GroupEntry<P> {}

impl<P: SWCurveConfig> fmt::Debug for GroupEntry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GroupEntry").field(&self.0).finish()
    }
}

impl<P: SWCurveConfig> PartialEq for GroupEntry<P> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<P: SWCurveConfig> Eq for GroupEntry<P> {}

/// `k · base` by MSB-first double-and-add.
#[must_use]
pub fn double_and_add<P: SWCurveConfig>(base: &Projective<P>, k: &P::ScalarField) -> Projective<P> {
    let mut acc = Projective::<P>::zero();
    for bit in BitIteratorBE::without_leading_zeros(k.into_bigint()) {
        acc.double_in_place();
        if bit {
            acc += base;
        }
    }
    acc
}

impl<P: SWCurveConfig> FftEntry<P::ScalarField> for GroupEntry<P> {
    #[inline]
    fn identity() -> Self {
        Self(Projective::zero())
    }

    #[inline]
    fn plus(&self, rhs: &Self) -> Self {
        Self(self.0 + rhs.0)
    }

    #[inline]
    fn minus(&self, rhs: &Self) -> Self {
        Self(self.0 - rhs.0)
    }

    #[inline]
    fn scale(&self, by: &P::ScalarField) -> Self {
        Self(double_and_add(&self.0, by))
    }
}

/// Validate (optionally), convert to Jacobian, transform, convert to `out`.
pub fn group_transform<P: SWCurveConfig>(
    roots: &RootTable<P::ScalarField>,
    points: PointBuffer<P>,
    direction: Direction,
    out: Repr,
    opts: TransformOptions,
    parallel: bool,
    validate: bool,
) -> Result<PointBuffer<P>> {
    if validate {
        points.validate()?;
    }
    let mut entries: Vec<GroupEntry<P>> =
        points.into_jacobian_vec().into_iter().map(GroupEntry).collect();
    transform_in_place(roots, &mut entries, direction, opts, parallel)?;
    let jac = entries.into_iter().map(|e| e.0).collect();
    Ok(PointBuffer::from_jacobian_vec(jac, out))
}
