//! Point representations on ingress/egress of group transforms.
//!
//! - **Affine** `(x, y, infinity)`.
//! - **Jacobian** `(X, Y, Z)` with `x = X/Z²`, `y = Y/Z³`; `Z = 0` is the
//!   point at infinity. This is arkworks' short-Weierstrass `Projective`.
//!
//! Jacobian → affine costs one inversion per point; buffers go through
//! [`batch_to_affine`], which shares a single inversion across the batch.

use core::fmt;

use ark_ec::short_weierstrass::{Affine, Projective, SWCurveConfig};
use ark_ec::CurveGroup;
use ark_ff::{Field, One, Zero};
use serde::{Deserialize, Serialize};

use crate::error::{FftError, Result};

/// Point representation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repr {
    /// Two coordinates plus an infinity flag.
    Affine,
    /// Three coordinates sharing a scale factor.
    Jacobian,
}

/// Affine → Jacobian (`Z = 1`). Infinity stays infinity.
#[must_use]
pub fn to_jacobian<P: SWCurveConfig>(p: &Affine<P>) -> Projective<P> {
    if p.infinity {
        return Projective::zero();
    }
    Projective::new_unchecked(p.x, p.y, P::BaseField::one())
}

/// Jacobian → affine with one inversion.
///
/// Infinity maps to the affine identity. The [`FftError::DivisionByZero`]
/// arm is unreachable for `Z != 0` but kept so no inversion is unchecked.
pub fn to_affine<P: SWCurveConfig>(p: &Projective<P>) -> Result<Affine<P>> {
    if p.z.is_zero() {
        return Ok(Affine::identity());
    }
    let z_inv = p.z.inverse().ok_or(FftError::DivisionByZero)?;
    let z_inv2 = z_inv.square();
    Ok(Affine::new_unchecked(p.x * z_inv2, p.y * z_inv2 * z_inv))
}

/// Jacobian → affine for a whole buffer with a shared (Montgomery-trick) inversion.
#[must_use]
pub fn batch_to_affine<P: SWCurveConfig>(ps: &[Projective<P>]) -> Vec<Affine<P>> {
    Projective::normalize_batch(ps)
}

/// Curve equation in Jacobian form: `Y² = X³ + a·X·Z⁴ + b·Z⁶`.
#[must_use]
pub fn jacobian_is_on_curve<P: SWCurveConfig>(p: &Projective<P>) -> bool {
    if p.z.is_zero() {
        return true;
    }
    let z2 = p.z.square();
    let z4 = z2.square();
    let z6 = z4 * z2;
    let rhs = p.x.square() * p.x + P::COEFF_A * p.x * z4 + P::COEFF_B * z6;
    p.y.square() == rhs
}

/// An input or output buffer of points; the variant is its representation.
pub enum PointBuffer<P: SWCurveConfig> {
    /// Affine points.
    Affine(Vec<Affine<P>>),
    /// Jacobian points.
    Jacobian(Vec<Projective<P>>),
}

impl<P: SWCurveConfig> PointBuffer<P> {
    /// Representation of the stored points.
    #[must_use]
    pub const fn repr(&self) -> Repr {
        match self {
            Self::Affine(_) => Repr::Affine,
            Self::Jacobian(_) => Repr::Jacobian,
        }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Affine(v) => v.len(),
            Self::Jacobian(v) => v.len(),
        }
    }

    /// Whether the buffer holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail with [`FftError::MalformedPoint`] at the first off-curve point.
    pub fn validate(&self) -> Result<()> {
        let bad = match self {
            Self::Affine(v) => v.iter().position(|p| !p.infinity && !p.is_on_curve()),
            Self::Jacobian(v) => v.iter().position(|p| !jacobian_is_on_curve(p)),
        };
        match bad {
            Some(index) => Err(FftError::MalformedPoint { index }),
            None => Ok(()),
        }
    }

    /// Jacobian copies of every point.
    #[must_use]
    pub fn to_jacobian_vec(&self) -> Vec<Projective<P>> {
        match self {
            Self::Affine(v) => v.iter().map(to_jacobian).collect(),
            Self::Jacobian(v) => v.clone(),
        }
    }

    /// Consume into Jacobian points.
    #[must_use]
    pub fn into_jacobian_vec(self) -> Vec<Projective<P>> {
        match self {
            Self::Affine(v) => v.iter().map(to_jacobian).collect(),
            Self::Jacobian(v) => v,
        }
    }

    /// Build a buffer in `repr` from Jacobian points.
    #[must_use]
    pub fn from_jacobian_vec(points: Vec<Projective<P>>, repr: Repr) -> Self {
        match repr {
            Repr::Affine => Self::Affine(batch_to_affine(&points)),
            Repr::Jacobian => Self::Jacobian(points),
        }
    }

    /// Convert to `repr` (no-op when already there).
    #[must_use]
    pub fn into_repr(self, repr: Repr) -> Self {
        if self.repr() == repr {
            return self;
        }
        let points = self.into_jacobian_vec();
        Self::from_jacobian_vec(points, repr)
    }
}

impl<P: SWCurveConfig> Clone for PointBuffer<P> {
    fn clone(&self) -> Self {
        match self {
            Self::Affine(v) => Self::Affine(v.clone()),
            Self::Jacobian(v) => Self::Jacobian(v.clone()),
        }
    }
}

impl<P: SWCurveConfig> fmt::Debug for PointBuffer<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Affine(v) => f.debug_tuple("Affine").field(v).finish(),
            Self::Jacobian(v) => f.debug_tuple("Jacobian").field(v).finish(),
        }
    }
}

/// Group equality, independent of representation and Jacobian scale.
impl<P: SWCurveConfig> PartialEq for PointBuffer<P> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.to_jacobian_vec() == other.to_jacobian_vec()
    }
}

impl<P: SWCurveConfig> Eq for PointBuffer<P> {}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{g1::Config, Fr, G1Affine, G1Projective};
    use ark_ec::Group;

    fn sample(n: u64) -> Vec<G1Projective> {
        let g = G1Projective::generator();
        (0..n).map(|i| g * Fr::from(i * 7 + 1)).collect()
    }

    #[test]
    fn affine_roundtrip_preserves_points() {
        for p in sample(8) {
            let a = to_affine(&p).unwrap();
            assert_eq!(a, p.into_affine());
            assert_eq!(to_jacobian(&a), p);
        }
    }

    #[test]
    fn infinity_is_preserved() {
        let inf = G1Projective::zero();
        let a = to_affine(&inf).unwrap();
        assert!(a.infinity);
        assert!(to_jacobian(&a).is_zero());
        assert!(jacobian_is_on_curve(&inf));
    }

    #[test]
    fn batch_matches_single() {
        let mut pts = sample(6);
        pts.push(G1Projective::zero());
        let batch = batch_to_affine(&pts);
        for (p, a) in pts.iter().zip(&batch) {
            assert_eq!(to_affine(p).unwrap(), *a);
        }
    }

    #[test]
    fn rescaled_jacobian_stays_on_curve() {
        let p = sample(2)[1];
        let l = <Config as ark_ec::CurveConfig>::BaseField::from(5u64);
        let scaled = Projective::<Config>::new_unchecked(
            p.x * l.square(),
            p.y * l.square() * l,
            p.z * l,
        );
        assert!(jacobian_is_on_curve(&scaled));
        assert_eq!(scaled, p);
    }

    #[test]
    fn off_curve_points_are_reported_with_index() {
        let mut affine: Vec<G1Affine> = sample(4).iter().map(|p| p.into_affine()).collect();
        affine[2] = G1Affine::new_unchecked(affine[2].x, affine[2].y + affine[2].y);
        assert_eq!(
            PointBuffer::Affine(affine).validate(),
            Err(FftError::MalformedPoint { index: 2 })
        );

        let mut jac = sample(4);
        jac[3].y.double_in_place();
        assert_eq!(
            PointBuffer::<Config>::Jacobian(jac).validate(),
            Err(FftError::MalformedPoint { index: 3 })
        );
    }

    #[test]
    fn buffer_equality_ignores_representation() {
        let jac = PointBuffer::<Config>::Jacobian(sample(4));
        let aff = jac.clone().into_repr(Repr::Affine);
        assert_eq!(aff.repr(), Repr::Affine);
        assert_eq!(jac, aff);
    }
}
