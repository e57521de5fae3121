//! Scalar-field capability consumed by the transform engine.
//!
//! Arithmetic itself is delegated to `ark-ff`; this module adds the few
//! fallible entry points the engine needs (checked inversion, canonical byte
//! decoding) and names the field's 2-adicity `s`.

use ark_ff::{BigInteger, PrimeField};

use crate::error::{FftError, Result};

/// A prime field usable as the scalar ring of a transform.
///
/// Implemented for every arkworks [`PrimeField`]. `s` (the 2-adicity) is a
/// read-only property of the type: callers restrict the usable order per call
/// through [`crate::TransformOptions`], never by mutating the field.
pub trait FieldDomain: PrimeField {
    /// Largest `s` such that a primitive `2^s`-th root of unity exists.
    #[inline]
    #[must_use]
    fn two_adicity() -> u32 {
        Self::TWO_ADICITY
    }

    /// Multiplicative inverse, or [`FftError::DivisionByZero`] for zero.
    #[inline]
    fn try_inverse(&self) -> Result<Self> {
        self.inverse().ok_or(FftError::DivisionByZero)
    }

    /// Width of the canonical little-endian encoding in bytes.
    #[inline]
    #[must_use]
    fn encoded_len() -> usize {
        <Self::BigInt as BigInteger>::NUM_LIMBS * 8
    }

    /// Decode exactly [`FieldDomain::encoded_len`] little-endian bytes.
    ///
    /// Values `>= p` are rejected rather than reduced.
    fn from_canonical_le_bytes(bytes: &[u8]) -> Result<Self> {
        let expected = Self::encoded_len();
        let err = FftError::NonCanonicalEncoding {
            expected,
            got: bytes.len(),
        };
        if bytes.len() != expected {
            return Err(err);
        }
        let x = Self::from_le_bytes_mod_order(bytes);
        if x.to_canonical_le_bytes() != bytes {
            return Err(err);
        }
        Ok(x)
    }

    /// Canonical little-endian encoding.
    #[inline]
    #[must_use]
    fn to_canonical_le_bytes(&self) -> Vec<u8> {
        self.into_bigint().to_bytes_le()
    }
}

impl<F: PrimeField> FieldDomain for F {}

/// Inverse of `n` taken as a field element (the IFFT scaling factor).
pub(crate) fn inverse_of_len<F: FieldDomain>(n: usize) -> Result<F> {
    F::from(n as u64).try_inverse()
}
