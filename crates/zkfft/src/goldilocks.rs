//! Goldilocks field `p = 2^64 - 2^32 + 1` in arkworks Montgomery form.
//!
//! Multiplicative generator `g = 7`; 2-adicity 32. Handy as a fast second
//! field next to curve scalar fields.

use ark_ff::fields::{Fp64, MontBackend, MontConfig};

/// Goldilocks prime `p = 2^64 - 2^32 + 1`.
pub const GOLDILOCKS: u64 = 0xffff_ffff_0000_0001;

/// Montgomery parameters for [`Goldilocks`].
#[derive(MontConfig)]
#[modulus = "18446744069414584321"]
#[generator = "7"]
pub struct GoldilocksConfig;

/// Goldilocks field element.
pub type Goldilocks = Fp64<MontBackend<GoldilocksConfig, 1>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldDomain;
    use ark_ff::{FftField, Field, PrimeField};

    #[test]
    fn modulus_and_two_adicity() {
        assert_eq!(Goldilocks::MODULUS.0[0], GOLDILOCKS);
        assert_eq!(Goldilocks::two_adicity(), 32);
    }

    #[test]
    fn two_adic_root_has_order_2_pow_32() {
        let w = Goldilocks::TWO_ADIC_ROOT_OF_UNITY;
        assert_eq!(w.pow([1u64 << 32]), Goldilocks::from(1u64));
        assert_ne!(w.pow([1u64 << 31]), Goldilocks::from(1u64));
    }
}
