//! Roots of unity of order `2^k` and the twiddle tables derived from them.
//!
//! The canonical root of order `2^k` is `w_k = g^((p-1)/2^k)` for the field's
//! fixed multiplicative generator `g`, so `w_k^2 = w_(k-1)` for every `k` and
//! any transform built from these roots agrees with any other.
//!
//! Slots are populated lazily, at most once each, and are read-only after
//! that: lookups never take a lock.

use std::sync::OnceLock;

use ark_ff::BigInteger;
use tracing::trace;

use crate::error::{FftError, Result};
use crate::transform::Direction;
use crate::FieldDomain;

/// A primitive root and its inverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RootPair<F> {
    /// Primitive `2^k`-th root of unity.
    pub root: F,
    /// Its multiplicative inverse.
    pub inverse: F,
}

/// Lazily-filled table of `w_k` and `w_k^-1` for `0 <= k <= s`.
#[derive(Debug)]
pub struct RootTable<F: FieldDomain> {
    slots: Vec<OnceLock<RootPair<F>>>,
}

impl<F: FieldDomain> Default for RootTable<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FieldDomain> RootTable<F> {
    /// Empty table covering orders `0..=s`.
    #[must_use]
    pub fn new() -> Self {
        let slots = (0..=F::two_adicity()).map(|_| OnceLock::new()).collect();
        Self { slots }
    }

    /// The field's natural 2-adicity `s`.
    #[inline]
    #[must_use]
    pub fn max_order(&self) -> u32 {
        F::two_adicity()
    }

    /// Populate orders `0..=min(k, s)` up front.
    pub fn warm_up(&self, k: u32) -> Result<()> {
        for order in 0..=k.min(self.max_order()) {
            self.entry(order)?;
        }
        Ok(())
    }

    /// Number of orders populated so far.
    #[must_use]
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|s| s.get().is_some()).count()
    }

    fn entry(&self, k: u32) -> Result<&RootPair<F>> {
        let slot = self
            .slots
            .get(k as usize)
            .ok_or(FftError::UnsupportedOrder {
                required: k,
                available: self.max_order(),
            })?;
        if let Some(pair) = slot.get() {
            return Ok(pair);
        }
        let root = primitive_root::<F>(k);
        let pair = RootPair {
            root,
            inverse: root.try_inverse()?,
        };
        trace!(order = k, "root table slot populated");
        Ok(slot.get_or_init(|| pair))
    }

    /// Primitive root of unity of order `2^k`.
    pub fn root_of_order(&self, k: u32) -> Result<F> {
        Ok(self.entry(k)?.root)
    }

    /// Inverse of [`RootTable::root_of_order`].
    pub fn inverse_root_of_order(&self, k: u32) -> Result<F> {
        Ok(self.entry(k)?.inverse)
    }

    /// Root of order `2^k` for the given direction.
    pub fn root(&self, k: u32, direction: Direction) -> Result<F> {
        let pair = self.entry(k)?;
        Ok(match direction {
            Direction::Forward => pair.root,
            Direction::Inverse => pair.inverse,
        })
    }

    /// Twiddles `w^j` for `j in 0..2^(k-1)` with `w` the (inverse) root of order `2^k`.
    ///
    /// A butterfly stage of half-width `h` reads this table with stride
    /// `2^(k-1) / h`. Empty for `k == 0`.
    pub fn twiddles(&self, k: u32, direction: Direction) -> Result<Vec<F>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let w = self.root(k, direction)?;
        let half = 1usize << (k - 1);
        let mut tw = Vec::with_capacity(half);
        let mut cur = F::one();
        for _ in 0..half {
            tw.push(cur);
            cur *= w;
        }
        Ok(tw)
    }
}

/// `g^((p-1)/2^k)`; caller guarantees `k <= s`.
fn primitive_root<F: FieldDomain>(k: u32) -> F {
    let mut exp = F::MODULUS;
    exp.sub_with_borrow(&F::BigInt::from(1u64));
    exp.divn(k);
    let w = F::GENERATOR.pow(exp);

    debug_assert!(has_exact_order(w, k), "w should have exact order 2^k");
    w
}

fn has_exact_order<F: FieldDomain>(w: F, k: u32) -> bool {
    let mut x = w;
    for _ in 0..k {
        if x.is_one() {
            return false;
        }
        x.square_in_place();
    }
    x.is_one()
}
