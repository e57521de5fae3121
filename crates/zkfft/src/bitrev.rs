//! Bit-reversal permutation for the in-place decimation-in-time layout.

/// Reverse the low `bits` bits of `i`. `bits == 0` maps everything to `0`.
#[inline]
#[must_use]
pub const fn bit_reverse(i: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    i.reverse_bits() >> (usize::BITS - bits)
}

/// Permute `a` in place so that `a[i]` and `a[bit_reverse(i)]` swap.
///
/// `a.len()` must be a power of two (or zero).
pub fn bit_reverse_permute<T>(a: &mut [T]) {
    let n = a.len();
    if n <= 2 {
        return;
    }
    debug_assert!(n.is_power_of_two());
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = bit_reverse(i, bits);
        if j > i {
            a.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_within_width() {
        assert_eq!(bit_reverse(0b001, 3), 0b100);
        assert_eq!(bit_reverse(0b110, 3), 0b011);
        assert_eq!(bit_reverse(1, 1), 1);
        assert_eq!(bit_reverse(5, 0), 0);
    }

    #[test]
    fn permutation_is_an_involution() {
        for k in 0..=10 {
            let n = 1usize << k;
            let mut v: Vec<usize> = (0..n).collect();
            bit_reverse_permute(&mut v);
            for (i, &x) in v.iter().enumerate() {
                assert_eq!(x, bit_reverse(i, k));
            }
            bit_reverse_permute(&mut v);
            assert!(v.iter().copied().eq(0..n), "n = 2^{k}");
        }
    }
}
