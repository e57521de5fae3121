//! Round-trip tests: coeffs --FFT--> evals --IFFT--> coeffs

use std::sync::OnceLock;

use ark_bn254::Fr;
use ark_std::{test_rng, UniformRand};
use proptest::prelude::*;
use zkfft::{
    naive, Direction, EngineConfig, FftEngine, FftError, Goldilocks, RootTable, TransformOptions,
};

fn goldilocks_engine() -> &'static FftEngine<Goldilocks> {
    static ENGINE: OnceLock<FftEngine<Goldilocks>> = OnceLock::new();
    ENGINE.get_or_init(|| FftEngine::new(EngineConfig::default()).unwrap())
}

fn bn254_engine() -> &'static FftEngine<Fr> {
    static ENGINE: OnceLock<FftEngine<Fr>> = OnceLock::new();
    ENGINE.get_or_init(|| FftEngine::new(EngineConfig::default()).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn goldilocks_roundtrip_is_exact(
        raw in (0u32..=9).prop_flat_map(|k| prop::collection::vec(any::<u64>(), 1usize << k))
    ) {
        let engine = goldilocks_engine();
        let v: Vec<Goldilocks> = raw.into_iter().map(Goldilocks::from).collect();
        let evals = engine.forward_field(&v).unwrap();
        prop_assert_eq!(engine.inverse_field(&evals).unwrap(), v);
    }

    #[test]
    fn bn254_roundtrip_is_exact(
        raw in (0u32..=7).prop_flat_map(|k| prop::collection::vec(any::<u64>(), 1usize << k))
    ) {
        let engine = bn254_engine();
        let v: Vec<Fr> = raw.into_iter().map(Fr::from).collect();
        let evals = engine.forward_field(&v).unwrap();
        prop_assert_eq!(engine.inverse_field(&evals).unwrap(), v);
    }

    #[test]
    fn inverse_then_forward_is_exact(
        raw in (1u32..=8).prop_flat_map(|k| prop::collection::vec(any::<u64>(), 1usize << k))
    ) {
        let engine = goldilocks_engine();
        let v: Vec<Goldilocks> = raw.into_iter().map(Goldilocks::from).collect();
        let coeffs = engine.inverse_field(&v).unwrap();
        prop_assert_eq!(engine.forward_field(&coeffs).unwrap(), v);
    }
}

#[test]
fn forward_evaluates_at_roots_in_natural_order() {
    let engine = bn254_engine();
    let mut rng = test_rng();
    let v: Vec<Fr> = (0..16).map(|_| Fr::rand(&mut rng)).collect();
    let w = engine.roots().root_of_order(4).unwrap();
    assert_eq!(engine.forward_field(&v).unwrap(), naive::dft(&v, w));
}

#[test]
fn single_element_is_identity() {
    let engine = goldilocks_engine();
    let v = vec![Goldilocks::from(1234u64)];
    assert_eq!(engine.forward_field(&v).unwrap(), v);
    assert_eq!(engine.inverse_field(&v).unwrap(), v);
}

#[test]
fn zero_and_non_power_of_two_lengths_fail() {
    let engine = goldilocks_engine();
    assert_eq!(
        engine.forward_field(&[]),
        Err(FftError::InvalidLength { len: 0 })
    );
    let three = vec![Goldilocks::from(1u64); 3];
    assert_eq!(
        engine.inverse_field(&three),
        Err(FftError::InvalidLength { len: 3 })
    );
    let mut twelve = vec![Goldilocks::from(1u64); 12];
    assert_eq!(
        engine.transform_field(&mut twelve, Direction::Forward, TransformOptions::default()),
        Err(FftError::InvalidLength { len: 12 })
    );
}

#[test]
fn large_sequence_roundtrip_reconstructs_ramp() {
    // 8192 * 16 entries, run on the pool.
    let engine = bn254_engine();
    let n = 8192 * 16;
    let ramp: Vec<Fr> = (1..=n as u64).map(Fr::from).collect();
    let evals = engine.forward_field(&ramp).unwrap();
    assert_ne!(evals, ramp);
    assert_eq!(engine.inverse_field(&evals).unwrap(), ramp);
}

#[test]
fn coset_roundtrip_matches_plain_roundtrip() {
    let engine = goldilocks_engine();
    let shift = Goldilocks::from(7u64);
    let coeffs: Vec<Goldilocks> = (0..64u64).map(|i| Goldilocks::from(i * i + 3)).collect();
    let evals = engine.coset_forward_field(&coeffs, shift).unwrap();
    assert_ne!(evals, engine.forward_field(&coeffs).unwrap());
    assert_eq!(engine.coset_inverse_field(&evals, shift).unwrap(), coeffs);
    assert_eq!(
        engine.coset_forward_field(&coeffs, Goldilocks::from(0u64)),
        Err(FftError::DivisionByZero)
    );
}

#[test]
fn root_table_is_shared_across_calls() {
    let table = RootTable::<Goldilocks>::new();
    let mut v: Vec<Goldilocks> = (0..32u64).map(Goldilocks::from).collect();
    let original = v.clone();
    zkfft::transform::transform_in_place(
        &table,
        &mut v,
        Direction::Forward,
        TransformOptions::default(),
        false,
    )
    .unwrap();
    let after_first = table.populated();
    zkfft::transform::transform_in_place(
        &table,
        &mut v,
        Direction::Inverse,
        TransformOptions::default(),
        false,
    )
    .unwrap();
    assert_eq!(v, original);
    assert_eq!(table.populated(), after_first);
}
