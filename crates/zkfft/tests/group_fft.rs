//! Group transforms over BN254 G1.

use std::sync::OnceLock;

use ark_bn254::{g1::Config, Fr, G1Affine, G1Projective};
use ark_ec::{CurveGroup, Group};
use ark_ff::Zero;
use zkfft::{EngineConfig, FftEngine, FftError, PointBuffer, Repr, TransformOptions};

fn engine() -> &'static FftEngine<Fr> {
    static ENGINE: OnceLock<FftEngine<Fr>> = OnceLock::new();
    ENGINE.get_or_init(|| {
        FftEngine::new(EngineConfig {
            parallel_threshold: 256,
            ..EngineConfig::default()
        })
        .unwrap()
    })
}

fn multiples(n: u64) -> Vec<G1Projective> {
    let g = G1Projective::generator();
    (1..=n).map(|i| g * Fr::from(i)).collect()
}

fn buffer(points: Vec<G1Projective>, repr: Repr) -> PointBuffer<Config> {
    PointBuffer::Jacobian(points).into_repr(repr)
}

#[test]
fn roundtrip_for_every_representation_pair() {
    let e = engine();
    let reprs = [Repr::Affine, Repr::Jacobian];
    for r1 in reprs {
        for r2 in reprs {
            let input = buffer(multiples(8), r1);
            let evals = e.forward_group(input.clone(), r2).unwrap();
            assert_eq!(evals.repr(), r2);
            let back = e.inverse_group(evals, r1).unwrap();
            assert_eq!(back.repr(), r1);
            assert_eq!(back, input, "{r1:?} -> {r2:?} -> {r1:?}");
        }
    }
}

#[test]
fn group_transform_of_multiples_is_multiple_of_field_transform() {
    let e = engine();
    let g = G1Projective::generator();
    let a: Vec<Fr> = (1..=8u64).map(Fr::from).collect();
    let field_evals = e.forward_field(&a).unwrap();

    let scaled = PointBuffer::<Config>::Jacobian(a.iter().map(|x| g * x).collect());
    let group_evals = e.forward_group(scaled, Repr::Jacobian).unwrap().into_jacobian_vec();

    assert_eq!(group_evals.len(), 8);
    for (j, (p, y)) in group_evals.iter().zip(&field_evals).enumerate() {
        assert_eq!(*p, g * y, "j = {j}");
    }

    let group_coeffs = e
        .inverse_group(PointBuffer::Jacobian(group_evals), Repr::Affine)
        .unwrap();
    let expected: Vec<G1Affine> = a.iter().map(|x| (g * x).into_affine()).collect();
    assert_eq!(group_coeffs, PointBuffer::Affine(expected));
}

#[test]
fn jacobian_and_affine_outputs_agree_at_512() {
    // Runs on the pool (threshold 256).
    let e = engine();
    let input = PointBuffer::<Config>::Jacobian(multiples(512));

    let jac = e.forward_group(input.clone(), Repr::Jacobian).unwrap();
    let aff = e.forward_group(input.clone(), Repr::Affine).unwrap();
    assert_eq!(jac.repr(), Repr::Jacobian);
    assert_eq!(aff.repr(), Repr::Affine);
    assert_eq!(jac.clone().into_repr(Repr::Affine), aff);

    assert_eq!(e.inverse_group(jac, Repr::Jacobian).unwrap(), input);
    assert_eq!(e.inverse_group(aff, Repr::Jacobian).unwrap(), input);
}

#[test]
fn restricted_order_matches_for_points() {
    let e = engine();
    let input = PointBuffer::<Config>::Jacobian(multiples(16));
    let standard = e.forward_group(input.clone(), Repr::Jacobian).unwrap();
    let extended = e
        .transform_group(
            input,
            zkfft::Direction::Forward,
            Repr::Affine,
            TransformOptions::with_max_order(2),
        )
        .unwrap();
    assert_eq!(extended, standard);
}

#[test]
fn off_curve_point_is_reported() {
    let e = engine();
    let mut pts: Vec<G1Affine> = multiples(8).iter().map(|p| p.into_affine()).collect();
    pts[5] = G1Affine::new_unchecked(pts[5].x, pts[5].x);
    assert_eq!(
        e.forward_group(PointBuffer::Affine(pts), Repr::Jacobian),
        Err(FftError::MalformedPoint { index: 5 })
    );
}

#[test]
fn identity_points_are_neutral() {
    let e = engine();
    let all_inf = PointBuffer::<Config>::Affine(vec![G1Affine::identity(); 4]);
    let out = e.forward_group(all_inf.clone(), Repr::Affine).unwrap();
    assert_eq!(out, all_inf);

    // A delta at index 0 transforms to a constant vector.
    let g = G1Projective::generator();
    let mut delta = vec![G1Projective::zero(); 8];
    delta[0] = g;
    let out = e
        .forward_group(PointBuffer::Jacobian(delta), Repr::Affine)
        .unwrap();
    assert_eq!(out, PointBuffer::Jacobian(vec![g; 8]));
}

#[test]
fn single_point_is_identity_in_every_representation() {
    let e = engine();
    let reprs = [Repr::Affine, Repr::Jacobian];
    for point in [G1Projective::generator() * Fr::from(11u64), G1Projective::zero()] {
        for r_in in reprs {
            for r_out in reprs {
                let input = buffer(vec![point], r_in);
                let fwd = e.forward_group(input.clone(), r_out).unwrap();
                assert_eq!(fwd.repr(), r_out);
                assert_eq!(fwd, input, "forward {r_in:?} -> {r_out:?}");
                let inv = e.inverse_group(input.clone(), r_out).unwrap();
                assert_eq!(inv, input, "inverse {r_in:?} -> {r_out:?}");
            }
        }
    }
}

#[test]
fn group_lengths_are_checked() {
    let e = engine();
    assert_eq!(
        e.forward_group(PointBuffer::<Config>::Jacobian(multiples(6)), Repr::Jacobian),
        Err(FftError::InvalidLength { len: 6 })
    );
}

#[tokio::test]
async fn spawned_group_transform_can_be_awaited() {
    let e = engine();
    let input = PointBuffer::<Config>::Affine(
        multiples(4).iter().map(|p| p.into_affine()).collect(),
    );
    let handle = e
        .spawn_group(
            input.clone(),
            zkfft::Direction::Forward,
            Repr::Jacobian,
            TransformOptions::default(),
        )
        .unwrap();
    let evals = handle.await.unwrap();
    assert_eq!(e.inverse_group(evals, Repr::Affine).unwrap(), input);
}
