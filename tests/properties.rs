//! Property tests over the public point surface: group axioms and
//! fixed/variable-base agreement, sampled over scalar multiples of the
//! P-256 generator.

use ecws_core::{EcContext, EcPoint};
use hex_literal::hex;
use proptest::prelude::*;

const P256_N: [u8; 32] =
    hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");

fn point_from_scalar<'ctx>(ctx: &'ctx EcContext<4>, k: &[u8; 32]) -> EcPoint<'ctx, 4> {
    let mut p = EcPoint::generator(ctx);
    p.scalar(k, 0).unwrap();
    p
}

proptest! {
    #[test]
    fn identity_laws(k in any::<[u8; 32]>()) {
        let ctx = EcContext::<4>::p256();
        let p = point_from_scalar(&ctx, &k);

        let mut p_plus_o = point_from_scalar(&ctx, &k);
        let o = EcPoint::identity(&ctx);
        p_plus_o.add(&o);
        prop_assert!(p_plus_o == p);

        let mut o_plus_p = EcPoint::identity(&ctx);
        o_plus_p.add(&p);
        prop_assert!(o_plus_p == p);

        let mut doubled_o = EcPoint::identity(&ctx);
        doubled_o.double();
        prop_assert!(doubled_o == o);
    }

    #[test]
    fn inverse_law(k in any::<[u8; 32]>()) {
        let ctx = EcContext::<4>::p256();
        let mut p = point_from_scalar(&ctx, &k);
        let mut neg_p = point_from_scalar(&ctx, &k);
        neg_p.neg();
        p.add(&neg_p);
        let o = EcPoint::identity(&ctx);
        prop_assert!(p == o);
    }

    #[test]
    fn double_matches_self_add(k in any::<[u8; 32]>()) {
        let ctx = EcContext::<4>::p256();
        let mut doubled = point_from_scalar(&ctx, &k);
        let copy = point_from_scalar(&ctx, &k);
        doubled.double();

        let mut added = point_from_scalar(&ctx, &k);
        added.add(&copy);

        prop_assert!(doubled == added);
    }

    #[test]
    fn fixed_base_matches_variable_base(k in any::<[u8; 32]>()) {
        let ctx = EcContext::<4>::p256();
        let mut via_variable = EcPoint::generator(&ctx);
        via_variable.scalar(&k, 7).unwrap();

        let via_fixed = ctx.scalar_g(&k, 7).unwrap();

        prop_assert!(via_variable == via_fixed);
    }

    #[test]
    fn scalar_output_stays_on_curve_or_infinity(k in any::<[u8; 32]>()) {
        let ctx = EcContext::<4>::p256();
        let p = point_from_scalar(&ctx, &k);
        let mut out_x = [0u8; 32];
        let mut out_y = [0u8; 32];
        p.get_xy(&mut out_x, &mut out_y).unwrap();
        // EcPoint::new re-validates the curve equation (or accepts O).
        prop_assert!(EcPoint::new(&ctx, &out_x, &out_y).is_ok());
    }

    #[test]
    fn negating_scalar_negates_result(k in any::<u32>()) {
        let ctx = EcContext::<4>::p256();
        let mut k_bytes = [0u8; 32];
        k_bytes[28..].copy_from_slice(&k.to_be_bytes());

        let mut p = EcPoint::generator(&ctx);
        p.scalar(&k_bytes, 0).unwrap();
        p.neg();

        // n - k, computed so it fits the curve's 32-byte scalar width.
        let mut neg_k_bytes = P256_N;
        let mut borrow = 0i64;
        for i in (0..32).rev() {
            let mut v = neg_k_bytes[i] as i64 - ((k_bytes[i] as i64) + borrow);
            borrow = 0;
            if v < 0 {
                v += 256;
                borrow = 1;
            }
            neg_k_bytes[i] = v as u8;
        }
        let mut q = EcPoint::generator(&ctx);
        q.scalar(&neg_k_bytes, 0).unwrap();

        prop_assert!(p == q);
    }
}

/// Round-trip: `double(P) = add(P, P)`, `n * G = O`, `(n + k) * G = k * G`,
/// checked against a small literal `k` that keeps `n + k` within the
/// curve's 32-byte scalar width.
#[test]
fn order_plus_small_scalar_matches_small_scalar() {
    let ctx = EcContext::<4>::p256();
    let k = 5u8;

    let mut via_k = EcPoint::generator(&ctx);
    via_k.scalar(&[k], 0).unwrap();

    let mut n_plus_k = P256_N;
    n_plus_k[31] = n_plus_k[31].wrapping_add(k);
    let mut via_n_plus_k = EcPoint::generator(&ctx);
    via_n_plus_k.scalar(&n_plus_k, 0).unwrap();

    assert!(via_k == via_n_plus_k);
}

#[test]
fn scalar_by_order_is_infinity() {
    let ctx = EcContext::<4>::p256();
    let mut p = EcPoint::generator(&ctx);
    p.scalar(&P256_N, 0).unwrap();
    let o = EcPoint::identity(&ctx);
    assert!(p == o);
}
