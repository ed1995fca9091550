//! Literal test vectors against the projective point algebra and the
//! public point surface, covering the exceptional cases and generalizing
//! the field layer from P-256 to P-521.

use ecws_core::{
    ec_full_add, ec_full_double, ec_projective_to_affine, AffinePoint, EcContext, EcPoint,
    MontContext, ProjectivePoint,
};
use hex_literal::hex;

const P256_MODULUS: [u8; 32] =
    hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
const P256_GX: [u8; 32] =
    hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296");
const P256_GY: [u8; 32] =
    hex!("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5");
const P256_N: [u8; 32] =
    hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");

const P521_MODULUS: [u8; 66] = hex!(
    "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
);
const P521_GX: [u8; 66] = hex!(
    "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd66"
);
const P521_GY: [u8; 66] = hex!(
    "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd16650"
);

fn p256_field() -> MontContext<4> {
    MontContext::new(&P256_MODULUS, 32).unwrap()
}

fn p521_field() -> MontContext<9> {
    MontContext::new(&P521_MODULUS, 66).unwrap()
}

/// S1: a representative (X, Y, Z=10) triple, a scaled-up encoding of the
/// P-256 generator, converts to the expected affine (Gx, Gy).
#[test]
fn s1_projective_to_affine() {
    let ctx = p256_field();
    let x = hex!("d54e0308f549e3f429ca319aec295eb67d5d064cefe02adf8efa5f489bac02c1");
    let y = hex!("0fbd47e89782766e39ef1af49d01869b1d788c42b8da57cbbfeb9719c3582640");
    let mut z = [0u8; 32];
    z[31] = 10;

    let p = ProjectivePoint {
        x: ctx.encode(&x).unwrap(),
        y: ctx.encode(&y).unwrap(),
        z: ctx.encode(&z).unwrap(),
    };
    let affine = ec_projective_to_affine(&ctx, &p);

    assert_eq!(affine.x, ctx.encode(&P256_GX).unwrap());
    assert_eq!(affine.y, ctx.encode(&P256_GY).unwrap());
}

/// S2: doubling the S1 input point yields the expected affine `2 * G`.
#[test]
fn s2_double() {
    let ctx = p256_field();
    let x = hex!("d54e0308f549e3f429ca319aec295eb67d5d064cefe02adf8efa5f489bac02c1");
    let y = hex!("0fbd47e89782766e39ef1af49d01869b1d788c42b8da57cbbfeb9719c3582640");
    let mut z = [0u8; 32];
    z[31] = 10;

    let p = ProjectivePoint {
        x: ctx.encode(&x).unwrap(),
        y: ctx.encode(&y).unwrap(),
        z: ctx.encode(&z).unwrap(),
    };
    let doubled = ec_full_double(&ctx, &p);
    let affine = ec_projective_to_affine(&ctx, &doubled);

    let expect_x = hex!("7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978");
    let expect_y = hex!("07775510db8ed040293d9ac69f7430dbba7dade63ce982299e04b79d227873d1");
    assert_eq!(affine.x, ctx.encode(&expect_x).unwrap());
    assert_eq!(affine.y, ctx.encode(&expect_y).unwrap());
}

/// S3: doubling O returns O; adding a point to its negation yields Z = 0.
#[test]
fn s3_infinity() {
    let ctx = p256_field();
    let o = ProjectivePoint::identity(&ctx);
    let doubled = ec_full_double(&ctx, &o);
    assert!(bool::from(doubled.is_identity(&ctx)));

    let g = AffinePoint {
        x: ctx.encode(&P256_GX).unwrap(),
        y: ctx.encode(&P256_GY).unwrap(),
    };
    let g_proj = ProjectivePoint::from_affine(&ctx, &g);
    let neg_g = g_proj.negate(&ctx);
    let (sum, _needs_double) = ec_full_add(&ctx, &g_proj, &neg_g);
    assert!(bool::from(sum.is_identity(&ctx)));
}

/// S4: scalar = group order n: `n * G` has Z = 0.
#[test]
fn s4_scalar_equals_order() {
    let ctx = EcContext::<4>::p256();
    let mut p = EcPoint::generator(&ctx);
    p.scalar(&P256_N, 0).unwrap();
    let o = EcPoint::identity(&ctx);
    assert!(p == o);
}

/// S5: scalar = n + 1, base = G: result affine = (Gx, Gy).
#[test]
fn s5_scalar_equals_order_plus_one() {
    let ctx = EcContext::<4>::p256();
    let mut n_plus_one = P256_N;
    // n is odd, so n + 1 never carries out of the low byte.
    let carry_index = n_plus_one.len() - 1;
    n_plus_one[carry_index] += 1;

    let mut p = EcPoint::generator(&ctx);
    p.scalar(&n_plus_one, 0).unwrap();

    let mut out_x = [0u8; 32];
    let mut out_y = [0u8; 32];
    p.get_xy(&mut out_x, &mut out_y).unwrap();
    assert_eq!(out_x, P256_GX);
    assert_eq!(out_y, P256_GY);
}

/// S6: an arbitrary literal scalar against the generator yields a literal
/// affine result.
#[test]
fn s6_arbitrary_scalar() {
    let ctx = EcContext::<4>::p256();
    let mut p = EcPoint::generator(&ctx);
    p.scalar(&[0x30, 0x39], 0).unwrap(); // k = 12345

    let mut out_x = [0u8; 32];
    let mut out_y = [0u8; 32];
    p.get_xy(&mut out_x, &mut out_y).unwrap();

    let expect_x = hex!("26efcebd0ee9e34a669187e18b3a9122b2f733945b649cc9f9f921e9f9dad812");
    let expect_y = hex!("90238bde9cc7bb330d150c67704dd25ae7055205744b6f31bf4070745872d0e6");
    assert_eq!(out_x, expect_x);
    assert_eq!(out_y, expect_y);
}

/// S7: the same doubling formula, instantiated against the P-521
/// `MontContext` (9 limbs instead of 4): the field layer generalizes.
#[test]
fn s7_p521_double() {
    let ctx = p521_field();
    let g = AffinePoint {
        x: ctx.encode(&P521_GX).unwrap(),
        y: ctx.encode(&P521_GY).unwrap(),
    };
    let g_proj = ProjectivePoint::from_affine(&ctx, &g);
    let doubled = ec_full_double(&ctx, &g_proj);
    let affine = ec_projective_to_affine(&ctx, &doubled);

    let expect_x = hex!("00433c219024277e7e682fcb288148c282747403279b1ccc06352c6e5505d769be97b3b204da6ef55507aa104a3a35c5af41cf2fa364d60fd967f43e3933ba6d783d");
    let expect_y = hex!("00f4bb8cc7f86db26700a7f3eceeeed3f0b5c6b5107c4da97740ab21a29906c42dbbb3e377de9f251f6b93937fa99a3248f4eafcbe95edc0f4f71be356d661f41b02");
    assert_eq!(affine.x, ctx.encode(&expect_x).unwrap());
    assert_eq!(affine.y, ctx.encode(&expect_y).unwrap());
}
