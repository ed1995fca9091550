//! Concrete constant tables for NIST P-256 and P-521, built on top of the
//! generic [`MontContext`]/[`AffinePoint`] engine. Demonstrates that the
//! engine is not hand-specialized to one curve: the only per-curve data is
//! these byte tables, plumbed through `EcContext::p256()` / `p521()` in
//! `src/context.rs`.

use crate::field::MontContext;
use crate::projective::AffinePoint;

/// P-256 (secp256r1 / prime256v1) field modulus, `2^256 - 2^224 + 2^192 + 2^96 - 1`.
pub const P256_MODULUS: [u8; 32] =
    hex_literal::hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
/// P-256 curve coefficient `b`.
pub const P256_B: [u8; 32] =
    hex_literal::hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");
/// P-256 generator `x`-coordinate.
pub const P256_GX: [u8; 32] =
    hex_literal::hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296");
/// P-256 generator `y`-coordinate.
pub const P256_GY: [u8; 32] =
    hex_literal::hex!("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5");
/// P-256 group order `n`.
pub const P256_N: [u8; 32] =
    hex_literal::hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");

/// P-521 field modulus, `2^521 - 1`.
pub const P521_MODULUS: [u8; 66] = hex_literal::hex!(
    "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
);
/// P-521 curve coefficient `b`.
pub const P521_B: [u8; 66] = hex_literal::hex!(
    "0051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef109e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b503f00"
);
/// P-521 generator `x`-coordinate.
pub const P521_GX: [u8; 66] = hex_literal::hex!(
    "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd66"
);
/// P-521 generator `y`-coordinate.
pub const P521_GY: [u8; 66] = hex_literal::hex!(
    "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd16650"
);
/// P-521 group order `n`.
pub const P521_N: [u8; 66] = hex_literal::hex!(
    "01fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e91386409"
);

pub(crate) fn p256_field() -> MontContext<4> {
    MontContext::new(&P256_MODULUS, 32).expect("P-256 modulus is a known-good constant")
}

pub(crate) fn p256_generator() -> AffinePoint<4> {
    let ctx = p256_field();
    AffinePoint {
        x: ctx.encode(&P256_GX).expect("P-256 Gx is a known-good constant"),
        y: ctx.encode(&P256_GY).expect("P-256 Gy is a known-good constant"),
    }
}

pub(crate) fn p521_field() -> MontContext<9> {
    MontContext::new(&P521_MODULUS, 66).expect("P-521 modulus is a known-good constant")
}

pub(crate) fn p521_generator() -> AffinePoint<9> {
    let ctx = p521_field();
    AffinePoint {
        x: ctx.encode(&P521_GX).expect("P-521 Gx is a known-good constant"),
        y: ctx.encode(&P521_GY).expect("P-521 Gy is a known-good constant"),
    }
}

/// The P-256 group order, as little-endian limbs (for scalar reduction, not
/// field arithmetic — never passed through [`MontContext`]).
pub(crate) fn p256_order_limbs() -> [u64; 4] {
    crate::scalar_mul::parse_scalar::<4>(&P256_N).expect("P-256 order is a known-good constant")
}

/// The P-521 group order, as little-endian limbs.
pub(crate) fn p521_order_limbs() -> [u64; 9] {
    crate::scalar_mul::parse_scalar::<9>(&P521_N).expect("P-521 order is a known-good constant")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn p256_generator_is_on_curve() {
        let ctx = p256_field();
        let g = p256_generator();
        let b = ctx.encode(&P256_B).unwrap();
        let three = ctx.set_small(3);

        let lhs = ctx.sqr(&g.y);
        let x2 = ctx.sqr(&g.x);
        let x3 = ctx.mul(&x2, &g.x);
        let three_x = ctx.mul(&three, &g.x);
        let rhs = ctx.add(&ctx.sub(&x3, &three_x), &b);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn p521_generator_is_on_curve() {
        let ctx = p521_field();
        let g = p521_generator();
        let b = ctx.encode(&P521_B).unwrap();
        let three = ctx.set_small(3);

        let lhs = ctx.sqr(&g.y);
        let x2 = ctx.sqr(&g.x);
        let x3 = ctx.mul(&x2, &g.x);
        let three_x = ctx.mul(&three, &g.x);
        let rhs = ctx.add(&ctx.sub(&x3, &three_x), &b);
        assert_eq!(lhs, rhs);
    }
}
