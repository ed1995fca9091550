//! The public point handle: owns one projective coordinate triple and
//! borrows the curve context it was built against for the duration of its
//! use.

use crate::context::EcContext;
use crate::error::{Error, Result};
use crate::projective::{ec_full_add, ec_full_double, ec_projective_to_affine, AffinePoint, ProjectivePoint};
use crate::scalar_mul;
use subtle::ConditionallySelectable;

/// An elliptic-curve point, borrowing the [`EcContext`] it was built
/// against. Construction validates curve membership; every mutator keeps
/// the invariant that `inner` is either on the curve or the point at
/// infinity.
pub struct EcPoint<'ctx, const LIMBS: usize> {
    ctx: &'ctx EcContext<LIMBS>,
    inner: ProjectivePoint<LIMBS>,
}

impl<'ctx, const LIMBS: usize> EcPoint<'ctx, LIMBS> {
    /// The curve's generator, borrowing `ctx`.
    pub fn generator(ctx: &'ctx EcContext<LIMBS>) -> Self {
        Self::from_projective(ctx, ProjectivePoint::from_affine(&ctx.field, &ctx.generator))
    }

    /// The point at infinity, borrowing `ctx`.
    pub fn identity(ctx: &'ctx EcContext<LIMBS>) -> Self {
        Self::from_projective(ctx, ProjectivePoint::identity(&ctx.field))
    }

    /// Validates `(x_bytes, y_bytes)` against the curve equation and builds
    /// a point. `(0, 0)` is accepted unconditionally and denotes `O`.
    pub fn new(ctx: &'ctx EcContext<LIMBS>, x_bytes: &[u8], y_bytes: &[u8]) -> Result<Self> {
        let x = ctx.field.encode(x_bytes)?;
        let y = ctx.field.encode(y_bytes)?;
        let affine = AffinePoint { x, y };
        let is_identity = affine.is_identity(&ctx.field);

        let x2 = ctx.field.sqr(&x);
        let x3 = ctx.field.mul(&x2, &x);
        let three_x = ctx.field.mul(&ctx.field.set_small(3), &x);
        let rhs = ctx.field.add(&ctx.field.sub(&x3, &three_x), &ctx.b);
        let lhs = ctx.field.sqr(&y);
        let on_curve = ctx.field.equal(&lhs, &rhs);

        if !bool::from(on_curve | is_identity) {
            return Err(Error::NotOnCurve);
        }

        Ok(Self {
            ctx,
            inner: ProjectivePoint::from_affine(&ctx.field, &affine),
        })
    }

    pub(crate) fn from_projective(ctx: &'ctx EcContext<LIMBS>, inner: ProjectivePoint<LIMBS>) -> Self {
        Self { ctx, inner }
    }

    /// Writes this point's affine coordinates, big-endian, zero-padded to
    /// the context's byte length. `O` is written as all-zero `(x, y)`.
    pub fn get_xy(&self, x_out: &mut [u8], y_out: &mut [u8]) -> Result<()> {
        let affine = ec_projective_to_affine(&self.ctx.field, &self.inner);
        self.ctx.field.decode(&affine.x, x_out)?;
        self.ctx.field.decode(&affine.y, y_out)?;
        Ok(())
    }

    /// `self *= 2`.
    pub fn double(&mut self) {
        self.inner = ec_full_double(&self.ctx.field, &self.inner);
    }

    /// `self += other`. Falls back to doubling when the generic full-add
    /// formula hits its equal-affine-points exceptional case.
    ///
    /// # Panics
    /// Panics if `self` and `other` were built from different contexts —
    /// a programmer error, not a runtime contract (see DESIGN.md).
    pub fn add(&mut self, other: &Self) {
        assert!(
            core::ptr::eq(self.ctx, other.ctx),
            "EcPoint::add: points belong to different contexts"
        );
        let (sum, needs_double) = ec_full_add(&self.ctx.field, &self.inner, &other.inner);
        let doubled = ec_full_double(&self.ctx.field, &self.inner);
        self.inner = ProjectivePoint::conditional_select(&sum, &doubled, needs_double);
    }

    /// `self = -self`.
    pub fn neg(&mut self) {
        self.inner = self.inner.negate(&self.ctx.field);
    }

    /// `self *= k`, `k` given as big-endian bytes, at most `LIMBS * 8`
    /// bytes; shorter scalars are zero-extended. `seed` drives the
    /// deterministic blinding PRNG.
    pub fn scalar(&mut self, k_bytes: &[u8], seed: u64) -> Result<()> {
        if k_bytes.len() > LIMBS * 8 {
            return Err(Error::InvalidValue);
        }
        let affine = ec_projective_to_affine(&self.ctx.field, &self.inner);
        let result = scalar_mul::ec_scalar(&self.ctx.field, &self.ctx.order, &affine, k_bytes, seed)?;
        self.inner = ProjectivePoint::from_affine(&self.ctx.field, &result);
        Ok(())
    }
}

impl<const LIMBS: usize> PartialEq for EcPoint<'_, LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        let a = ec_projective_to_affine(&self.ctx.field, &self.inner);
        let b = ec_projective_to_affine(&self.ctx.field, &other.inner);
        bool::from(self.ctx.field.equal(&a.x, &b.x) & self.ctx.field.equal(&a.y, &b.y))
    }
}
