//! Per-operation scratch space for the scalar-multiplication kernels.
//!
//! A [`Workplace`] bundles the handful of field-element and point
//! temporaries a scalar-multiplication loop needs, allocated once per call
//! (on the stack — everything here is `Copy`) instead of re-initialized at
//! every window. Mirrors the "no heap, no thread-local, in the hot loop"
//! posture the rest of this engine follows.

use crate::field::MontContext;
use crate::projective::ProjectivePoint;

/// Scratch buffers for one scalar-multiplication call over an `LIMBS`-limb
/// field.
pub(crate) struct Workplace<const LIMBS: usize> {
    pub accumulator: ProjectivePoint<LIMBS>,
    pub selected: ProjectivePoint<LIMBS>,
}

impl<const LIMBS: usize> Workplace<LIMBS> {
    pub fn new(ctx: &MontContext<LIMBS>) -> Self {
        Self {
            accumulator: ProjectivePoint::identity(ctx),
            selected: ProjectivePoint::identity(ctx),
        }
    }
}
