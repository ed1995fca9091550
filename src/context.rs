//! Curve-parameter context: the immutable `p`, `b`, `n`, byte length, and
//! precomputed generator every [`crate::point::EcPoint`] operation runs
//! against.

use crate::curves;
use crate::error::Result;
use crate::field::{FieldElement, MontContext};
use crate::fixed_base;
use crate::point::EcPoint;
use crate::projective::{AffinePoint, ProjectivePoint};

/// Curve parameters and precomputed constants, generic over limb count so
/// the same type serves P-256 (`LIMBS = 4`) and P-521 (`LIMBS = 9`).
/// Immutable after construction; `&EcContext` is `Sync`.
pub struct EcContext<const LIMBS: usize> {
    pub(crate) field: MontContext<LIMBS>,
    pub(crate) b: FieldElement<LIMBS>,
    pub(crate) order: [u64; LIMBS],
    pub(crate) generator: AffinePoint<LIMBS>,
}

impl<const LIMBS: usize> EcContext<LIMBS> {
    /// Builds a context from explicit curve parameters. `p`, `b`, `gx`, `gy`
    /// are big-endian byte strings of length `byte_len`; `n` (the group
    /// order) is a big-endian byte string at most `LIMBS * 8` bytes.
    pub fn new(
        p: &[u8],
        b: &[u8],
        gx: &[u8],
        gy: &[u8],
        n: &[u8],
        byte_len: usize,
    ) -> Result<Self> {
        let field = MontContext::new(p, byte_len)?;
        let b = field.encode(b)?;
        let generator = AffinePoint {
            x: field.encode(gx)?,
            y: field.encode(gy)?,
        };
        let order = crate::scalar_mul::parse_scalar::<LIMBS>(n)?;
        Ok(Self {
            field,
            b,
            order,
            generator,
        })
    }

    /// Wire byte length of field elements under this context.
    pub fn byte_len(&self) -> usize {
        self.field.byte_len()
    }
}

impl EcContext<4> {
    /// The standard NIST P-256 context.
    pub fn p256() -> Self {
        let field = curves::p256_field();
        let b = field.encode(&curves::P256_B).expect("P-256 b is a known-good constant");
        Self {
            field,
            b,
            order: curves::p256_order_limbs(),
            generator: curves::p256_generator(),
        }
    }

    /// `k * G`, via the masked fixed-base table (`src/fixed_base.rs`)
    /// instead of the generic variable-base path. Rebuilds its
    /// [`fixed_base::ProtMemoryTable`] on every call; a caller making many
    /// calls with the same `seed` should prefer building the table once
    /// with [`fixed_base::ProtMemoryTable::for_generator`] directly.
    pub fn scalar_g(&self, k_bytes: &[u8], seed: u64) -> Result<EcPoint<'_, 4>> {
        let table = fixed_base::ProtMemoryTable::for_generator(seed);
        let affine = fixed_base::ec_scalar_g_p256(&table, k_bytes, seed)?;
        Ok(EcPoint::from_projective(self, ProjectivePoint::from_affine(&self.field, &affine)))
    }
}

impl EcContext<9> {
    /// The standard NIST P-521 context.
    pub fn p521() -> Self {
        let field = curves::p521_field();
        let b = field.encode(&curves::P521_B).expect("P-521 b is a known-good constant");
        Self {
            field,
            b,
            order: curves::p521_order_limbs(),
            generator: curves::p521_generator(),
        }
    }
}
