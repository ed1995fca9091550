#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_lifetimes, unused_qualifications)]

#[cfg(feature = "std")]
extern crate std;

mod context;
mod curves;
mod error;
mod field;
mod fixed_base;
mod limb;
mod point;
mod projective;
mod rng;
mod scalar_mul;
mod workplace;

pub use context::EcContext;
pub use error::{Error, Result};
pub use field::{FieldElement, MontContext};
pub use fixed_base::ProtMemoryTable;
pub use point::EcPoint;
pub use projective::{ec_full_add, ec_full_double, ec_mix_add, ec_projective_to_affine, AffinePoint, ProjectivePoint};
