//! Error type.

use core::fmt;

/// Errors returned at the public argument-checking boundary of this crate.
///
/// Inner arithmetic routines are total over their precondition domain and
/// never return an error; every entry point here validates its inputs once,
/// before touching any secret-dependent code path, so that whether a call
/// fails is decided before any timing-sensitive computation begins.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A byte buffer was shorter than the curve's configured byte length.
    NotEnoughData,
    /// A numeric input was malformed: out of range, wrong length, or a
    /// scalar longer than the context's configured maximum.
    InvalidValue,
    /// The supplied affine coordinates do not satisfy the curve equation.
    NotOnCurve,
    /// Setting up a context or precomputed table failed.
    ///
    /// Unreachable with this crate's fixed-size stack-allocated types; kept
    /// for parity with the taxonomy a heap-backed backend would need.
    Memory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::NotEnoughData => "buffer too short for the curve's byte length",
            Error::InvalidValue => "value out of range or malformed",
            Error::NotOnCurve => "point is not on the curve",
            Error::Memory => "allocation failure",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;
