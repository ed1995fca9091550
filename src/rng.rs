//! Deterministic seeded randomness for scalar blinding and table masking.
//!
//! This engine never reads system entropy. Every randomized operation takes
//! an explicit `u64` seed from the caller and derives a
//! [`rand_chacha::ChaCha20Rng`] counter-mode stream from it, so a test (or a
//! caller that wants reproducible behaviour) can pin `seed = 0` and get the
//! same blinding mask and the same table every run.

use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

/// Expands a caller-supplied 64-bit seed into a `ChaCha20Rng` stream.
///
/// `domain` separates independent uses of the same seed (scalar blinding
/// vs. `ProtMemory` mask sampling) so that reusing one seed for both does
/// not correlate their outputs.
pub(crate) fn stream_from_seed(seed: u64, domain: u64) -> ChaCha20Rng {
    let mut full_seed = [0u8; 32];
    full_seed[..8].copy_from_slice(&seed.to_le_bytes());
    full_seed[8..16].copy_from_slice(&domain.to_le_bytes());
    ChaCha20Rng::from_seed(full_seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::RngCore as _;

    #[test]
    fn same_seed_same_domain_is_reproducible() {
        let mut a = stream_from_seed(7, 1);
        let mut b = stream_from_seed(7, 1);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn different_domains_diverge() {
        let mut a = stream_from_seed(7, 1);
        let mut b = stream_from_seed(7, 2);
        assert_ne!(a.next_u64(), b.next_u64());
    }
}
