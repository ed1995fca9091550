//! Variable-base scalar multiplication: windowed, regular, blinded.
//!
//! `ec_scalar` computes `k * P` for a secret scalar `k` supplied as a
//! big-endian byte string. The loop shape (shift-then-add over signed
//! windowed digits) is the same regardless of the bits of `k`: every
//! iteration does the same number of doublings, additions, and constant-time
//! table selects, so its runtime does not depend on `k`'s numeric value.

use crate::error::{Error, Result};
use crate::field::MontContext;
use crate::limb::{adc, mac};
use crate::projective::{ec_full_add, ec_full_double, AffinePoint, ProjectivePoint};
use crate::rng::stream_from_seed;
use crate::workplace::Workplace;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Window width in bits for both variable- and fixed-base multiplication.
pub(crate) const WINDOW_BITS: u32 = 4;
/// Size of the precomputed multiple table: `1P, 2P, ..., (2^(w-1))P`, enough
/// to cover every digit magnitude the recoding below can produce.
const TABLE_SIZE: usize = 1 << (WINDOW_BITS - 1);

/// Upper bound on `LIMBS + 1` words, large enough for P-521's 9 limbs.
pub(crate) const MAX_SCALAR_WORDS: usize = 10;
/// Upper bound on the number of windows a blinded scalar recodes into: one
/// window per 4 bits of the widest blinded scalar, plus one extra window to
/// absorb the terminal carry the signed-digit recoding (`recode_windows`)
/// can propagate past the scalar's top bit.
const MAX_WINDOWS: usize = MAX_SCALAR_WORDS * 64 / WINDOW_BITS as usize + 1;

/// Domain separator for the scalar-blinding draw, distinguishing it from the
/// `ProtMemory` mask draw in `src/fixed_base.rs`.
pub(crate) const BLIND_DOMAIN: u64 = 1;

/// Adds `r * modulus` (a 64-bit multiplier times an `LIMBS`-word modulus)
/// into the zero-extended scalar `k`, producing a blinded `LIMBS + 1`-word
/// scalar whose low bits differ from `k`'s on every call with a fresh seed,
/// but which is congruent to `k` modulo `modulus`.
pub(crate) fn blind_scalar<const LIMBS: usize>(
    k: &[u64; LIMBS],
    modulus: &[u64; LIMBS],
    r: u64,
) -> [u64; MAX_SCALAR_WORDS] {
    let mut rn = [0u64; MAX_SCALAR_WORDS];
    let mut carry = 0u64;
    for i in 0..LIMBS {
        let (w, c) = mac(0, modulus[i], r, carry);
        rn[i] = w;
        carry = c;
    }
    rn[LIMBS] = carry;

    let mut out = [0u64; MAX_SCALAR_WORDS];
    let mut carry = 0u64;
    for i in 0..LIMBS {
        let (w, c) = adc(k[i], rn[i], carry);
        out[i] = w;
        carry = c;
    }
    let (w, _) = adc(0, rn[LIMBS], carry);
    out[LIMBS] = w;
    out
}

/// Parses a big-endian byte string, no longer than `LIMBS * 8` bytes, into a
/// zero-extended `LIMBS`-word little-endian scalar.
pub(crate) fn parse_scalar<const LIMBS: usize>(bytes: &[u8]) -> Result<[u64; LIMBS]> {
    if bytes.len() > LIMBS * 8 {
        return Err(Error::InvalidValue);
    }
    let mut limbs = [0u64; LIMBS];
    // Right-align within an LIMBS*8-byte buffer, then read little-endian words.
    let mut padded = [0u8; MAX_SCALAR_WORDS * 8];
    let offset = LIMBS * 8 - bytes.len();
    padded[offset..offset + bytes.len()].copy_from_slice(bytes);
    for i in 0..LIMBS {
        let start = LIMBS * 8 - (i + 1) * 8;
        let mut word = [0u8; 8];
        word.copy_from_slice(&padded[start..start + 8]);
        limbs[i] = u64::from_be_bytes(word);
    }
    Ok(limbs)
}

/// Extracts signed window digits `d_i` (regular recoding, fixed width) from
/// a little-endian scalar of `num_words` words, returning them from most to
/// least significant.
///
/// `num_windows` must cover one extra window past the scalar's bit width:
/// each window's value can carry into the next (`value = window + carry`,
/// re-biased into `[-8, 8)`), and that chain can still be carrying out of
/// the window covering the scalar's top bit. The extra window has no bits
/// of its own (`window = 0`, since `word_idx >= num_words` there), so it
/// simply surfaces that terminal carry as its digit (0 or 1) instead of
/// dropping it.
fn recode_windows(
    words: &[u64; MAX_SCALAR_WORDS],
    num_words: usize,
    num_windows: usize,
) -> [i32; MAX_WINDOWS] {
    let mut digits = [0i32; MAX_WINDOWS];
    let mut carry = 0u32;
    for i in 0..num_windows {
        let bit_pos = i as u32 * WINDOW_BITS;
        let word_idx = (bit_pos / 64) as usize;
        let bit_off = bit_pos % 64;
        // A window can straddle two words when bit_off > 60; WINDOW_BITS=4
        // and bit_off is always a multiple of 4, so bit_off in {0,4,...,60}
        // never straddles a 64-bit boundary. No cross-word read needed.
        let window = if word_idx < num_words {
            ((words[word_idx] >> bit_off) & 0xf) as u32
        } else {
            0
        };

        let value = window + carry;
        // value in [0, 16]; threshold at 8 (= 2^(WINDOW_BITS-1)).
        let lt_mask = (((value as i32) - 8) >> 31) as u32; // all-ones if value < 8
        let ge_mask = !lt_mask;
        digits[i] = value as i32 - ((ge_mask & 16) as i32);
        carry = ge_mask & 1;
    }
    digits
}

/// Builds the multiple table `table[i] = (i + 1) * P`. Entry 0 is built by
/// plain conversion, entry 1 by doubling (adding `P` to itself would hit the
/// `ec_full_add` equal-points exceptional case); every later entry adds the
/// distinct, non-equal point `P` to the previous one, which never triggers
/// that case for a base point of large order.
fn build_multiple_table<const LIMBS: usize>(
    ctx: &MontContext<LIMBS>,
    p: &AffinePoint<LIMBS>,
) -> [ProjectivePoint<LIMBS>; TABLE_SIZE] {
    let base = ProjectivePoint::from_affine(ctx, p);
    let mut table = [base; TABLE_SIZE];
    table[1] = ec_full_double(ctx, &base);
    for i in 2..TABLE_SIZE {
        let (next, _) = ec_full_add(ctx, &table[i - 1], &base);
        table[i] = next;
    }
    table
}

/// Constant-time linear-scan select of `table[index]`, touching every entry.
fn select_from_table<const LIMBS: usize>(
    table: &[ProjectivePoint<LIMBS>; TABLE_SIZE],
    index: u32,
) -> ProjectivePoint<LIMBS> {
    let mut result = table[0];
    for (i, entry) in table.iter().enumerate() {
        let is_match = (i as u32).ct_eq(&index);
        result = ProjectivePoint::conditional_select(&result, entry, is_match);
    }
    result
}

/// `k * P` for a secret scalar `k` (big-endian bytes, at most `LIMBS * 8`
/// bytes — the caller zero-extends shorter scalars). `modulus_n` is the
/// curve's group order, same limb width as the field. `seed` drives the
/// deterministic blinding PRNG.
pub fn ec_scalar<const LIMBS: usize>(
    ctx: &MontContext<LIMBS>,
    modulus_n: &[u64; LIMBS],
    p: &AffinePoint<LIMBS>,
    k_bytes: &[u8],
    seed: u64,
) -> Result<AffinePoint<LIMBS>> {
    let mut k = parse_scalar::<LIMBS>(k_bytes)?;

    let mut rng = stream_from_seed(seed, BLIND_DOMAIN);
    let r = rng.next_u64();
    let mut blinded = blind_scalar(&k, modulus_n, r);
    k.zeroize();

    let num_words = LIMBS + 1;
    // +1 window beyond the blinded scalar's bit width to catch the signed
    // recoding's possible terminal carry (see `recode_windows`).
    let num_windows = num_words * 64 / WINDOW_BITS as usize + 1;
    let mut digits = recode_windows(&blinded, num_words, num_windows);
    blinded.zeroize();

    let table = build_multiple_table(ctx, p);

    let mut work = Workplace::new(ctx);
    for &d in digits[..num_windows].iter().rev() {
        for _ in 0..WINDOW_BITS {
            work.accumulator = ec_full_double(ctx, &work.accumulator);
        }
        let abs_d = d.unsigned_abs();
        let index = abs_d.saturating_sub(1);
        work.selected = select_from_table(&table, index);
        let is_zero_digit = Choice::from((abs_d == 0) as u8);
        let is_negative = Choice::from((d < 0) as u8);
        let negated = work.selected.negate(ctx);
        work.selected = ProjectivePoint::conditional_select(&work.selected, &negated, is_negative);
        let zero_point = ProjectivePoint::identity(ctx);
        work.selected = ProjectivePoint::conditional_select(&work.selected, &zero_point, is_zero_digit);
        let (sum, _needs_double) = ec_full_add(ctx, &work.accumulator, &work.selected);
        work.accumulator = sum;
    }
    digits.zeroize();

    Ok(crate::projective::ec_projective_to_affine(ctx, &work.accumulator))
}
