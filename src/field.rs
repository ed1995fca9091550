//! Montgomery field arithmetic, generic over the limb count.
//!
//! A [`MontContext`] is a runtime-constructed, immutable description of a
//! fixed-width prime modulus (CIOS Montgomery reduction parameters); a
//! [`FieldElement`] is an opaque residue stored in Montgomery form relative
//! to some context. The same code path serves P-256 (4 limbs) and P-521
//! (9 limbs) — see `src/curves.rs` for the concrete parameter tables.

use crate::error::{Error, Result};
use crate::limb::{adc, less_than, mac, sub_n};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Upper bound on limbs supported by the CIOS scratch buffers: large enough
/// for P-521's 9 limbs, with headroom for the double-wide reduction buffer
/// used by [`MontContext::mont_reduce`].
const MAX_LIMBS: usize = 9;
const WIDE_BUF: usize = 2 * MAX_LIMBS + 2;

/// An element of a prime field, stored in Montgomery form: `words` represents
/// `x * R mod p` where `R = 2^(64 * LIMBS)`.
#[derive(Clone, Copy, Debug)]
pub struct FieldElement<const LIMBS: usize> {
    pub(crate) words: [u64; LIMBS],
}

impl<const LIMBS: usize> FieldElement<LIMBS> {
    pub(crate) const fn from_words(words: [u64; LIMBS]) -> Self {
        Self { words }
    }
}

impl<const LIMBS: usize> ConditionallySelectable for FieldElement<LIMBS> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut words = [0u64; LIMBS];
        for i in 0..LIMBS {
            words[i] = u64::conditional_select(&a.words[i], &b.words[i], choice);
        }
        Self { words }
    }
}

impl<const LIMBS: usize> ConstantTimeEq for FieldElement<LIMBS> {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut acc = 1u8;
        for i in 0..LIMBS {
            acc &= self.words[i].ct_eq(&other.words[i]).unwrap_u8();
        }
        Choice::from(acc)
    }
}

impl<const LIMBS: usize> PartialEq for FieldElement<LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<const LIMBS: usize> Eq for FieldElement<LIMBS> {}

/// Immutable Montgomery-reduction parameters for a fixed-width odd prime
/// modulus `p`.
#[derive(Clone, Copy, Debug)]
pub struct MontContext<const LIMBS: usize> {
    modulus: [u64; LIMBS],
    /// `R mod p`, i.e. the Montgomery encoding of 1.
    r_mod_p: [u64; LIMBS],
    /// `R^2 mod p`, used to move values into Montgomery form.
    r2_mod_p: [u64; LIMBS],
    /// `-p^-1 mod 2^64`.
    n0prime: u64,
    /// `p - 2`, the public Fermat inversion exponent.
    exponent: [u64; LIMBS],
    /// Wire byte length of an encoded field element (may be less than
    /// `LIMBS * 8`, e.g. P-521 uses 9 limbs but a 66-byte encoding).
    byte_len: usize,
}

impl<const LIMBS: usize> MontContext<LIMBS> {
    /// Builds a context from a big-endian modulus encoding.
    ///
    /// `byte_len` is the wire length of field elements for this modulus;
    /// `modulus_be` must be no longer than `LIMBS * 8` bytes.
    pub fn new(modulus_be: &[u8], byte_len: usize) -> Result<Self> {
        if modulus_be.len() > LIMBS * 8 || modulus_be.is_empty() {
            return Err(Error::InvalidValue);
        }
        let modulus = be_bytes_to_limbs::<LIMBS>(modulus_be)?;
        if modulus[0] & 1 == 0 {
            // p must be odd for Montgomery arithmetic.
            return Err(Error::InvalidValue);
        }
        if modulus[LIMBS - 1] == 0 {
            return Err(Error::InvalidValue);
        }

        let n0prime = neg_inv_mod_2_64(modulus[0]);

        // R mod p: double 1, LIMBS*64 times, reducing mod p each step.
        let mut r_mod_p = [0u64; LIMBS];
        r_mod_p[0] = 1;
        for _ in 0..(LIMBS * 64) {
            r_mod_p = double_mod(&r_mod_p, &modulus);
        }

        // R^2 mod p = (R mod p) doubled LIMBS*64 more times.
        let mut r2_mod_p = r_mod_p;
        for _ in 0..(LIMBS * 64) {
            r2_mod_p = double_mod(&r2_mod_p, &modulus);
        }

        let mut two = [0u64; LIMBS];
        two[0] = 2;
        let exponent = sub_n(&modulus, &two).0;

        Ok(Self {
            modulus,
            r_mod_p,
            r2_mod_p,
            n0prime,
            exponent,
            byte_len,
        })
    }

    /// Wire byte length of an encoded field element for this modulus.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// The additive identity, in Montgomery form.
    pub fn zero(&self) -> FieldElement<LIMBS> {
        FieldElement::from_words([0u64; LIMBS])
    }

    /// The multiplicative identity, in Montgomery form.
    pub fn one(&self) -> FieldElement<LIMBS> {
        FieldElement::from_words(self.r_mod_p)
    }

    /// Encodes a small constant (e.g. `3`) as a field element.
    pub fn set_small(&self, k: u64) -> FieldElement<LIMBS> {
        let mut word = [0u64; LIMBS];
        word[0] = k;
        self.mul(&FieldElement::from_words(word), &FieldElement::from_words(self.r2_mod_p))
    }

    /// Parses a big-endian byte string as an integer `< p` and converts it
    /// to Montgomery form.
    pub fn encode(&self, x_be: &[u8]) -> Result<FieldElement<LIMBS>> {
        if x_be.len() != self.byte_len {
            return Err(Error::NotEnoughData);
        }
        let limbs = be_bytes_to_limbs::<LIMBS>(x_be)?;
        if !less_than(&limbs, &self.modulus) {
            return Err(Error::InvalidValue);
        }
        Ok(self.mul(&FieldElement::from_words(limbs), &FieldElement::from_words(self.r2_mod_p)))
    }

    /// Converts a Montgomery-form field element back to big-endian bytes,
    /// zero-padded to `byte_len`.
    pub fn decode(&self, a: &FieldElement<LIMBS>, out_be: &mut [u8]) -> Result<()> {
        if out_be.len() != self.byte_len {
            return Err(Error::NotEnoughData);
        }
        let canonical = self.mont_reduce(&a.words, &[0u64; LIMBS]);
        limbs_to_be_bytes(&canonical, out_be);
        Ok(())
    }

    /// `a + b mod p`.
    pub fn add(&self, a: &FieldElement<LIMBS>, b: &FieldElement<LIMBS>) -> FieldElement<LIMBS> {
        let (sum, carry) = crate::limb::add_n(&a.words, &b.words);
        // sum may be p <= sum < 2p (+ a possible extra bit in `carry`).
        let (sub, borrow) = sub_n(&sum, &self.modulus);
        let keep_sum = still_negative(carry, borrow);
        FieldElement::from_words(select_limbs(&sum, &sub, keep_sum))
    }

    /// `a - b mod p`.
    pub fn sub(&self, a: &FieldElement<LIMBS>, b: &FieldElement<LIMBS>) -> FieldElement<LIMBS> {
        let (diff, borrow) = sub_n(&a.words, &b.words);
        let (restored, _) = crate::limb::add_n(&diff, &self.modulus);
        // borrow is all-ones (keep restored) or all-zeros (keep diff).
        FieldElement::from_words(select_limbs(&restored, &diff, borrow))
    }

    /// `-a mod p`.
    pub fn neg(&self, a: &FieldElement<LIMBS>) -> FieldElement<LIMBS> {
        self.sub(&self.zero(), a)
    }

    /// `a * b mod p` (CIOS Montgomery multiplication).
    pub fn mul(&self, a: &FieldElement<LIMBS>, b: &FieldElement<LIMBS>) -> FieldElement<LIMBS> {
        FieldElement::from_words(self.mont_reduce_product(&a.words, &b.words))
    }

    /// `a^2 mod p`.
    pub fn sqr(&self, a: &FieldElement<LIMBS>) -> FieldElement<LIMBS> {
        self.mul(a, a)
    }

    /// `a^-1 mod p` via Fermat's little theorem (`a^(p-2)`), or zero if
    /// `a` is zero. The exponent is public, so branching on its bits does
    /// not leak anything about the (potentially secret) base `a`.
    pub fn inv(&self, a: &FieldElement<LIMBS>) -> FieldElement<LIMBS> {
        let mut result = self.one();
        for limb_idx in (0..LIMBS).rev() {
            let limb = self.exponent[limb_idx];
            for bit in (0..64).rev() {
                result = self.sqr(&result);
                if (limb >> bit) & 1 == 1 {
                    result = self.mul(&result, a);
                }
            }
        }
        result
    }

    /// Constant-time zero test.
    pub fn is_zero(&self, a: &FieldElement<LIMBS>) -> Choice {
        a.ct_eq(&self.zero())
    }

    /// Constant-time equality test.
    pub fn equal(&self, a: &FieldElement<LIMBS>, b: &FieldElement<LIMBS>) -> Choice {
        a.ct_eq(b)
    }

    /// Montgomery-reduce `(lo, hi)` — used to pull a value out of
    /// Montgomery form when `hi` is zero, or to finish a double-wide
    /// product when `hi` is the result's upper half.
    fn mont_reduce(&self, lo: &[u64; LIMBS], hi: &[u64; LIMBS]) -> [u64; LIMBS] {
        // Treat (hi:lo) as a 2*LIMBS-word value and run the CIOS reduction
        // loop directly, reusing the product-reduction core with an
        // already-expanded input (equivalent to `mont_reduce_product` with
        // `b` chosen so that the product equals (hi:lo); simplest is to
        // inline the reduction-only half below).
        let mut t = [0u64; WIDE_BUF];
        t[..LIMBS].copy_from_slice(lo);
        t[LIMBS..LIMBS * 2].copy_from_slice(hi);
        self.reduce_wide(&mut t)
    }

    /// `a * b`, fully reduced back into Montgomery form.
    fn mont_reduce_product(&self, a: &[u64; LIMBS], b: &[u64; LIMBS]) -> [u64; LIMBS] {
        let mut t = [0u64; MAX_LIMBS + 2];
        for i in 0..LIMBS {
            let mut carry = 0u64;
            for j in 0..LIMBS {
                let (w, c) = mac(t[j], a[j], b[i], carry);
                t[j] = w;
                carry = c;
            }
            let (w, c) = adc(t[LIMBS], carry, 0);
            t[LIMBS] = w;
            t[LIMBS + 1] += c;

            let m = t[0].wrapping_mul(self.n0prime);
            let (_, mut carry) = mac(t[0], m, self.modulus[0], 0);
            for j in 1..LIMBS {
                let (w, c) = mac(t[j], m, self.modulus[j], carry);
                t[j - 1] = w;
                carry = c;
            }
            let (w, c) = adc(t[LIMBS], carry, 0);
            t[LIMBS - 1] = w;
            t[LIMBS] = t[LIMBS + 1] + c;
            t[LIMBS + 1] = 0;
        }
        self.finish_reduction(&t)
    }

    /// CIOS reduction of an already-formed 2*LIMBS-word value in `t`
    /// (`t[0..2*LIMBS]`), used by [`Self::mont_reduce`].
    fn reduce_wide(&self, t: &mut [u64; WIDE_BUF]) -> [u64; LIMBS] {
        for i in 0..LIMBS {
            let m = t[i].wrapping_mul(self.n0prime);
            let mut carry = 0u64;
            for j in 0..LIMBS {
                let (w, c) = mac(t[i + j], m, self.modulus[j], carry);
                t[i + j] = w;
                carry = c;
            }
            // Propagate carry into the remaining higher words up through
            // `t[LIMBS * 2]` (the last word the caller reads). Fixed
            // iteration count bounded by `i` and `LIMBS` (both public loop
            // bounds, not data) rather than `while carry != 0`, which would
            // make the number of steps depend on the reduced value itself.
            for k in (i + LIMBS)..=(LIMBS * 2) {
                let (w, c) = adc(t[k], carry, 0);
                t[k] = w;
                carry = c;
            }
        }
        let mut result = [0u64; LIMBS];
        result.copy_from_slice(&t[LIMBS..LIMBS * 2]);
        let (sub, borrow) = sub_n(&result, &self.modulus);
        let top_carry = t[LIMBS * 2];
        let keep = still_negative(top_carry, borrow);
        select_limbs(&result, &sub, keep)
    }

    fn finish_reduction(&self, t: &[u64; MAX_LIMBS + 2]) -> [u64; LIMBS] {
        let mut result = [0u64; LIMBS];
        result.copy_from_slice(&t[..LIMBS]);
        let extra = t[LIMBS];
        let (sub, borrow) = sub_n(&result, &self.modulus);
        let keep = still_negative(extra, borrow);
        select_limbs(&result, &sub, keep)
    }
}

/// `true`-as-bitmask logic for "the tentative subtraction underflowed, so
/// the un-subtracted value was already canonical": `extra` is the overflow
/// word (0 or 1) above the `LIMBS`-word result, `borrow` is the sub-borrow
/// mask from subtracting the modulus. Returns an all-ones mask when the
/// original (summed) value should be kept, all-zeros when the subtracted
/// value is the canonical one.
#[inline]
fn still_negative(extra: u64, borrow: u64) -> u64 {
    let borrow_bit = borrow & 1;
    let diff_extra = extra.wrapping_sub(borrow_bit);
    // top bit set iff extra=0, borrow_bit=1 (wrapped to u64::MAX).
    0u64.wrapping_sub(diff_extra >> 63)
}

#[inline]
fn select_limbs<const LIMBS: usize>(a: &[u64; LIMBS], b: &[u64; LIMBS], mask_keep_a: u64) -> [u64; LIMBS] {
    let mut out = [0u64; LIMBS];
    for i in 0..LIMBS {
        out[i] = (a[i] & mask_keep_a) | (b[i] & !mask_keep_a);
    }
    out
}

/// Doubles `a` modulo `p`, both `LIMBS`-word little-endian integers in
/// normal (non-Montgomery) form.
fn double_mod<const LIMBS: usize>(a: &[u64; LIMBS], modulus: &[u64; LIMBS]) -> [u64; LIMBS] {
    let (sum, carry) = crate::limb::add_n(a, a);
    let (sub, borrow) = sub_n(&sum, modulus);
    let keep = still_negative(carry, borrow);
    select_limbs(&sum, &sub, keep)
}

/// `-p0^-1 mod 2^64` via a fixed Newton-iteration chain (Hensel lifting of
/// the inverse of an odd word; six doublings of precision suffice to go
/// from 1 correct bit to 64).
fn neg_inv_mod_2_64(p0: u64) -> u64 {
    let mut inv = 1u64;
    for _ in 0..6 {
        inv = inv.wrapping_mul(2u64.wrapping_sub(p0.wrapping_mul(inv)));
    }
    inv.wrapping_neg()
}

fn be_bytes_to_limbs<const LIMBS: usize>(bytes: &[u8]) -> Result<[u64; LIMBS]> {
    if bytes.len() > LIMBS * 8 {
        return Err(Error::InvalidValue);
    }
    let mut limbs = [0u64; LIMBS];
    // Right-align the big-endian bytes, then read 8-byte little-endian
    // limbs from the least-significant end.
    let mut padded = [0u8; MAX_LIMBS * 8];
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

fn limbs_to_be_bytes<const LIMBS: usize>(limbs: &[u64; LIMBS], out: &mut [u8]) {
    let mut padded = [0u8; MAX_LIMBS * 8];
    for i in 0..LIMBS {
        let start = LIMBS * 8 - (i + 1) * 8;
        padded[start..start + 8].copy_from_slice(&limbs[i].to_be_bytes());
    }
    let offset = LIMBS * 8 - out.len();
    out.copy_from_slice(&padded[offset..offset + out.len()]);
}
