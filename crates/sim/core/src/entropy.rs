//! Deterministic randomness derivation.
//!
//! Every random-looking quantity in the engine is derived from exactly two
//! scalars hashed out of `(xp, entropy)`, or `(xp, health, entropy)` for
//! per-turn battle freshness. The entropy value itself is supplied by the
//! caller from authoritative chain state and is never generated or validated
//! here.
//!
//! # Determinism
//!
//! Given the same inputs, `derive` must produce the same `(rnd1, rnd2)` pair
//! on every platform. The byte layout fed to the hash and the 128-bit split of
//! the digest are normative; golden-vector tests pin both.

use sha2::{Digest, Sha256};

/// Modulus used to split the 256-bit digest into two 128-bit scalars.
const SPLIT_MODULUS: u128 = u128::MAX; // 2^128 - 1

/// Opaque randomness source supplied by chain state.
///
/// Stored as a 256-bit big-endian scalar, wide enough for any field element
/// the authoritative chain produces. The engine only ever hashes it; it never
/// inspects, validates, or transports it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entropy([u8; 32]);

impl Entropy {
    /// The all-zero entropy value. Forecasting treats this as "no entropy
    /// published yet" and returns empty previews.
    pub const ZERO: Self = Self([0; 32]);

    /// Wraps a raw 256-bit big-endian value.
    pub const fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Builds an entropy value from a u128 (zero-extended). Mostly useful in
    /// tests and tools; real entropy arrives as full-width chain words.
    pub const fn from_u128(value: u128) -> Self {
        let v = value.to_be_bytes();
        let mut bytes = [0u8; 32];
        let mut i = 0;
        while i < 16 {
            bytes[16 + i] = v[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Raw big-endian bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// True if no entropy has been published for this decision.
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 32]
    }
}

impl core::fmt::Debug for Entropy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Full 32-byte dumps drown logs; the tail identifies the value.
        write!(
            f,
            "Entropy(..{:02x}{:02x}{:02x}{:02x})",
            self.0[28], self.0[29], self.0[30], self.0[31]
        )
    }
}

/// The two derived scalars every resolver consumes.
///
/// `rnd1` seeds identity-like quantities (classification, encounter id,
/// special-name fragments); `rnd2` seeds positional ones (attack location,
/// dodge roll, discovery rolls). Call sites bind these to named locals so the
/// scalar-to-step assignment stays explicit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rands {
    pub rnd1: u128,
    pub rnd2: u128,
}

/// Derive the randomness pair for one exploration decision.
///
/// `H = SHA-256( be64(xp) ‖ entropy )`, then `rnd1 = H mod (2^128 − 1)` and
/// `rnd2 = H div (2^128 − 1)`, truncated to 128 bits.
pub fn derive(xp: u32, entropy: &Entropy) -> Rands {
    let mut hasher = Sha256::new();
    hasher.update(u64::from(xp).to_be_bytes());
    hasher.update(entropy.as_bytes());
    split_digest(hasher.finalize().into())
}

/// Combat variant folding in current health for per-turn freshness.
///
/// `H = SHA-256( be64(xp) ‖ be64(health) ‖ entropy )`, split as in [`derive`].
pub fn derive_with_health(xp: u32, health: u32, entropy: &Entropy) -> Rands {
    let mut hasher = Sha256::new();
    hasher.update(u64::from(xp).to_be_bytes());
    hasher.update(u64::from(health).to_be_bytes());
    hasher.update(entropy.as_bytes());
    split_digest(hasher.finalize().into())
}

/// Split a 256-bit digest `H = hi·2^128 + lo` by `M = 2^128 − 1`.
///
/// Because `2^128 ≡ 1 (mod M)`:
/// - `H mod M = (hi + lo) mod M`
/// - `H div M = hi + (hi + lo) div M`
///
/// Both are computed in plain u128 arithmetic; the quotient is truncated to
/// 128 bits, which is unobservable below probability 2^-128.
fn split_digest(digest: [u8; 32]) -> Rands {
    let mut hi_bytes = [0u8; 16];
    let mut lo_bytes = [0u8; 16];
    hi_bytes.copy_from_slice(&digest[..16]);
    lo_bytes.copy_from_slice(&digest[16..]);
    let hi = u128::from_be_bytes(hi_bytes);
    let lo = u128::from_be_bytes(lo_bytes);

    let (sum, carry) = hi.overflowing_add(lo);

    // hi + lo <= 2M, so one reduction step suffices for the remainder.
    let (folded, quotient_steps) = if carry {
        // Real sum is 2^128 + sum ≡ sum + 1 (mod M), and it always clears M
        // at least once; it clears it twice iff sum + 1 >= M.
        let folded = sum + 1; // sum <= M - 1 here, so this cannot overflow
        if folded >= SPLIT_MODULUS {
            (folded - SPLIT_MODULUS, 2u128)
        } else {
            (folded, 1u128)
        }
    } else if sum == SPLIT_MODULUS {
        (0, 1)
    } else {
        (sum, 0)
    };

    Rands {
        rnd1: folded,
        rnd2: hi.wrapping_add(quotient_steps),
    }
}
