//! Opaque record identifiers.
//!
//! Habits and accounts get short base36 hash ids (`hb-4k9za1`,
//! `usr-0x2pqd`): a SHA256 over the record's identifying content and
//! creation instant, truncated to a handful of characters. Six base36
//! digits cover about two billion values, plenty for a personal tracker;
//! the nonce gives callers a retry path on the off chance of a collision.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use sha2::{Digest, Sha256};

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Id length in base36 characters, excluding the prefix.
pub const ID_LENGTH: usize = 6;

/// Prefix per entity kind. The habit prefix is the default; projects can
/// override it at init time.
pub mod id_prefix {
    pub const HABIT: &str = "hb";
    pub const USER: &str = "usr";
}

/// Encodes bytes as big-endian base36, zero-padded or truncated (keeping
/// the low digits) to exactly `length` characters.
pub fn encode_base36(data: &[u8], length: usize) -> String {
    let base = BigUint::from(36u32);
    let mut num = BigUint::from_bytes_be(data);

    let mut digits = Vec::with_capacity(length);
    while !num.is_zero() {
        let digit = (&num % &base).to_usize().unwrap_or(0);
        digits.push(ALPHABET[digit] as char);
        num /= &base;
    }

    // Digits came out least-significant first.
    let s: String = digits.iter().rev().collect();
    match s.len() {
        n if n > length => s[n - length..].to_owned(),
        _ => format!("{s:0>length$}"),
    }
}

/// Builds an id like `hb-4k9za1` from a seed (whatever identifies the
/// record at creation: name plus owner, or an email), the creation
/// instant, and a collision-retry nonce.
pub fn generate_id(prefix: &str, seed: &str, timestamp: DateTime<Utc>, nonce: u32) -> String {
    let content = format!(
        "{}|{}|{}",
        seed,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        nonce
    );
    let hash = Sha256::digest(content.as_bytes());

    // 4 bytes carry 32 bits, slightly more entropy than 6 base36 digits.
    let short = encode_base36(&hash[..4], ID_LENGTH);
    format!("{prefix}-{short}")
}
