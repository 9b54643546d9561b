//! Tier numbering and the id-prefix convention.
//!
//! A question id has the form `T<NN><suffix>`: a literal `T`, the tier as two
//! zero-padded digits, then anything (usually `-<number>`). After the catalog is
//! loaded this prefix is the only link between an id and its tier.

use std::ops::RangeInclusive;

pub const MIN_TIER: u8 = 1;
pub const MAX_TIER: u8 = 15;

pub fn tiers() -> RangeInclusive<u8> {
    MIN_TIER..=MAX_TIER
}

/// `2` -> `"T02"`.
pub fn tier_prefix(tier: u8) -> String {
    format!("T{:02}", tier)
}

/// Tier encoded in an id's prefix, or `None` when the id does not start with
/// `T` followed by two ASCII digits.
pub fn tier_of(id: &str) -> Option<u8> {
    match id.as_bytes() {
        &[b'T', tens @ b'0'..=b'9', ones @ b'0'..=b'9', ..] => {
            Some((tens - b'0') * 10 + (ones - b'0'))
        }
        _ => None,
    }
}

pub fn in_tier(id: &str, tier: u8) -> bool {
    tier_of(id) == Some(tier)
}
