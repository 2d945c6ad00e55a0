//! Deterministic ordering keys.
//!
//! Attendance backfill needs a per-(player, event) order that is stable
//! across runs and across implementations, so it cannot use `std`'s
//! randomized `DefaultHasher`. The key is a polynomial rolling hash:
//!
//! ```text
//! h = 0
//! for each Unicode scalar value c of (player_id ++ event_id):
//!     h = h * 31 + c        (mod 2^32)
//! ```
//!
//! Ties are broken by event id, so the resulting order is total.

/// Rolling hash over Unicode scalar values, wrapping at 32 bits.
pub fn rolling_hash(input: &str) -> u32 {
    input.chars().fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(c as u32))
}

pub fn order_key(player_id: &str, event_id: &str) -> u32 {
    // equivalent to hashing the concatenation
    let h = rolling_hash(player_id);
    event_id.chars().fold(h, |h, c| h.wrapping_mul(31).wrapping_add(c as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(rolling_hash(""), 0);
        assert_eq!(rolling_hash("a"), 97);
        assert_eq!(rolling_hash("ab"), 97 * 31 + 98);
        // wraps instead of overflowing
        assert_eq!(rolling_hash("hello world, this is long"), {
            let mut h: u32 = 0;
            for c in "hello world, this is long".chars() {
                h = h.wrapping_mul(31).wrapping_add(c as u32);
            }
            h
        });
    }

    #[test]
    fn test_order_key_hashes_concatenation() {
        assert_eq!(order_key("player_1", "event_7"), rolling_hash("player_1event_7"));
        assert_eq!(order_key("שחקן", "e"), rolling_hash("שחקןe"));
    }
}
