use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Punchcard PIN hashing.
///
/// Each credential stores a per-employee random salt next to a SHA-256
/// digest of the PIN. The digest input is the UTF-8 bytes of the PIN string
/// followed immediately by the raw salt bytes; verification must recompute
/// with the same order.
///
/// A single hash pass over a 4-digit space is not a meaningful obstacle to
/// an offline attacker; the attempt throttle in [`crate::rate_limit`] is
/// the control that matters here.

pub const SALT_LEN: usize = 16;
pub const HASH_LEN: usize = 32;

/// Generate a fresh credential salt from the OS CSPRNG.
///
/// Called on every credential write; salts are never reused, even when an
/// employee is reset to the same PIN value.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Hash a PIN with the given salt using SHA-256.
pub fn hash_pin(pin: &str, salt: &[u8]) -> [u8; HASH_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(pin.as_bytes());
    hasher.update(salt);
    hasher.finalize().into()
}

/// Constant-time comparison to prevent timing attacks.
///
/// Differences are OR-accumulated across every byte position; the result is
/// only inspected after the loop, so the time taken does not depend on where
/// the first mismatch sits.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let salt = [7u8; SALT_LEN];
        assert_eq!(hash_pin("1234", &salt), hash_pin("1234", &salt));
    }

    #[test]
    fn test_hash_depends_on_pin_and_salt() {
        let salt_a = [1u8; SALT_LEN];
        let salt_b = [2u8; SALT_LEN];
        assert_ne!(hash_pin("1234", &salt_a), hash_pin("4321", &salt_a));
        assert_ne!(hash_pin("1234", &salt_a), hash_pin("1234", &salt_b));
    }

    #[test]
    fn test_input_order_is_pin_then_salt() {
        // The digest input is PIN bytes first, salt bytes second.
        let salt = *b"0123456789abcdef";
        let mut hasher = Sha256::new();
        hasher.update(b"7777");
        hasher.update(salt);
        let expected: [u8; HASH_LEN] = hasher.finalize().into();
        assert_eq!(hash_pin("7777", &salt), expected);
    }

    #[test]
    fn test_round_trip_every_pin() {
        // All 10,000 possible PINs verify against their own digest.
        let salt = generate_salt();
        for n in 0..10_000 {
            let pin = format!("{:04}", n);
            let digest = hash_pin(&pin, &salt);
            assert!(constant_time_eq(&digest, &hash_pin(&pin, &salt)));
        }
    }

    #[test]
    fn test_every_other_pin_mismatches() {
        let salt = generate_salt();
        let stored = hash_pin("1234", &salt);
        for n in 0..10_000 {
            let pin = format!("{:04}", n);
            if pin != "1234" {
                assert!(!constant_time_eq(&stored, &hash_pin(&pin, &salt)));
            }
        }
    }

    #[test]
    fn test_fresh_salts_differ() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn test_constant_time_eq_equal() {
        assert!(constant_time_eq(&[0xaa; 32], &[0xaa; 32]));
        assert!(constant_time_eq(&[], &[]));
    }

    #[test]
    fn test_constant_time_eq_mismatch_at_any_position() {
        let base = [0x55u8; 32];
        for pos in [0usize, 15, 31] {
            let mut other = base;
            other[pos] ^= 0x01;
            assert!(!constant_time_eq(&base, &other));
        }
    }

    #[test]
    fn test_constant_time_eq_length_mismatch() {
        // A matching prefix must not make differently-sized inputs equal.
        assert!(!constant_time_eq(&[1, 2, 3], &[1, 2, 3, 4]));
        assert!(!constant_time_eq(&[1, 2, 3, 4], &[1, 2, 3]));
    }
}
