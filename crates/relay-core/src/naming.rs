//! Object and staging file names.
//!
//! Format: `<millisecond timestamp><32 hex chars from 16 random bytes>.<extension>`.
//! The same generator names staged scratch files and stored objects.

use chrono::Utc;

/// Number of random bytes mixed into every generated name.
const RANDOM_BYTES: usize = 16;

/// Generate a collision-resistant name with the given extension.
///
/// There is no uniqueness check; with 128 random bits per name collisions are
/// treated as impossible. Names are roughly time-ordered but no consumer may
/// rely on ordering.
pub fn generate_object_name(extension: &str) -> String {
    let random: [u8; RANDOM_BYTES] = rand::random();
    format!(
        "{}{}.{}",
        Utc::now().timestamp_millis(),
        hex::encode(random),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_has_timestamp_hex_and_extension() {
        let name = generate_object_name("jpg");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "jpg");

        let (timestamp, random) = stem.split_at(stem.len() - RANDOM_BYTES * 2);
        assert!(timestamp.parse::<i64>().unwrap() > 0);
        assert_eq!(random.len(), 32);
        assert!(random
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn names_are_distinct() {
        let a = generate_object_name("png");
        let b = generate_object_name("png");
        assert_ne!(a, b);
    }
}
