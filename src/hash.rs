//! Legacy hash scheme.
//!
//! Historical credentials were produced as `md5(salt ‖ password)` rendered as
//! lowercase hex. The scheme is a compatibility contract: any change to the
//! algorithm, encoding or concatenation order breaks every legacy login.

use alloc::vec::Vec;
use md5::{Digest, Md5};
use zeroize::Zeroizing;

/// Output length of the legacy hash, in characters.
pub const LEGACY_HASH_LENGTH: usize = 32;

/// A fixed-output-length, one-way hash used by legacy credentials.
pub trait LegacyHasher: Send + Sync {
    /// Length of every string returned by [`LegacyHasher::hash`].
    fn output_len(&self) -> usize;

    /// Hashes `input` into its stored string form.
    fn hash(&self, input: &[u8]) -> String;
}

/// Lowercase hex MD5.
#[derive(Clone, Copy, Debug, Default)]
pub struct Md5Hex;

impl LegacyHasher for Md5Hex {
    fn output_len(&self) -> usize {
        LEGACY_HASH_LENGTH
    }

    fn hash(&self, input: &[u8]) -> String {
        hex::encode(Md5::digest(input))
    }
}

/// Hashes `salt ‖ password` with `hasher`.
///
/// The salt goes first. The concatenated buffer is wiped once hashed.
pub fn salted_hash<H>(hasher: &H, salt: &str, password: &str) -> String
where
    H: LegacyHasher + ?Sized,
{
    let mut input = Zeroizing::new(Vec::with_capacity(salt.len() + password.len()));
    input.extend_from_slice(salt.as_bytes());
    input.extend_from_slice(password.as_bytes());

    hasher.hash(&input)
}

/// Whether `hash` has the shape of a hash produced by `hasher`.
///
/// Detection is purely by byte length.
pub fn is_legacy_format<H>(hash: &str, hasher: &H) -> bool
where
    H: LegacyHasher + ?Sized,
{
    hash.len() == hasher.output_len()
}

#[cfg(test)]
mod test {
    use super::{is_legacy_format, salted_hash, LegacyHasher, Md5Hex, LEGACY_HASH_LENGTH};

    #[test]
    fn md5_known_vectors() {
        assert_eq!(Md5Hex.hash(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(Md5Hex.hash(b"hunter2"), "2ab96390c7dbe3439de74d0c9b0b1767");
    }

    #[test]
    fn salt_is_prepended() {
        let hash = salted_hash(&Md5Hex, "pepper", "hunter2");
        assert_eq!(hash, "946ccf1cf1cfccb6bce540c3b83432f7");

        // Reversed order must not collide with historical hashes
        assert_ne!(salted_hash(&Md5Hex, "hunter2", "pepper"), hash);
    }

    #[test]
    fn empty_password_hashes_salt_alone() {
        assert_eq!(
            salted_hash(&Md5Hex, "pepper", ""),
            "b3f952d5d9adea6f63bee9d4c6fceeaa"
        );
    }

    #[test]
    fn output_length_is_pinned() {
        assert_eq!(Md5Hex.output_len(), LEGACY_HASH_LENGTH);
        assert_eq!(Md5Hex.hash(b"anything").len(), LEGACY_HASH_LENGTH);
    }

    #[test]
    fn format_detection_by_length() {
        assert!(is_legacy_format("946ccf1cf1cfccb6bce540c3b83432f7", &Md5Hex));
        assert!(!is_legacy_format("946ccf1cf1cfccb6bce540c3b83432f", &Md5Hex));
        assert!(!is_legacy_format(
            "$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie",
            &Md5Hex
        ));
        assert!(!is_legacy_format("", &Md5Hex));
    }
}
