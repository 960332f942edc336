//! Commenter identity anonymization.

use sha2::{Digest, Sha256};

/// One-way digest of a raw commenter identity token, as lowercase hex.
///
/// Deterministic so the same commenter maps to the same hash across
/// cycles, which is what downstream dedup and per-commenter aggregation
/// rely on. `None` passes through: a comment with no visible author is
/// stored with no hash.
///
/// Note: the digest is unsalted, matching the upstream data contract.
/// Low-entropy tokens are therefore correlatable across datasets by
/// anyone who can enumerate them.
pub fn commenter_hash(token: Option<&str>) -> Option<String> {
    token.map(|t| {
        let mut hasher = Sha256::new();
        hasher.update(t.as_bytes());
        hex::encode(hasher.finalize())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_token_passes_through() {
        assert_eq!(commenter_hash(None), None);
    }

    #[test]
    fn deterministic() {
        assert_eq!(commenter_hash(Some("U1")), commenter_hash(Some("U1")));
        assert_ne!(commenter_hash(Some("U1")), commenter_hash(Some("U2")));
    }

    #[test]
    fn output_is_not_the_token() {
        let h = commenter_hash(Some("U1")).unwrap();
        assert_ne!(h, "U1");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn known_vector() {
        // sha256("U1")
        assert_eq!(
            commenter_hash(Some("U1")).unwrap(),
            "316ca0efda6296d8f2c11d1e20890d220cec4266a0c16fbbef324c004688468a"
        );
    }
}
