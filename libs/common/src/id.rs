use ulid::Ulid;

/// Generates a new ULID-based ID with the given prefix.
///
/// # Examples
/// ```
/// let id = odyssey_common::id::prefixed_ulid("sub");
/// assert!(id.starts_with("sub_"));
/// ```
pub fn prefixed_ulid(prefix: &str) -> String {
    format!("{}_{}", prefix, Ulid::new())
}

/// Well-known ID prefixes.
pub mod prefix {
    /// Live dashboard connection.
    pub const SUBSCRIBER: &str = "sub";
    /// Producer-side ingest stream.
    pub const INGEST: &str = "ing";
    /// Simulated drone identity.
    pub const DRONE: &str = "drn";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_ulid_format() {
        let id = prefixed_ulid("sub");
        assert!(id.starts_with("sub_"));
        // ULID is 26 chars, plus prefix + underscore
        assert_eq!(id.len(), 4 + 26);
    }

    #[test]
    fn test_uniqueness() {
        let a = prefixed_ulid(prefix::DRONE);
        let b = prefixed_ulid(prefix::DRONE);
        assert_ne!(a, b);
    }
}
