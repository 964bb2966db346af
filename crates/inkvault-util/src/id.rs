//! ULID-based identifier generation with prefixes.
//!
//! Identifiers in inkvault follow the pattern `prefix_ulid`, for example
//! `cha_01HQXYZ...` for chapters and `ver_01HQXYZ...` for versions.
//! The ULID's timestamp component means ids of the same kind sort by
//! creation time (down to millisecond precision).

use ulid::Ulid;

/// Known identifier prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPrefix {
    Chapter,
    Version,
}

impl IdPrefix {
    /// Get the string prefix for this identifier type.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdPrefix::Chapter => "cha",
            IdPrefix::Version => "ver",
        }
    }

    /// Parse a prefix from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cha" => Some(IdPrefix::Chapter),
            "ver" => Some(IdPrefix::Version),
            _ => None,
        }
    }
}

/// Identifier generation and parsing utilities.
pub struct Identifier;

impl Identifier {
    /// Generate a new ascending identifier (newer = larger).
    pub fn generate(prefix: IdPrefix) -> String {
        let ulid = Ulid::new();
        format!("{}_{}", prefix.as_str(), ulid.to_string().to_lowercase())
    }

    /// Generate an identifier with a specific ULID (for testing or imports).
    pub fn with_ulid(prefix: IdPrefix, ulid: Ulid) -> String {
        format!("{}_{}", prefix.as_str(), ulid.to_string().to_lowercase())
    }

    /// Parse an identifier into its prefix and ULID parts.
    pub fn parse(id: &str) -> Option<(IdPrefix, Ulid)> {
        let parts: Vec<&str> = id.splitn(2, '_').collect();
        if parts.len() != 2 {
            return None;
        }

        let prefix = IdPrefix::parse(parts[0])?;
        let ulid = Ulid::from_string(parts[1]).ok()?;
        Some((prefix, ulid))
    }

    /// Check if an identifier has the expected prefix.
    pub fn has_prefix(id: &str, prefix: IdPrefix) -> bool {
        id.starts_with(prefix.as_str()) && id.chars().nth(prefix.as_str().len()) == Some('_')
    }

    /// Generate a chapter ID.
    pub fn chapter() -> String {
        Self::generate(IdPrefix::Chapter)
    }

    /// Generate a version ID.
    pub fn version() -> String {
        Self::generate(IdPrefix::Version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let id = Identifier::generate(IdPrefix::Chapter);
        assert!(id.starts_with("cha_"));
        assert_eq!(id.len(), 30); // "cha_" (4) + ULID (26)
    }

    #[test]
    fn test_ascending_order() {
        let id1 = Identifier::generate(IdPrefix::Version);
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = Identifier::generate(IdPrefix::Version);
        assert!(id1 < id2, "ids should increase over time");
    }

    #[test]
    fn test_parse_id() {
        let id = Identifier::version();
        let (prefix, _ulid) = Identifier::parse(&id).unwrap();
        assert_eq!(prefix, IdPrefix::Version);
    }

    #[test]
    fn test_has_prefix() {
        let id = Identifier::chapter();
        assert!(Identifier::has_prefix(&id, IdPrefix::Chapter));
        assert!(!Identifier::has_prefix(&id, IdPrefix::Version));
    }

    #[test]
    fn test_has_prefix_without_underscore() {
        assert!(!Identifier::has_prefix("cha123", IdPrefix::Chapter));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Identifier::parse("nounderscore").is_none());
        assert!(Identifier::parse("xyz_01HQXYZ").is_none());
        assert!(Identifier::parse("ver_notaulid").is_none());
    }

    #[test]
    fn test_with_ulid_roundtrip() {
        let ulid = Ulid::new();
        let id = Identifier::with_ulid(IdPrefix::Version, ulid);
        let (_, parsed) = Identifier::parse(&id).unwrap();
        assert_eq!(parsed, ulid);
    }
}
