use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const ROOM_PREFIX: &str = "radio-";
pub const DEFAULT_SLUG: &str = "live";
pub const MAX_SLUG_LEN: usize = 20;

static ROOM_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^radio-(\d+)-(.+)$").expect("room name regex is a constant and always valid")
});

/// Canonical station identifier: `radio-<ownerFid>-<slug>`.
///
/// Derived deterministically from the owner and the station title, so the
/// same owner broadcasting under the same title always lands in the same room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomName(String);

/// Components recovered from a canonical room name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRoomName {
    pub owner_fid: u64,
    pub slug: String,
}

impl RoomName {
    #[must_use]
    pub fn derive(owner_fid: u64, title: &str) -> Self {
        Self(format!("{ROOM_PREFIX}{owner_fid}-{}", slugify(title)))
    }

    /// Split a room name into owner and slug.
    ///
    /// Returns `None` for names not shaped like a station, including ones
    /// whose owner segment overflows `u64`.
    #[must_use]
    pub fn parse(name: &str) -> Option<ParsedRoomName> {
        let captures = ROOM_NAME_REGEX.captures(name)?;
        let owner_fid = captures.get(1)?.as_str().parse::<u64>().ok()?;
        let slug = captures.get(2)?.as_str().to_string();
        Some(ParsedRoomName { owner_fid, slug })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RoomName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoomName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether `name` is a station owned by `fid`. Ad-hoc names are owned by nobody.
#[must_use]
pub fn is_room_owner(name: &str, fid: u64) -> bool {
    RoomName::parse(name).is_some_and(|parsed| parsed.owner_fid == fid)
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars().flat_map(char::to_lowercase) {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' };
        if c == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(c);
    }

    // ASCII only from here on, byte offsets are char offsets
    slug.truncate(MAX_SLUG_LEN);
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_sanitizes_title() {
        assert_eq!(
            RoomName::derive(42, "My Cool Station!!").as_str(),
            "radio-42-my-cool-station"
        );
        assert_eq!(RoomName::derive(1, "  Jazz & Blues  ").as_str(), "radio-1-jazz-blues");
        assert_eq!(RoomName::derive(1, "lo-fi--beats").as_str(), "radio-1-lo-fi-beats");
    }

    #[test]
    fn test_derive_defaults_to_live() {
        assert_eq!(RoomName::derive(7, "").as_str(), "radio-7-live");
        assert_eq!(RoomName::derive(7, "!!!").as_str(), "radio-7-live");
        assert_eq!(RoomName::derive(7, "日本語").as_str(), "radio-7-live");
    }

    #[test]
    fn test_derive_truncates_slug() {
        let name = RoomName::derive(3, "The Quick Brown Fox Jumps Over");
        let parsed = RoomName::parse(name.as_str()).unwrap();
        assert_eq!(parsed.slug, "the-quick-brown-fox");
        assert!(parsed.slug.len() <= MAX_SLUG_LEN);

        let name = RoomName::derive(3, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(name.as_str(), "radio-3-abcdefghijklmnopqrst");
    }

    #[test]
    fn test_derive_is_deterministic() {
        assert_eq!(RoomName::derive(9, "Morning Show"), RoomName::derive(9, "Morning Show"));
        assert_ne!(RoomName::derive(9, "Morning Show"), RoomName::derive(10, "Morning Show"));
    }

    #[test]
    fn test_owner_survives_derive_and_parse() {
        let titles = [
            "",
            "x",
            "123",
            "-leading",
            "radio-5-nested",
            "Ünïcödé 🎙️",
            "a-very-long-title-that-keeps-going",
        ];
        for fid in [0, 1, 42, 999_999, u64::MAX] {
            for title in titles {
                let name = RoomName::derive(fid, title);
                let parsed = RoomName::parse(name.as_str()).unwrap();
                assert_eq!(parsed.owner_fid, fid, "title {title:?}");
            }
        }
    }

    #[test]
    fn test_parse() {
        let parsed = RoomName::parse("radio-5-x").unwrap();
        assert_eq!(parsed.owner_fid, 5);
        assert_eq!(parsed.slug, "x");

        assert_eq!(RoomName::parse("not-a-room"), None);
        assert_eq!(RoomName::parse("radio-abc-x"), None);
        assert_eq!(RoomName::parse("radio-5-"), None);
        assert_eq!(RoomName::parse("radio-99999999999999999999999-x"), None);
    }

    #[test]
    fn test_is_room_owner() {
        assert!(is_room_owner("radio-5-x", 5));
        assert!(!is_room_owner("radio-5-x", 9));
        assert!(!is_room_owner("not-a-room", 7));
    }
}
