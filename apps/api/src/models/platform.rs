use serde::{Deserialize, Serialize};

/// Social networks a post can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linkedin,
    Twitter,
    Facebook,
    Instagram,
}

/// Collapses duplicates (first occurrence wins) and falls back to LinkedIn when empty.
pub fn normalize_platforms(platforms: Vec<Platform>) -> Vec<Platform> {
    let mut unique = Vec::with_capacity(platforms.len());
    for platform in platforms {
        if !unique.contains(&platform) {
            unique.push(platform);
        }
    }
    if unique.is_empty() {
        unique.push(Platform::Linkedin);
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_defaults_to_linkedin() {
        assert_eq!(normalize_platforms(vec![]), vec![Platform::Linkedin]);
    }

    #[test]
    fn test_duplicates_collapse_in_first_seen_order() {
        let platforms = vec![
            Platform::Twitter,
            Platform::Linkedin,
            Platform::Twitter,
            Platform::Instagram,
        ];
        assert_eq!(
            normalize_platforms(platforms),
            vec![Platform::Twitter, Platform::Linkedin, Platform::Instagram]
        );
    }

    #[test]
    fn test_serializes_as_lowercase_identifier() {
        assert_eq!(
            serde_json::to_string(&Platform::Linkedin).unwrap(),
            "\"linkedin\""
        );
        let parsed: Platform = serde_json::from_str("\"facebook\"").unwrap();
        assert_eq!(parsed, Platform::Facebook);
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        assert!(serde_json::from_str::<Platform>("\"myspace\"").is_err());
    }
}
