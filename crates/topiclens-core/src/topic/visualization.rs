//! Placeholder visualization URLs.

use reqwest::Url;

use super::Topic;

/// Placeholder image service used for visualizations.
pub const PLACEHOLDER_BASE: &str = "https://via.placeholder.com";

/// Placeholder dimensions.
pub const PLACEHOLDER_SIZE: &str = "600x400";

/// Background color used by the live endpoint for every topic.
pub const LIVE_COLOR: &str = "4F46E5";

/// Background color for a topic name; unknown topics share the general color.
pub fn color_for_topic(topic: &str) -> &'static str {
    match Topic::from_name(topic).unwrap_or(Topic::GeneralKnowledge) {
        Topic::Mathematics => "3B82F6",
        Topic::Physics => "8B5CF6",
        Topic::Chemistry => "10B981",
        Topic::Biology => "F59E0B",
        Topic::GeneralKnowledge => "6B7280",
    }
}

/// Placeholder URL with the given background color and the topic as caption.
pub fn placeholder_url(color: &str, topic: &str) -> String {
    let base = format!("{}/{}/{}/FFFFFF", PLACEHOLDER_BASE, PLACEHOLDER_SIZE, color);
    match Url::parse_with_params(&base, &[("text", topic)]) {
        Ok(url) => url.to_string(),
        Err(_) => base,
    }
}

/// Demo endpoint visualization: per-topic palette.
pub fn demo_visualization(topic: &str) -> String {
    placeholder_url(color_for_topic(topic), topic)
}

/// Live endpoint visualization: fixed color.
pub fn live_visualization(topic: &str) -> String {
    placeholder_url(LIVE_COLOR, topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_palette_per_topic() {
        assert!(demo_visualization("Physics").contains("/8B5CF6/"));
        assert!(demo_visualization("Biology").contains("/F59E0B/"));
        assert!(demo_visualization("Astronomy").contains("/6B7280/"));
    }

    #[test]
    fn test_topic_is_encoded() {
        let url = demo_visualization("General Knowledge");
        assert!(url.starts_with("https://via.placeholder.com/600x400/6B7280/FFFFFF?text="));
        assert!(url.ends_with("text=General+Knowledge"));
    }

    #[test]
    fn test_live_color_is_fixed() {
        assert!(live_visualization("Physics").contains(&format!("/{}/", LIVE_COLOR)));
        assert!(live_visualization("Chemistry").contains(&format!("/{}/", LIVE_COLOR)));
    }
}
