//! 類似アイテム（アート / レストラン / 建築）のカード表示モデル

use crate::types::{ArtworkSuggestion, BuildingSuggestion, RestaurantSuggestion};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLink {
    pub label: &'static str,
    pub url: String,
}

/// 読み取り専用のカード1枚
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionCard {
    pub title: String,
    pub subtitle: String,
    pub detail: String,
    pub location: String,
    pub links: Vec<CardLink>,
}

fn or_unknown(value: Option<String>, fallback: &str) -> String {
    value.unwrap_or_else(|| fallback.to_string())
}

fn links(candidates: impl IntoIterator<Item = (&'static str, Option<String>)>) -> Vec<CardLink> {
    candidates
        .into_iter()
        .filter_map(|(label, url)| url.map(|url| CardLink { label, url }))
        .collect()
}

impl From<ArtworkSuggestion> for SuggestionCard {
    fn from(s: ArtworkSuggestion) -> Self {
        Self {
            title: or_unknown(s.name, "Unknown"),
            subtitle: or_unknown(s.artist, "Unknown Artist"),
            detail: or_unknown(s.year, "Unknown"),
            location: format!("📍 {}", or_unknown(s.current_location, "Unknown Location")),
            links: links([("🔗 Learn More", s.wikipedia)]),
        }
    }
}

impl From<BuildingSuggestion> for SuggestionCard {
    fn from(s: BuildingSuggestion) -> Self {
        Self {
            title: or_unknown(s.name, "Unknown"),
            subtitle: or_unknown(s.architecture_type, "Unknown"),
            detail: format!("{} Era", or_unknown(s.era, "Unknown")),
            location: format!("📍 {}", or_unknown(s.location, "Unknown Location")),
            links: links([("🔗 Learn More", s.wikipedia), ("📍 View on Maps", s.address)]),
        }
    }
}

impl From<RestaurantSuggestion> for SuggestionCard {
    fn from(s: RestaurantSuggestion) -> Self {
        Self {
            title: or_unknown(s.name, "Unknown"),
            subtitle: or_unknown(s.cuisine, "Unknown Cuisine"),
            detail: format!("Average Cost: {}", or_unknown(s.average_costs, "Unknown")),
            location: format!("⭐ {} Rating", or_unknown(s.yelp_stars, "Unknown")),
            links: links([("View on Maps", s.address)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artwork_card() {
        let card = SuggestionCard::from(ArtworkSuggestion {
            name: Some("The Starry Night".to_string()),
            artist: Some("Vincent van Gogh".to_string()),
            year: Some("1889".to_string()),
            current_location: None,
            wikipedia: Some("https://en.wikipedia.org/wiki/The_Starry_Night".to_string()),
        });
        assert_eq!(card.title, "The Starry Night");
        assert_eq!(card.location, "📍 Unknown Location");
        assert_eq!(card.links.len(), 1);
        assert_eq!(card.links[0].label, "🔗 Learn More");
    }

    #[test]
    fn test_building_card_links() {
        let card = SuggestionCard::from(BuildingSuggestion {
            name: Some("Casa Batlló".to_string()),
            era: Some("Modernisme".to_string()),
            address: Some("https://maps.example/batllo".to_string()),
            ..Default::default()
        });
        assert_eq!(card.detail, "Modernisme Era");
        assert_eq!(card.subtitle, "Unknown");
        assert_eq!(card.links, vec![CardLink {
            label: "📍 View on Maps",
            url: "https://maps.example/batllo".to_string(),
        }]);
    }

    #[test]
    fn test_restaurant_card() {
        let card = SuggestionCard::from(RestaurantSuggestion {
            name: Some("Joe's Pizza".to_string()),
            yelp_stars: Some("4.5".to_string()),
            ..Default::default()
        });
        assert_eq!(card.subtitle, "Unknown Cuisine");
        assert_eq!(card.detail, "Average Cost: Unknown");
        assert_eq!(card.location, "⭐ 4.5 Rating");
        assert!(card.links.is_empty());
    }
}
