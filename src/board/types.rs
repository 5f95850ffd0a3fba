//! Board data types
//!
//! Categories, cards, and the payloads sent to the backend when cards are
//! created or edited. Also holds the two fixed rosters the client ships
//! with: the four food categories and the pre-made couple placeholders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id prefix marking a card that only exists on the client
pub const PLACEHOLDER_PREFIX: &str = "pre-";

/// Dish text a placeholder carries until somebody names the dish
pub const DISH_PROMPT: &str = "Click to edit dish";

/// Dish name used when a placeholder is dropped without one
pub const DEFAULT_DISH: &str = "TBD";

/// Dietary text meaning "no restriction"
pub const NO_RESTRICTION: &str = "None";

/// A food category with its assigned cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub max_items: usize,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Category {
    /// Create an empty category
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_items: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_items,
            cards: Vec::new(),
        }
    }

    /// Occupancy label, e.g. `2/3`
    pub fn count_label(&self) -> String {
        format!("{}/{}", self.cards.len(), self.max_items)
    }

    /// Whether the category has reached its capacity.
    ///
    /// Advisory only: the client never refuses a drop because of it.
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.max_items
    }

    pub fn find_card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }
}

/// A couple's dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub couple_name: String,
    pub dish_name: String,
    #[serde(default)]
    pub dietary_restrictions: String,
    #[serde(default)]
    pub category_id: String,
    pub created_at: String,
}

impl Card {
    /// Build a client-only placeholder for a couple on the roster
    pub fn placeholder(couple_name: &str) -> Self {
        Self {
            id: format!("{}{}", PLACEHOLDER_PREFIX, couple_name.to_lowercase()),
            couple_name: couple_name.to_string(),
            dish_name: DISH_PROMPT.to_string(),
            dietary_restrictions: NO_RESTRICTION.to_string(),
            category_id: String::new(),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Placeholders have no owning category and a `pre-` id
    pub fn is_placeholder(&self) -> bool {
        self.category_id.is_empty() && is_placeholder_id(&self.id)
    }

    /// The dish name, unless it is still the prompt text or blank
    pub fn provisional_dish(&self) -> Option<&str> {
        let dish = self.dish_name.trim();
        if dish.is_empty() || dish == DISH_PROMPT {
            None
        } else {
            Some(dish)
        }
    }

    /// Dietary text worth showing; empty and `None` mean no restriction
    pub fn dietary_warning(&self) -> Option<&str> {
        normalize_dietary(&self.dietary_restrictions)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

pub fn is_placeholder_id(id: &str) -> bool {
    id.starts_with(PLACEHOLDER_PREFIX)
}

/// Trimmed dietary text, or `None` when it means "no restriction"
pub fn normalize_dietary(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.is_empty() || text == NO_RESTRICTION {
        None
    } else {
        Some(text)
    }
}

/// Payload for creating a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub couple_name: String,
    pub dish_name: String,
    pub dietary_restrictions: String,
    pub category_id: String,
}

impl NewCard {
    /// Create payload for a placeholder dropped straight onto a category
    pub fn from_placeholder(card: &Card, category_id: &str) -> Self {
        Self {
            couple_name: card.couple_name.clone(),
            dish_name: card.provisional_dish().unwrap_or(DEFAULT_DISH).to_string(),
            dietary_restrictions: card.dietary_warning().unwrap_or_default().to_string(),
            category_id: category_id.to_string(),
        }
    }
}

/// Partial card update; absent fields are left alone by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<String>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.dish_name.is_none() && self.dietary_restrictions.is_none()
    }
}

/// Entry in the fixed category roster shown by the pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySlot {
    pub id: &'static str,
    pub label: &'static str,
}

/// The four categories the pickers offer. Hardcoded, not read from the
/// backend.
pub const CATEGORY_ROSTER: [CategorySlot; 4] = [
    CategorySlot { id: "appetizers", label: "Appetizers" },
    CategorySlot { id: "sides", label: "Sides" },
    CategorySlot { id: "main", label: "Main Dishes" },
    CategorySlot { id: "desserts", label: "Desserts" },
];

pub fn roster_slot(category_id: &str) -> Option<&'static CategorySlot> {
    CATEGORY_ROSTER.iter().find(|slot| slot.id == category_id)
}

/// Couples that start out on the board as placeholders
pub const COUPLE_ROSTER: [&str; 7] = [
    "Steinberg", "Krass", "JJ", "Baker", "Emsky", "EOD", "Merckis",
];

/// Build the placeholder cards, in roster order
pub fn placeholder_roster() -> Vec<Card> {
    COUPLE_ROSTER.iter().map(|name| Card::placeholder(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(dish: &str, dietary: &str) -> Card {
        Card {
            id: "c1".to_string(),
            couple_name: "Krass".to_string(),
            dish_name: dish.to_string(),
            dietary_restrictions: dietary.to_string(),
            category_id: "sides".to_string(),
            created_at: "2026-02-08T18:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_count_label() {
        let mut category = Category::new("main", "Main Dishes", 5);
        assert_eq!(category.count_label(), "0/5");
        assert!(!category.is_full());

        category.cards = (0..5).map(|_| card("Chili", "")).collect();
        assert_eq!(category.count_label(), "5/5");
        assert!(category.is_full());
    }

    #[test]
    fn test_placeholder_roster() {
        let roster = placeholder_roster();
        assert_eq!(roster.len(), 7);
        assert_eq!(roster[0].id, "pre-steinberg");
        assert_eq!(roster[0].couple_name, "Steinberg");
        assert!(roster.iter().all(Card::is_placeholder));
        assert!(roster.iter().all(|c| c.provisional_dish().is_none()));
    }

    #[test]
    fn test_persisted_card_is_not_placeholder() {
        assert!(!card("Chili", "").is_placeholder());

        // An owned card is persisted even if its id looks like a placeholder
        let mut odd = card("Chili", "");
        odd.id = "pre-odd".to_string();
        assert!(!odd.is_placeholder());
    }

    #[test]
    fn test_dietary_warning() {
        assert_eq!(card("Chili", "").dietary_warning(), None);
        assert_eq!(card("Chili", "None").dietary_warning(), None);
        assert_eq!(card("Chili", " nuts ").dietary_warning(), Some("nuts"));
    }

    #[test]
    fn test_new_card_from_placeholder_defaults() {
        let placeholder = Card::placeholder("Baker");
        let new_card = NewCard::from_placeholder(&placeholder, "desserts");

        assert_eq!(new_card.couple_name, "Baker");
        assert_eq!(new_card.dish_name, DEFAULT_DISH);
        assert_eq!(new_card.dietary_restrictions, "");
        assert_eq!(new_card.category_id, "desserts");
    }

    #[test]
    fn test_new_card_keeps_provisional_dish() {
        let mut placeholder = Card::placeholder("Emsky");
        placeholder.dish_name = "  Brownies ".to_string();
        placeholder.dietary_restrictions = "gluten".to_string();

        let new_card = NewCard::from_placeholder(&placeholder, "desserts");
        assert_eq!(new_card.dish_name, "Brownies");
        assert_eq!(new_card.dietary_restrictions, "gluten");
    }

    #[test]
    fn test_card_update_skips_absent_fields() {
        let update = CardUpdate {
            dish_name: Some("Wings".to_string()),
            dietary_restrictions: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "dish_name": "Wings" }));
        assert!(CardUpdate::default().is_empty());
    }

    #[test]
    fn test_category_deserializes_without_cards() {
        let category: Category =
            serde_json::from_str(r#"{"id":"sides","name":"Sides","max_items":3}"#).unwrap();
        assert!(category.cards.is_empty());
    }

    #[test]
    fn test_roster_slot_lookup() {
        assert_eq!(roster_slot("main").map(|s| s.label), Some("Main Dishes"));
        assert!(roster_slot("drinks").is_none());
    }

    #[test]
    fn test_created_at_parses() {
        assert!(card("Chili", "").created_at().is_some());
    }
}
