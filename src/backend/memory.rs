//! In-Memory Backend
//!
//! A simple record store holding categories and cards in process memory.
//! Backs the reference API server and lets the board run without a
//! deployed backend. Capacity is enforced here, not on the client.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::{BackendError, BackendResult};
use super::Backend;
use crate::board::{Card, CardUpdate, Category, NewCard, CATEGORY_ROSTER};

/// Store-level failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Category not found")]
    CategoryNotFound,

    #[error("Card not found")]
    CardNotFound,

    #[error("Category is full (max {max} items)")]
    CategoryFull { max: usize },

    #[error("{0}")]
    Invalid(String),
}

impl StoreError {
    /// HTTP status the REST API reports for this error
    pub fn status(&self) -> u16 {
        match self {
            StoreError::CategoryNotFound | StoreError::CardNotFound => 404,
            StoreError::CategoryFull { .. } | StoreError::Invalid(_) => 400,
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        BackendError::Api {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct CategoryRecord {
    id: String,
    name: String,
    max_items: usize,
}

#[derive(Debug, Default)]
struct Records {
    categories: Vec<CategoryRecord>,
    cards: Vec<Card>,
}

impl Records {
    fn category(&self, category_id: &str) -> Result<&CategoryRecord, StoreError> {
        self.categories
            .iter()
            .find(|c| c.id == category_id)
            .ok_or(StoreError::CategoryNotFound)
    }

    fn count_in(&self, category_id: &str) -> usize {
        self.cards.iter().filter(|c| c.category_id == category_id).count()
    }

    fn ensure_room(&self, category_id: &str) -> Result<(), StoreError> {
        let category = self.category(category_id)?;
        if self.count_in(category_id) >= category.max_items {
            return Err(StoreError::CategoryFull {
                max: category.max_items,
            });
        }
        Ok(())
    }

    fn card_mut(&mut self, card_id: &str) -> Result<&mut Card, StoreError> {
        self.cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or(StoreError::CardNotFound)
    }
}

/// Process-local [`Backend`]
#[derive(Clone, Default)]
pub struct MemoryBackend {
    records: Arc<RwLock<Records>>,
}

impl MemoryBackend {
    /// Empty store with no categories
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the four standard categories
    pub fn with_default_categories(max_items: usize) -> Self {
        let categories = CATEGORY_ROSTER
            .iter()
            .map(|slot| Category::new(slot.id, slot.label, max_items))
            .collect();
        Self::with_categories(categories)
    }

    /// Store seeded with the given categories and any cards they carry
    pub fn with_categories(categories: Vec<Category>) -> Self {
        let mut records = Records::default();
        for category in categories {
            records.categories.push(CategoryRecord {
                id: category.id.clone(),
                name: category.name,
                max_items: category.max_items,
            });
            records.cards.extend(category.cards.into_iter().map(|mut card| {
                card.category_id = category.id.clone();
                card
            }));
        }

        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub async fn categories(&self) -> Vec<Category> {
        let records = self.records.read().await;
        records
            .categories
            .iter()
            .map(|record| Category {
                id: record.id.clone(),
                name: record.name.clone(),
                max_items: record.max_items,
                cards: records
                    .cards
                    .iter()
                    .filter(|card| card.category_id == record.id)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    pub async fn card_count(&self) -> usize {
        self.records.read().await.cards.len()
    }

    pub async fn insert_card(&self, card: NewCard) -> Result<Card, StoreError> {
        let couple_name = card.couple_name.trim();
        let dish_name = card.dish_name.trim();
        if couple_name.is_empty() || dish_name.is_empty() {
            return Err(StoreError::Invalid(
                "Couple name and dish name cannot be empty".to_string(),
            ));
        }

        let mut records = self.records.write().await;
        records.ensure_room(&card.category_id)?;

        let created = Card {
            id: Uuid::new_v4().to_string(),
            couple_name: couple_name.to_string(),
            dish_name: dish_name.to_string(),
            dietary_restrictions: card.dietary_restrictions.trim().to_string(),
            category_id: card.category_id,
            created_at: Utc::now().to_rfc3339(),
        };
        records.cards.push(created.clone());

        tracing::info!(
            couple = %created.couple_name,
            category = %created.category_id,
            "Created card"
        );
        Ok(created)
    }

    pub async fn move_card(&self, card_id: &str, category_id: &str) -> Result<Card, StoreError> {
        let mut records = self.records.write().await;
        records.category(category_id)?;

        let current = records
            .cards
            .iter()
            .find(|c| c.id == card_id)
            .map(|c| c.category_id.clone())
            .ok_or(StoreError::CardNotFound)?;
        if current != category_id {
            records.ensure_room(category_id)?;
        }

        let card = records.card_mut(card_id)?;
        card.category_id = category_id.to_string();

        tracing::info!(couple = %card.couple_name, category = %category_id, "Moved card");
        Ok(card.clone())
    }

    pub async fn edit_card(&self, card_id: &str, update: CardUpdate) -> Result<Card, StoreError> {
        if matches!(&update.dish_name, Some(dish) if dish.trim().is_empty()) {
            return Err(StoreError::Invalid("Dish name cannot be empty".to_string()));
        }

        let changed = !update.is_empty();
        let mut records = self.records.write().await;
        let card = records.card_mut(card_id)?;
        if let Some(dish) = update.dish_name {
            card.dish_name = dish.trim().to_string();
        }
        if let Some(dietary) = update.dietary_restrictions {
            card.dietary_restrictions = dietary.trim().to_string();
        }

        if changed {
            tracing::info!(couple = %card.couple_name, "Updated card");
        }
        Ok(card.clone())
    }

    pub async fn remove_card(&self, card_id: &str) -> Result<Card, StoreError> {
        let mut records = self.records.write().await;
        let index = records
            .cards
            .iter()
            .position(|c| c.id == card_id)
            .ok_or(StoreError::CardNotFound)?;
        let card = records.cards.remove(index);

        tracing::info!(couple = %card.couple_name, "Deleted card");
        Ok(card)
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn health_check(&self) -> BackendResult<bool> {
        Ok(true)
    }

    async fn list_categories(&self) -> BackendResult<Vec<Category>> {
        Ok(self.categories().await)
    }

    async fn create_card(&self, card: NewCard) -> BackendResult<Card> {
        Ok(self.insert_card(card).await?)
    }

    async fn update_card_category(&self, card_id: &str, category_id: &str) -> BackendResult<Card> {
        Ok(self.move_card(card_id, category_id).await?)
    }

    async fn update_card(&self, card_id: &str, update: CardUpdate) -> BackendResult<Card> {
        Ok(self.edit_card(card_id, update).await?)
    }
}
