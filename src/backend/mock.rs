//! Recording backend for tests
//!
//! Wraps a [`MemoryBackend`], logs every call, and can be told to fail.

use async_trait::async_trait;
use std::sync::Mutex;

use super::{Backend, BackendError, BackendResult, MemoryBackend};
use crate::board::{Card, CardUpdate, Category, NewCard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Health,
    List,
    Create(NewCard),
    Move { card_id: String, category_id: String },
    Update { card_id: String, update: CardUpdate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Live,
    NotLive,
    Unreachable,
}

pub struct MockBackend {
    pub store: MemoryBackend,
    calls: Mutex<Vec<Call>>,
    health: Mutex<Health>,
    list_fails: Mutex<bool>,
    mutation_failure: Mutex<Option<(u16, String)>>,
}

impl MockBackend {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            store: MemoryBackend::with_categories(categories),
            calls: Mutex::new(Vec::new()),
            health: Mutex::new(Health::Live),
            list_fails: Mutex::new(false),
            mutation_failure: Mutex::new(None),
        }
    }

    pub fn with_default_categories(max_items: usize) -> Self {
        let categories = crate::board::CATEGORY_ROSTER
            .iter()
            .map(|slot| Category::new(slot.id, slot.label, max_items))
            .collect();
        Self::new(categories)
    }

    pub fn set_health(&self, health: Health) {
        *self.health.lock().unwrap() = health;
    }

    pub fn fail_listing(&self, fail: bool) {
        *self.list_fails.lock().unwrap() = fail;
    }

    pub fn fail_mutations(&self, status: u16, message: &str) {
        *self.mutation_failure.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation_error(&self) -> Option<BackendError> {
        self.mutation_failure
            .lock()
            .unwrap()
            .clone()
            .map(|(status, message)| BackendError::Api { status, message })
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn health_check(&self) -> BackendResult<bool> {
        self.record(Call::Health);
        let health = *self.health.lock().unwrap();
        match health {
            Health::Live => Ok(true),
            Health::NotLive => Ok(false),
            Health::Unreachable => Err(BackendError::Unreachable),
        }
    }

    async fn list_categories(&self) -> BackendResult<Vec<Category>> {
        self.record(Call::List);
        if *self.list_fails.lock().unwrap() {
            return Err(BackendError::Timeout);
        }
        self.store.list_categories().await
    }

    async fn create_card(&self, card: NewCard) -> BackendResult<Card> {
        self.record(Call::Create(card.clone()));
        if let Some(err) = self.mutation_error() {
            return Err(err);
        }
        self.store.create_card(card).await
    }

    async fn update_card_category(&self, card_id: &str, category_id: &str) -> BackendResult<Card> {
        self.record(Call::Move {
            card_id: card_id.to_string(),
            category_id: category_id.to_string(),
        });
        if let Some(err) = self.mutation_error() {
            return Err(err);
        }
        self.store.update_card_category(card_id, category_id).await
    }

    async fn update_card(&self, card_id: &str, update: CardUpdate) -> BackendResult<Card> {
        self.record(Call::Update {
            card_id: card_id.to_string(),
            update: update.clone(),
        });
        if let Some(err) = self.mutation_error() {
            return Err(err);
        }
        self.store.update_card(card_id, update).await
    }
}
