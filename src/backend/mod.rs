//! Backend Collaborator
//!
//! The board never owns its data; categories and cards live behind a
//! record store reached through the [`Backend`] trait.
//!
//! - **HttpBackend**: REST client for a deployed backend
//! - **MemoryBackend**: in-process store, used by the reference server
//!   and for running the board offline

mod error;
mod http;
mod memory;

#[cfg(test)]
pub(crate) mod mock;

pub use error::{BackendError, BackendResult};
pub use http::{HttpBackend, HttpBackendConfig};
pub use memory::{MemoryBackend, StoreError};

use async_trait::async_trait;

use crate::board::{Card, CardUpdate, Category, NewCard};

/// Operations the board needs from its backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Liveness probe. `Ok(false)` means the backend answered but is not
    /// live; errors mean it could not be reached.
    async fn health_check(&self) -> BackendResult<bool>;

    /// All categories, in display order, each with its cards
    async fn list_categories(&self) -> BackendResult<Vec<Category>>;

    /// Create a card; the id is assigned by the backend
    async fn create_card(&self, card: NewCard) -> BackendResult<Card>;

    /// Move a card to another category
    async fn update_card_category(&self, card_id: &str, category_id: &str) -> BackendResult<Card>;

    /// Partially update a card's dish and dietary text
    async fn update_card(&self, card_id: &str, update: CardUpdate) -> BackendResult<Card>;
}
