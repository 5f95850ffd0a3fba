//! Drag and drop
//!
//! A drag captures a [`DragPayload`] from the card under the pointer; the
//! drop resolves it against the target category into at most one
//! [`Mutation`].

use super::mutation::Mutation;
use super::types::{is_placeholder_id, Card, NewCard};

/// Data carried from drag start to drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub card_id: String,
    /// Category the card was dragged out of; empty for placeholders
    pub source_category: String,
    /// Full card, only for placeholders that the backend has never seen
    pub card: Option<Card>,
}

impl DragPayload {
    /// Capture a drag from a card
    pub fn start(card: &Card) -> Self {
        Self {
            card_id: card.id.clone(),
            source_category: card.category_id.clone(),
            card: card.is_placeholder().then(|| card.clone()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.card.is_some()
    }
}

/// Turn a drop into the write it implies.
///
/// Returns `None` when nothing should happen: the drop missed every
/// category, nothing was being dragged, a card was dropped back where it
/// came from, or a placeholder id arrived without its card.
pub fn resolve_drop(
    payload: Option<&DragPayload>,
    target_category: Option<&str>,
) -> Option<Mutation> {
    let payload = payload.filter(|p| !p.card_id.is_empty())?;
    let target = target_category.filter(|t| !t.is_empty())?;

    match &payload.card {
        Some(placeholder) => Some(Mutation::Create(NewCard::from_placeholder(placeholder, target))),
        None if is_placeholder_id(&payload.card_id) && payload.source_category.is_empty() => {
            tracing::warn!(card_id = %payload.card_id, "Placeholder dropped without its card");
            None
        }
        None if payload.source_category == target => None,
        None => Some(Mutation::Move {
            card_id: payload.card_id.clone(),
            category_id: target.to_string(),
        }),
    }
}
