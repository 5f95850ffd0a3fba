//! Backend writes produced by the drag/drop and modal flows

use super::types::{CardUpdate, NewCard};

/// A single write the board wants the backend to perform.
///
/// Every mutation is followed by a full category refresh; nothing is
/// applied to the local cache before the backend confirms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Create a new persisted card
    Create(NewCard),
    /// Reassign an existing card to another category
    Move { card_id: String, category_id: String },
    /// Change dish name and dietary text of an existing card
    Update { card_id: String, update: CardUpdate },
}

impl Mutation {
    /// Message shown when the backend rejects the write without a reason
    pub fn failure_message(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "Failed to add dish",
            Mutation::Move { .. } => "Failed to move dish",
            Mutation::Update { .. } => "Failed to update dish",
        }
    }
}
