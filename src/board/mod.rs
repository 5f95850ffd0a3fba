//! Board Core
//!
//! Client-side model of the party board, independent of any backend or
//! front-end:
//!
//! - **types**: categories, cards, payloads, the fixed rosters
//! - **state**: the [`Board`] state machine and its events
//! - **modal**: picker, editor, and add-dish forms
//! - **dnd**: drag payloads and drop resolution
//! - **mutation**: the backend writes those flows produce

pub mod dnd;
pub mod modal;
pub mod mutation;
pub mod state;
pub mod types;

pub use dnd::{resolve_drop, DragPayload};
pub use modal::{AddDishModal, EditModal, Modal, ModalField, PickerModal, ValidationError};
pub use mutation::Mutation;
pub use state::{
    Board, BoardEvent, ReadyBoard, CHECKING_MESSAGE, NOT_DEPLOYED_MESSAGE, UNREACHABLE_MESSAGE,
};
pub use types::{
    placeholder_roster, roster_slot, Card, CardUpdate, Category, CategorySlot, NewCard,
    CATEGORY_ROSTER, COUPLE_ROSTER, DEFAULT_DISH, DISH_PROMPT, NO_RESTRICTION,
    PLACEHOLDER_PREFIX,
};
