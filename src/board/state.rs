//! Board State Machine
//!
//! The whole client-side board as one value. Every change goes through
//! [`Board::apply`], a pure transition from one state to the next.
//!
//! ```text
//!   Initializing ──HealthCheckPassed──▶ Ready ──CategoriesLoaded/Failed──▶ Ready
//!        │                                │
//!  HealthCheckFailed               HealthCheckFailed
//!        ▼                                ▼
//!   Unreachable ◀─────────────────────────┘
//!        │
//!  HealthCheckStarted (retry) ──▶ Initializing
//! ```

use chrono::{DateTime, Utc};

use super::modal::Modal;
use super::types::{Card, Category};

/// Banner text while the health check is in flight
pub const CHECKING_MESSAGE: &str = "Checking backend connection...";

/// Error shown when the health check cannot reach the backend
pub const UNREACHABLE_MESSAGE: &str = "Cannot connect to backend";

/// Error shown when the backend answers but reports it is not live
pub const NOT_DEPLOYED_MESSAGE: &str = "Backend not deployed yet";

/// Client-side board state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Board {
    /// Health check in flight
    #[default]
    Initializing,
    /// Health check failed; only a manual retry leaves this state
    Unreachable { error: String },
    /// Backend is live; categories are polled
    Ready(ReadyBoard),
}

/// Everything the board holds while the backend is live
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadyBoard {
    /// Cached categories, replaced wholesale by every successful fetch
    pub categories: Vec<Category>,
    /// Last fetch error; cleared by the next successful fetch
    pub error: Option<String>,
    /// Open modal form, if any
    pub modal: Option<Modal>,
    /// Error shown inside the open modal
    pub modal_error: Option<String>,
    /// Blocking notification for a failed mutation, until dismissed
    pub notice: Option<String>,
    /// When categories were last fetched successfully
    pub last_synced: Option<DateTime<Utc>>,
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A health check (initial or manual retry) has started
    HealthCheckStarted,
    HealthCheckPassed,
    HealthCheckFailed(String),
    CategoriesLoaded {
        categories: Vec<Category>,
        at: DateTime<Utc>,
    },
    CategoriesFailed(String),
    ModalOpened(Modal),
    /// The open modal's fields changed
    ModalUpdated(Modal),
    /// Submission blocked client-side
    ModalInvalid(String),
    ModalClosed,
    MutationSucceeded,
    /// A backend write failed. With `keep_modal` an open modal stays up
    /// with the error; otherwise it closes and a notice is raised.
    MutationFailed { message: String, keep_modal: bool },
    NoticeDismissed,
}

impl Board {
    /// Pure transition function
    pub fn apply(self, event: BoardEvent) -> Board {
        match (self, event) {
            (_, BoardEvent::HealthCheckStarted) => Board::Initializing,
            (_, BoardEvent::HealthCheckFailed(error)) => Board::Unreachable { error },
            (Board::Ready(ready), BoardEvent::HealthCheckPassed) => Board::Ready(ready),
            (_, BoardEvent::HealthCheckPassed) => Board::Ready(ReadyBoard::default()),
            (Board::Ready(ready), event) => Board::Ready(ready.apply(event)),
            // Results that land after the board left Ready are stale
            (board, event) => {
                tracing::debug!(?event, "Ignoring event outside ready state");
                board
            }
        }
    }

    /// Health check in flight
    pub fn loading(&self) -> bool {
        matches!(self, Board::Initializing)
    }

    pub fn backend_ready(&self) -> bool {
        matches!(self, Board::Ready(_))
    }

    /// Banner error: connectivity failure or the last fetch failure
    pub fn error(&self) -> Option<&str> {
        match self {
            Board::Initializing => None,
            Board::Unreachable { error } => Some(error),
            Board::Ready(ready) => ready.error.as_deref(),
        }
    }

    pub fn ready(&self) -> Option<&ReadyBoard> {
        match self {
            Board::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    pub fn categories(&self) -> &[Category] {
        self.ready().map(|r| r.categories.as_slice()).unwrap_or(&[])
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.ready().and_then(|r| r.modal.as_ref())
    }

    pub fn notice(&self) -> Option<&str> {
        self.ready().and_then(|r| r.notice.as_deref())
    }

    /// Find a persisted card anywhere on the board
    pub fn find_card(&self, card_id: &str) -> Option<&Card> {
        self.categories().iter().find_map(|c| c.find_card(card_id))
    }

    pub fn find_category(&self, category_id: &str) -> Option<&Category> {
        self.categories().iter().find(|c| c.id == category_id)
    }
}

impl ReadyBoard {
    fn apply(mut self, event: BoardEvent) -> ReadyBoard {
        match event {
            BoardEvent::CategoriesLoaded { categories, at } => {
                self.categories = categories;
                self.error = None;
                self.last_synced = Some(at);
            }
            BoardEvent::CategoriesFailed(error) => {
                self.error = Some(error);
            }
            BoardEvent::ModalOpened(modal) => {
                self.modal = Some(modal);
                self.modal_error = None;
            }
            BoardEvent::ModalUpdated(modal) => {
                if self.modal.is_some() {
                    self.modal = Some(modal);
                    self.modal_error = None;
                }
            }
            BoardEvent::ModalInvalid(error) => {
                if self.modal.is_some() {
                    self.modal_error = Some(error);
                }
            }
            BoardEvent::ModalClosed | BoardEvent::MutationSucceeded => {
                self.modal = None;
                self.modal_error = None;
            }
            BoardEvent::MutationFailed { message, keep_modal } => {
                if keep_modal && self.modal.is_some() {
                    self.modal_error = Some(message);
                } else {
                    self.modal = None;
                    self.modal_error = None;
                    self.notice = Some(message);
                }
            }
            BoardEvent::NoticeDismissed => {
                self.notice = None;
            }
            BoardEvent::HealthCheckStarted
            | BoardEvent::HealthCheckPassed
            | BoardEvent::HealthCheckFailed(_) => {}
        }
        self
    }
}
