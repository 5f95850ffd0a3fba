//! Board Session
//!
//! Drives the [`Board`] state machine against a [`Backend`]:
//!
//! 1. `check_health` moves the board to `Ready` or `Unreachable`
//! 2. while ready, categories are fetched at once and then polled
//! 3. drag/drop and modal submissions become backend writes, each followed
//!    by a full refresh
//!
//! The board itself lives in a `tokio::sync::watch` channel so front-ends
//! can subscribe and redraw on every transition.

use chrono::Utc;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;

use crate::backend::{Backend, BackendError};
use crate::board::{
    placeholder_roster, resolve_drop, AddDishModal, Board, BoardEvent, Card, DragPayload,
    EditModal, Modal, ModalField, Mutation, PickerModal, ValidationError, NOT_DEPLOYED_MESSAGE,
    UNREACHABLE_MESSAGE,
};
use crate::sync::{SyncTask, DEFAULT_POLL_INTERVAL};

/// Errors returned by session operations
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Backend is not ready")]
    NotReady,

    #[error("Close the open form first")]
    ModalOpen,

    #[error("No form is open")]
    NoModal,

    #[error("Already connected to backend")]
    AlreadyConnected,

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Session behaviour knobs
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Time between background refreshes; `None` disables polling
    pub poll_interval: Option<Duration>,
    /// Keep a modal open, with the error, when its write fails
    pub keep_modal_on_failure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: Some(DEFAULT_POLL_INTERVAL),
            keep_modal_on_failure: true,
        }
    }
}

struct Inner {
    backend: Arc<dyn Backend>,
    store: watch::Sender<Board>,
}

impl Inner {
    fn apply(&self, event: BoardEvent) {
        self.store.send_modify(|board| {
            let was_ready = board.backend_ready();
            *board = std::mem::take(board).apply(event);

            match (was_ready, board.backend_ready()) {
                (false, true) => tracing::info!("Backend ready"),
                (true, false) => tracing::info!("Backend no longer ready"),
                _ => {}
            }
        });
    }

    fn snapshot(&self) -> Board {
        self.store.borrow().clone()
    }

    fn is_ready(&self) -> bool {
        self.store.borrow().backend_ready()
    }

    async fn refresh(&self) -> Result<(), BackendError> {
        match self.backend.list_categories().await {
            Ok(categories) => {
                tracing::debug!(count = categories.len(), "Loaded categories");
                self.apply(BoardEvent::CategoriesLoaded {
                    categories,
                    at: Utc::now(),
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error loading categories");
                self.apply(BoardEvent::CategoriesFailed(e.to_string()));
                Err(e)
            }
        }
    }
}

/// A live board bound to one backend
pub struct BoardSession {
    inner: Arc<Inner>,
    placeholders: Vec<Card>,
    config: SessionConfig,
    sync: Mutex<Option<SyncTask>>,
}

impl BoardSession {
    /// Create a session in the `Initializing` state. Nothing is fetched
    /// until [`check_health`](Self::check_health) runs.
    pub fn new(backend: Arc<dyn Backend>, config: SessionConfig) -> Self {
        let (store, _) = watch::channel(Board::default());

        Self {
            inner: Arc::new(Inner { backend, store }),
            placeholders: placeholder_roster(),
            config,
            sync: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> Board {
        self.inner.snapshot()
    }

    /// Receive every board transition
    pub fn subscribe(&self) -> watch::Receiver<Board> {
        self.inner.store.subscribe()
    }

    /// Pre-made couples waiting for a category
    pub fn placeholders(&self) -> &[Card] {
        &self.placeholders
    }

    pub fn is_polling(&self) -> bool {
        self.lock_sync()
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    /// Run the health check. On success the categories are fetched
    /// immediately and polling starts. A board that is already `Ready`
    /// keeps its cached categories and open modal through a passing check.
    pub async fn check_health(&self) -> bool {
        self.stop_polling();
        if !self.inner.is_ready() {
            self.inner.apply(BoardEvent::HealthCheckStarted);
        }

        match self.inner.backend.health_check().await {
            Ok(true) => {
                self.inner.apply(BoardEvent::HealthCheckPassed);
                let _ = self.inner.refresh().await;
                self.start_polling();
                true
            }
            Ok(false) => {
                tracing::warn!("Backend reported not live");
                self.inner
                    .apply(BoardEvent::HealthCheckFailed(NOT_DEPLOYED_MESSAGE.to_string()));
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Backend health check failed");
                self.inner
                    .apply(BoardEvent::HealthCheckFailed(UNREACHABLE_MESSAGE.to_string()));
                false
            }
        }
    }

    /// Manual retry from the not-deployed screen
    pub async fn retry(&self) -> Result<bool, SessionError> {
        if self.inner.is_ready() {
            return Err(SessionError::AlreadyConnected);
        }
        Ok(self.check_health().await)
    }

    /// Fetch categories now
    pub async fn refresh(&self) -> Result<(), SessionError> {
        self.ensure_ready()?;
        self.inner.refresh().await.map_err(SessionError::from)
    }

    /// Begin dragging a card; `None` if no such card is on the board
    pub fn drag_start(&self, card_id: &str) -> Option<DragPayload> {
        if let Some(placeholder) = self.find_placeholder(card_id) {
            return Some(DragPayload::start(placeholder));
        }
        self.inner
            .snapshot()
            .find_card(card_id)
            .map(DragPayload::start)
    }

    /// Finish a drag. `target` is `None` when the drop missed every
    /// category. Returns the card the backend wrote, if any write happened.
    pub async fn drop_card(
        &self,
        payload: Option<DragPayload>,
        target: Option<&str>,
    ) -> Result<Option<Card>, SessionError> {
        self.ensure_ready()?;
        if self.inner.snapshot().modal().is_some() {
            return Err(SessionError::ModalOpen);
        }

        match resolve_drop(payload.as_ref(), target) {
            Some(mutation) => self.perform(mutation, false).await.map(Some),
            None => Ok(None),
        }
    }

    /// Click on a card: placeholders open the picker, persisted cards the
    /// editor. No request is made.
    pub fn activate(&self, card_id: &str) -> Result<(), SessionError> {
        self.ensure_no_modal()?;

        let modal = match self.find_placeholder(card_id) {
            Some(placeholder) => Modal::Picker(PickerModal::open(placeholder)),
            None => {
                let board = self.inner.snapshot();
                let card = board
                    .find_card(card_id)
                    .ok_or_else(|| SessionError::UnknownCard(card_id.to_string()))?;
                Modal::Edit(EditModal::open(card))
            }
        };

        self.inner.apply(BoardEvent::ModalOpened(modal));
        Ok(())
    }

    /// Open the blank "add new dish" form
    pub fn open_add_dish(&self) -> Result<(), SessionError> {
        self.ensure_no_modal()?;
        self.inner
            .apply(BoardEvent::ModalOpened(Modal::AddDish(AddDishModal::default())));
        Ok(())
    }

    pub fn set_modal_field(&self, field: ModalField, value: &str) -> Result<(), SessionError> {
        let mut modal = self.current_modal()?;
        modal.set_field(field, value)?;
        self.inner.apply(BoardEvent::ModalUpdated(modal));
        Ok(())
    }

    pub fn select_modal_category(&self, category_id: &str) -> Result<(), SessionError> {
        let board = self.inner.snapshot();
        let mut modal = self.current_modal()?;
        modal.select_category(category_id, board.categories())?;
        self.inner.apply(BoardEvent::ModalUpdated(modal));
        Ok(())
    }

    /// Submit the open modal. Invalid input is rejected before any request.
    pub async fn submit_modal(&self) -> Result<Card, SessionError> {
        let modal = self.current_modal()?;

        match modal.submit() {
            Ok(mutation) => self.perform(mutation, true).await,
            Err(e) => {
                self.inner.apply(BoardEvent::ModalInvalid(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Close the open modal, discarding its input
    pub fn cancel_modal(&self) {
        self.inner.apply(BoardEvent::ModalClosed);
    }

    pub fn dismiss_notice(&self) {
        self.inner.apply(BoardEvent::NoticeDismissed);
    }

    /// Stop background work. Also happens on drop.
    pub fn shutdown(&self) {
        self.stop_polling();
    }

    async fn perform(&self, mutation: Mutation, from_modal: bool) -> Result<Card, SessionError> {
        let backend = &self.inner.backend;
        let result = match &mutation {
            Mutation::Create(card) => backend.create_card(card.clone()).await,
            Mutation::Move {
                card_id,
                category_id,
            } => backend.update_card_category(card_id, category_id).await,
            Mutation::Update { card_id, update } => {
                backend.update_card(card_id, update.clone()).await
            }
        };

        match result {
            Ok(card) => {
                tracing::info!(
                    card_id = %card.id,
                    couple = %card.couple_name,
                    category = %card.category_id,
                    "Saved card"
                );
                let _ = self.inner.refresh().await;
                if from_modal {
                    self.inner.apply(BoardEvent::MutationSucceeded);
                }
                Ok(card)
            }
            Err(e) => {
                tracing::error!(error = %e, ?mutation, "Card write failed");
                let reason = e.to_string();
                let message = if reason.trim().is_empty() {
                    mutation.failure_message().to_string()
                } else {
                    reason
                };
                self.inner.apply(BoardEvent::MutationFailed {
                    message,
                    keep_modal: from_modal && self.config.keep_modal_on_failure,
                });
                Err(e.into())
            }
        }
    }

    fn start_polling(&self) {
        let Some(interval) = self.config.poll_interval else {
            return;
        };

        let inner = Arc::clone(&self.inner);
        let task = SyncTask::spawn(interval, move || {
            let inner = Arc::clone(&inner);
            async move {
                if !inner.is_ready() {
                    return ControlFlow::Break(());
                }
                let _ = inner.refresh().await;
                ControlFlow::Continue(())
            }
        });

        *self.lock_sync() = Some(task);
    }

    fn stop_polling(&self) {
        if let Some(task) = self.lock_sync().take() {
            task.stop();
        }
    }

    fn lock_sync(&self) -> std::sync::MutexGuard<'_, Option<SyncTask>> {
        self.sync.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn find_placeholder(&self, card_id: &str) -> Option<&Card> {
        self.placeholders.iter().find(|c| c.id == card_id)
    }

    fn current_modal(&self) -> Result<Modal, SessionError> {
        self.inner
            .snapshot()
            .modal()
            .cloned()
            .ok_or(SessionError::NoModal)
    }

    fn ensure_ready(&self) -> Result<(), SessionError> {
        if self.inner.is_ready() {
            Ok(())
        } else {
            Err(SessionError::NotReady)
        }
    }

    fn ensure_no_modal(&self) -> Result<(), SessionError> {
        self.ensure_ready()?;
        if self.inner.snapshot().modal().is_some() {
            return Err(SessionError::ModalOpen);
        }
        Ok(())
    }
}

impl Drop for BoardSession {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
