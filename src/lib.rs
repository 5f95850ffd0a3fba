//! # Party Board
//!
//! A shared board for organizing who brings which dish to a party. Couples
//! are dragged into food categories; each category holds a limited number
//! of dishes. The board keeps no data of its own: it syncs with a backend
//! record store over REST and re-renders whatever the backend returns.
//!
//! ## Modules
//!
//! - [`board`]: board state machine, drag/drop resolution, modal forms
//! - [`backend`]: the [`Backend`] trait with REST and in-memory stores
//! - [`session`]: drives the board against a backend and owns polling
//! - [`sync`]: the cancellable polling task
//! - [`render`] and [`console`]: the terminal front-end
//! - [`api`]: reference REST server over the in-memory store
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use party_board::{BoardSession, MemoryBackend, SessionConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(MemoryBackend::with_default_categories(3));
//!     let session = BoardSession::new(backend, SessionConfig::default());
//!
//!     session.check_health().await;
//!
//!     // Drop the Baker couple into desserts
//!     let payload = session.drag_start("pre-baker");
//!     session.drop_card(payload, Some("desserts")).await?;
//!
//!     println!("{}", party_board::render::screen(&session.snapshot(), session.placeholders()));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod backend;
pub mod board;
pub mod config;
pub mod console;
pub mod logging;
pub mod render;
pub mod session;
pub mod sync;

pub use backend::{
    Backend, BackendError, BackendResult, HttpBackend, HttpBackendConfig, MemoryBackend,
    StoreError,
};

pub use board::{
    Board, BoardEvent, Card, CardUpdate, Category, DragPayload, Modal, ModalField, Mutation,
    NewCard, ReadyBoard, ValidationError,
};

pub use session::{BoardSession, SessionConfig, SessionError};

pub use sync::SyncTask;

pub use api::{build_router, serve, AppState, ServerError};

pub use config::{ClientConfig, Config, ConfigError, LoggingConfig, ServerConfig};

pub use console::{Command, Console, ConsoleError, Reply};
