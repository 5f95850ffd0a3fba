//! Category Routes
//!
//! - GET /api/categories - Every category in display order, with its cards

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::board::Category;

/// GET /api/categories
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<Category>> {
    Json(state.store.categories().await)
}
