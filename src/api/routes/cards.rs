//! Card Routes
//!
//! - POST /api/cards - Create a card in a category with room
//! - PUT /api/cards/:id - Update dish name and dietary text
//! - PUT /api/cards/:id/category - Move a card to another category
//! - DELETE /api/cards/:id - Remove a card

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CreateCardRequest, DeleteResponse, MoveCardRequest, UpdateCardRequest};
use crate::api::error::ServerResult;
use crate::api::state::AppState;
use crate::board::Card;

/// POST /api/cards
///
/// All four fields are required; couple and dish must be non-blank.
/// Returns 201 with the stored card.
pub async fn create_card(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateCardRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Card>)> {
    let Json(req) = payload?;
    let card = state.store.insert_card(req.into_new_card()?).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// PUT /api/cards/:id
pub async fn update_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCardRequest>, JsonRejection>,
) -> ServerResult<Json<Card>> {
    let Json(update) = payload?;
    Ok(Json(state.store.edit_card(&id, update).await?))
}

/// PUT /api/cards/:id/category
pub async fn move_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<MoveCardRequest>, JsonRejection>,
) -> ServerResult<Json<Card>> {
    let Json(req) = payload?;
    let category_id = req.category_id()?;
    Ok(Json(state.store.move_card(&id, &category_id).await?))
}

/// DELETE /api/cards/:id
pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<DeleteResponse>> {
    state.store.remove_card(&id).await?;
    Ok(Json(DeleteResponse {
        message: "Card deleted".to_string(),
    }))
}
