//! Data Transfer Objects
//!
//! Request and response types for the API endpoints. Categories and cards
//! go over the wire as the board's own types; only envelopes live here.

use serde::{Deserialize, Serialize};

use crate::api::error::ServerError;
use crate::board::{CardUpdate, NewCard};

// ============================================
// SERVICE DTOs
// ============================================

/// `GET /` response
#[derive(Debug, Serialize, Deserialize)]
pub struct InfoResponse {
    pub message: String,
    pub version: String,
    pub status: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
}

/// `GET /api/health` response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

// ============================================
// CARD DTOs
// ============================================

/// Card creation request. Fields are optional here so a missing one is
/// reported by name instead of as a generic decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCardRequest {
    pub couple_name: Option<String>,
    pub dish_name: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub category_id: Option<String>,
}

impl CreateCardRequest {
    pub fn into_new_card(self) -> Result<NewCard, ServerError> {
        let couple_name = required("couple_name", self.couple_name)?;
        let dish_name = required("dish_name", self.dish_name)?;
        let dietary_restrictions = required("dietary_restrictions", self.dietary_restrictions)?;
        let category_id = required("category_id", self.category_id)?;

        if couple_name.trim().is_empty() || dish_name.trim().is_empty() {
            return Err(ServerError::Validation(
                "Couple name and dish name are required".to_string(),
            ));
        }

        Ok(NewCard {
            couple_name,
            dish_name,
            dietary_restrictions,
            category_id,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, ServerError> {
    value.ok_or_else(|| ServerError::Validation(format!("Missing field: {}", field)))
}

/// Category reassignment request
#[derive(Debug, Default, Deserialize)]
pub struct MoveCardRequest {
    pub category_id: Option<String>,
}

impl MoveCardRequest {
    pub fn category_id(self) -> Result<String, ServerError> {
        self.category_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ServerError::Validation("category_id is required".to_string()))
    }
}

/// Partial card update request
pub type UpdateCardRequest = CardUpdate;

/// `DELETE /api/cards/:id` response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
