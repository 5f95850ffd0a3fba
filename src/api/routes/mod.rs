//! API Routes
//!
//! Route handlers organized by functionality.

pub mod cards;
pub mod categories;
pub mod health;
