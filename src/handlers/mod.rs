// src/handlers/mod.rs

pub mod attempts;
pub mod review;

use crate::error::AppError;

/// Fallback for unknown routes, keeps the JSON error shape.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
