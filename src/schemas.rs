use axum::{http::StatusCode, response::Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::handlers::trails::{FavoriteTrailRequest, TrailResponse};
use crate::handlers::users::{CreateUserRequest, UpdateUserRequest, UserResponse};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::trails::get_favorite_trails,
        crate::handlers::trails::favorite_trail,
        crate::handlers::trails::unfavorite_trail,
    ),
    components(
        schemas(
            ApiResponse<UserResponse>,
            ApiResponse<Vec<UserResponse>>,
            ApiResponse<TrailResponse>,
            ApiResponse<Vec<TrailResponse>>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            FavoriteTrailRequest,
            TrailResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Account management endpoints"),
        (name = "trails", description = "Favorited trail endpoints"),
    ),
    info(
        title = "Take-a-Hike API",
        description = "Accounts and favorited trails for the Take-a-Hike trail finder",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
