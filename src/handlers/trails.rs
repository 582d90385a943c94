use crate::handlers::store_error;
use crate::schemas::{ApiError, ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::trail;
use model::store::{self, NewFavorite};
use serde::{Deserialize, Serialize};
use tracing::{instrument, info, debug, trace};
use utoipa::ToSchema;

/// Request body for favoriting a trail
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct FavoriteTrailRequest {
    /// Identifier of the trail at the trail provider
    #[serde(alias = "appId")]
    pub app_id: Option<String>,
    pub name: Option<String>,
    /// Route length in miles
    #[serde(alias = "trailLength")]
    pub trail_length: Option<f64>,
}

/// Favorited trail response model, in the field names the web client reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrailResponse {
    pub trail_id: i32,
    pub user_id: i32,
    pub app_id: Option<String>,
    pub name: Option<String>,
    pub trail_length: Option<f64>,
}

impl From<trail::Model> for TrailResponse {
    fn from(model: trail::Model) -> Self {
        Self {
            trail_id: model.trail_id,
            user_id: model.user_id,
            app_id: model.app_id,
            name: model.name,
            trail_length: model.trail_length,
        }
    }
}

/// List a user's favorited trails
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/trails",
    tag = "trails",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Favorites retrieved successfully", body = ApiResponse<Vec<TrailResponse>>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_favorite_trails(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TrailResponse>>>, ApiError> {
    trace!("Entering get_favorite_trails function for user_id: {}", user_id);

    let trails = store::favorites_of(&state.db, user_id)
        .await
        .map_err(store_error)?;

    debug!("User {} has {} favorited trails", user_id, trails.len());
    let data = trails.into_iter().map(TrailResponse::from).collect();
    Ok(Json(ApiResponse::ok(data, "Favorites retrieved successfully")))
}

/// Add a trail to a user's favorites
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/trails",
    tag = "trails",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    request_body = FavoriteTrailRequest,
    responses(
        (status = 201, description = "Trail added to favorites", body = ApiResponse<TrailResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn favorite_trail(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<FavoriteTrailRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TrailResponse>>), ApiError> {
    trace!("Entering favorite_trail function for user_id: {}", user_id);

    let favorite = NewFavorite {
        app_id: request.app_id,
        name: request.name,
        trail_length: request.trail_length,
    };
    let trail = store::favorite_trail(&state.db, user_id, favorite)
        .await
        .map_err(store_error)?;

    info!("Trail {} added to favorites of user {}", trail.trail_id, user_id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(TrailResponse::from(trail), "Trail added to favorites")),
    ))
}

/// Remove a trail from a user's favorites
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/trails/{trail_id}",
    tag = "trails",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("trail_id" = i32, Path, description = "Favorited trail ID"),
    ),
    responses(
        (status = 200, description = "Trail removed from favorites", body = ApiResponse<String>),
        (status = 404, description = "User or trail not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn unfavorite_trail(
    Path((user_id, trail_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering unfavorite_trail function for user_id: {}, trail_id: {}", user_id, trail_id);

    store::unfavorite_trail(&state.db, user_id, trail_id)
        .await
        .map_err(store_error)?;

    info!("Trail {} removed from favorites of user {}", trail_id, user_id);
    Ok(Json(ApiResponse::ok(
        format!("Trail {} removed", trail_id),
        "Trail removed from favorites",
    )))
}
