use crate::handlers::trails::TrailResponse;
use crate::handlers::{parse_fetch_mode, store_error};
use crate::schemas::{ApiError, ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use model::entities::experience::Experience;
use model::store::{self, ProfileChanges, UserAccount};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{instrument, warn, info, debug, trace};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for registering a new user
#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Login name (uniqueness is not enforced)
    pub username: String,
    /// Password, stored as given
    pub password: String,
}

/// Request body for updating a user. Omitted fields keep their value;
/// an explicit `null` clears `city`, `state` or `experience`.
#[derive(Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default, deserialize_with = "present_or_null", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub state: Option<Option<String>>,
    /// One of BEGINNER, INTERMEDIATE, ADVANCED, EXPERT (case-insensitive)
    #[serde(default, deserialize_with = "present_or_null", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub experience: Option<Option<String>>, // Will be parsed to Experience
}

/// Distinguish a key sent as `null` (`Some(None)`) from a missing key
/// (`None`, via `#[serde(default)]`).
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// Keep passwords out of `#[instrument]` spans
impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("city", &self.city)
            .field("state", &self.state)
            .field("experience", &self.experience)
            .finish()
    }
}

/// Query parameters for fetching a single user
#[derive(Debug, Deserialize, IntoParams)]
pub struct UserQuery {
    /// `eager` (default) includes favorited trails, `deferred` leaves them out
    pub fetch: Option<String>,
}

/// Query parameters for listing users
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct ListUsersQuery {
    /// Page number (default: 1)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size (default: 50)
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
    /// `eager` (default) or `deferred`
    pub fetch: Option<String>,
}

/// User response model. The password is never returned.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub experience: Option<String>,
    /// Present only when the favorites were fetched
    #[serde(rename = "trails", default, skip_serializing_if = "Option::is_none")]
    pub favorited_trails: Option<Vec<TrailResponse>>,
}

impl From<model::entities::user::Model> for UserResponse {
    fn from(model: model::entities::user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            city: model.city,
            state: model.state,
            experience: model.experience.map(|level| level.as_str().to_string()),
            favorited_trails: None,
        }
    }
}

impl From<UserAccount> for UserResponse {
    fn from(account: UserAccount) -> Self {
        let favorited_trails = account
            .favorited_trails
            .map(|trails| trails.into_iter().map(TrailResponse::from).collect());
        Self {
            favorited_trails,
            ..Self::from(account.user)
        }
    }
}

fn parse_experience(experience: Option<Option<String>>) -> Result<Option<Option<Experience>>, ApiError> {
    experience
        .map(|value| value.map(|level| level.parse::<Experience>()).transpose())
        .transpose()
        .map_err(|e| {
            warn!("Rejected experience value: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string(), "INVALID_EXPERIENCE")),
            )
        })
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    trace!("Entering create_user function");
    debug!("Creating user with username: {}", request.username);

    let account = store::create_user(&state.db, request.username, request.password)
        .await
        .map_err(store_error)?;

    info!("User created successfully with ID: {}", account.user.id);
    let response = ApiResponse::ok(UserResponse::from(account), "User created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a page of users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserResponse>>),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_users(
    Valid(Query(query)): Valid<Query<ListUsersQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    trace!("Entering get_users function");

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(50);
    let fetch = parse_fetch_mode(query.fetch.as_deref())?;
    debug!("Fetching users - page: {}, limit: {}, fetch: {:?}", page, limit, fetch);

    let accounts = store::list_users(&state.db, page, limit, fetch)
        .await
        .map_err(store_error)?;

    let user_count = accounts.len();
    let user_responses: Vec<UserResponse> = accounts.into_iter().map(UserResponse::from).collect();

    info!("Successfully retrieved {} users", user_count);
    Ok(Json(ApiResponse::ok(user_responses, "Users retrieved successfully")))
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        UserQuery,
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid fetch mode", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_user(
    Path(user_id): Path<i32>,
    Query(query): Query<UserQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    trace!("Entering get_user function for user_id: {}", user_id);

    let fetch = parse_fetch_mode(query.fetch.as_deref())?;
    let account = store::find_user(&state.db, user_id, fetch)
        .await
        .map_err(store_error)?;

    info!("Successfully retrieved user with ID: {}", user_id);
    Ok(Json(ApiResponse::ok(
        UserResponse::from(account),
        "User retrieved successfully",
    )))
}

/// Update a user's profile
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    trace!("Entering update_user function for user_id: {}", user_id);

    let changes = ProfileChanges {
        experience: parse_experience(request.experience)?,
        username: request.username,
        password: request.password,
        city: request.city,
        state: request.state,
    };

    let updated = store::update_profile(&state.db, user_id, changes)
        .await
        .map_err(store_error)?;

    info!("User with ID {} updated successfully", user_id);
    Ok(Json(ApiResponse::ok(
        UserResponse::from(updated),
        "User updated successfully",
    )))
}

/// Delete a user together with its favorited trails
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_user function for user_id: {}", user_id);

    let removed_trails = store::delete_user(&state.db, user_id)
        .await
        .map_err(store_error)?;

    info!("User with ID {} deleted successfully", user_id);
    Ok(Json(ApiResponse::ok(
        format!("User {} deleted with {} favorited trails", user_id, removed_trails),
        "User deleted successfully",
    )))
}
