use crate::handlers::trails::{FavoriteTrailRequest, TrailResponse};
use crate::handlers::users::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::schemas::{ApiResponse, ErrorResponse, HealthResponse};
use crate::test_utils::{init_test_tracing, setup_test_app};
use axum::http::StatusCode;
use axum_test::TestServer;

async fn test_server() -> TestServer {
    TestServer::new(setup_test_app().await).unwrap()
}

async fn register(server: &TestServer, username: &str, password: &str) -> UserResponse {
    let response = server
        .post("/api/v1/users")
        .json(&CreateUserRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<ApiResponse<UserResponse>>().data
}

async fn add_favorite(server: &TestServer, user_id: i32, name: &str) -> TrailResponse {
    let response = server
        .post(&format!("/api/v1/users/{}/trails", user_id))
        .json(&FavoriteTrailRequest {
            app_id: Some(format!("place-{}", name.to_lowercase())),
            name: Some(name.to_string()),
            trail_length: Some(2.5),
        })
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<ApiResponse<TrailResponse>>().data
}

#[tokio::test]
async fn test_health_check() {
    let server = test_server().await;

    let response = server.get("/health").await;

    response.assert_status(StatusCode::OK);
    let body: HealthResponse = response.json();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.database, "connected");
}

#[tokio::test]
async fn test_create_user() {
    let _guard = init_test_tracing();
    let server = test_server().await;

    let response = server
        .post("/api/v1/users")
        .json(&CreateUserRequest {
            username: "alice".to_string(),
            password: "p1".to_string(),
        })
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: ApiResponse<serde_json::Value> = response.json();
    assert!(body.success);
    assert_eq!(body.message, "User created successfully");

    let user_data = &body.data;
    assert_eq!(user_data["username"], "alice");
    assert!(user_data["id"].as_i64().unwrap() > 0);
    assert!(user_data["city"].is_null());
    assert!(user_data["state"].is_null());
    assert!(user_data["experience"].is_null());
    assert_eq!(user_data["trails"], serde_json::json!([]));
    assert!(user_data.get("password").is_none());
}

#[tokio::test]
async fn test_duplicate_username_is_accepted() {
    let server = test_server().await;

    let first = register(&server, "alice", "p1").await;
    let second = register(&server, "alice", "p2").await;

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_get_user_by_id_eager_by_default() {
    let server = test_server().await;
    let user = register(&server, "alice", "p1").await;
    let trail = add_favorite(&server, user.id, "Ridge").await;

    let response = server.get(&format!("/api/v1/users/{}", user.id)).await;

    response.assert_status(StatusCode::OK);
    let body: ApiResponse<UserResponse> = response.json();
    assert_eq!(body.message, "User retrieved successfully");
    assert_eq!(body.data.id, user.id);
    assert_eq!(body.data.favorited_trails, Some(vec![trail]));
}

#[tokio::test]
async fn test_get_user_deferred_omits_trails() {
    let server = test_server().await;
    let user = register(&server, "alice", "p1").await;
    add_favorite(&server, user.id, "Ridge").await;

    let response = server
        .get(&format!("/api/v1/users/{}?fetch=deferred", user.id))
        .await;

    response.assert_status(StatusCode::OK);
    let body: ApiResponse<serde_json::Value> = response.json();
    assert_eq!(body.data["username"], "alice");
    assert!(body.data.get("trails").is_none());
}

#[tokio::test]
async fn test_get_user_invalid_fetch_mode() {
    let server = test_server().await;
    let user = register(&server, "alice", "p1").await;

    let response = server
        .get(&format!("/api/v1/users/{}?fetch=lazy", user.id))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "INVALID_FETCH_MODE");
}

#[tokio::test]
async fn test_get_user_not_found() {
    let server = test_server().await;

    let response = server.get("/api/v1/users/99999").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: ErrorResponse = response.json();
    assert!(!body.success);
    assert_eq!(body.code, "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_get_users_paginated() {
    let server = test_server().await;
    let first = register(&server, "a", "pw").await;
    let second = register(&server, "b", "pw").await;
    let third = register(&server, "c", "pw").await;

    let response = server.get("/api/v1/users?page=1&limit=2").await;
    response.assert_status(StatusCode::OK);
    let body: ApiResponse<Vec<UserResponse>> = response.json();
    assert_eq!(body.message, "Users retrieved successfully");
    let ids: Vec<i32> = body.data.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert!(body.data.iter().all(|u| u.favorited_trails == Some(Vec::new())));

    let response = server.get("/api/v1/users?page=2&limit=2&fetch=deferred").await;
    response.assert_status(StatusCode::OK);
    let body: ApiResponse<Vec<UserResponse>> = response.json();
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.data[0].id, third.id);
    assert_eq!(body.data[0].favorited_trails, None);
}

#[tokio::test]
async fn test_get_users_rejects_invalid_page_size() {
    let server = test_server().await;

    let response = server.get("/api/v1/users?limit=0").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_user_profile() {
    let server = test_server().await;
    let user = register(&server, "alice", "p1").await;

    let update_request = UpdateUserRequest {
        username: Some("alice2".to_string()),
        password: Some("p2".to_string()),
        city: Some(Some("Bozeman".to_string())),
        state: Some(Some("MT".to_string())),
        experience: Some(Some("advanced".to_string())),
    };
    let response = server
        .put(&format!("/api/v1/users/{}", user.id))
        .json(&update_request)
        .await;

    response.assert_status(StatusCode::OK);
    let body: ApiResponse<UserResponse> = response.json();
    assert_eq!(body.message, "User updated successfully");
    assert_eq!(body.data.username.as_deref(), Some("alice2"));
    assert_eq!(body.data.city.as_deref(), Some("Bozeman"));
    assert_eq!(body.data.state.as_deref(), Some("MT"));
    assert_eq!(body.data.experience.as_deref(), Some("ADVANCED"));

    // Persisted values survive a reload
    let reloaded: ApiResponse<UserResponse> = server
        .get(&format!("/api/v1/users/{}", user.id))
        .await
        .json();
    assert_eq!(reloaded.data.username.as_deref(), Some("alice2"));
    assert_eq!(reloaded.data.experience.as_deref(), Some("ADVANCED"));
}

#[tokio::test]
async fn test_update_user_partial() {
    let server = test_server().await;
    let user = register(&server, "alice", "p1").await;

    let response = server
        .put(&format!("/api/v1/users/{}", user.id))
        .json(&UpdateUserRequest {
            city: Some(Some("Moab".to_string())),
            ..Default::default()
        })
        .await;

    response.assert_status(StatusCode::OK);
    let body: ApiResponse<UserResponse> = response.json();
    assert_eq!(body.data.username.as_deref(), Some("alice"));
    assert_eq!(body.data.city.as_deref(), Some("Moab"));
    assert_eq!(body.data.state, None);
}

#[tokio::test]
async fn test_update_user_null_clears_fields() {
    let server = test_server().await;
    let user = register(&server, "alice", "p1").await;

    server
        .put(&format!("/api/v1/users/{}", user.id))
        .json(&serde_json::json!({ "city": "Moab", "state": "UT", "experience": "expert" }))
        .await
        .assert_status(StatusCode::OK);

    // Explicit null clears, a missing key leaves the value alone
    let response = server
        .put(&format!("/api/v1/users/{}", user.id))
        .json(&serde_json::json!({ "city": null, "experience": null }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: ApiResponse<UserResponse> = response.json();
    assert_eq!(body.data.city, None);
    assert_eq!(body.data.experience, None);
    assert_eq!(body.data.state.as_deref(), Some("UT"));

    let reloaded: ApiResponse<serde_json::Value> = server
        .get(&format!("/api/v1/users/{}", user.id))
        .await
        .json();
    assert!(reloaded.data["city"].is_null());
    assert!(reloaded.data["experience"].is_null());
    assert_eq!(reloaded.data["state"], "UT");
}

#[test]
fn test_update_request_distinguishes_null_from_missing() {
    let request: UpdateUserRequest =
        serde_json::from_value(serde_json::json!({ "city": null, "username": "bob" })).unwrap();

    assert_eq!(request.city, Some(None));
    assert_eq!(request.state, None);
    assert_eq!(request.experience, None);
    assert_eq!(request.username.as_deref(), Some("bob"));
}

#[tokio::test]
async fn test_responses_use_client_field_names() {
    let server = test_server().await;
    let user = register(&server, "alice", "p1").await;
    let trail = add_favorite(&server, user.id, "Ridge").await;

    let body: ApiResponse<serde_json::Value> = server
        .get(&format!("/api/v1/users/{}", user.id))
        .await
        .json();

    let favorite = &body.data["trails"][0];
    assert_eq!(favorite["trailId"], trail.trail_id);
    assert_eq!(favorite["userId"], user.id);
    assert_eq!(favorite["appId"], "place-ridge");
    assert_eq!(favorite["trailLength"], 2.5);
    assert_eq!(favorite["name"], "Ridge");
}

#[tokio::test]
async fn test_update_user_rejects_unknown_experience() {
    let server = test_server().await;
    let user = register(&server, "alice", "p1").await;

    let response = server
        .put(&format!("/api/v1/users/{}", user.id))
        .json(&UpdateUserRequest {
            city: Some(Some("Moab".to_string())),
            experience: Some(Some("legendary".to_string())),
            ..Default::default()
        })
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "INVALID_EXPERIENCE");

    // Nothing was written
    let reloaded: ApiResponse<UserResponse> = server
        .get(&format!("/api/v1/users/{}", user.id))
        .await
        .json();
    assert_eq!(reloaded.data.city, None);
}

#[tokio::test]
async fn test_update_user_not_found() {
    let server = test_server().await;

    let response = server
        .put("/api/v1/users/99999")
        .json(&UpdateUserRequest {
            username: Some("ghost".to_string()),
            ..Default::default()
        })
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorite_and_unfavorite_trail() {
    let server = test_server().await;
    let user = register(&server, "alice", "p1").await;

    let trail = add_favorite(&server, user.id, "Ridge").await;
    assert_eq!(trail.user_id, user.id);
    assert_eq!(trail.name.as_deref(), Some("Ridge"));
    assert_eq!(trail.app_id.as_deref(), Some("place-ridge"));

    let response = server.get(&format!("/api/v1/users/{}/trails", user.id)).await;
    response.assert_status(StatusCode::OK);
    let body: ApiResponse<Vec<TrailResponse>> = response.json();
    assert_eq!(body.data, vec![trail.clone()]);

    let response = server
        .delete(&format!("/api/v1/users/{}/trails/{}", user.id, trail.trail_id))
        .await;
    response.assert_status(StatusCode::OK);
    let body: ApiResponse<String> = response.json();
    assert_eq!(body.message, "Trail removed from favorites");

    let body: ApiResponse<Vec<TrailResponse>> = server
        .get(&format!("/api/v1/users/{}/trails", user.id))
        .await
        .json();
    assert!(body.data.is_empty());
}

#[tokio::test]
async fn test_favorite_accepts_camel_case_fields() {
    let server = test_server().await;
    let user = register(&server, "alice", "p1").await;

    let response = server
        .post(&format!("/api/v1/users/{}/trails", user.id))
        .json(&serde_json::json!({
            "appId": "ChIJ-trail",
            "name": "Sky Pond",
            "trailLength": 9.5,
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: ApiResponse<TrailResponse> = response.json();
    assert_eq!(body.data.app_id.as_deref(), Some("ChIJ-trail"));
    assert_eq!(body.data.trail_length, Some(9.5));
}

#[tokio::test]
async fn test_favoriting_same_trail_twice_keeps_both() {
    let server = test_server().await;
    let user = register(&server, "alice", "p1").await;

    let first = add_favorite(&server, user.id, "Ridge").await;
    let second = add_favorite(&server, user.id, "Ridge").await;

    let body: ApiResponse<UserResponse> = server
        .get(&format!("/api/v1/users/{}", user.id))
        .await
        .json();
    assert_eq!(body.data.favorited_trails, Some(vec![first, second]));
}

#[tokio::test]
async fn test_favorite_for_missing_user() {
    let server = test_server().await;

    let response = server
        .post("/api/v1/users/99999/trails")
        .json(&FavoriteTrailRequest::default())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unfavorite_other_users_trail() {
    let server = test_server().await;
    let alice = register(&server, "alice", "p1").await;
    let bob = register(&server, "bob", "p2").await;
    let bob_trail = add_favorite(&server, bob.id, "Canyon").await;

    let response = server
        .delete(&format!("/api/v1/users/{}/trails/{}", alice.id, bob_trail.trail_id))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "TRAIL_NOT_FOUND");
}

#[tokio::test]
async fn test_delete_user_cascades_favorites() {
    let server = test_server().await;
    let alice = register(&server, "alice", "p1").await;
    let bob = register(&server, "bob", "p2").await;
    add_favorite(&server, alice.id, "Ridge").await;
    add_favorite(&server, alice.id, "Falls").await;
    let bob_trail = add_favorite(&server, bob.id, "Canyon").await;

    let response = server.delete(&format!("/api/v1/users/{}", alice.id)).await;

    response.assert_status(StatusCode::OK);
    let body: ApiResponse<String> = response.json();
    assert!(body.success);
    assert_eq!(body.message, "User deleted successfully");
    assert_eq!(body.data, format!("User {} deleted with 2 favorited trails", alice.id));

    server
        .get(&format!("/api/v1/users/{}", alice.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get(&format!("/api/v1/users/{}/trails", alice.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let body: ApiResponse<Vec<TrailResponse>> = server
        .get(&format!("/api/v1/users/{}/trails", bob.id))
        .await
        .json();
    assert_eq!(body.data, vec![bob_trail]);
}

#[tokio::test]
async fn test_delete_user_not_found() {
    let server = test_server().await;

    let response = server.delete("/api/v1/users/99999").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let server = test_server().await;

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status(StatusCode::OK);
    let doc: serde_json::Value = response.json();
    let paths = doc["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/v1/users"));
    assert!(paths.contains_key("/api/v1/users/{user_id}"));
    assert!(paths.contains_key("/api/v1/users/{user_id}/trails"));
    assert!(paths.contains_key("/api/v1/users/{user_id}/trails/{trail_id}"));
}
