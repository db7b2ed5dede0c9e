//! HTTP-level integration tests for the `/games` endpoints.
//!
//! Covers ownership stamping, owner-only writes, validation and filtering.

mod common;

use axum::http::StatusCode;
use common::{
    body_bytes, body_json, build_test_app, delete_auth, get, link, patch_json_auth, post_json,
    post_json_auth, put_json, put_json_auth, user_with_token,
};
use gamesapi_db::models::game_category::CreateGameCategory;
use gamesapi_db::repositories::GameCategoryRepo;
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_category(pool: &PgPool, name: &str) {
    GameCategoryRepo::create(
        pool,
        &CreateGameCategory {
            name: name.to_string(),
        },
    )
    .await
    .expect("category creation should succeed");
}

fn chess() -> Value {
    json!({
        "name": "Chess",
        "release_date": "2020-01-01",
        "game_category": "Strategy",
        "played": false,
    })
}

/// Create "Chess" as the token's user and return its id.
async fn create_chess(pool: &PgPool, token: &str) -> i64 {
    let response = post_json_auth(build_test_app(pool.clone()), "/games/", chess(), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["pk"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_game_stamps_owner(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    let (_alice, token) = user_with_token(&pool, "alice").await;

    let response = post_json_auth(build_test_app(pool), "/games/", chess(), &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let pk = json["pk"].as_i64().unwrap();
    assert_eq!(json["owner"], "alice");
    assert_eq!(json["name"], "Chess");
    assert_eq!(json["game_category"], "Strategy");
    assert_eq!(json["release_date"], "2020-01-01");
    assert_eq!(json["played"], false);
    assert_eq!(json["url"], link(&format!("/games/{pk}/")));
    assert!(json["created"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_supplied_owner_is_ignored(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    let (_alice, _) = user_with_token(&pool, "alice").await;
    let (_bob, bob_token) = user_with_token(&pool, "bob").await;

    let mut body = chess();
    body["owner"] = json!("alice");
    let response = post_json_auth(build_test_app(pool), "/games/", body, &bob_token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["owner"], "bob");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn played_defaults_to_false(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    let (_alice, token) = user_with_token(&pool, "alice").await;

    let body = json!({
        "name": "Go",
        "release_date": "2019-05-04",
        "game_category": "Strategy",
    });
    let response = post_json_auth(build_test_app(pool), "/games/", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["played"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_create_is_unauthorized(pool: PgPool) {
    create_category(&pool, "Strategy").await;

    let response = post_json(build_test_app(pool.clone()), "/games/", chess()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let list = body_json(get(build_test_app(pool), "/games/").await).await;
    assert_eq!(list["count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_reports_missing_and_unknown_fields(pool: PgPool) {
    let (_alice, token) = user_with_token(&pool, "alice").await;

    let body = json!({ "name": "Chess", "game_category": "Nope" });
    let response = post_json_auth(build_test_app(pool), "/games/", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["release_date"][0], "This field is required.");
    assert_eq!(
        json["fields"]["game_category"][0],
        "Object with name=Nope does not exist."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_game_name_is_rejected(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    let (_alice, token) = user_with_token(&pool, "alice").await;
    create_chess(&pool, &token).await;

    let response = post_json_auth(build_test_app(pool), "/games/", chess(), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["fields"]["name"][0],
        "game with this name already exists."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_is_bad_request(pool: PgPool) {
    let (_alice, token) = user_with_token(&pool, "alice").await;

    let body = json!({ "name": "Chess", "release_date": "not-a-date" });
    let response = post_json_auth(build_test_app(pool), "/games/", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Retrieve
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_game_is_404_with_empty_body(pool: PgPool) {
    let response = get(build_test_app(pool), "/games/999/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anyone_can_read_a_game(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    let (_alice, token) = user_with_token(&pool, "alice").await;
    let id = create_chess(&pool, &token).await;

    let response = get(build_test_app(pool), &format!("/games/{id}/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Chess");
    assert_eq!(json["owner"], "alice");
}

// ---------------------------------------------------------------------------
// Update / delete permissions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_owner_put_is_forbidden_and_leaves_game_unchanged(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    let (_alice, alice_token) = user_with_token(&pool, "alice").await;
    let (_bob, bob_token) = user_with_token(&pool, "bob").await;
    let id = create_chess(&pool, &alice_token).await;

    let mut body = chess();
    body["name"] = json!("Checkers");
    body["played"] = json!(true);
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/games/{id}/"),
        body,
        &bob_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get(build_test_app(pool), &format!("/games/{id}/")).await).await;
    assert_eq!(json["name"], "Chess");
    assert_eq!(json["played"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_put_is_unauthorized(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    let (_alice, token) = user_with_token(&pool, "alice").await;
    let id = create_chess(&pool, &token).await;

    let response = put_json(build_test_app(pool), &format!("/games/{id}/"), chess()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_can_put_and_patch(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    create_category(&pool, "Classic").await;
    let (_alice, token) = user_with_token(&pool, "alice").await;
    let id = create_chess(&pool, &token).await;

    let body = json!({
        "name": "Chess 960",
        "release_date": "1996-06-19",
        "game_category": "Classic",
        "played": true,
    });
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/games/{id}/"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Chess 960");
    assert_eq!(json["game_category"], "Classic");
    assert_eq!(json["owner"], "alice");

    let response = patch_json_auth(
        build_test_app(pool),
        &format!("/games/{id}/"),
        json!({ "played": false }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["played"], false);
    assert_eq!(json["name"], "Chess 960");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn put_of_fetched_representation_keeps_game_unchanged(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    let (_alice, token) = user_with_token(&pool, "alice").await;
    let id = create_chess(&pool, &token).await;
    let uri = format!("/games/{id}/");

    let before = body_json(get(build_test_app(pool.clone()), &uri).await).await;

    let mut body = before.clone();
    body["pk"] = json!(999);
    body["owner"] = json!("mallory");
    body["created"] = json!("1999-01-01T00:00:00Z");
    let response = put_json_auth(build_test_app(pool.clone()), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, before);

    let after = body_json(get(build_test_app(pool), &uri).await).await;
    assert_eq!(after, before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn put_requires_every_writable_field(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    let (_alice, token) = user_with_token(&pool, "alice").await;
    let id = create_chess(&pool, &token).await;

    let response = put_json_auth(
        build_test_app(pool),
        &format!("/games/{id}/"),
        json!({ "played": true }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["name"].is_array());
    assert!(json["fields"]["release_date"].is_array());
    assert!(json["fields"]["game_category"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_owner_can_delete(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    let (_alice, alice_token) = user_with_token(&pool, "alice").await;
    let (_bob, bob_token) = user_with_token(&pool, "bob").await;
    let id = create_chess(&pool, &alice_token).await;
    let uri = format!("/games/{id}/");

    let response = delete_auth(build_test_app(pool.clone()), &uri, &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(build_test_app(pool.clone()), &uri, &alice_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_searches_and_orders(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    let (_alice, token) = user_with_token(&pool, "alice").await;
    for (name, date, played) in [
        ("Chess", "2020-01-01", true),
        ("Checkers", "2018-03-02", false),
        ("Go", "2019-05-04", true),
    ] {
        let body = json!({
            "name": name,
            "release_date": date,
            "game_category": "Strategy",
            "played": played,
        });
        let response =
            post_json_auth(build_test_app(pool.clone()), "/games/", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(build_test_app(pool.clone()), "/games/?played=true").await).await;
    assert_eq!(json["count"], 2);

    let json =
        body_json(get(build_test_app(pool.clone()), "/games/?played=&owner=&limit=").await)
            .await;
    assert_eq!(json["count"], 3);

    let json = body_json(get(build_test_app(pool.clone()), "/games/?search=che").await).await;
    let names: Vec<&str> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Checkers", "Chess"]);

    let json =
        body_json(get(build_test_app(pool), "/games/?ordering=-release_date").await).await;
    assert_eq!(json["results"][0]["name"], "Chess");
    assert_eq!(json["results"][2]["name"], "Checkers");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn huge_offset_returns_empty_last_page(pool: PgPool) {
    create_category(&pool, "Strategy").await;
    let (_alice, token) = user_with_token(&pool, "alice").await;
    create_chess(&pool, &token).await;

    let response = get(
        build_test_app(pool),
        &format!("/games/?offset={}", i64::MAX),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"], json!([]));
    assert!(json["next"].is_null());
    assert!(json["previous"].is_string());
}
