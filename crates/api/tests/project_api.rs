//! HTTP-level integration tests for the `/api/v1/projects` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use std::time::Duration;

use axum::http::{Method, StatusCode};
use common::{body_json, body_text, delete, get, post_json, put_json, send, send_raw};
use sqlx::PgPool;

const PROJECTS: &str = "/api/v1/projects";

async fn create(pool: &PgPool, json: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, PROJECTS, json).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_201_without_file_content(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        PROJECTS,
        serde_json::json!({
            "name": "Portfolio",
            "preview_url": "/previews/portfolio.png",
            "file_content": "<html>secret markup</html>",
            "file_name": "portfolio.html",
            "file_size": 26
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );

    let text = body_text(response).await;
    assert!(!text.contains("file_content"));
    assert!(!text.contains("secret markup"));

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(json["id"].is_number());
    assert_eq!(json["name"], "Portfolio");
    assert_eq!(json["preview_url"], "/previews/portfolio.png");
    assert_eq!(json["file_name"], "portfolio.html");
    assert_eq!(json["file_size"], 26);
    assert_eq!(json["published"], false);
    assert!(json["published_url"].is_null());
    assert!(json["created_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_name_uses_placeholder(pool: PgPool) {
    let json = create(&pool, serde_json::json!({})).await;
    assert_eq!(json["name"], "Новый проект");
    assert_eq!(json["preview_url"], "/placeholder.svg");
    assert_eq!(json["file_name"], "");
    assert_eq!(json["file_size"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_empty_body_uses_placeholders(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send(app, Method::POST, PROJECTS, None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Новый проект");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_malformed_json_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = send_raw(app, Method::POST, PROJECTS, "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_body_returns_json_413(pool: PgPool) {
    let mut config = common::test_config();
    config.max_body_bytes = 1024;
    let app = common::build_test_app_with(pool.clone(), config);

    let markup = "<p>lorem ipsum</p>".repeat(200);
    let response = post_json(
        app,
        PROJECTS,
        serde_json::json!({"name": "Huge", "file_content": markup}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Request body too large"})
    );

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_utf8_body_returns_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let bytes: &'static [u8] = &[b'{', 0xff, 0xfe, b'}'];
    let response = send_raw(app, Method::POST, PROJECTS, bytes).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Request body must be valid UTF-8"})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_negative_size_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, PROJECTS, serde_json::json!({"file_size": -5})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_then_get_returns_matching_fields(pool: PgPool) {
    let created = create(
        &pool,
        serde_json::json!({
            "name": "Shop",
            "preview_url": "/previews/shop.png",
            "file_content": "<html/>",
            "file_name": "shop.html",
            "file_size": 7
        }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("{PROJECTS}/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = body_text(response).await;
    assert!(!text.contains("file_content"));
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "Shop");
    assert_eq!(json["preview_url"], "/previews/shop.png");
    assert_eq!(json["file_name"], "shop.html");
    assert_eq!(json["file_size"], 7);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_nonexistent_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, &format!("{PROJECTS}/999999")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Project not found"})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_with_non_numeric_id_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, &format!("{PROJECTS}/abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Invalid project id"})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_returns_newest_first(pool: PgPool) {
    for name in ["P1", "P2", "P3"] {
        create(&pool, serde_json::json!({ "name": name, "file_content": "x" })).await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, PROJECTS).await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = body_text(response).await;
    assert!(!text.contains("file_content"));
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let arr = json.as_array().unwrap();
    assert!(arr.len() >= 3);
    assert_eq!(arr[0]["name"], "P3");

    let created: Vec<chrono::DateTime<chrono::Utc>> = arr
        .iter()
        .map(|p| p["created_at"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(created.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_on_empty_table_returns_empty_array(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, PROJECTS).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn publish_is_reflected_on_next_get(pool: PgPool) {
    let created = create(&pool, serde_json::json!({"name": "Blog"})).await;
    let id = created["id"].as_i64().unwrap();
    let before = created["updated_at"].as_str().unwrap().to_string();

    tokio::time::sleep(Duration::from_millis(10)).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("{PROJECTS}/{id}"),
        serde_json::json!({"published": true, "published_url": "https://blog.example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["name"], "Blog");

    let app = common::build_test_app(pool);
    let fetched = body_json(get(app, &format!("{PROJECTS}/{id}")).await).await;
    assert_eq!(fetched["published"], true);
    assert_eq!(fetched["published_url"], "https://blog.example.com");

    let before: chrono::DateTime<chrono::Utc> = before.parse().unwrap();
    let after: chrono::DateTime<chrono::Utc> =
        fetched["updated_at"].as_str().unwrap().parse().unwrap();
    assert!(after > before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_with_null_fields_leaves_them_untouched(pool: PgPool) {
    let created = create(&pool, serde_json::json!({"name": "Keep"})).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("{PROJECTS}/{id}"),
        serde_json::json!({"name": null, "published": null}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Keep");
    assert_eq!(json["published"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_nonexistent_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("{PROJECTS}/999999"),
        serde_json::json!({"name": "Nobody"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Project not found"})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_with_mistyped_field_returns_400(pool: PgPool) {
    let created = create(&pool, serde_json::json!({})).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("{PROJECTS}/{id}"),
        serde_json::json!({"published": "yes"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_on_collection_requires_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, PROJECTS, serde_json::json!({"name": "x"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Project id is required"})
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_then_get_returns_404(pool: PgPool) {
    let created = create(&pool, serde_json::json!({"name": "Delete Me"})).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("{PROJECTS}/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"success": true})
    );

    let app = common::build_test_app(pool);
    let response = get(app, &format!("{PROJECTS}/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_nonexistent_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, &format!("{PROJECTS}/999999")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Project not found"})
    );
}

// ---------------------------------------------------------------------------
// Preflight and unsupported methods
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn options_returns_fixed_cors_headers(pool: PgPool) {
    for uri in [PROJECTS.to_string(), format!("{PROJECTS}/42")] {
        let app = common::build_test_app(pool.clone());
        let response = send(app, Method::OPTIONS, &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
        assert_eq!(
            headers.get("access-control-allow-methods").unwrap(),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            headers.get("access-control-allow-headers").unwrap(),
            "Content-Type"
        );
        assert_eq!(headers.get("access-control-max-age").unwrap(), "86400");
        assert!(body_text(response).await.is_empty());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_returns_405(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send(
        app,
        Method::PATCH,
        PROJECTS,
        Some(serde_json::json!({"name": "x"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Method not allowed"})
    );
}
