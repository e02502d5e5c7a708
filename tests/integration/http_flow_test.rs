//! End-to-end flows through the HTTP stack.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestDb, app, call, empty_request, json_request};

#[tokio::test]
async fn test_account_lifecycle_over_http() {
    let Some(db) = TestDb::create().await else { return };
    let app = app(db.state(false).await);

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/user/sign-up",
            None,
            json!({"name": "kaai", "email": "kaai@example.com", "password": PASSWORD}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["name"], "kaai");
    assert_eq!(body["data"]["permission"], 3);
    assert!(body["data"].get("password_hash").is_none());
    let token = body["message"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/user/sign-in",
            None,
            json!({"name_or_email": "kaai@example.com", "password": PASSWORD}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_str().is_some());

    let (status, body) = call(&app, empty_request("GET", "/api/v1/user", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "kaai@example.com");

    // Public listing hides email.
    let (status, body) = call(&app, empty_request("GET", "/api/v1/users", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meta"]["total"], 1);
    assert!(body["data"]["list"][0].get("email").is_none());

    let (status, body) = call(
        &app,
        empty_request("GET", "/api/v1/heartbeat/read-write", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, _) = call(
        &app,
        empty_request("GET", "/api/v1/heartbeat/moderator", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(
        &app,
        empty_request("GET", "/api/v1/heartbeat/admin-only", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(&app, empty_request("DELETE", "/api/v1/user", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, empty_request("GET", "/api/v1/user", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    db.cleanup().await;
}

#[tokio::test]
async fn test_admin_flow_over_http() {
    let Some(db) = TestDb::create().await else { return };
    let app = app(db.state(false).await);

    let (status, body) = call(&app, empty_request("GET", "/api/v1/settings", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["admin_created"], false);

    let bootstrap = json!({"name": "root", "password": PASSWORD});
    let (status, body) = call(
        &app,
        json_request("POST", "/api/v1/user/init-admin-create", None, bootstrap.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["admin"], true);
    assert_eq!(body["data"]["permission"], 15);
    let admin_token = body["message"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/user/init-admin-create",
            None,
            json!({"name": "again", "password": PASSWORD}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body,
        json!({"status": 403, "data": null, "message": "Admin already created"})
    );

    let (status, body) = call(&app, empty_request("GET", "/api/v1/settings", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["admin_created"], true);

    let (status, _) = call(
        &app,
        empty_request("GET", "/api/v1/heartbeat/admin-only", Some(&admin_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A regular user, promoted and demoted.
    let (_, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/user/sign-up",
            None,
            json!({"name": "helper", "password": PASSWORD}),
        ),
    )
    .await;
    let helper_id = body["data"]["id"].as_str().unwrap().to_string();

    let uri = format!("/api/v1/admin/manage/{helper_id}");
    let (status, body) = call(&app, empty_request("PUT", &uri, Some(&admin_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_id"], helper_id);

    let (status, body) = call(&app, empty_request("PUT", &uri, Some(&admin_token))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Already an admin");

    let (status, body) = call(
        &app,
        empty_request("GET", "/api/v1/admin/manage", Some(&admin_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meta"]["total"], 2);

    let (status, _) = call(&app, empty_request("DELETE", &uri, Some(&admin_token))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, empty_request("DELETE", &uri, Some(&admin_token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(
        &app,
        json_request(
            "PUT",
            "/api/v1/admin/user/permission",
            Some(&admin_token),
            json!({"user_id": helper_id, "permission_level": 8}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["permission"], 8);

    let (status, body) = call(
        &app,
        empty_request(
            "GET",
            &format!("/api/v1/admin/user/permission/{helper_id}"),
            Some(&admin_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["permission"], 8);

    db.cleanup().await;
}

#[tokio::test]
async fn test_taxonomy_over_http() {
    let Some(db) = TestDb::create().await else { return };
    let app = app(db.state(false).await);

    let (_, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/user/init-admin-create",
            None,
            json!({"name": "root", "password": PASSWORD}),
        ),
    )
    .await;
    let token = body["message"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/tag-categories",
            Some(&token),
            json!({"slug": "Character"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "character");
    assert_eq!(body["data"]["name"], "Character");
    let category_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/tag-categories",
            Some(&token),
            json!({"slug": "character"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/tags",
            Some(&token),
            json!({"slug": "Hatsune Miku", "category_id": category_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "hatsune_miku");
    assert_eq!(body["data"]["category_slug"], "character");

    let (status, body) = call(&app, empty_request("GET", "/api/v1/tags/name/hatsune_miku", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = call(
        &app,
        empty_request("GET", &format!("/api/v1/tags?category_id={category_id}&keywords=MIKU"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meta"]["total"], 1);

    db.cleanup().await;
}
