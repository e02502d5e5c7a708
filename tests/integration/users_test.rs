//! Sign-up, sign-in and user listings.

mod helpers;

use booru_core::error::ErrorKind;
use booru_core::types::PageQuery;
use booru_entity::permission::PermissionLevel;

use helpers::{PASSWORD, TestDb, account};

#[tokio::test]
async fn test_sign_up_default_permission() {
    let Some(db) = TestDb::create().await else { return };

    let open = db.state(false).await;
    let (user, token) = open.user_service.sign_up(account("kaito", None)).await.unwrap();
    assert!(!token.is_empty());
    assert!(!user.is_admin);
    assert_eq!(
        open.permission_service.level(user.user.id).await.unwrap(),
        PermissionLevel::READ | PermissionLevel::WRITE
    );

    let strict = db.state(true).await;
    let err = strict
        .user_service
        .sign_up(account("meiko", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "Email is enforced by administrator");

    let (user, _) = strict
        .user_service
        .sign_up(account("meiko", Some("meiko@example.com")))
        .await
        .unwrap();
    assert_eq!(
        strict.permission_service.level(user.user.id).await.unwrap(),
        PermissionLevel::READ
    );

    db.cleanup().await;
}

#[tokio::test]
async fn test_duplicate_name_or_email_conflicts() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    state
        .user_service
        .sign_up(account("len", Some("len@example.com")))
        .await
        .unwrap();

    let err = state
        .user_service
        .sign_up(account("len", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let err = state
        .user_service
        .sign_up(account("len2", Some("len@example.com")))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    db.cleanup().await;
}

#[tokio::test]
async fn test_sign_in_by_name_or_email() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    state
        .user_service
        .sign_up(account("teto", Some("teto@example.com")))
        .await
        .unwrap();

    assert!(state.user_service.sign_in("teto", PASSWORD).await.is_ok());
    assert!(state.user_service.sign_in("teto@example.com", PASSWORD).await.is_ok());

    let err = state
        .user_service
        .sign_in("teto", "wrong password")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "Invalid credentials");

    let err = state
        .user_service
        .sign_in("nobody", PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Invalid credentials");

    db.cleanup().await;
}

#[tokio::test]
async fn test_paging_over_twenty_five_users() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    for i in 0..25 {
        state
            .user_service
            .sign_up(account(&format!("user{i:02}"), None))
            .await
            .unwrap();
    }

    let page = state
        .user_service
        .list(&PageQuery::new(10, 20), false)
        .await
        .unwrap();
    assert_eq!(page.list.len(), 5);
    assert_eq!(page.meta.total, 25);
    assert_eq!(page.meta.page, 3);
    assert_eq!(page.meta.per_page, 10);
    assert_eq!(page.list[0].user.name, "user20");

    let sorted = PageQuery {
        sort: Some("name desc".to_string()),
        ..PageQuery::new(3, 0)
    };
    let page = state.user_service.list(&sorted, false).await.unwrap();
    let names: Vec<_> = page.list.iter().map(|u| u.user.name.as_str()).collect();
    assert_eq!(names, ["user24", "user23", "user22"]);

    let past_end = state
        .user_service
        .list(&PageQuery::new(1, i64::MAX), false)
        .await
        .unwrap();
    assert!(past_end.list.is_empty());
    assert_eq!(past_end.meta.page, i64::MAX);
    assert_eq!(past_end.meta.total, 25);

    let err = state
        .user_service
        .list(&PageQuery::new(0, 0), false)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    db.cleanup().await;
}

#[tokio::test]
async fn test_keywords_match_case_insensitively() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    for name in ["Admin", "madmax", "guest"] {
        state.user_service.sign_up(account(name, None)).await.unwrap();
    }

    let query = PageQuery {
        keywords: "adm".to_string(),
        ..PageQuery::default()
    };
    let page = state.user_service.list(&query, false).await.unwrap();
    let mut names: Vec<_> = page.list.iter().map(|u| u.user.name.clone()).collect();
    names.sort();
    assert_eq!(names, ["Admin", "madmax"]);
    assert_eq!(page.meta.total, 2);

    db.cleanup().await;
}

#[tokio::test]
async fn test_change_password() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    let (user, _) = state.user_service.sign_up(account("una", None)).await.unwrap();
    let ctx = booru_service::RequestContext::new(user.user.id, "una");

    let err = state
        .user_service
        .change_password(&ctx, "not the password", "another password")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);

    state
        .user_service
        .change_password(&ctx, PASSWORD, "another password")
        .await
        .unwrap();
    assert!(state.user_service.sign_in("una", PASSWORD).await.is_err());
    assert!(state.user_service.sign_in("una", "another password").await.is_ok());

    db.cleanup().await;
}
