//! First-admin bootstrap against a real database.

mod helpers;

use std::sync::Arc;

use booru_core::error::ErrorKind;
use booru_entity::permission::PermissionLevel;
use booru_entity::settings::ADMIN_CREATED;

use helpers::{TestDb, account};

#[tokio::test]
async fn test_bootstrap_then_forbidden() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;
    assert!(!state.settings_service.snapshot().await.unwrap().admin_created);

    let (admin, token) = state
        .admin_service
        .bootstrap(account("root", Some("root@example.com")))
        .await
        .unwrap();
    assert!(admin.is_admin);
    assert_eq!(admin.permission, Some(PermissionLevel::ALL));
    assert!(!token.is_empty());

    assert!(state.admin_service.is_admin(admin.user.id).await.unwrap());
    assert_eq!(
        state.permission_service.level(admin.user.id).await.unwrap(),
        PermissionLevel::ALL
    );
    assert!(state.settings_service.snapshot().await.unwrap().admin_created);

    let err = state
        .admin_service
        .bootstrap(account("second", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert_eq!(err.message, "Admin already created");

    // A fresh process sees the durable flag.
    let restarted = db.state(false).await;
    let err = restarted
        .admin_service
        .bootstrap(account("third", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);

    db.cleanup().await;
}

#[tokio::test]
async fn test_concurrent_bootstrap_creates_exactly_one_admin() {
    let Some(db) = TestDb::create().await else { return };
    let state = Arc::new(db.state(false).await);

    let mut handles = Vec::new();
    for i in 0..8 {
        let state = Arc::clone(&state);
        handles.push(tokio::spawn(async move {
            state
                .admin_service
                .bootstrap(account(&format!("racer{i}"), None))
                .await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert_eq!(err.kind, ErrorKind::Forbidden),
        }
    }
    assert_eq!(created, 1);

    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(admins, 1);

    // Losers rolled back completely: no stray accounts.
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(users, 1);

    db.cleanup().await;
}

#[tokio::test]
async fn test_bootstrap_repairs_flag_when_admins_exist() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    let (user, _) = state
        .user_service
        .sign_up(account("early", None))
        .await
        .unwrap();
    state.admin_service.assign(user.user.id).await.unwrap();

    let err = state
        .admin_service
        .bootstrap(account("late", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);

    let flag: Option<bool> =
        sqlx::query_scalar("SELECT value_bool FROM app_settings WHERE key = $1")
            .bind(ADMIN_CREATED)
            .fetch_one(&db.pool)
            .await
            .unwrap();
    assert_eq!(flag, Some(true));

    let late = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE name = 'late'")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(late, 0);

    db.cleanup().await;
}

#[tokio::test]
async fn test_failed_bootstrap_leaves_no_trace() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    state
        .user_service
        .sign_up(account("taken", None))
        .await
        .unwrap();

    // The name collision aborts the whole transaction.
    let err = state
        .admin_service
        .bootstrap(account("taken", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(!state.settings_service.snapshot().await.unwrap().admin_created);

    // Bootstrap is still available afterwards.
    state
        .admin_service
        .bootstrap(account("root", None))
        .await
        .unwrap();

    db.cleanup().await;
}
