//! Admin assignment, removal and account deletion cascades.

mod helpers;

use booru_core::error::ErrorKind;
use booru_core::types::PageQuery;
use booru_entity::permission::PermissionLevel;

use helpers::{TestDb, account};

#[tokio::test]
async fn test_assign_twice_conflicts() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    let (user, _) = state.user_service.sign_up(account("miku", None)).await.unwrap();
    state.admin_service.assign(user.user.id).await.unwrap();

    let err = state.admin_service.assign(user.user.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(err.message, "Already an admin");

    db.cleanup().await;
}

#[tokio::test]
async fn test_assign_unknown_user_is_not_found() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    let err = state
        .admin_service
        .assign(uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    db.cleanup().await;
}

#[tokio::test]
async fn test_remove_non_admin_is_not_found() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    let (user, _) = state.user_service.sign_up(account("rin", None)).await.unwrap();
    let err = state.admin_service.remove(user.user.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    state.admin_service.assign(user.user.id).await.unwrap();
    let removed = state.admin_service.remove(user.user.id).await.unwrap();
    assert_eq!(removed.user_id, user.user.id);
    assert!(!state.admin_service.is_admin(user.user.id).await.unwrap());

    db.cleanup().await;
}

#[tokio::test]
async fn test_delete_cascades_admin_and_permission() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    let (admin, _) = state
        .admin_service
        .bootstrap(account("luka", None))
        .await
        .unwrap();
    let id = admin.user.id;

    state.user_service.delete(id).await.unwrap();

    assert!(!state.admin_service.is_admin(id).await.unwrap());
    assert_eq!(
        state.permission_service.get(id).await.unwrap_err().kind,
        ErrorKind::NotFound
    );
    assert_eq!(
        state.user_service.get(id).await.unwrap_err().kind,
        ErrorKind::NotFound
    );

    let page = state
        .user_service
        .list(&PageQuery::default(), false)
        .await
        .unwrap();
    assert_eq!(page.meta.total, 0);

    // Deleting again finds nothing.
    assert_eq!(
        state.user_service.delete(id).await.unwrap_err().kind,
        ErrorKind::NotFound
    );

    db.cleanup().await;
}

#[tokio::test]
async fn test_failed_delete_keeps_admin_and_permission() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    let (admin, _) = state
        .admin_service
        .bootstrap(account("gumi", None))
        .await
        .unwrap();
    let id = admin.user.id;

    // Make the final soft delete step fail after the cascade has run.
    sqlx::query(
        "CREATE FUNCTION reject_user_update() RETURNS trigger AS $$ \
         BEGIN RAISE EXCEPTION 'users are read-only'; END; $$ LANGUAGE plpgsql",
    )
    .execute(&db.pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER users_read_only BEFORE UPDATE ON users \
         FOR EACH ROW EXECUTE FUNCTION reject_user_update()",
    )
    .execute(&db.pool)
    .await
    .unwrap();

    let err = state.user_service.delete(id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Database);

    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins WHERE user_id = $1")
        .bind(id)
        .fetch_one(&db.pool)
        .await
        .unwrap();
    let permissions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM permissions WHERE user_id = $1")
            .bind(id)
            .fetch_one(&db.pool)
            .await
            .unwrap();
    assert_eq!(admins, 1);
    assert_eq!(permissions, 1);
    assert!(state.admin_service.is_admin(id).await.unwrap());
    assert_eq!(state.user_service.get(id).await.unwrap().user.id, id);

    db.cleanup().await;
}

#[tokio::test]
async fn test_create_admin_grants_everything() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    let (root, _) = state
        .admin_service
        .bootstrap(account("root", None))
        .await
        .unwrap();
    let (created, token) = state
        .admin_service
        .create_admin(root.user.id, account("deputy", Some("deputy@example.com")))
        .await
        .unwrap();
    assert!(!token.is_empty());
    assert!(state.admin_service.is_admin(created.user.id).await.unwrap());
    assert_eq!(
        state.permission_service.level(created.user.id).await.unwrap(),
        PermissionLevel::ALL
    );

    let admins = state.admin_service.list(&PageQuery::default()).await.unwrap();
    assert_eq!(admins.meta.total, 2);
    assert!(admins.list.iter().all(|u| u.is_admin));

    db.cleanup().await;
}

#[tokio::test]
async fn test_set_permission_validates_mask_and_user() {
    let Some(db) = TestDb::create().await else { return };
    let state = db.state(false).await;

    let (user, _) = state.user_service.sign_up(account("gumi", None)).await.unwrap();

    let updated = state.permission_service.set(user.user.id, 12).await.unwrap();
    assert_eq!(
        updated.permission,
        PermissionLevel::APPROVE | PermissionLevel::MODERATE
    );

    let err = state.permission_service.set(user.user.id, 16).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = state
        .permission_service
        .set(uuid::Uuid::new_v4(), 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    db.cleanup().await;
}
