//! Integration tests for the users vertical slice


use test_helpers::*;
use watchplan_core::WatchplanError;

#[tokio::test]
async fn test_create_and_lookup_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = watchplan_storage::users::create(pool, "alice", "hash-a")
        .await
        .unwrap();

    let found = watchplan_storage::users::get_by_name(pool, "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);

    let hash = watchplan_storage::users::get_password_hash(pool, &user.id)
        .await
        .unwrap();
    assert_eq!(hash.as_deref(), Some("hash-a"));
}

#[tokio::test]
async fn test_duplicate_name_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    watchplan_storage::users::create(pool, "alice", "hash-a")
        .await
        .unwrap();

    let err = watchplan_storage::users::create(pool, "alice", "hash-b")
        .await
        .unwrap_err();

    assert!(matches!(err, WatchplanError::Duplicate(_)));
}

#[tokio::test]
async fn test_delete_user_cascades_playlists() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let snapshot = sample_snapshot("PL001", &[300]);
    watchplan_storage::playlists::create(pool, &user.id, &snapshot, &sample_plan())
        .await
        .unwrap()
        .unwrap();

    watchplan_storage::users::delete(pool, &user.id)
        .await
        .unwrap();

    assert!(watchplan_storage::users::get_by_name(pool, "alice")
        .await
        .unwrap()
        .is_none());
    assert!(watchplan_storage::playlists::get_state(pool, &user.id, "PL001")
        .await
        .unwrap()
        .is_none());
}
