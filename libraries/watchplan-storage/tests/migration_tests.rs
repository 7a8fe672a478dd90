//! Integration tests for the local-state migration slice
//!
//! Tests one-shot client imports including:
//! - Importing playlists and completed progress
//! - Skipping playlists the user already tracks
//! - Replay idempotency via the client migration key


use std::collections::HashMap;

use chrono::Utc;
use test_helpers::*;
use watchplan_core::{PlaylistState, VideoId, VideoProgress};

fn local_state(playlist_id: &str, durations_sec: &[u64]) -> PlaylistState {
    PlaylistState {
        snapshot: sample_snapshot(playlist_id, durations_sec),
        plan_config: sample_plan(),
        progress_map: HashMap::new(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_import_playlists_and_progress() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;

    let mut state = local_state("PL001", &[300, 450, 900]);
    state.progress_map.insert(
        VideoId::new("PL001-video-0"),
        VideoProgress::completed_at(Utc::now()),
    );
    // Entries for videos outside the snapshot are dropped
    state.progress_map.insert(
        VideoId::new("stale-video"),
        VideoProgress::completed_at(Utc::now()),
    );

    let summary = watchplan_storage::migration::migrate_local_states(
        pool,
        &user.id,
        "key-1",
        &[state, local_state("PL002", &[120])],
    )
    .await
    .unwrap();

    assert_eq!(summary.imported_playlists, 2);
    assert_eq!(summary.skipped_playlists, 0);
    assert_eq!(summary.imported_progress_entries, 1);
    assert!(!summary.already_migrated);

    let imported = watchplan_storage::playlists::get_state(pool, &user.id, "PL001")
        .await
        .unwrap()
        .unwrap();
    assert!(imported
        .progress_map
        .get(&VideoId::new("PL001-video-0"))
        .unwrap()
        .completed);
    assert!(!imported.progress_map.contains_key(&VideoId::new("stale-video")));

    assert!(watchplan_storage::migration::has_migrated(pool, &user.id)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_already_tracked_playlists_are_skipped() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;

    let server_snapshot = sample_snapshot("PL001", &[300]);
    watchplan_storage::playlists::create(pool, &user.id, &server_snapshot, &sample_plan())
        .await
        .unwrap()
        .unwrap();

    // Client copy carries a different title; server data must win
    let mut client_state = local_state("PL001", &[300, 600]);
    client_state.snapshot = watchplan_core::PlaylistSnapshot::new(
        "PL001",
        "Stale Client Title",
        "Test Channel",
        Utc::now(),
        client_state.snapshot.videos,
    );

    let summary = watchplan_storage::migration::migrate_local_states(
        pool,
        &user.id,
        "key-1",
        &[client_state],
    )
    .await
    .unwrap();

    assert_eq!(summary.imported_playlists, 0);
    assert_eq!(summary.skipped_playlists, 1);

    let state = watchplan_storage::playlists::get_state(pool, &user.id, "PL001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(state.snapshot.title, "Playlist PL001");
    assert_eq!(state.snapshot.video_count, 1);
}

#[tokio::test]
async fn test_replay_with_same_key_is_acknowledged_without_changes() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;

    let first = watchplan_storage::migration::migrate_local_states(
        pool,
        &user.id,
        "key-1",
        &[local_state("PL001", &[300])],
    )
    .await
    .unwrap();
    assert_eq!(first.imported_playlists, 1);

    let replay = watchplan_storage::migration::migrate_local_states(
        pool,
        &user.id,
        "key-1",
        &[local_state("PL002", &[120])],
    )
    .await
    .unwrap();

    assert!(replay.already_migrated);
    assert_eq!(replay.imported_playlists, 0);
    // The replayed payload was not imported
    assert!(watchplan_storage::playlists::get_state(pool, &user.id, "PL002")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_different_key_imports_remaining_playlists() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;

    watchplan_storage::migration::migrate_local_states(
        pool,
        &user.id,
        "key-1",
        &[local_state("PL001", &[300])],
    )
    .await
    .unwrap();

    let second = watchplan_storage::migration::migrate_local_states(
        pool,
        &user.id,
        "key-2",
        &[local_state("PL001", &[300]), local_state("PL002", &[120])],
    )
    .await
    .unwrap();

    assert_eq!(second.skipped_playlists, 1);
    assert_eq!(second.imported_playlists, 1);
}
