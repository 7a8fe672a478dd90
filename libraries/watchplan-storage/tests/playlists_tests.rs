//! Integration tests for the playlists vertical slice
//!
//! Tests playlist tracking including:
//! - Create / get / list with user ownership
//! - Duplicate tracking detection
//! - Snapshot refresh with progress pruning
//! - Partial plan-config patching
//! - Deletion with cascades


use test_helpers::*;
use watchplan_core::{PlanConfigPatch, PlaybackSpeed, VideoId};

#[tokio::test]
async fn test_create_and_get_playlist_state() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let snapshot = sample_snapshot("PL001", &[300, 450, 900]);

    let state = watchplan_storage::playlists::create(pool, &user.id, &snapshot, &sample_plan())
        .await
        .expect("Failed to create playlist")
        .expect("Playlist should not exist yet");

    assert_eq!(state.snapshot.playlist_id, "PL001");
    assert_eq!(state.snapshot.video_count, 3);
    assert_eq!(state.snapshot.total_duration_sec, 1650);
    assert_eq!(state.plan_config.minutes_per_day, 30);
    assert!(state.progress_map.is_empty());

    let retrieved = watchplan_storage::playlists::get_state(pool, &user.id, "PL001")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(retrieved.snapshot.playlist_id, "PL001");
    // Videos come back in position order
    let positions: Vec<u32> = retrieved.snapshot.videos.iter().map(|v| v.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_create_returns_none_when_already_tracked() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let snapshot = sample_snapshot("PL001", &[120]);

    watchplan_storage::playlists::create(pool, &user.id, &snapshot, &sample_plan())
        .await
        .unwrap()
        .unwrap();

    let second = watchplan_storage::playlists::create(pool, &user.id, &snapshot, &sample_plan())
        .await
        .unwrap();

    assert!(second.is_none());
}

#[tokio::test]
async fn test_same_playlist_tracked_by_two_users() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;
    let snapshot = sample_snapshot("PL001", &[120, 240]);

    watchplan_storage::playlists::create(pool, &alice.id, &snapshot, &sample_plan())
        .await
        .unwrap()
        .unwrap();
    watchplan_storage::playlists::create(pool, &bob.id, &snapshot, &sample_plan())
        .await
        .unwrap()
        .unwrap();

    let alice_states = watchplan_storage::playlists::list_states(pool, &alice.id)
        .await
        .unwrap();
    let bob_states = watchplan_storage::playlists::list_states(pool, &bob.id)
        .await
        .unwrap();

    assert_eq!(alice_states.len(), 1);
    assert_eq!(bob_states.len(), 1);

    // Bob's copy is isolated from Alice's
    watchplan_storage::playlists::delete(pool, &alice.id, "PL001")
        .await
        .unwrap();
    assert_eq!(
        watchplan_storage::playlists::list_states(pool, &bob.id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_refresh_replaces_videos_and_prunes_progress() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let snapshot = sample_snapshot("PL001", &[300, 450, 900]);

    watchplan_storage::playlists::create(pool, &user.id, &snapshot, &sample_plan())
        .await
        .unwrap()
        .unwrap();

    // Complete the second video
    watchplan_storage::progress::set_completion(
        pool,
        &user.id,
        "PL001",
        &VideoId::new("PL001-video-1"),
        true,
    )
    .await
    .unwrap()
    .unwrap();

    // New upload drops video 1 and adds a fourth
    let mut refreshed = sample_snapshot("PL001", &[300, 450, 900, 600]);
    refreshed.videos.remove(1);
    for (i, video) in refreshed.videos.iter_mut().enumerate() {
        video.position = i as u32;
    }
    let refreshed = watchplan_core::PlaylistSnapshot::new(
        refreshed.playlist_id,
        "Updated Title",
        refreshed.channel_title,
        refreshed.fetched_at,
        refreshed.videos,
    );

    let state = watchplan_storage::playlists::refresh(pool, &user.id, &refreshed, &sample_plan())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(state.snapshot.title, "Updated Title");
    assert_eq!(state.snapshot.video_count, 3);
    // Progress for the removed video is gone
    assert!(!state
        .progress_map
        .contains_key(&VideoId::new("PL001-video-1")));
}

#[tokio::test]
async fn test_refresh_unknown_playlist_returns_none() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let snapshot = sample_snapshot("PL404", &[120]);

    let result = watchplan_storage::playlists::refresh(pool, &user.id, &snapshot, &sample_plan())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_update_config_partial_patch() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let snapshot = sample_snapshot("PL001", &[300]);

    watchplan_storage::playlists::create(pool, &user.id, &snapshot, &sample_plan())
        .await
        .unwrap()
        .unwrap();

    let patch = PlanConfigPatch {
        minutes_per_day: Some(90),
        start_date: None,
        playback_speed: Some(PlaybackSpeed::Double),
    };

    let state = watchplan_storage::playlists::update_config(pool, &user.id, "PL001", &patch)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(state.plan_config.minutes_per_day, 90);
    assert_eq!(state.plan_config.playback_speed, PlaybackSpeed::Double);
    // Untouched field keeps its old value
    assert_eq!(state.plan_config.start_date, "2026-01-01");
}

#[tokio::test]
async fn test_delete_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let snapshot = sample_snapshot("PL001", &[300]);

    watchplan_storage::playlists::create(pool, &user.id, &snapshot, &sample_plan())
        .await
        .unwrap()
        .unwrap();

    assert!(watchplan_storage::playlists::delete(pool, &user.id, "PL001")
        .await
        .unwrap());
    assert!(!watchplan_storage::playlists::delete(pool, &user.id, "PL001")
        .await
        .unwrap());
    assert!(watchplan_storage::playlists::get_state(pool, &user.id, "PL001")
        .await
        .unwrap()
        .is_none());
}
