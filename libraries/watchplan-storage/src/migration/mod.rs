//! Migration vertical slice: one-shot import of client-local playlist state.
//!
//! Clients that tracked playlists in browser storage upload everything once
//! after signing in. Imports are idempotent per `(user, client key)`: replays
//! of the same upload are acknowledged without touching any data.

use std::collections::HashSet;

use chrono::Utc;
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use watchplan_core::{error::Result, PlaylistState, UserId};

/// Outcome of a local-state import.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MigrationSummary {
    pub imported_playlists: usize,
    pub skipped_playlists: usize,
    pub imported_progress_entries: usize,
    pub already_migrated: bool,
}

impl MigrationSummary {
    fn already_migrated() -> Self {
        Self {
            imported_playlists: 0,
            skipped_playlists: 0,
            imported_progress_entries: 0,
            already_migrated: true,
        }
    }
}

/// Import client-local playlist states for a user.
///
/// Playlists the user already tracks are skipped wholesale; server data wins
/// over stale client copies. Only completion entries whose video is part of
/// the uploaded snapshot are imported.
pub async fn migrate_local_states(
    pool: &SqlitePool,
    user_id: &UserId,
    client_migration_key: &str,
    states: &[PlaylistState],
) -> Result<MigrationSummary> {
    let mut tx = pool.begin().await?;

    let replay = sqlx::query(
        "SELECT 1 FROM migration_events WHERE user_id = ? AND client_migration_key = ?",
    )
    .bind(user_id.as_str())
    .bind(client_migration_key)
    .fetch_optional(&mut *tx)
    .await?
    .is_some();

    if replay {
        return Ok(MigrationSummary::already_migrated());
    }

    let now = Utc::now();

    sqlx::query(
        "INSERT INTO migration_events (user_id, client_migration_key, created_at) VALUES (?, ?, ?)",
    )
    .bind(user_id.as_str())
    .bind(client_migration_key)
    .bind(now.timestamp())
    .execute(&mut *tx)
    .await?;

    let mut imported_playlists = 0;
    let mut skipped_playlists = 0;
    let mut imported_progress_entries = 0;

    for state in states {
        let exists = sqlx::query(
            "SELECT 1 FROM playlists WHERE user_id = ? AND youtube_playlist_id = ?",
        )
        .bind(user_id.as_str())
        .bind(&state.snapshot.playlist_id)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();

        if exists {
            skipped_playlists += 1;
            continue;
        }

        let playlist_id = crate::playlists::insert_playlist(
            &mut tx,
            user_id,
            &state.snapshot,
            &state.plan_config,
            state.updated_at,
        )
        .await?;
        crate::playlists::sync_videos(&mut tx, &playlist_id, &state.snapshot).await?;

        let snapshot_video_ids: HashSet<&str> = state
            .snapshot
            .videos
            .iter()
            .map(|video| video.video_id.as_str())
            .collect();

        for (video_id, progress) in &state.progress_map {
            if !progress.completed || !snapshot_video_ids.contains(video_id.as_str()) {
                continue;
            }

            sqlx::query(
                "INSERT INTO video_progress
                     (playlist_id, youtube_video_id, completed, completed_at)
                 VALUES (?, ?, 1, ?)
                 ON CONFLICT(playlist_id, youtube_video_id) DO NOTHING",
            )
            .bind(playlist_id.as_str())
            .bind(video_id.as_str())
            .bind(progress.completed_at.unwrap_or(now).timestamp())
            .execute(&mut *tx)
            .await?;

            imported_progress_entries += 1;
        }

        imported_playlists += 1;
    }

    sqlx::query(
        "INSERT INTO user_settings (user_id, local_migration_completed_at) VALUES (?, ?)
         ON CONFLICT(user_id) DO UPDATE SET local_migration_completed_at = excluded.local_migration_completed_at",
    )
    .bind(user_id.as_str())
    .bind(now.timestamp())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(MigrationSummary {
        imported_playlists,
        skipped_playlists,
        imported_progress_entries,
        already_migrated: false,
    })
}

/// Whether the user has completed a local-state import.
pub async fn has_migrated(pool: &SqlitePool, user_id: &UserId) -> Result<bool> {
    let row = sqlx::query(
        "SELECT local_migration_completed_at FROM user_settings WHERE user_id = ?",
    )
    .bind(user_id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row
        .map(|r| r.get::<Option<i64>, _>("local_migration_completed_at").is_some())
        .unwrap_or(false))
}
