//! Playlists vertical slice: tracked playlists, their snapshot videos and
//! plan configuration.
//!
//! Assembled [`PlaylistState`] values always carry videos in position order;
//! the schedule itself is never stored here.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqliteConnection, SqlitePool};
use watchplan_core::{
    error::Result, PlanConfig, PlanConfigPatch, PlaybackSpeed, PlaylistId, PlaylistSnapshot,
    PlaylistState, ProgressMap, UserId, Video, VideoId, VideoProgress, WatchplanError,
};

const PLAYLIST_COLUMNS: &str = "id, youtube_playlist_id, title, channel_title, fetched_at, \
     minutes_per_day, start_date, playback_speed, updated_at";

fn timestamp_to_datetime(seconds: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| WatchplanError::storage("Invalid timestamp"))
}

async fn fetch_playlist_row(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    youtube_playlist_id: &str,
) -> Result<Option<sqlx::sqlite::SqliteRow>> {
    let row = sqlx::query(&format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE user_id = ? AND youtube_playlist_id = ?"
    ))
    .bind(user_id.as_str())
    .bind(youtube_playlist_id)
    .fetch_optional(conn)
    .await?;

    Ok(row)
}

/// Assemble a full `PlaylistState` from a playlist row.
async fn assemble_state(
    conn: &mut SqliteConnection,
    row: &sqlx::sqlite::SqliteRow,
) -> Result<PlaylistState> {
    let playlist_id: String = row.get("id");

    let video_rows = sqlx::query(
        "SELECT youtube_video_id, title, duration_sec, thumbnail_url, position, published_at
         FROM playlist_videos
         WHERE playlist_id = ?
         ORDER BY position",
    )
    .bind(&playlist_id)
    .fetch_all(&mut *conn)
    .await?;

    let videos: Vec<Video> = video_rows
        .iter()
        .map(|video_row| Video {
            video_id: VideoId::new(video_row.get::<String, _>("youtube_video_id")),
            title: video_row.get("title"),
            duration_sec: video_row.get::<i64, _>("duration_sec").max(0) as u64,
            thumbnail_url: video_row.get("thumbnail_url"),
            position: video_row.get::<i64, _>("position") as u32,
            published_at: video_row.get("published_at"),
        })
        .collect();

    let progress_rows = sqlx::query(
        "SELECT youtube_video_id, completed, completed_at
         FROM video_progress
         WHERE playlist_id = ?",
    )
    .bind(&playlist_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut progress_map = ProgressMap::new();
    for progress_row in &progress_rows {
        let completed_at = progress_row
            .get::<Option<i64>, _>("completed_at")
            .map(timestamp_to_datetime)
            .transpose()?;
        progress_map.insert(
            VideoId::new(progress_row.get::<String, _>("youtube_video_id")),
            VideoProgress {
                completed: progress_row.get::<i64, _>("completed") != 0,
                completed_at,
            },
        );
    }

    let snapshot = PlaylistSnapshot::new(
        row.get::<String, _>("youtube_playlist_id"),
        row.get::<String, _>("title"),
        row.get::<String, _>("channel_title"),
        timestamp_to_datetime(row.get::<i64, _>("fetched_at"))?,
        videos,
    );

    Ok(PlaylistState {
        snapshot,
        plan_config: PlanConfig {
            minutes_per_day: row.get("minutes_per_day"),
            start_date: row.get("start_date"),
            playback_speed: PlaybackSpeed::from_f64(row.get::<f64, _>("playback_speed")),
        },
        progress_map,
        updated_at: timestamp_to_datetime(row.get::<i64, _>("updated_at"))?,
    })
}

/// Insert a playlist row, returning its generated id.
pub(crate) async fn insert_playlist(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    snapshot: &PlaylistSnapshot,
    plan_config: &PlanConfig,
    updated_at: DateTime<Utc>,
) -> Result<PlaylistId> {
    let id = PlaylistId::generate();
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO playlists
             (id, user_id, youtube_playlist_id, title, channel_title, fetched_at,
              minutes_per_day, start_date, playback_speed, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id.as_str())
    .bind(user_id.as_str())
    .bind(&snapshot.playlist_id)
    .bind(&snapshot.title)
    .bind(&snapshot.channel_title)
    .bind(snapshot.fetched_at.timestamp())
    .bind(plan_config.minutes_per_day)
    .bind(&plan_config.start_date)
    .bind(plan_config.playback_speed.as_f64())
    .bind(now.timestamp())
    .bind(updated_at.timestamp())
    .execute(conn)
    .await?;

    Ok(id)
}

/// Replace the snapshot videos of a playlist and prune progress rows whose
/// video id is no longer present.
pub(crate) async fn sync_videos(
    conn: &mut SqliteConnection,
    playlist_id: &PlaylistId,
    snapshot: &PlaylistSnapshot,
) -> Result<()> {
    sqlx::query("DELETE FROM playlist_videos WHERE playlist_id = ?")
        .bind(playlist_id.as_str())
        .execute(&mut *conn)
        .await?;

    for video in &snapshot.videos {
        sqlx::query(
            "INSERT INTO playlist_videos
                 (playlist_id, youtube_video_id, title, duration_sec, thumbnail_url,
                  position, published_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(playlist_id, youtube_video_id) DO NOTHING",
        )
        .bind(playlist_id.as_str())
        .bind(video.video_id.as_str())
        .bind(&video.title)
        .bind(video.duration_sec as i64)
        .bind(&video.thumbnail_url)
        .bind(i64::from(video.position))
        .bind(&video.published_at)
        .execute(&mut *conn)
        .await?;
    }

    // Orphaned completion entries are garbage, not an error; sweep them here
    sqlx::query(
        "DELETE FROM video_progress
         WHERE playlist_id = ?
           AND youtube_video_id NOT IN (
               SELECT youtube_video_id FROM playlist_videos WHERE playlist_id = ?
           )",
    )
    .bind(playlist_id.as_str())
    .bind(playlist_id.as_str())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// All playlist states for a user, most recently updated first.
pub async fn list_states(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<PlaylistState>> {
    let mut conn = pool.acquire().await?;

    let rows = sqlx::query(&format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE user_id = ? ORDER BY updated_at DESC"
    ))
    .bind(user_id.as_str())
    .fetch_all(&mut *conn)
    .await?;

    let mut states = Vec::with_capacity(rows.len());
    for row in &rows {
        states.push(assemble_state(&mut conn, row).await?);
    }

    Ok(states)
}

/// One playlist state, or `None` when the user does not track it.
pub async fn get_state(
    pool: &SqlitePool,
    user_id: &UserId,
    youtube_playlist_id: &str,
) -> Result<Option<PlaylistState>> {
    let mut conn = pool.acquire().await?;

    let Some(row) = fetch_playlist_row(&mut conn, user_id, youtube_playlist_id).await? else {
        return Ok(None);
    };

    Ok(Some(assemble_state(&mut conn, &row).await?))
}

/// Create a tracked playlist from a fresh snapshot.
///
/// Returns `None` when the user already tracks this playlist.
pub async fn create(
    pool: &SqlitePool,
    user_id: &UserId,
    snapshot: &PlaylistSnapshot,
    plan_config: &PlanConfig,
) -> Result<Option<PlaylistState>> {
    let mut tx = pool.begin().await?;

    if fetch_playlist_row(&mut tx, user_id, &snapshot.playlist_id)
        .await?
        .is_some()
    {
        return Ok(None);
    }

    let playlist_id = insert_playlist(&mut tx, user_id, snapshot, plan_config, Utc::now()).await?;
    sync_videos(&mut tx, &playlist_id, snapshot).await?;

    let row = fetch_playlist_row(&mut tx, user_id, &snapshot.playlist_id)
        .await?
        .ok_or_else(|| WatchplanError::storage("Created playlist state could not be loaded"))?;
    let state = assemble_state(&mut tx, &row).await?;

    tx.commit().await?;

    Ok(Some(state))
}

/// Replace the snapshot of an already-tracked playlist.
///
/// Progress entries for videos still in the playlist survive; the rest are
/// pruned. Returns `None` when the playlist is not tracked by this user.
pub async fn refresh(
    pool: &SqlitePool,
    user_id: &UserId,
    snapshot: &PlaylistSnapshot,
    plan_config: &PlanConfig,
) -> Result<Option<PlaylistState>> {
    let mut tx = pool.begin().await?;

    let Some(row) = fetch_playlist_row(&mut tx, user_id, &snapshot.playlist_id).await? else {
        return Ok(None);
    };
    let playlist_id = PlaylistId::new(row.get::<String, _>("id"));

    sqlx::query(
        "UPDATE playlists
         SET title = ?, channel_title = ?, fetched_at = ?,
             minutes_per_day = ?, start_date = ?, playback_speed = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(&snapshot.title)
    .bind(&snapshot.channel_title)
    .bind(snapshot.fetched_at.timestamp())
    .bind(plan_config.minutes_per_day)
    .bind(&plan_config.start_date)
    .bind(plan_config.playback_speed.as_f64())
    .bind(Utc::now().timestamp())
    .bind(playlist_id.as_str())
    .execute(&mut *tx)
    .await?;

    sync_videos(&mut tx, &playlist_id, snapshot).await?;

    let row = fetch_playlist_row(&mut tx, user_id, &snapshot.playlist_id)
        .await?
        .ok_or_else(|| WatchplanError::storage("Refreshed playlist state could not be loaded"))?;
    let state = assemble_state(&mut tx, &row).await?;

    tx.commit().await?;

    Ok(Some(state))
}

/// Apply a partial plan-config patch.
///
/// Returns `None` when the playlist is not tracked by this user.
pub async fn update_config(
    pool: &SqlitePool,
    user_id: &UserId,
    youtube_playlist_id: &str,
    patch: &PlanConfigPatch,
) -> Result<Option<PlaylistState>> {
    let mut tx = pool.begin().await?;

    let Some(row) = fetch_playlist_row(&mut tx, user_id, youtube_playlist_id).await? else {
        return Ok(None);
    };
    let playlist_id: String = row.get("id");

    sqlx::query(
        "UPDATE playlists
         SET minutes_per_day = COALESCE(?, minutes_per_day),
             start_date = COALESCE(?, start_date),
             playback_speed = COALESCE(?, playback_speed),
             updated_at = ?
         WHERE id = ?",
    )
    .bind(patch.minutes_per_day)
    .bind(&patch.start_date)
    .bind(patch.playback_speed.map(PlaybackSpeed::as_f64))
    .bind(Utc::now().timestamp())
    .bind(&playlist_id)
    .execute(&mut *tx)
    .await?;

    let row = fetch_playlist_row(&mut tx, user_id, youtube_playlist_id)
        .await?
        .ok_or_else(|| WatchplanError::storage("Patched playlist state could not be loaded"))?;
    let state = assemble_state(&mut tx, &row).await?;

    tx.commit().await?;

    Ok(Some(state))
}

/// Delete a tracked playlist; videos and progress cascade.
///
/// Returns whether a row was removed.
pub async fn delete(
    pool: &SqlitePool,
    user_id: &UserId,
    youtube_playlist_id: &str,
) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlists WHERE user_id = ? AND youtube_playlist_id = ?")
        .bind(user_id.as_str())
        .bind(youtube_playlist_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
