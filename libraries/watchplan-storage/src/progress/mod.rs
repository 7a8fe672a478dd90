//! Progress vertical slice: per-video completion flags.
//!
//! Completion is stored as presence: a row exists while a video is marked
//! completed and is deleted when it is un-marked. The progress map assembled
//! by the playlists slice therefore never carries `completed = false` rows
//! that linger after a toggle.

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use watchplan_core::{error::Result, PlaylistState, UserId, VideoId};

/// Set or clear the completion flag of one video.
///
/// Touches the playlist's `updated_at` so list ordering follows activity.
/// Returns the reassembled state, or `None` when the playlist is not tracked
/// by this user or the video is not part of its snapshot.
pub async fn set_completion(
    pool: &SqlitePool,
    user_id: &UserId,
    youtube_playlist_id: &str,
    video_id: &VideoId,
    completed: bool,
) -> Result<Option<PlaylistState>> {
    let mut tx = pool.begin().await?;

    let Some(playlist_row) =
        sqlx::query("SELECT id FROM playlists WHERE user_id = ? AND youtube_playlist_id = ?")
            .bind(user_id.as_str())
            .bind(youtube_playlist_id)
            .fetch_optional(&mut *tx)
            .await?
    else {
        return Ok(None);
    };
    let playlist_id: String = playlist_row.get("id");

    let video_exists = sqlx::query(
        "SELECT 1 FROM playlist_videos WHERE playlist_id = ? AND youtube_video_id = ?",
    )
    .bind(&playlist_id)
    .bind(video_id.as_str())
    .fetch_optional(&mut *tx)
    .await?
    .is_some();

    if !video_exists {
        return Ok(None);
    }

    let now = Utc::now();

    if completed {
        sqlx::query(
            "INSERT INTO video_progress (playlist_id, youtube_video_id, completed, completed_at)
             VALUES (?, ?, 1, ?)
             ON CONFLICT(playlist_id, youtube_video_id)
             DO UPDATE SET completed = 1, completed_at = excluded.completed_at",
        )
        .bind(&playlist_id)
        .bind(video_id.as_str())
        .bind(now.timestamp())
        .execute(&mut *tx)
        .await?;
    } else {
        sqlx::query("DELETE FROM video_progress WHERE playlist_id = ? AND youtube_video_id = ?")
            .bind(&playlist_id)
            .bind(video_id.as_str())
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
        .bind(now.timestamp())
        .bind(&playlist_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    crate::playlists::get_state(pool, user_id, youtube_playlist_id).await
}
