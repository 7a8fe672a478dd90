/// Playlists API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    services::validation,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use watchplan_core::{
    build_schedule, PlanConfig, PlanConfigPatch, PlaylistSnapshot, PlaylistState, ProgressMap,
    ScheduleResult, VideoId,
};
use watchplan_extractor::ExtractionMetadata;

/// One tracked playlist as returned by the API: persisted state plus the
/// schedule derived from it for today.
#[derive(Debug, Serialize)]
pub struct PlaylistView {
    pub playlist: PlaylistSnapshot,
    pub plan_config: PlanConfig,
    pub progress: ProgressMap,
    pub schedule: ScheduleResult,
    pub updated_at: DateTime<Utc>,
}

impl PlaylistView {
    /// Derive the schedule for `today` and wrap the state for the response.
    fn from_state(state: PlaylistState, today: NaiveDate) -> Self {
        let schedule = build_schedule(
            &state.snapshot.videos,
            &state.plan_config,
            &state.progress_map,
            today,
        );
        Self {
            playlist: state.snapshot,
            plan_config: state.plan_config,
            progress: state.progress_map,
            schedule,
            updated_at: state.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ImportPlaylistRequest {
    /// Playlist URL or bare playlist id.
    #[serde(alias = "playlist_id")]
    pub url: String,
    pub minutes_per_day: Option<i64>,
    pub start_date: Option<String>,
    pub playback_speed: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ImportPlaylistResponse {
    #[serde(flatten)]
    pub view: PlaylistView,
    pub extraction: ExtractionMetadata,
}

#[derive(Debug, Deserialize)]
pub struct UpdateConfigRequest {
    pub minutes_per_day: Option<i64>,
    pub start_date: Option<String>,
    pub playback_speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SetProgressRequest {
    pub video_id: String,
    pub completed: bool,
}

/// A bare playlist id is turned into a canonical playlist URL; anything that
/// already looks like a URL passes through.
fn playlist_url(input: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://www.youtube.com/playlist?list={input}")
    }
}

/// Validate the optional plan fields of an import request and fill defaults.
fn plan_from_request(
    minutes_per_day: Option<i64>,
    start_date: Option<String>,
    playback_speed: Option<f64>,
    today: NaiveDate,
) -> Result<PlanConfig> {
    let minutes_per_day = match minutes_per_day {
        Some(minutes) => validation::validate_minutes_per_day(minutes)?,
        None => 30,
    };
    let start_date = match start_date {
        Some(date) => validation::validate_start_date(&date)?,
        None => today.format("%Y-%m-%d").to_string(),
    };
    let playback_speed = match playback_speed {
        Some(speed) => validation::validate_playback_speed(speed)?,
        None => watchplan_core::PlaybackSpeed::Normal,
    };

    Ok(PlanConfig {
        minutes_per_day,
        start_date,
        playback_speed,
    })
}

/// GET /api/playlists
/// All tracked playlists of the authenticated user, with schedules
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<PlaylistView>>> {
    let states = watchplan_storage::playlists::list_states(&app_state.pool, auth.user_id()).await?;

    // One date sample for the whole response keeps sibling schedules
    // consistent across a midnight boundary
    let today = Utc::now().date_naive();
    let views = states
        .into_iter()
        .map(|state| PlaylistView::from_state(state, today))
        .collect();

    Ok(Json(views))
}

/// POST /api/playlists/import
/// Fetch a playlist via yt-dlp and start tracking it
pub async fn import_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<ImportPlaylistRequest>,
) -> Result<(StatusCode, Json<ImportPlaylistResponse>)> {
    if req.url.trim().is_empty() {
        return Err(ServerError::BadRequest("url must not be empty".to_string()));
    }

    let today = Utc::now().date_naive();
    let plan = plan_from_request(
        req.minutes_per_day,
        req.start_date,
        req.playback_speed,
        today,
    )?;

    let (snapshot, extraction) = app_state
        .extractor
        .fetch_playlist(&playlist_url(req.url.trim()))
        .await?;

    let state =
        watchplan_storage::playlists::create(&app_state.pool, auth.user_id(), &snapshot, &plan)
            .await?
            .ok_or_else(|| {
                ServerError::Conflict(format!("Playlist already tracked: {}", snapshot.playlist_id))
            })?;

    tracing::info!(
        playlist_id = %state.snapshot.playlist_id,
        videos = state.snapshot.video_count,
        total = %watchplan_core::format::format_duration_sec(state.snapshot.total_duration_sec),
        "Playlist imported"
    );

    Ok((
        StatusCode::CREATED,
        Json(ImportPlaylistResponse {
            view: PlaylistView::from_state(state, today),
            extraction,
        }),
    ))
}

/// GET /api/playlists/:id
pub async fn get_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<PlaylistView>> {
    let state = watchplan_storage::playlists::get_state(&app_state.pool, auth.user_id(), &id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Playlist not found: {id}")))?;

    Ok(Json(PlaylistView::from_state(
        state,
        Utc::now().date_naive(),
    )))
}

/// POST /api/playlists/:id/refresh
/// Re-fetch the playlist snapshot; plan config and surviving progress stay
pub async fn refresh_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<ImportPlaylistResponse>> {
    let existing = watchplan_storage::playlists::get_state(&app_state.pool, auth.user_id(), &id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Playlist not found: {id}")))?;

    let (snapshot, extraction) = app_state
        .extractor
        .fetch_playlist(&playlist_url(&id))
        .await?;

    let state = watchplan_storage::playlists::refresh(
        &app_state.pool,
        auth.user_id(),
        &snapshot,
        &existing.plan_config,
    )
    .await?
    .ok_or_else(|| ServerError::NotFound(format!("Playlist not found: {id}")))?;

    Ok(Json(ImportPlaylistResponse {
        view: PlaylistView::from_state(state, Utc::now().date_naive()),
        extraction,
    }))
}

/// PATCH /api/playlists/:id/config
pub async fn update_config(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<UpdateConfigRequest>,
) -> Result<Json<PlaylistView>> {
    let patch = PlanConfigPatch {
        minutes_per_day: req
            .minutes_per_day
            .map(validation::validate_minutes_per_day)
            .transpose()?,
        start_date: req
            .start_date
            .as_deref()
            .map(validation::validate_start_date)
            .transpose()?,
        playback_speed: req
            .playback_speed
            .map(validation::validate_playback_speed)
            .transpose()?,
    };

    if patch.is_empty() {
        return Err(ServerError::BadRequest(
            "At least one config field must be provided".to_string(),
        ));
    }

    let state =
        watchplan_storage::playlists::update_config(&app_state.pool, auth.user_id(), &id, &patch)
            .await?
            .ok_or_else(|| ServerError::NotFound(format!("Playlist not found: {id}")))?;

    Ok(Json(PlaylistView::from_state(
        state,
        Utc::now().date_naive(),
    )))
}

/// POST /api/playlists/:id/progress
pub async fn set_progress(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<SetProgressRequest>,
) -> Result<Json<PlaylistView>> {
    let video_id = VideoId::new(req.video_id);

    let state = watchplan_storage::progress::set_completion(
        &app_state.pool,
        auth.user_id(),
        &id,
        &video_id,
        req.completed,
    )
    .await?
    .ok_or_else(|| {
        ServerError::NotFound(format!(
            "Video {} not found in playlist {id}",
            video_id.as_str()
        ))
    })?;

    Ok(Json(PlaylistView::from_state(
        state,
        Utc::now().date_naive(),
    )))
}

/// DELETE /api/playlists/:id
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let deleted =
        watchplan_storage::playlists::delete(&app_state.pool, auth.user_id(), &id).await?;

    if !deleted {
        return Err(ServerError::NotFound(format!("Playlist not found: {id}")));
    }

    Ok(Json(serde_json::json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_id_becomes_playlist_url() {
        assert_eq!(
            playlist_url("PLabc123"),
            "https://www.youtube.com/playlist?list=PLabc123"
        );
        assert_eq!(
            playlist_url("https://www.youtube.com/playlist?list=PLabc123"),
            "https://www.youtube.com/playlist?list=PLabc123"
        );
    }

    #[test]
    fn import_defaults_fill_missing_plan_fields() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let plan = plan_from_request(None, None, None, today).unwrap();

        assert_eq!(plan.minutes_per_day, 30);
        assert_eq!(plan.start_date, "2026-03-01");
        assert_eq!(plan.playback_speed, watchplan_core::PlaybackSpeed::Normal);
    }

    #[test]
    fn import_rejects_invalid_plan_fields() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert!(plan_from_request(Some(0), None, None, today).is_err());
        assert!(plan_from_request(None, Some("soon".to_string()), None, today).is_err());
        assert!(plan_from_request(None, None, Some(1.3), today).is_err());
    }
}
