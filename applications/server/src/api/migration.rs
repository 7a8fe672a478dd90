/// Local-state migration API routes
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, Json};
use serde::Deserialize;
use watchplan_core::PlaylistState;
use watchplan_storage::migration::MigrationSummary;

#[derive(Debug, Deserialize)]
pub struct MigrateLocalStateRequest {
    /// Client-generated key that makes retried uploads idempotent.
    pub client_migration_key: String,
    pub playlists: Vec<PlaylistState>,
}

/// POST /api/migration/local-state
/// One-shot import of playlist state a client kept in browser storage
pub async fn migrate_local_state(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<MigrateLocalStateRequest>,
) -> Result<Json<MigrationSummary>> {
    let summary = watchplan_storage::migration::migrate_local_states(
        &app_state.pool,
        auth.user_id(),
        &req.client_migration_key,
        &req.playlists,
    )
    .await?;

    tracing::info!(
        user_id = %auth.user_id(),
        imported = summary.imported_playlists,
        skipped = summary.skipped_playlists,
        replay = summary.already_migrated,
        "Local state migration processed"
    );

    Ok(Json(summary))
}
