/// Common test utilities and fixtures
use async_trait::async_trait;
use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use watchplan_core::{PlaylistSnapshot, Video, VideoId};
use watchplan_extractor::{
    ExtractionMetadata, ExtractorError, PlaylistExtractor, Result as ExtractorResult,
};
use watchplan_server::{create_router, AppState, AuthService};

/// Extractor stub that serves canned snapshots keyed by playlist id.
///
/// Any URL that names an unknown playlist behaves like a playlist yt-dlp
/// cannot find.
pub struct FakeExtractor {
    snapshots: Vec<PlaylistSnapshot>,
}

impl FakeExtractor {
    pub fn new(snapshots: Vec<PlaylistSnapshot>) -> Self {
        Self { snapshots }
    }
}

#[async_trait]
impl PlaylistExtractor for FakeExtractor {
    async fn fetch_playlist(
        &self,
        url: &str,
    ) -> ExtractorResult<(PlaylistSnapshot, ExtractionMetadata)> {
        self.snapshots
            .iter()
            .find(|snapshot| url.contains(&snapshot.playlist_id))
            .map(|snapshot| {
                (
                    snapshot.clone(),
                    ExtractionMetadata {
                        used_full_fetch: false,
                        degraded: false,
                        duration_coverage_pct: 100.0,
                    },
                )
            })
            .ok_or_else(|| ExtractorError::PlaylistUnavailable(format!("no such playlist: {url}")))
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

/// Build a full app over a real SQLite file and the fake extractor.
pub async fn create_test_app(snapshots: Vec<PlaylistSnapshot>) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let pool = watchplan_storage::create_pool(&db_url)
        .await
        .expect("Failed to create pool");
    watchplan_storage::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let auth_service = Arc::new(AuthService::new(
        "test-secret-key".to_string(),
        1, // 1 hour access
        1, // 1 day refresh
    ));

    let extractor = Arc::new(FakeExtractor::new(snapshots));
    let app_state = AppState::new(pool.clone(), Arc::clone(&auth_service), extractor);
    let router = create_router(app_state, Arc::clone(&auth_service));

    TestApp {
        router,
        pool,
        auth_service,
        _temp_dir: temp_dir,
    }
}

/// Create a user and return a valid access token for them.
pub async fn create_user_with_token(app: &TestApp, username: &str, password: &str) -> String {
    let password_hash = app.auth_service.hash_password(password).unwrap();
    let user = watchplan_storage::users::create(&app.pool, username, &password_hash)
        .await
        .expect("Failed to create test user");
    app.auth_service.create_access_token(&user.id).unwrap()
}

/// A snapshot fixture with the given video durations.
pub fn snapshot_fixture(playlist_id: &str, durations_sec: &[u64]) -> PlaylistSnapshot {
    let videos = durations_sec
        .iter()
        .enumerate()
        .map(|(i, &duration_sec)| Video {
            video_id: VideoId::new(format!("{playlist_id}-v{i}")),
            title: format!("Video {i}"),
            duration_sec,
            thumbnail_url: String::new(),
            position: i as u32,
            published_at: None,
        })
        .collect();

    PlaylistSnapshot::new(
        playlist_id,
        format!("Playlist {playlist_id}"),
        "Test Channel",
        chrono::Utc::now(),
        videos,
    )
}
