//! yt-dlp wrapper.
//!
//! Fetch strategy: a flat-playlist dump first (fast, but durations are often
//! missing), then a full dump when too few durations came back. A failing
//! full fetch degrades to the flat result instead of failing the request.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};
use watchplan_core::PlaylistSnapshot;

use crate::dump::{duration_coverage_pct, snapshot_from_dump, PlaylistDump};
use crate::error::{ExtractorError, Result};

/// How a snapshot was obtained.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ExtractionMetadata {
    /// A full (non-flat) dump was used.
    pub used_full_fetch: bool,
    /// The full fetch failed and the flat result was returned instead.
    pub degraded: bool,
    /// Share of videos with a known duration, 0..=100.
    pub duration_coverage_pct: f64,
}

/// Source of playlist snapshots.
///
/// The server depends on this trait so handlers can be tested without a
/// yt-dlp binary.
#[async_trait]
pub trait PlaylistExtractor: Send + Sync {
    async fn fetch_playlist(&self, url: &str) -> Result<(PlaylistSnapshot, ExtractionMetadata)>;
}

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Path or name of the yt-dlp binary.
    pub binary: PathBuf,
    /// Timeout for the flat-playlist dump.
    pub flat_timeout: Duration,
    /// Timeout for the full dump.
    pub full_timeout: Duration,
    /// Minimum duration coverage (percent) before a full fetch is skipped.
    pub min_duration_coverage_pct: f64,
    /// Optional cookies file forwarded to yt-dlp.
    pub cookies_file: Option<PathBuf>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("yt-dlp"),
            flat_timeout: Duration::from_secs(30),
            full_timeout: Duration::from_secs(90),
            min_duration_coverage_pct: 80.0,
            cookies_file: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    config: ExtractorConfig,
}

impl YtDlpExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    async fn run_dump(&self, url: &str, flat: bool) -> Result<PlaylistDump> {
        let mut cmd = Command::new(&self.config.binary);
        cmd.arg("--dump-single-json")
            .arg("--skip-download")
            .arg("--ignore-errors")
            .arg("--no-warnings")
            .arg("--no-progress")
            .arg("--yes-playlist")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if flat {
            cmd.arg("--flat-playlist");
        }
        if let Some(cookies) = &self.config.cookies_file {
            cmd.arg("--cookies").arg(cookies);
        }
        cmd.arg(url);

        let timeout = if flat {
            self.config.flat_timeout
        } else {
            self.config.full_timeout
        };

        let output = tokio::time::timeout(timeout, cmd.output())
            .await
            .map_err(|_| ExtractorError::Timeout {
                seconds: timeout.as_secs(),
            })?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ExtractorError::BinaryNotFound(self.config.binary.display().to_string())
                } else {
                    ExtractorError::Io(e)
                }
            })?;

        // --ignore-errors can yield a nonzero exit with a usable dump, so
        // the exit status only matters when stdout is empty
        if output.stdout.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_unavailable_stderr(&stderr) {
                return Err(ExtractorError::PlaylistUnavailable(
                    stderr.trim().to_string(),
                ));
            }
            return Err(ExtractorError::Execution(stderr.trim().to_string()));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[async_trait]
impl PlaylistExtractor for YtDlpExtractor {
    async fn fetch_playlist(&self, url: &str) -> Result<(PlaylistSnapshot, ExtractionMetadata)> {
        let flat_dump = self.run_dump(url, true).await?;
        let flat_snapshot = snapshot_from_dump(&flat_dump);

        // A dump with zero usable entries means the playlist is empty,
        // deleted or fully private
        if flat_snapshot.videos.is_empty() {
            return Err(ExtractorError::PlaylistUnavailable(format!(
                "no extractable videos in {}",
                flat_snapshot.playlist_id
            )));
        }

        let flat_coverage = duration_coverage_pct(&flat_snapshot);

        if flat_coverage >= self.config.min_duration_coverage_pct {
            debug!(
                playlist_id = %flat_snapshot.playlist_id,
                coverage = flat_coverage,
                "Flat fetch covered enough durations"
            );
            return Ok((
                flat_snapshot,
                ExtractionMetadata {
                    used_full_fetch: false,
                    degraded: false,
                    duration_coverage_pct: flat_coverage,
                },
            ));
        }

        debug!(
            playlist_id = %flat_snapshot.playlist_id,
            coverage = flat_coverage,
            "Flat fetch insufficient, running full fetch"
        );

        match self.run_dump(url, false).await {
            Ok(full_dump) => {
                let full_snapshot = snapshot_from_dump(&full_dump);
                let full_coverage = duration_coverage_pct(&full_snapshot);
                Ok((
                    full_snapshot,
                    ExtractionMetadata {
                        used_full_fetch: true,
                        degraded: false,
                        duration_coverage_pct: full_coverage,
                    },
                ))
            }
            Err(e) => {
                warn!(
                    playlist_id = %flat_snapshot.playlist_id,
                    error = %e,
                    "Full fetch failed, returning degraded flat snapshot"
                );
                Ok((
                    flat_snapshot,
                    ExtractionMetadata {
                        used_full_fetch: true,
                        degraded: true,
                        duration_coverage_pct: flat_coverage,
                    },
                ))
            }
        }
    }
}

/// Stderr patterns yt-dlp emits for playlists that cannot be fetched at all.
fn is_unavailable_stderr(stderr: &str) -> bool {
    let lowered = stderr.to_lowercase();
    const PATTERNS: [&str; 5] = [
        "does not exist",
        "playlist is private",
        "private playlist",
        "unavailable",
        "http error 404",
    ];
    PATTERNS.iter().any(|pattern| lowered.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_path_binary() {
        let config = ExtractorConfig::default();
        assert_eq!(config.binary, PathBuf::from("yt-dlp"));
        assert_eq!(config.flat_timeout, Duration::from_secs(30));
        assert_eq!(config.full_timeout, Duration::from_secs(90));
    }

    #[test]
    fn unavailable_stderr_patterns_match() {
        assert!(is_unavailable_stderr(
            "ERROR: [youtube:tab] PLxx: The playlist does not exist."
        ));
        assert!(is_unavailable_stderr("ERROR: This playlist is private"));
        assert!(is_unavailable_stderr("ERROR: Video unavailable"));
        assert!(is_unavailable_stderr("HTTP Error 404: Not Found"));
        assert!(!is_unavailable_stderr("ERROR: network timed out"));
    }
}
