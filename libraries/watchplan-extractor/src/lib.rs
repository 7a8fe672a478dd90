//! Watchplan Extractor
//!
//! Playlist metadata extraction backed by the `yt-dlp` binary.
//!
//! The extractor shells out to yt-dlp for a single-JSON dump of a playlist
//! and maps it into a [`watchplan_core::PlaylistSnapshot`]. It never
//! downloads media.

mod dump;
mod error;
mod ytdlp;

pub use dump::{duration_coverage_pct, snapshot_from_dump, EntryDump, PlaylistDump};
pub use error::{ExtractorError, Result};
pub use ytdlp::{ExtractionMetadata, ExtractorConfig, PlaylistExtractor, YtDlpExtractor};
