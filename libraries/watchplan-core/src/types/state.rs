/// Tracked playlist state
use crate::types::{PlanConfig, PlaylistSnapshot, ProgressMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the service persists for one tracked playlist.
///
/// The schedule is deliberately absent: it is derived from this state on
/// every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistState {
    /// Latest imported snapshot
    pub snapshot: PlaylistSnapshot,

    /// Viewing plan configuration
    pub plan_config: PlanConfig,

    /// Per-video completion map
    pub progress_map: ProgressMap,

    /// Last modification of any part of this state
    pub updated_at: DateTime<Utc>,
}
