//! Domain types shared across the workspace

mod ids;
mod plan;
mod progress;
mod schedule;
mod state;
mod user;
mod video;

pub use ids::{PlaylistId, UserId, VideoId};
pub use plan::{PlanConfig, PlanConfigPatch, PlaybackSpeed};
pub use progress::{ProgressMap, VideoProgress};
pub use schedule::{ScheduleResult, ScheduledDay};
pub use state::PlaylistState;
pub use user::User;
pub use video::{PlaylistSnapshot, Video};
