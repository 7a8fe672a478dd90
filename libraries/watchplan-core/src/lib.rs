//! Watchplan Core
//!
//! Domain types, error handling and the schedule builder for Watchplan.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Video`, `PlaylistSnapshot`, `PlanConfig`, `PlaylistState`, etc.
//! - **Schedule Builder**: [`scheduler::build_schedule`], the pure greedy
//!   packer that turns a snapshot, plan and progress map into a
//!   [`ScheduleResult`]
//! - **Error Handling**: Unified `WatchplanError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use watchplan_core::scheduler::build_schedule;
//! use watchplan_core::types::{PlanConfig, PlaybackSpeed, ProgressMap};
//!
//! let plan = PlanConfig {
//!     minutes_per_day: 30,
//!     start_date: "2024-03-10".to_string(),
//!     playback_speed: PlaybackSpeed::Normal,
//! };
//! let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
//! let schedule = build_schedule(&[], &plan, &ProgressMap::new(), today);
//! assert!(schedule.days.is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod format;
pub mod scheduler;
pub mod types;

// Re-export commonly used types
pub use error::{Result, WatchplanError};
pub use scheduler::{adjusted_duration_sec, build_schedule};
pub use types::{
    PlanConfig, PlanConfigPatch, PlaybackSpeed, PlaylistId, PlaylistSnapshot, PlaylistState,
    ProgressMap, ScheduleResult, ScheduledDay, User, UserId, Video, VideoId, VideoProgress,
};
