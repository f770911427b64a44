//! # herald-core
//!
//! Foundation types shared by every Herald crate.
//!
//! - **IDs**: `AgentId` (configured identity) and `CycleId` (UUID v7 per decision cycle)
//! - **Content**: `ContentItem` and `Profile` as returned by the platform collaborator
//! - **Snapshots**: `EnvironmentSnapshot`, one read of external signals per cycle
//! - **Actions**: `ActionKind` and `ActionRecord` for taken posts and replies
//! - **Text**: character-limit truncation with an ellipsis marker
//! - **Logging**: `tracing` subscriber initialization

#![deny(unsafe_code)]

pub mod action;
pub mod content;
pub mod ids;
pub mod logging;
pub mod snapshot;
pub mod text;

pub use action::{ActionKind, ActionRecord};
pub use content::{ContentItem, Profile, SubmitReceipt, parse_timestamp};
pub use ids::{AgentId, CycleId};
pub use logging::LogFormat;
pub use snapshot::EnvironmentSnapshot;
