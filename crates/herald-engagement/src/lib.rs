//! # herald-engagement
//!
//! The decision core of a Herald agent.
//!
//! - [`ActionHistory`]: time-bounded store of taken actions
//! - [`PostCooldown`] / [`ReplyCap`]: per-kind throttles
//! - [`selector`]: weighted post-type draw and reply-angle sampling
//! - [`TriggerEvaluator`]: snapshot → verdict, with an identity trigger registry
//! - [`EngagementAgent`]: one post-or-reply decision cycle
//! - [`AgentManager`]: concurrent cycles across agents with isolated failures
//! - [`ContextSource`]: where snapshots come from

#![deny(unsafe_code)]

pub mod agent;
pub mod context;
pub mod errors;
pub mod history;
pub mod limiter;
pub mod manager;
pub mod performance;
pub mod selector;
pub mod trigger;

pub use agent::{CycleOutcome, EngagementAgent, IdleReason};
pub use context::{ContextSource, FileContextSource, StaticContextSource};
pub use errors::{EngagementError, Result};
pub use history::ActionHistory;
pub use limiter::{PostCooldown, ReplyCap};
pub use manager::{AgentManager, CycleReport};
pub use performance::{PerformanceMetrics, PerformanceSummary};
pub use trigger::{IdentityTrigger, TriggerEvaluator, TriggerReason, TriggerRegistry, Verdict};
