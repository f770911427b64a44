//! # herald-discovery
//!
//! Turns topic-matched content into a ranked shortlist of accounts worth
//! engaging with.
//!
//! - [`scoring`]: pure engagement, recency and composite-score functions
//! - [`DiscoveryEngine`]: search, dedup, admission filters, ranking
//!
//! Every pass recomputes from scratch; nothing is cached between passes.

#![deny(unsafe_code)]

pub mod candidate;
pub mod engine;
pub mod scoring;

pub use candidate::AccountCandidate;
pub use engine::{AUTHOR_POST_WINDOW, DiscoveryEngine, SEARCH_BATCH_SIZE};
pub use scoring::{composite_score, estimate_engagement, most_recent_timestamp};
