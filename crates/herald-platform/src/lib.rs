//! # herald-platform
//!
//! The social platform collaborator as seen by the engagement engine.
//!
//! - [`PlatformClient`]: async trait with search, profile lookup, timeline
//!   fetch, post and reply submission
//! - [`HttpPlatformClient`]: REST implementation against an X API v2 surface
//! - [`InMemoryPlatform`]: seeded fake used for dry runs and tests; can be
//!   told to fail individual operations

#![deny(unsafe_code)]

pub mod client;
pub mod errors;
pub mod http;
pub mod memory;

pub use client::PlatformClient;
pub use errors::{PlatformError, Result};
pub use http::HttpPlatformClient;
pub use memory::{AuthorFixture, InMemoryPlatform, PlatformFixture, Submission};
