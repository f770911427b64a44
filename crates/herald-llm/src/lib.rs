//! # herald-llm
//!
//! The language-model collaborator as seen by the engagement engine.
//!
//! - [`TextGenerator`]: `generate(system, user)` async trait
//! - [`ChatCompletionsGenerator`]: OpenAI-compatible `/chat/completions` client
//! - [`TemplateEchoGenerator`]: offline generator for dry runs
//! - [`prompt`]: user-prompt builders for posts and replies
//!
//! Length limits are not enforced here; the orchestrator truncates whatever
//! comes back.

#![deny(unsafe_code)]

pub mod chat;
pub mod errors;
pub mod generator;
pub mod prompt;

pub use chat::ChatCompletionsGenerator;
pub use errors::{GenerationError, Result};
pub use generator::{TemplateEchoGenerator, TextGenerator};
