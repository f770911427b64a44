//! Text generator trait and the offline echo generator.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{GenerationError, Result};
use crate::prompt::{ANGLE_LABEL, TEMPLATE_LABEL};

/// Produces text from a system prompt and a user prompt.
///
/// Implementors must be `Send + Sync`. Timeouts and retries belong to the
/// implementation, not the caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion.
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        (**self).generate(system_prompt, user_prompt).await
    }
}

/// Generator that answers with the template (or reply angle) line of the
/// user prompt. Used by `--dry-run` so a full cycle runs without a model.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateEchoGenerator;

#[async_trait]
impl TextGenerator for TemplateEchoGenerator {
    async fn generate(&self, _system_prompt: &str, user_prompt: &str) -> Result<String> {
        let labelled = user_prompt.lines().map(str::trim).find_map(|line| {
            line.strip_prefix(TEMPLATE_LABEL)
                .or_else(|| line.strip_prefix(ANGLE_LABEL))
        });
        let text = labelled
            .or_else(|| user_prompt.lines().map(str::trim).find(|l| !l.is_empty()))
            .map(str::trim)
            .unwrap_or_default();
        if text.is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(text.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
