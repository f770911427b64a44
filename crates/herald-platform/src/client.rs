//! Platform client trait.

use std::sync::Arc;

use async_trait::async_trait;
use herald_core::{ContentItem, Profile, SubmitReceipt};

use crate::errors::Result;

/// Social platform operations consumed by discovery and the orchestrator.
///
/// Implementors must be `Send + Sync`; agents share one client and run their
/// cycles concurrently. Timeouts and retries are the implementor's concern.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Recent content matching `query`, at most `max_results` items.
    async fn search_recent(&self, query: &str, max_results: usize) -> Result<Vec<ContentItem>>;

    /// Profile of `author_id`, or `None` when the account does not exist.
    async fn get_profile(&self, author_id: &str) -> Result<Option<Profile>>;

    /// The author's own recent content, most recent first.
    async fn get_recent_content(
        &self,
        author_id: &str,
        max_results: usize,
    ) -> Result<Vec<ContentItem>>;

    /// Publish an original post.
    async fn submit_post(&self, text: &str) -> Result<SubmitReceipt>;

    /// Publish a reply to `target_content_id`.
    async fn submit_reply(&self, target_content_id: &str, text: &str) -> Result<SubmitReceipt>;
}

#[async_trait]
impl<T: PlatformClient + ?Sized> PlatformClient for Arc<T> {
    async fn search_recent(&self, query: &str, max_results: usize) -> Result<Vec<ContentItem>> {
        (**self).search_recent(query, max_results).await
    }

    async fn get_profile(&self, author_id: &str) -> Result<Option<Profile>> {
        (**self).get_profile(author_id).await
    }

    async fn get_recent_content(
        &self,
        author_id: &str,
        max_results: usize,
    ) -> Result<Vec<ContentItem>> {
        (**self).get_recent_content(author_id, max_results).await
    }

    async fn submit_post(&self, text: &str) -> Result<SubmitReceipt> {
        (**self).submit_post(text).await
    }

    async fn submit_reply(&self, target_content_id: &str, text: &str) -> Result<SubmitReceipt> {
        (**self).submit_reply(target_content_id, text).await
    }
}
