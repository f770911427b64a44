//! Per-agent decision cycle.
//!
//! One cycle attempts at most one action:
//!
//! 1. evaluate triggers against the snapshot
//! 2. on a post verdict with the cooldown clear, select a post type, generate,
//!    truncate to 280 characters and submit
//! 3. otherwise, with reply budget left, run discovery, pick a target post,
//!    draw reply angles, generate, truncate to 240 characters and submit
//! 4. otherwise stay idle
//!
//! Nothing is recorded until a submission succeeds, so a failed or abandoned
//! cycle leaves the agent as it was. Configuration defects are returned as
//! errors; collaborator failures become [`CycleOutcome::Failed`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use herald_core::text::{POST_MAX_CHARS, REPLY_MAX_CHARS, truncate_with_ellipsis};
use herald_core::{ActionKind, ActionRecord, AgentId, ContentItem, EnvironmentSnapshot};
use herald_discovery::{AccountCandidate, DiscoveryEngine};
use herald_llm::TextGenerator;
use herald_llm::prompt::{build_post_prompt, build_reply_prompt};
use herald_platform::PlatformClient;
use herald_settings::{AgentSettings, HeraldSettings, Playbook};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::errors::{EngagementError, Result};
use crate::limiter::{PostCooldown, ReplyCap};
use crate::selector::{choose_reply_angles, select_post_type};
use crate::trigger::{TriggerEvaluator, Verdict};

/// Recent posts fetched from a candidate when picking a reply target.
pub const TARGET_CONTENT_WINDOW: usize = 5;

/// Why a cycle took no action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleReason {
    /// Reply cap reached and no post was authorized.
    ReplyCapReached,
    /// The agent has no playbook, so it never replies.
    RepliesDisabled,
    /// Discovery found no candidate with fetchable content.
    NoTarget,
}

/// Result of one decision cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// An original post was submitted.
    Posted {
        /// Post type that was drawn.
        post_type: String,
        /// The recorded action.
        record: ActionRecord,
    },
    /// A reply was submitted.
    Replied {
        /// Author of the target content.
        target_author: String,
        /// The recorded action.
        record: ActionRecord,
    },
    /// No action.
    Idle(IdleReason),
    /// Generation or submission failed; nothing was recorded.
    Failed {
        /// Action that was attempted.
        kind: ActionKind,
        /// Collaborator error.
        error: EngagementError,
    },
}

impl CycleOutcome {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Posted { .. } => "posted",
            Self::Replied { .. } => "replied",
            Self::Idle(_) => "idle",
            Self::Failed { .. } => "failed",
        }
    }
}

/// One engagement agent and its private decision state.
pub struct EngagementAgent {
    settings: AgentSettings,
    playbook: Option<Playbook>,
    platform: Arc<dyn PlatformClient>,
    generator: Arc<dyn TextGenerator>,
    discovery: DiscoveryEngine<Arc<dyn PlatformClient>>,
    triggers: TriggerEvaluator,
    post_cooldown: PostCooldown,
    reply_cap: ReplyCap,
    rng: StdRng,
}

impl EngagementAgent {
    /// Create an agent with the default trigger registry.
    ///
    /// The RNG is seeded from `settings.seed` when set, otherwise from the OS.
    pub fn new(
        settings: AgentSettings,
        playbook: Option<Playbook>,
        platform: Arc<dyn PlatformClient>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let rng = settings
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            post_cooldown: PostCooldown::for_frequency(settings.strategy.posting_frequency),
            reply_cap: ReplyCap::new(settings.strategy.daily_reply_cap),
            discovery: DiscoveryEngine::new(Arc::clone(&platform)),
            triggers: TriggerEvaluator::default(),
            settings,
            playbook,
            platform,
            generator,
            rng,
        }
    }

    /// Create an agent, resolving its playbook from the catalog.
    pub fn from_settings(
        root: &HeraldSettings,
        settings: &AgentSettings,
        platform: Arc<dyn PlatformClient>,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self> {
        let playbook = root.playbook_for(settings)?.cloned();
        Ok(Self::new(settings.clone(), playbook, platform, generator))
    }

    /// Replace the random source.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Replace the trigger evaluator.
    #[must_use]
    pub fn with_triggers(mut self, triggers: TriggerEvaluator) -> Self {
        self.triggers = triggers;
        self
    }

    /// Agent identity.
    pub fn id(&self) -> &AgentId {
        &self.settings.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.settings.name
    }

    /// Post cooldown state.
    pub fn post_cooldown(&self) -> &PostCooldown {
        &self.post_cooldown
    }

    /// Reply cap state.
    pub fn reply_cap(&self) -> &ReplyCap {
        &self.reply_cap
    }

    /// Run discovery with this agent's playbook without acting on the result.
    pub async fn discover(&self, now: DateTime<Utc>) -> Result<Vec<AccountCandidate>> {
        let playbook = self.playbook.as_ref().ok_or_else(|| {
            EngagementError::Configuration(format!("agent {} has no playbook", self.settings.id))
        })?;
        let heuristics = &playbook.heuristics;
        Ok(self
            .discovery
            .search_and_rank(&heuristics.topics, heuristics, now)
            .await)
    }

    /// Run one decision cycle.
    pub async fn run_cycle(
        &mut self,
        snapshot: &EnvironmentSnapshot,
        now: DateTime<Utc>,
    ) -> Result<CycleOutcome> {
        let verdict = self.triggers.evaluate(
            snapshot,
            &self.settings.id,
            &self.settings.strategy.triggers,
        );
        debug!(agent_id = %self.settings.id, ?verdict, "triggers evaluated");

        if let Verdict::Post(reason) = verdict {
            if self.post_cooldown.can_post_now(now) {
                info!(agent_id = %self.settings.id, %reason, "post authorized");
                return self.post(snapshot, now).await;
            }
            debug!(agent_id = %self.settings.id, "post cooldown active");
        }

        if !self.reply_cap.can_reply_now(now) {
            return Ok(CycleOutcome::Idle(IdleReason::ReplyCapReached));
        }
        if self.playbook.is_none() {
            return Ok(CycleOutcome::Idle(IdleReason::RepliesDisabled));
        }
        self.reply(now).await
    }

    async fn post(
        &mut self,
        snapshot: &EnvironmentSnapshot,
        now: DateTime<Utc>,
    ) -> Result<CycleOutcome> {
        let selection = select_post_type(&self.settings.strategy.post_types, &mut self.rng)?;
        let post_type = selection.post_type.name.clone();
        let prompt = build_post_prompt(snapshot, selection.template, &self.settings.personality);

        let text = match self
            .generator
            .generate(&self.settings.system_prompt, &prompt)
            .await
        {
            Ok(raw) => truncate_with_ellipsis(&raw, POST_MAX_CHARS),
            Err(e) => return Ok(failed(ActionKind::Post, e.into())),
        };

        match self.platform.submit_post(&text).await {
            Ok(receipt) => {
                let record = ActionRecord::post(text, receipt.platform_id, now);
                self.post_cooldown.record(record.clone());
                info!(
                    agent_id = %self.settings.id,
                    post_type = %post_type,
                    platform_id = %record.platform_id,
                    "posted"
                );
                Ok(CycleOutcome::Posted { post_type, record })
            }
            Err(e) => Ok(failed(ActionKind::Post, e.into())),
        }
    }

    async fn reply(&mut self, now: DateTime<Utc>) -> Result<CycleOutcome> {
        let candidates = self.discover(now).await?;
        let Some((author_id, target)) = self.first_reachable(&candidates).await else {
            return Ok(CycleOutcome::Idle(IdleReason::NoTarget));
        };

        let Some(playbook) = self.playbook.as_ref() else {
            return Ok(CycleOutcome::Idle(IdleReason::RepliesDisabled));
        };
        let angles = choose_reply_angles(
            &playbook.reply_angles,
            self.settings.strategy.reply_angle_count,
            &mut self.rng,
        );
        let prompt = build_reply_prompt(
            &target.text,
            &angles,
            &playbook.guardrails,
            &self.settings.personality,
        );

        let text = match self
            .generator
            .generate(&self.settings.system_prompt, &prompt)
            .await
        {
            Ok(raw) => truncate_with_ellipsis(&raw, REPLY_MAX_CHARS),
            Err(e) => return Ok(failed(ActionKind::Reply, e.into())),
        };

        match self.platform.submit_reply(&target.id, &text).await {
            Ok(receipt) => {
                let record = ActionRecord::reply(text, receipt.platform_id, target.id, now);
                self.reply_cap.record(record.clone());
                info!(
                    agent_id = %self.settings.id,
                    target_author = %author_id,
                    platform_id = %record.platform_id,
                    "replied"
                );
                Ok(CycleOutcome::Replied {
                    target_author: author_id,
                    record,
                })
            }
            Err(e) => Ok(failed(ActionKind::Reply, e.into())),
        }
    }

    /// First candidate in rank order with at least one fetchable post.
    async fn first_reachable(
        &self,
        candidates: &[AccountCandidate],
    ) -> Option<(String, ContentItem)> {
        for candidate in candidates {
            match self
                .platform
                .get_recent_content(&candidate.author_id, TARGET_CONTENT_WINDOW)
                .await
            {
                Ok(posts) => {
                    if let Some(latest) = posts.into_iter().next() {
                        return Some((candidate.author_id.clone(), latest));
                    }
                    debug!(author_id = %candidate.author_id, "candidate has no content");
                }
                Err(e) => {
                    warn!(author_id = %candidate.author_id, error = %e, "target fetch failed");
                }
            }
        }
        None
    }
}

fn failed(kind: ActionKind, error: EngagementError) -> CycleOutcome {
    warn!(%kind, error = %error, "action failed, nothing recorded");
    CycleOutcome::Failed { kind, error }
}
