//! Collaborator construction from settings.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use herald_engagement::{
    AgentManager, ContextSource, EngagementAgent, FileContextSource, StaticContextSource,
};
use herald_llm::{ChatCompletionsGenerator, TemplateEchoGenerator, TextGenerator};
use herald_platform::{HttpPlatformClient, InMemoryPlatform, PlatformClient, PlatformFixture};
use herald_settings::HeraldSettings;
use tracing::{info, warn};

/// Read a secret from the environment variable named in settings.
fn secret_from_env(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => {
            warn!(var, "credential not set, requests go out unauthenticated");
            None
        }
    }
}

/// Platform client: the HTTP client, or an in-memory platform for dry runs.
pub fn build_platform(
    settings: &HeraldSettings,
    dry_run: bool,
    fixture: Option<&Path>,
) -> Result<Arc<dyn PlatformClient>> {
    if dry_run {
        let platform = match fixture {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read fixture: {}", path.display()))?;
                let fixture: PlatformFixture = serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid fixture: {}", path.display()))?;
                info!(
                    topics = fixture.search.len(),
                    authors = fixture.authors.len(),
                    "dry run with fixture"
                );
                InMemoryPlatform::from_fixture(fixture)
            }
            None => InMemoryPlatform::new(),
        };
        return Ok(Arc::new(platform));
    }

    let platform = &settings.platform;
    let client = HttpPlatformClient::new(
        platform.base_url.clone(),
        secret_from_env(&platform.bearer_token_env),
        Duration::from_millis(platform.timeout_ms),
    )
    .context("Failed to build platform client")?;
    Ok(Arc::new(client))
}

/// Snapshot source: a JSON file when given, otherwise the canned market reading.
pub fn build_context(path: Option<&Path>) -> Arc<dyn ContextSource> {
    match path {
        Some(path) => Arc::new(FileContextSource::new(path)),
        None => Arc::new(StaticContextSource::mock_market()),
    }
}

/// Build the agent manager.
///
/// Live runs give each agent its own chat-completions client so per-agent
/// model overrides apply. Dry runs share the echo generator.
pub fn build_manager(
    settings: &HeraldSettings,
    platform: &Arc<dyn PlatformClient>,
    context: Arc<dyn ContextSource>,
    dry_run: bool,
) -> Result<AgentManager> {
    if dry_run {
        let generator: Arc<dyn TextGenerator> = Arc::new(TemplateEchoGenerator);
        return AgentManager::from_settings(settings, platform, &generator, context)
            .context("Failed to set up agents");
    }

    let api_key = secret_from_env(&settings.llm.api_key_env);
    let mut agents = Vec::new();
    for agent in settings.agents.iter().filter(|a| a.enabled) {
        let generator = ChatCompletionsGenerator::from_settings(
            &settings.llm,
            api_key.clone(),
            agent.model.as_deref(),
        )
        .with_context(|| format!("Failed to build generator for {}", agent.id))?;
        info!(agent_id = %agent.id, model = generator.model(), "agent ready");
        agents.push(
            EngagementAgent::from_settings(
                settings,
                agent,
                Arc::clone(platform),
                Arc::new(generator),
            )
            .with_context(|| format!("Failed to set up agent {}", agent.id))?,
        );
    }
    Ok(AgentManager::new(agents, context))
}
