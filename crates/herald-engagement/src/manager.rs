//! Multi-agent coordination.
//!
//! Every tick reads one snapshot and runs each enabled agent's cycle
//! concurrently. Agents share no mutable state, and one agent's error never
//! reaches another.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use herald_core::{AgentId, CycleId};
use herald_llm::TextGenerator;
use herald_platform::PlatformClient;
use herald_settings::HeraldSettings;
use tracing::{Instrument, error, info, info_span, warn};

use crate::agent::{CycleOutcome, EngagementAgent};
use crate::context::ContextSource;
use crate::errors::Result;
use crate::performance::{PerformanceMetrics, PerformanceSummary};

/// Result of one agent's cycle within a tick.
#[derive(Debug)]
pub struct CycleReport {
    /// Agent that ran.
    pub agent_id: AgentId,
    /// Cycle identifier (also on the log span).
    pub cycle_id: CycleId,
    /// Outcome or configuration error.
    pub result: Result<CycleOutcome>,
}

/// Owns all agents and drives their cycles.
pub struct AgentManager {
    agents: Vec<EngagementAgent>,
    metrics: HashMap<AgentId, PerformanceMetrics>,
    context: Arc<dyn ContextSource>,
}

impl std::fmt::Debug for AgentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentManager")
            .field("agents", &self.agents.len())
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl AgentManager {
    /// Manager over prepared agents.
    pub fn new(agents: Vec<EngagementAgent>, context: Arc<dyn ContextSource>) -> Self {
        let metrics = agents
            .iter()
            .map(|a| (a.id().clone(), PerformanceMetrics::default()))
            .collect();
        Self {
            agents,
            metrics,
            context,
        }
    }

    /// Build every enabled agent from settings.
    ///
    /// A dangling playbook reference fails the whole build.
    pub fn from_settings(
        settings: &HeraldSettings,
        platform: &Arc<dyn PlatformClient>,
        generator: &Arc<dyn TextGenerator>,
        context: Arc<dyn ContextSource>,
    ) -> Result<Self> {
        let agents = settings
            .agents
            .iter()
            .filter(|a| a.enabled)
            .map(|a| {
                EngagementAgent::from_settings(
                    settings,
                    a,
                    Arc::clone(platform),
                    Arc::clone(generator),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(agents, context))
    }

    /// Managed agents.
    pub fn agents(&self) -> &[EngagementAgent] {
        &self.agents
    }

    /// Run one tick: read a snapshot, then one cycle per agent.
    ///
    /// Fails only when the snapshot is unavailable; agent errors are
    /// reported per agent.
    pub async fn run_cycle(&mut self, now: DateTime<Utc>) -> Result<Vec<CycleReport>> {
        let snapshot = self.context.snapshot().await?;

        let cycles = self.agents.iter_mut().map(|agent| {
            let cycle_id = CycleId::new();
            let agent_id = agent.id().clone();
            let span = info_span!("cycle", agent_id = %agent_id, cycle_id = %cycle_id);
            let snapshot = &snapshot;
            async move {
                let result = agent.run_cycle(snapshot, now).await;
                CycleReport {
                    agent_id,
                    cycle_id,
                    result,
                }
            }
            .instrument(span)
        });
        let reports = join_all(cycles).await;

        for report in &reports {
            log_report(report);
            self.metrics
                .entry(report.agent_id.clone())
                .or_default()
                .record(&report.result);
        }
        Ok(reports)
    }

    /// Counters for one agent.
    pub fn metrics(&self, agent: &AgentId) -> Option<&PerformanceMetrics> {
        self.metrics.get(agent)
    }

    /// Summary per agent, in agent order.
    pub fn analyze_performance(&self) -> Vec<(AgentId, PerformanceSummary)> {
        self.agents
            .iter()
            .filter_map(|a| {
                self.metrics
                    .get(a.id())
                    .map(|m| (a.id().clone(), m.analyze_performance()))
            })
            .collect()
    }
}

fn log_report(report: &CycleReport) {
    let agent_id = &report.agent_id;
    match &report.result {
        Ok(CycleOutcome::Posted { post_type, record }) => {
            info!(%agent_id, %post_type, preview = %preview(&record.content), "agent posted");
        }
        Ok(CycleOutcome::Replied {
            target_author,
            record,
        }) => {
            info!(%agent_id, %target_author, preview = %preview(&record.content), "agent replied");
        }
        Ok(CycleOutcome::Idle(reason)) => {
            info!(%agent_id, ?reason, "agent idle");
        }
        Ok(CycleOutcome::Failed { kind, error }) if error.is_transient() => {
            warn!(%agent_id, %kind, %error, "agent action failed (transient)");
        }
        Ok(CycleOutcome::Failed { kind, error }) => {
            error!(%agent_id, %kind, %error, "agent action failed");
        }
        Err(err) if err.is_configuration() => {
            error!(%agent_id, error = %err, "agent misconfigured");
        }
        Err(err) => {
            error!(%agent_id, error = %err, "agent cycle failed");
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}
