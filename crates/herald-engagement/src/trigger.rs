//! Trigger evaluation.
//!
//! Rules run in a fixed order and the first match wins:
//!
//! 1. price change above `price_movement_threshold`
//! 2. volume spike above `volume_spike_threshold`
//! 3. news relevance above `news_relevance_score`
//! 4. identity triggers registered for the agent, in registration order
//!
//! Evaluation is a pure function of snapshot, identity and thresholds.

use std::collections::HashMap;
use std::fmt;

use herald_core::{AgentId, EnvironmentSnapshot};
use herald_settings::TriggerThresholds;

/// Predicate over a snapshot and the agent's thresholds.
pub type SnapshotPredicate = fn(&EnvironmentSnapshot, &TriggerThresholds) -> bool;

/// A named identity-specific trigger.
#[derive(Clone, Copy, Debug)]
pub struct IdentityTrigger {
    /// Name reported in the verdict.
    pub name: &'static str,
    /// Condition that authorizes a post.
    pub predicate: SnapshotPredicate,
}

/// Why a post was authorized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerReason {
    /// Price change above threshold.
    PriceMovement,
    /// Volume spike above threshold.
    VolumeSpike,
    /// News relevance above threshold.
    NewsRelevance,
    /// A registered identity trigger matched.
    Identity(&'static str),
}

impl fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PriceMovement => write!(f, "price_movement"),
            Self::VolumeSpike => write!(f, "volume_spike"),
            Self::NewsRelevance => write!(f, "news_relevance"),
            Self::Identity(name) => write!(f, "{name}"),
        }
    }
}

/// Trigger verdict. Anything other than a post leaves the caller free to
/// consider a reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Post, for the given reason.
    Post(TriggerReason),
    /// No rule matched.
    NoTrigger,
}

impl Verdict {
    /// Whether a post is authorized.
    pub fn is_post(self) -> bool {
        matches!(self, Self::Post(_))
    }
}

/// Identity triggers keyed by agent.
#[derive(Clone, Debug, Default)]
pub struct TriggerRegistry {
    by_agent: HashMap<AgentId, Vec<IdentityTrigger>>,
}

impl TriggerRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in identity triggers.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            AgentId::from("grok_crypto"),
            IdentityTrigger {
                name: "fear_greed_extreme",
                predicate: fear_greed_extreme,
            },
        );
        registry.register(
            AgentId::from("gemini_crypto"),
            IdentityTrigger {
                name: "misinformation",
                predicate: |snapshot, _| snapshot.misinformation_detected,
            },
        );
        registry.register(
            AgentId::from("qwen_coin"),
            IdentityTrigger {
                name: "meme_opportunity",
                predicate: |snapshot, _| snapshot.meme_opportunity,
            },
        );
        registry
    }

    /// Add a trigger for `agent`, after any already registered.
    pub fn register(&mut self, agent: AgentId, trigger: IdentityTrigger) {
        self.by_agent.entry(agent).or_default().push(trigger);
    }

    /// Triggers registered for `agent`.
    pub fn for_agent(&self, agent: &AgentId) -> &[IdentityTrigger] {
        self.by_agent.get(agent).map(Vec::as_slice).unwrap_or_default()
    }
}

fn fear_greed_extreme(snapshot: &EnvironmentSnapshot, thresholds: &TriggerThresholds) -> bool {
    snapshot.fear_greed_index > thresholds.fear_greed_upper
        || snapshot.fear_greed_index < thresholds.fear_greed_lower
}

/// Maps snapshots to verdicts.
#[derive(Clone, Debug)]
pub struct TriggerEvaluator {
    registry: TriggerRegistry,
}

impl Default for TriggerEvaluator {
    fn default() -> Self {
        Self::new(TriggerRegistry::with_defaults())
    }
}

impl TriggerEvaluator {
    /// Evaluator over a registry.
    #[must_use]
    pub fn new(registry: TriggerRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate all rules in priority order.
    pub fn evaluate(
        &self,
        snapshot: &EnvironmentSnapshot,
        agent: &AgentId,
        thresholds: &TriggerThresholds,
    ) -> Verdict {
        if snapshot.price_change > thresholds.price_movement_threshold {
            return Verdict::Post(TriggerReason::PriceMovement);
        }
        if snapshot.volume_spike > thresholds.volume_spike_threshold {
            return Verdict::Post(TriggerReason::VolumeSpike);
        }
        if snapshot.news_relevance > thresholds.news_relevance_score {
            return Verdict::Post(TriggerReason::NewsRelevance);
        }
        self.registry
            .for_agent(agent)
            .iter()
            .find(|t| (t.predicate)(snapshot, thresholds))
            .map_or(Verdict::NoTrigger, |t| {
                Verdict::Post(TriggerReason::Identity(t.name))
            })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(snapshot: &EnvironmentSnapshot, agent: &str) -> Verdict {
        TriggerEvaluator::default().evaluate(
            snapshot,
            &AgentId::from(agent),
            &TriggerThresholds::default(),
        )
    }

    #[test]
    fn quiet_snapshot_has_no_trigger() {
        assert_eq!(eval(&EnvironmentSnapshot::default(), "grok_crypto"), Verdict::NoTrigger);
    }

    #[test]
    fn price_movement_wins_regardless_of_other_fields() {
        let snapshot = EnvironmentSnapshot {
            price_change: 6.0,
            volume_spike: 9.0,
            news_relevance: 10.0,
            meme_opportunity: true,
            ..EnvironmentSnapshot::default()
        };
        assert_eq!(
            eval(&snapshot, "qwen_coin"),
            Verdict::Post(TriggerReason::PriceMovement)
        );
    }

    #[test]
    fn thresholds_are_strict() {
        let snapshot = EnvironmentSnapshot {
            price_change: 5.0,
            volume_spike: 2.0,
            news_relevance: 7.0,
            ..EnvironmentSnapshot::default()
        };
        assert_eq!(eval(&snapshot, "anyone"), Verdict::NoTrigger);
    }

    #[test]
    fn generic_rules_in_order() {
        let volume = EnvironmentSnapshot {
            volume_spike: 2.5,
            news_relevance: 8.0,
            ..EnvironmentSnapshot::default()
        };
        assert_eq!(eval(&volume, "anyone"), Verdict::Post(TriggerReason::VolumeSpike));

        let news = EnvironmentSnapshot {
            news_relevance: 8.0,
            ..EnvironmentSnapshot::default()
        };
        assert_eq!(eval(&news, "anyone"), Verdict::Post(TriggerReason::NewsRelevance));
    }

    #[test]
    fn fear_greed_only_for_its_identity() {
        for index in [80.0, 20.0] {
            let snapshot = EnvironmentSnapshot {
                fear_greed_index: index,
                ..EnvironmentSnapshot::default()
            };
            assert_eq!(
                eval(&snapshot, "grok_crypto"),
                Verdict::Post(TriggerReason::Identity("fear_greed_extreme"))
            );
            assert_eq!(eval(&snapshot, "gemini_crypto"), Verdict::NoTrigger);
        }
    }

    #[test]
    fn flag_triggers_by_identity() {
        let misinformation = EnvironmentSnapshot {
            misinformation_detected: true,
            ..EnvironmentSnapshot::default()
        };
        assert!(eval(&misinformation, "gemini_crypto").is_post());
        assert!(!eval(&misinformation, "qwen_coin").is_post());

        let meme = EnvironmentSnapshot {
            meme_opportunity: true,
            ..EnvironmentSnapshot::default()
        };
        assert!(eval(&meme, "qwen_coin").is_post());
        assert!(!eval(&meme, "grok_crypto").is_post());
    }

    #[test]
    fn custom_registration_extends_identities() {
        let mut registry = TriggerRegistry::new();
        registry.register(
            AgentId::from("claude_ai"),
            IdentityTrigger {
                name: "trending",
                predicate: |snapshot, _| !snapshot.trending_topics.is_empty(),
            },
        );
        let evaluator = TriggerEvaluator::new(registry);
        let snapshot = EnvironmentSnapshot {
            trending_topics: vec!["#ai".into()],
            ..EnvironmentSnapshot::default()
        };
        let verdict = evaluator.evaluate(
            &snapshot,
            &AgentId::from("claude_ai"),
            &TriggerThresholds::default(),
        );
        assert_eq!(verdict, Verdict::Post(TriggerReason::Identity("trending")));
        assert_eq!(TriggerReason::Identity("trending").to_string(), "trending");
    }

    #[test]
    fn evaluation_is_reproducible() {
        let snapshot = EnvironmentSnapshot {
            fear_greed_index: 90.0,
            ..EnvironmentSnapshot::default()
        };
        let first = eval(&snapshot, "grok_crypto");
        for _ in 0..10 {
            assert_eq!(eval(&snapshot, "grok_crypto"), first);
        }
    }
}
