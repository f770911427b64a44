//! Startup validation of loaded settings.
//!
//! Catches setup defects before the first cycle: empty or malformed post-type
//! lists, duplicate agent ids, dangling playbook references and out-of-range
//! discovery windows. The engine
//! re-checks weighted lists at decision time as well.

use std::collections::HashSet;

use crate::errors::{Result, SettingsError};
use crate::types::{AgentSettings, HeraldSettings, MAX_RECENCY_HOURS};

/// Validate the whole settings tree.
pub fn validate(settings: &HeraldSettings) -> Result<()> {
    let mut seen = HashSet::new();
    for agent in &settings.agents {
        if !seen.insert(agent.id.as_str()) {
            return Err(SettingsError::InvalidValue(format!(
                "duplicate agent id: {}",
                agent.id
            )));
        }
        validate_agent(agent)?;
        if let Some(playbook) = settings.playbook_for(agent)? {
            let hours = playbook.heuristics.recency_hours;
            if hours > MAX_RECENCY_HOURS {
                return Err(SettingsError::InvalidValue(format!(
                    "agent {}: heuristics.recencyHours {hours} exceeds {MAX_RECENCY_HOURS}",
                    agent.id
                )));
            }
        }
    }
    if settings.scheduler.cycle_interval_secs == 0 {
        return Err(SettingsError::InvalidValue(
            "scheduler.cycleIntervalSecs must be positive".to_string(),
        ));
    }
    Ok(())
}

fn validate_agent(agent: &AgentSettings) -> Result<()> {
    let post_types = &agent.strategy.post_types;
    if post_types.is_empty() {
        return Err(SettingsError::InvalidValue(format!(
            "agent {}: strategy.postTypes is empty",
            agent.id
        )));
    }
    for pt in post_types {
        if !pt.weight.is_finite() || pt.weight <= 0.0 {
            return Err(SettingsError::InvalidValue(format!(
                "agent {}: post type {} has non-positive weight {}",
                agent.id, pt.name, pt.weight
            )));
        }
        if pt.templates.is_empty() {
            return Err(SettingsError::InvalidValue(format!(
                "agent {}: post type {} has no templates",
                agent.id, pt.name
            )));
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Playbook, PlaybookRef, PostType};
    use assert_matches::assert_matches;

    fn agent(id: &str) -> AgentSettings {
        let mut a = AgentSettings {
            id: id.into(),
            ..AgentSettings::default()
        };
        a.strategy.post_types = vec![PostType {
            name: "take".into(),
            weight: 1.0,
            templates: vec!["t".into()],
        }];
        a
    }

    fn settings_with(agents: Vec<AgentSettings>) -> HeraldSettings {
        HeraldSettings {
            agents,
            ..HeraldSettings::default()
        }
    }

    #[test]
    fn accepts_well_formed_agent() {
        assert!(validate(&settings_with(vec![agent("a"), agent("b")])).is_ok());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = validate(&settings_with(vec![agent("a"), agent("a")])).unwrap_err();
        assert!(err.to_string().contains("duplicate agent id: a"));
    }

    #[test]
    fn rejects_empty_post_types() {
        let mut a = agent("a");
        a.strategy.post_types.clear();
        assert_matches!(
            validate(&settings_with(vec![a])),
            Err(SettingsError::InvalidValue(msg)) if msg.contains("postTypes is empty")
        );
    }

    #[test]
    fn rejects_zero_and_nan_weights() {
        let mut a = agent("a");
        a.strategy.post_types[0].weight = 0.0;
        assert!(validate(&settings_with(vec![a])).is_err());

        let mut b = agent("b");
        b.strategy.post_types[0].weight = f64::NAN;
        assert!(validate(&settings_with(vec![b])).is_err());
    }

    #[test]
    fn rejects_empty_templates() {
        let mut a = agent("a");
        a.strategy.post_types[0].templates.clear();
        assert!(validate(&settings_with(vec![a])).is_err());
    }

    #[test]
    fn rejects_dangling_playbook() {
        let mut a = agent("a");
        a.playbook = Some(PlaybookRef {
            domain: "web3".into(),
            key: "ghost".into(),
        });
        assert_matches!(
            validate(&settings_with(vec![a.clone()])),
            Err(SettingsError::PlaybookNotFound { .. })
        );

        let mut settings = settings_with(vec![a]);
        settings
            .growth_strategies
            .insert("web3", "ghost", Playbook::default());
        assert!(validate(&settings).is_ok());
    }

    #[test]
    fn rejects_oversized_recency_window() {
        let mut a = agent("a");
        a.playbook = Some(PlaybookRef {
            domain: "web3".into(),
            key: "wide".into(),
        });
        let mut settings = settings_with(vec![a]);
        let mut playbook = Playbook::default();
        playbook.heuristics.recency_hours = u32::MAX;
        settings.growth_strategies.insert("web3", "wide", playbook.clone());
        assert_matches!(
            validate(&settings),
            Err(SettingsError::InvalidValue(msg)) if msg.contains("recencyHours")
        );

        playbook.heuristics.recency_hours = MAX_RECENCY_HOURS;
        settings.growth_strategies.insert("web3", "wide", playbook);
        assert!(validate(&settings).is_ok());
    }
}
