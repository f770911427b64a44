//! User-prompt builders.
//!
//! The post prompt carries the descriptive fields of the snapshot, the chosen
//! template and the persona. The reply prompt carries the target text, the
//! chosen angles and every playbook guardrail. Guardrails are instructions to
//! the model only; nothing here checks the output against them.

use std::fmt::Write as _;

use herald_core::EnvironmentSnapshot;
use herald_core::text::{POST_MAX_CHARS, REPLY_MAX_CHARS};
use herald_settings::Personality;

/// Label of the template line in a post prompt.
pub const TEMPLATE_LABEL: &str = "Template:";
/// Label of the angle line in a reply prompt.
pub const ANGLE_LABEL: &str = "Angle:";

/// Build the user prompt for an original post.
pub fn build_post_prompt(
    snapshot: &EnvironmentSnapshot,
    template: &str,
    personality: &Personality,
) -> String {
    let trending = if snapshot.trending_topics.is_empty() {
        "none".to_string()
    } else {
        snapshot.trending_topics.join(", ")
    };
    let price = snapshot
        .asset_price
        .map_or_else(|| "N/A".to_string(), |p| format!("${p:.2}"));

    let mut out = String::from("Context:\n");
    let _ = writeln!(out, "- Current trending: {trending}");
    let _ = writeln!(
        out,
        "- Latest news: {}",
        snapshot.latest_news.as_deref().unwrap_or("No major news")
    );
    let _ = writeln!(
        out,
        "- Market sentiment: {}",
        snapshot.sentiment.as_deref().unwrap_or("neutral")
    );
    let _ = writeln!(out, "- Price: {price}");
    let _ = writeln!(out, "- Price change 24h: {:.2}%", snapshot.price_change);
    out.push('\n');
    out.push_str("Write a post following this template.\n");
    let _ = writeln!(out, "{TEMPLATE_LABEL} {template}");
    out.push('\n');
    out.push_str("Guidelines:\n");
    let _ = writeln!(out, "- Stay true to your personality: {}", personality.archetype);
    let _ = writeln!(out, "- Tone: {}", personality.tone);
    out.push_str("- Use real data from the context above\n");
    let _ = writeln!(out, "- Keep it under {POST_MAX_CHARS} characters");
    out.push_str("- Provide actual insight or entertainment value, not hype\n");
    out.push_str("\nGenerate the post now:");
    out
}

/// Build the user prompt for a reply to `target_text`.
pub fn build_reply_prompt(
    target_text: &str,
    angles: &[String],
    guardrails: &[String],
    personality: &Personality,
) -> String {
    let mut out = String::from("Reply to this post:\n");
    let _ = writeln!(out, "\"{}\"", target_text.trim());
    out.push('\n');
    if !angles.is_empty() {
        let _ = writeln!(out, "{ANGLE_LABEL} {}", angles.join("; "));
    }
    if !guardrails.is_empty() {
        out.push_str("Rules:\n");
        for rule in guardrails {
            let _ = writeln!(out, "- {rule}");
        }
    }
    out.push('\n');
    out.push_str("Guidelines:\n");
    let _ = writeln!(out, "- Stay true to your personality: {}", personality.archetype);
    let _ = writeln!(out, "- Tone: {}", personality.tone);
    let _ = writeln!(out, "- Keep it under {REPLY_MAX_CHARS} characters");
    out.push_str("\nGenerate the reply now:");
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
