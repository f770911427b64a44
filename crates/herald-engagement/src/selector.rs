//! Weighted post-type selection and reply-angle sampling.
//!
//! The random source is always passed in; seed a `StdRng` for reproducible
//! draws.

use herald_settings::PostType;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::errors::{EngagementError, Result};

/// A drawn post type and one of its templates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostSelection<'a> {
    /// The chosen post type.
    pub post_type: &'a PostType,
    /// The chosen template.
    pub template: &'a str,
}

/// Draw an index with probability `weight_i / Σ weights`.
///
/// The draw `d` is uniform in `[0, total)` and index `i` wins when
/// `d < cumulative_i`. The boundary is strict so that a zero-weight entry,
/// whose cumulative equals its predecessor's, can never win.
///
/// Zero weights are never drawn. Empty input, negative or non-finite weights,
/// and a zero total are configuration errors. If the cumulative walk runs out
/// (floating-point drift), the first index is returned.
pub fn pick_weighted<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Result<usize> {
    if weights.is_empty() {
        return Err(EngagementError::Configuration(
            "weighted choice over an empty list".to_string(),
        ));
    }
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(EngagementError::Configuration(format!(
            "invalid selection weight {bad}"
        )));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(EngagementError::Configuration(
            "selection weights sum to zero".to_string(),
        ));
    }

    let draw = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if draw < cumulative {
            return Ok(i);
        }
    }
    Ok(0)
}

/// Draw a post type by weight, then one of its templates uniformly.
pub fn select_post_type<'a, R: Rng + ?Sized>(
    post_types: &'a [PostType],
    rng: &mut R,
) -> Result<PostSelection<'a>> {
    let weights: Vec<f64> = post_types.iter().map(|p| p.weight).collect();
    let post_type = &post_types[pick_weighted(&weights, rng)?];
    let template = post_type.templates.choose(rng).ok_or_else(|| {
        EngagementError::Configuration(format!(
            "post type '{}' has no templates",
            post_type.name
        ))
    })?;
    Ok(PostSelection {
        post_type,
        template,
    })
}

/// Choose `k` angles uniformly without replacement.
///
/// When `k` covers the whole list, it is returned unshuffled.
pub fn choose_reply_angles<R: Rng + ?Sized>(angles: &[String], k: usize, rng: &mut R) -> Vec<String> {
    if k >= angles.len() {
        return angles.to_vec();
    }
    angles.choose_multiple(rng, k).cloned().collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
