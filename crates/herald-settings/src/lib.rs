//! # herald-settings
//!
//! Configuration management with layered sources for the Herald agents.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`HeraldSettings::default()`]
//! 2. **Settings file**: `~/.herald/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `HERALD_*` overrides (highest priority)
//!
//! Per-agent [`Strategy`] and [`Playbook`] records are read once at startup
//! and treated as immutable for the lifetime of an agent.
//!
//! # Usage
//!
//! ```no_run
//! use herald_settings::{load_settings_from_path, settings_path};
//!
//! let settings = load_settings_from_path(&settings_path()).unwrap_or_default();
//! println!("cycle interval: {}s", settings.scheduler.cycle_interval_secs);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;
pub mod validate;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings_from_path, settings_path};
pub use types::*;
pub use validate::validate;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
