//! Trap configuration.
//!
//! This module holds the strongly-typed structures behind `snare.toml`. Ids
//! are kept as the raw strings the user wrote; resolving them against the
//! kind registry happens in [`crate::catalog`].
//!
//! ## Example `snare.toml`
//!
//! ```toml
//! [options]
//! enabled = true
//! activation_range = 10.0
//! effect_duration_secs = -1
//!
//! [[traps]]
//! source_id = "pig"
//! spawn_id = "pig"
//! passenger_id = "zombified_piglin"
//! chance = 0.05
//! spawn_num = 3
//! effect_num = 4
//! ```

use serde::{Deserialize, Serialize};

pub const MIN_ACTIVATION_RANGE: f32 = 1.0;
pub const MAX_ACTIVATION_RANGE: f32 = 50.0;
pub const MAX_EFFECT_DURATION_SECS: i32 = 86_400;
pub const MAX_SPAWN_NUM: u32 = 20;
pub const MAX_EFFECT_NUM: u32 = 20;

/// Global trap settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrapOptions {
    pub enabled: bool,
    /// Logs every tag and trigger at info level and makes sources glow.
    pub debug_mode: bool,
    /// Distance in world units within which a player arms the trigger.
    pub activation_range: f32,
    /// Carried in the file format; nothing in the trigger path reads it.
    pub allow_instant: bool,
    /// Effect duration in seconds, `-1` for infinite.
    pub effect_duration_secs: i32,
    pub show_particles: bool,
}

impl Default for TrapOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            debug_mode: false,
            activation_range: 10.0,
            allow_instant: false,
            effect_duration_secs: -1,
            show_particles: false,
        }
    }
}

/// One configured trap.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrapDefinition {
    pub source_id: String,
    pub spawn_id: String,
    pub passenger_id: String,
    pub passenger_on_source: bool,
    pub invert_riding: bool,
    pub chance: f32,
    pub spawn_num: u32,
    pub effect_num: u32,
}

impl Default for TrapDefinition {
    fn default() -> Self {
        Self {
            source_id: String::new(),
            spawn_id: String::new(),
            passenger_id: String::new(),
            passenger_on_source: true,
            invert_riding: false,
            chance: 0.05,
            spawn_num: 3,
            effect_num: 0,
        }
    }
}

impl TrapDefinition {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_id: &str,
        spawn_id: &str,
        passenger_id: &str,
        passenger_on_source: bool,
        invert_riding: bool,
        chance: f32,
        spawn_num: u32,
        effect_num: u32,
    ) -> Self {
        Self {
            source_id: source_id.to_string(),
            spawn_id: spawn_id.to_string(),
            passenger_id: passenger_id.to_string(),
            passenger_on_source,
            invert_riding,
            chance,
            spawn_num,
            effect_num,
        }
    }
}

/// Built-in trap table used for a fresh config.
pub fn default_traps() -> Vec<TrapDefinition> {
    vec![
        TrapDefinition::new("pig", "pig", "zombified_piglin", true, false, 0.05, 3, 4),
        TrapDefinition::new("horse", "horse", "pillager", true, false, 0.05, 2, 0),
    ]
}

/// The whole config file. Trap order matters: the first trap matching a
/// creature kind wins.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrapConfig {
    #[serde(default)]
    pub options: TrapOptions,
    #[serde(default = "default_traps")]
    pub traps: Vec<TrapDefinition>,
}

impl Default for TrapConfig {
    fn default() -> Self {
        Self {
            options: TrapOptions::default(),
            traps: default_traps(),
        }
    }
}

impl TrapConfig {
    /// Validates all configuration parameters.
    ///
    /// # Validation Rules
    /// - Activation range within [1, 50] world units
    /// - Effect duration `-1` or within [0, 86400] seconds
    /// - Chance within [0.0, 1.0]
    /// - Spawn and effect counts at most 20
    pub fn validate(&self) -> anyhow::Result<()> {
        let options = &self.options;
        anyhow::ensure!(
            options.activation_range.is_finite()
                && (MIN_ACTIVATION_RANGE..=MAX_ACTIVATION_RANGE)
                    .contains(&options.activation_range),
            "Activation range must be in [{MIN_ACTIVATION_RANGE}, {MAX_ACTIVATION_RANGE}]"
        );
        anyhow::ensure!(
            (-1..=MAX_EFFECT_DURATION_SECS).contains(&options.effect_duration_secs),
            "Effect duration must be -1 or in [0, {MAX_EFFECT_DURATION_SECS}] seconds"
        );

        for (index, trap) in self.traps.iter().enumerate() {
            anyhow::ensure!(
                trap.chance.is_finite() && (0.0..=1.0).contains(&trap.chance),
                "Trap #{index} ({}): chance must be in [0.0, 1.0]",
                trap.source_id
            );
            anyhow::ensure!(
                trap.spawn_num <= MAX_SPAWN_NUM,
                "Trap #{index} ({}): spawn_num too large (max {MAX_SPAWN_NUM})",
                trap.source_id
            );
            anyhow::ensure!(
                trap.effect_num <= MAX_EFFECT_NUM,
                "Trap #{index} ({}): effect_num too large (max {MAX_EFFECT_NUM})",
                trap.source_id
            );
        }

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Stable hash of everything that affects trap behavior.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.options).as_bytes());
        for trap in &self.traps {
            hasher.update(format!("{trap:?}").as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}
