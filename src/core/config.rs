//! Engine configuration.
//!
//! - `TimingConfig`: reveal cadence and hold delays, in milliseconds
//! - `EngineConfig`: alphabet, timing, and optional RNG seed
//!
//! Both deserialize from JSON with every field optional; missing fields take
//! the defaults below.

use serde::{Deserialize, Serialize};

use super::symbol::Alphabet;
use crate::error::ConfigError;

/// Pacing constants for reveal playback and feedback holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Cadence between reveal starts. Symbol `i` lights at `(i + 1) * step`.
    pub step_interval_ms: u64,

    /// How long each revealed symbol stays lit.
    pub show_duration_ms: u64,

    /// Pad after the last hide before input is accepted.
    pub trailing_pad_ms: u64,

    /// How long a player tap stays lit.
    pub input_hold_ms: u64,

    /// How long correctness feedback stays raised.
    pub flash_hold_ms: u64,

    /// Delay between completing a round and the next reveal starting.
    pub next_round_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: 1200,
            show_duration_ms: 550,
            trailing_pad_ms: 200,
            input_hold_ms: 450,
            flash_hold_ms: 450,
            next_round_delay_ms: 1100,
        }
    }
}

impl TimingConfig {
    /// Total length of the reveal schedule for a sequence of `len` symbols.
    #[must_use]
    pub fn reveal_duration_ms(&self, len: usize) -> u64 {
        (len as u64)
            .saturating_mul(self.step_interval_ms)
            .saturating_add(self.show_duration_ms)
            .saturating_add(self.trailing_pad_ms)
    }

    /// Check that reveals are paced sensibly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_interval_ms == 0 {
            return Err(ConfigError::ZeroStepInterval);
        }
        if self.show_duration_ms >= self.step_interval_ms {
            return Err(ConfigError::OverlappingReveal {
                show_ms: self.show_duration_ms,
                step_ms: self.step_interval_ms,
            });
        }
        Ok(())
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Symbols the sequence is drawn from.
    pub alphabet: Alphabet,

    /// Pacing constants.
    pub timing: TimingConfig,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Use a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the timing constants.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Replace the alphabet.
    #[must_use]
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Validate the configuration.
    ///
    /// Alphabets validate themselves on construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()
    }
}
