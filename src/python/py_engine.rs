//! Engine bindings for Python.

use std::time::Duration;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{EngineConfig, FlashSignal, Symbol};
use crate::engine::GameEngine;
use crate::scores::{record_if_best, JsonlScoreStore};

/// Python wrapper for GameEngine.
///
/// The Python side owns the clock: call `advance(ms)` from its frame or
/// timer loop and read state back through the getters.
#[pyclass(name = "GameEngine")]
pub struct PyGameEngine {
    engine: GameEngine,
}

#[pymethods]
impl PyGameEngine {
    /// Create an engine.
    ///
    /// # Arguments
    /// - seed: RNG seed; omit for a random game
    /// - config_json: optional JSON configuration (see `EngineConfig`)
    #[new]
    #[pyo3(signature = (seed = None, config_json = None))]
    fn new(seed: Option<u64>, config_json: Option<&str>) -> PyResult<Self> {
        let mut config = match config_json {
            Some(json) => {
                EngineConfig::from_json(json).map_err(|e| PyValueError::new_err(e.to_string()))?
            }
            None => EngineConfig::new(),
        };
        if seed.is_some() {
            config.seed = seed;
        }
        let engine = GameEngine::new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { engine })
    }

    /// Begin a new game.
    fn start(&mut self) {
        self.engine.start();
    }

    /// Submit a symbol by index.
    fn submit(&mut self, symbol: u8) {
        self.engine.submit_input(Symbol::new(symbol));
    }

    /// Submit a symbol by label. Raises ValueError for unknown labels.
    fn submit_label(&mut self, label: &str) -> PyResult<()> {
        let symbol = self
            .engine
            .config()
            .alphabet
            .parse(label)
            .ok_or_else(|| PyValueError::new_err(format!("unknown symbol: {label}")))?;
        self.engine.submit_input(symbol);
        Ok(())
    }

    /// Let `ms` milliseconds pass.
    fn advance(&mut self, ms: u64) {
        self.engine.advance(Duration::from_millis(ms));
    }

    /// Milliseconds until the next scheduled timer, if any.
    fn time_to_next_event(&self) -> Option<u64> {
        let now = self.engine.now().as_millis();
        self.engine
            .next_deadline()
            .map(|at| at.as_millis().saturating_sub(now))
    }

    /// Offer the final score to a JSONL score file.
    ///
    /// Returns True if it was recorded as a new best. Does nothing and
    /// returns False while the game is still running.
    fn save_score(&self, path: &str) -> PyResult<bool> {
        let Some(score) = self.engine.final_score() else {
            return Ok(false);
        };
        let mut store =
            JsonlScoreStore::open(path).map_err(|e| PyValueError::new_err(e.to_string()))?;
        let outcome = record_if_best(&mut store, score, chrono::Utc::now())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(outcome.is_new_best())
    }

    /// "showing", "awaiting", or "over".
    #[getter]
    fn phase(&self) -> String {
        self.engine.phase().to_string()
    }

    #[getter]
    fn sequence(&self) -> Vec<u8> {
        self.engine.state().sequence.iter().map(|s| s.0).collect()
    }

    #[getter]
    fn player_input(&self) -> Vec<u8> {
        self.engine.state().player_input.iter().map(|s| s.0).collect()
    }

    #[getter]
    fn score(&self) -> usize {
        self.engine.score()
    }

    #[getter]
    fn level(&self) -> u32 {
        self.engine.level()
    }

    /// (token, symbol or None) for the engine playback slot.
    #[getter]
    fn shown(&self) -> (u64, Option<u8>) {
        let token = self.engine.engine_display();
        (token.id, token.symbol.map(|s| s.0))
    }

    /// (token, symbol or None) for the player tap slot.
    #[getter]
    fn tapped(&self) -> (u64, Option<u8>) {
        let token = self.engine.player_display();
        (token.id, token.symbol.map(|s| s.0))
    }

    /// "none", "correct", or "incorrect".
    #[getter]
    fn flash(&self) -> &'static str {
        match self.engine.flash() {
            FlashSignal::None => "none",
            FlashSignal::Correct => "correct",
            FlashSignal::Incorrect => "incorrect",
        }
    }

    #[getter]
    fn progress_text(&self) -> String {
        self.engine.progress_text()
    }

    #[getter]
    fn status_text(&self) -> &'static str {
        self.engine.status_text()
    }

    /// Labels of the alphabet, indexed by symbol.
    #[getter]
    fn labels(&self) -> Vec<String> {
        self.engine.config().alphabet.clone().into()
    }

    fn __repr__(&self) -> String {
        format!(
            "GameEngine(phase={}, level={}, score={}, progress={})",
            self.engine.phase(),
            self.engine.level(),
            self.engine.score(),
            self.engine.progress_text()
        )
    }
}
