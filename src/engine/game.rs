//! The sequence-memory state machine.

use std::time::Duration;

use crate::core::{
    DisplayToken, EngineConfig, FlashSignal, GameRng, GameState, RoundPhase, Symbol,
};
use crate::error::ConfigError;
use crate::events::{
    EngineEvent, EventBatch, Feedback, FeedbackSink, Observer, ObserverRegistry, SubscriptionId,
};
use crate::schedule::{Generation, ScheduledEvent, Tick, TimedAction, Timeline};

use super::views;

/// Sequence-memory game engine.
///
/// Driven by two inputs: player submissions (`submit_input`) and the passage
/// of time (`advance` / `advance_to`). All mutation happens inside those calls
/// and `start`, on the caller's thread. Observers hear about every change
/// after it is complete.
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use recall_engine::core::{EngineConfig, RoundPhase};
/// use recall_engine::engine::GameEngine;
///
/// let mut engine = GameEngine::new(EngineConfig::new().with_seed(42)).unwrap();
/// engine.start();
/// assert_eq!(engine.phase(), RoundPhase::Showing);
///
/// // Let the one-symbol reveal play out
/// engine.advance(Duration::from_secs(2));
/// assert_eq!(engine.phase(), RoundPhase::Awaiting);
///
/// let answer = engine.state().sequence[0];
/// engine.submit_input(answer);
/// assert_eq!(engine.score(), 1);
/// ```
pub struct GameEngine {
    config: EngineConfig,
    state: GameState,
    rng: GameRng,
    timeline: Timeline,

    /// Sub-millisecond time handed to `advance` but not yet on the clock.
    carry: Duration,

    /// Current reveal schedule.
    generation: Generation,

    /// Last identity token handed out to either display slot.
    last_token: u64,

    /// Bumped on every flash change; `ClearFlash` only clears its own.
    flash_serial: u64,

    observers: ObserverRegistry,
    feedback: Option<Box<dyn FeedbackSink>>,
    pending: EventBatch,
}

impl GameEngine {
    /// Create an engine. Nothing happens until `start`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Ok(Self::assemble(config, rng))
    }

    /// Create an engine with default settings and a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::assemble(EngineConfig::new().with_seed(seed), GameRng::new(seed))
    }

    fn assemble(config: EngineConfig, rng: GameRng) -> Self {
        Self {
            config,
            state: GameState::new(),
            rng,
            timeline: Timeline::new(),
            carry: Duration::ZERO,
            generation: Generation::default(),
            last_token: 0,
            flash_serial: 0,
            observers: ObserverRegistry::new(),
            feedback: None,
            pending: EventBatch::new(),
        }
    }

    // === Collaborators ===

    /// Subscribe to state-change notifications.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Stop notifying an observer.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Install the feedback sink, replacing any previous one.
    pub fn set_feedback_sink(&mut self, sink: impl FeedbackSink + 'static) {
        self.feedback = Some(Box::new(sink));
    }

    // === Commands ===

    /// Begin a new game.
    ///
    /// Callable at any time. Resets the sequence, progress, score, flash, and
    /// both displays, then starts round 1. Anything still scheduled from an
    /// earlier game becomes stale.
    pub fn start(&mut self) {
        self.state.sequence.clear();
        self.state.player_input.clear();
        self.state.level = 1;
        self.state.last_correct_length = 0;

        tracing::debug!(seed = self.rng.seed(), "game started");
        self.begin_round();
        self.flush();
    }

    /// Submit the player's next symbol.
    ///
    /// Ignored unless the engine is awaiting input for an unfinished round.
    pub fn submit_input(&mut self, symbol: Symbol) {
        if self.state.phase != RoundPhase::Awaiting || self.state.input_complete() {
            tracing::trace!(%symbol, phase = %self.state.phase, "input ignored");
            return;
        }

        let token = self.set_player_display(Some(symbol));
        self.timeline.schedule_after(
            self.config.timing.input_hold_ms,
            self.generation,
            TimedAction::ReleaseInput { token },
        );

        self.state.player_input.push_back(symbol);
        let index = self.state.player_input.len() - 1;
        let correct = self.state.sequence.get(index) == Some(&symbol);
        self.pending.push(EngineEvent::InputRecorded {
            index,
            symbol,
            correct,
        });

        if !correct {
            self.raise_flash(FlashSignal::Incorrect);
            self.set_phase(RoundPhase::Over);
            let score = self.state.last_correct_length;
            self.pending.push(EngineEvent::GameOver { score });
            tracing::info!(score, level = self.state.level, index, "game over");
            self.flush();
            return;
        }

        self.raise_flash(FlashSignal::Correct);

        if self.state.input_complete() {
            let length = self.state.sequence.len();
            self.state.last_correct_length = length;
            self.state.level += 1;
            self.pending.push(EngineEvent::RoundCompleted {
                length,
                next_level: self.state.level,
            });
            self.timeline.schedule_after(
                self.config.timing.next_round_delay_ms,
                self.generation,
                TimedAction::AdvanceRound,
            );
            tracing::debug!(length, "round completed");
        }

        self.flush();
    }

    // === Time ===

    /// Let `elapsed` pass, firing everything that comes due.
    ///
    /// The clock counts whole milliseconds. Any remainder is kept and added
    /// to the next call, so many small steps add up to real time.
    pub fn advance(&mut self, elapsed: Duration) {
        let total = self.carry.saturating_add(elapsed);
        let whole = Tick::from_duration(total);
        self.carry = total.saturating_sub(whole.as_duration());
        self.advance_to(self.timeline.now().after(whole.as_millis()));
    }

    /// Move the clock to `target`, firing everything due on the way in
    /// deadline order. A target in the past fires nothing.
    pub fn advance_to(&mut self, target: Tick) {
        while let Some(entry) = self.timeline.pop_due(target) {
            self.fire(entry);
            self.flush();
        }
        self.timeline.settle(target);
    }

    /// Current engine clock reading.
    #[must_use]
    pub fn now(&self) -> Tick {
        self.timeline.now()
    }

    /// Earliest pending deadline, stale entries included.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Tick> {
        self.timeline.next_deadline()
    }

    // === Observation ===

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Cheap copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    #[must_use]
    pub fn sequence_len(&self) -> usize {
        self.state.sequence.len()
    }

    #[must_use]
    pub fn input_len(&self) -> usize {
        self.state.player_input.len()
    }

    /// Length of the last fully reproduced sequence.
    #[must_use]
    pub fn score(&self) -> usize {
        self.state.last_correct_length
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.state.level
    }

    #[must_use]
    pub fn engine_display(&self) -> DisplayToken {
        self.state.engine_display
    }

    #[must_use]
    pub fn player_display(&self) -> DisplayToken {
        self.state.player_display
    }

    #[must_use]
    pub fn flash(&self) -> FlashSignal {
        self.state.flash
    }

    /// The score to report to a score store, once the game is over.
    #[must_use]
    pub fn final_score(&self) -> Option<usize> {
        (self.state.phase == RoundPhase::Over).then_some(self.state.last_correct_length)
    }

    /// Generation of the current reveal schedule.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// `"shown/total"` while showing, `"entered/total"` otherwise.
    #[must_use]
    pub fn progress_text(&self) -> String {
        views::progress_text(&self.state)
    }

    /// Player-facing status line for the current phase.
    #[must_use]
    pub fn status_text(&self) -> &'static str {
        views::status_text(self.state.phase)
    }

    // === Rounds ===

    /// Append a fresh symbol and replay the whole sequence.
    fn begin_round(&mut self) {
        let symbol = self.rng.draw_symbol(&self.config.alphabet);
        self.state.sequence.push_back(symbol);
        self.pending.push(EngineEvent::SequenceExtended {
            length: self.state.sequence.len(),
            symbol,
        });
        self.show_sequence();
    }

    /// Start a new reveal schedule for the full sequence.
    ///
    /// Bumping the generation here is what invalidates every round-bound
    /// entry scheduled before.
    fn show_sequence(&mut self) {
        self.generation = self.generation.next();

        self.set_phase(RoundPhase::Showing);
        self.state.player_input.clear();
        self.state.shown_count = 0;
        self.set_flash(FlashSignal::None);
        self.set_engine_display(None);
        self.set_player_display(None);

        let timing = self.config.timing;
        let len = self.state.sequence.len();
        for index in 0..len {
            let start = (index as u64 + 1).saturating_mul(timing.step_interval_ms);
            self.timeline
                .schedule_after(start, self.generation, TimedAction::Reveal { index });
            self.timeline.schedule_after(
                start.saturating_add(timing.show_duration_ms),
                self.generation,
                TimedAction::Conceal,
            );
        }
        self.timeline.schedule_after(
            timing.reveal_duration_ms(len),
            self.generation,
            TimedAction::FinishReveal,
        );

        tracing::debug!(
            generation = self.generation.0,
            length = len,
            level = self.state.level,
            "reveal scheduled"
        );
    }

    fn fire(&mut self, entry: ScheduledEvent) {
        if entry.action.is_round_bound() && entry.generation != self.generation {
            tracing::trace!(
                action = ?entry.action,
                stale = entry.generation.0,
                current = self.generation.0,
                "stale timer ignored"
            );
            return;
        }

        match entry.action {
            TimedAction::Reveal { index } => {
                if let Some(&symbol) = self.state.sequence.get(index) {
                    self.set_engine_display(Some(symbol));
                    self.state.shown_count = index + 1;
                    self.pending.push(EngineEvent::RevealProgressed {
                        shown: self.state.shown_count,
                        total: self.state.sequence.len(),
                    });
                }
            }
            TimedAction::Conceal => {
                self.set_engine_display(None);
            }
            TimedAction::FinishReveal => {
                self.set_engine_display(None);
                self.set_phase(RoundPhase::Awaiting);
            }
            TimedAction::ReleaseInput { token } => {
                // Clears in every phase, Over included
                if self.state.player_display.id == token {
                    self.set_player_display(None);
                }
            }
            TimedAction::ClearFlash { serial } => {
                if self.flash_serial == serial {
                    self.set_flash(FlashSignal::None);
                }
            }
            TimedAction::AdvanceRound => {
                self.begin_round();
            }
        }
    }

    // === State setters (each records its event) ===

    fn set_phase(&mut self, phase: RoundPhase) {
        self.state.phase = phase;
        self.pending.push(EngineEvent::PhaseChanged(phase));
    }

    fn next_token(&mut self) -> u64 {
        self.last_token += 1;
        self.last_token
    }

    fn set_engine_display(&mut self, symbol: Option<Symbol>) -> u64 {
        let token = DisplayToken::new(self.next_token(), symbol);
        self.state.engine_display = token;
        self.pending.push(EngineEvent::EngineDisplayChanged(token));
        token.id
    }

    fn set_player_display(&mut self, symbol: Option<Symbol>) -> u64 {
        let token = DisplayToken::new(self.next_token(), symbol);
        self.state.player_display = token;
        self.pending.push(EngineEvent::PlayerDisplayChanged(token));
        token.id
    }

    fn set_flash(&mut self, flash: FlashSignal) -> u64 {
        self.flash_serial += 1;
        if self.state.flash != flash {
            self.state.flash = flash;
            self.pending.push(EngineEvent::FlashChanged(flash));
        }
        self.flash_serial
    }

    /// Raise correctness feedback, signal the sink, and schedule the clear.
    fn raise_flash(&mut self, flash: FlashSignal) {
        let serial = self.set_flash(flash);
        self.timeline.schedule_after(
            self.config.timing.flash_hold_ms,
            self.generation,
            TimedAction::ClearFlash { serial },
        );

        let feedback = match flash {
            FlashSignal::Incorrect => Feedback::Failure,
            _ => Feedback::Success,
        };
        if let Some(sink) = self.feedback.as_mut() {
            sink.feedback(feedback);
        }
    }

    /// Deliver everything recorded since the last flush.
    fn flush(&mut self) {
        let batch = std::mem::take(&mut self.pending);
        for event in &batch {
            tracing::trace!(kind = event.kind(), "engine event");
            self.observers.dispatch(event);
        }
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("now", &self.timeline.now())
            .field("pending_timers", &self.timeline.len())
            .field("observers", &self.observers)
            .finish()
    }
}
