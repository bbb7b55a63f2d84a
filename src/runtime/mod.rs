//! Real-time driver.
//!
//! Runs a `GameEngine` on one tokio task. Commands from any number of
//! handles and the engine's own deadlines are processed strictly one at a
//! time, in arrival order, so the engine never needs a lock. The engine's
//! virtual clock is pinned to the task's start instant.
//!
//! ```no_run
//! # async fn demo() -> Result<(), recall_engine::error::RuntimeError> {
//! use recall_engine::engine::GameEngine;
//! use recall_engine::runtime;
//!
//! let handle = runtime::spawn(GameEngine::with_seed(1));
//! let mut events = handle.subscribe();
//! handle.start()?;
//! while let Ok(event) = events.recv().await {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::core::{GameState, Symbol};
use crate::engine::GameEngine;
use crate::error::RuntimeError;
use crate::events::EngineEvent;
use crate::schedule::Tick;

/// Broadcast buffer. Lagging subscribers lose the oldest events.
const EVENT_CHANNEL_BUFFER: usize = 256;

/// Messages handled by the driver task.
#[derive(Debug)]
enum Command {
    Start,
    Submit(Symbol),
    Snapshot(oneshot::Sender<GameState>),
    Shutdown,
}

/// Cloneable handle to a running engine.
#[derive(Clone, Debug)]
pub struct EngineHandle {
    commands: mpsc::UnboundedSender<Command>,
    events: broadcast::Sender<EngineEvent>,
}

/// Owner of the driver task; dropping it leaves the task running until every
/// handle is gone.
#[derive(Debug)]
pub struct EngineTask {
    handle: EngineHandle,
    join: JoinHandle<GameEngine>,
}

impl std::ops::Deref for EngineTask {
    type Target = EngineHandle;

    fn deref(&self) -> &EngineHandle {
        &self.handle
    }
}

impl EngineTask {
    /// A handle for another producer.
    #[must_use]
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    /// Stop the task and get the engine back.
    pub async fn shutdown(self) -> Result<GameEngine, RuntimeError> {
        // The task may already have stopped on its own
        let _ = self.handle.commands.send(Command::Shutdown);
        self.join.await.map_err(|_| RuntimeError::Closed)
    }
}

impl EngineHandle {
    /// Begin a new game.
    pub fn start(&self) -> Result<(), RuntimeError> {
        self.send(Command::Start)
    }

    /// Submit the player's next symbol.
    pub fn submit(&self, symbol: Symbol) -> Result<(), RuntimeError> {
        self.send(Command::Submit(symbol))
    }

    /// Current state, after every command sent before this call has run.
    pub async fn snapshot(&self) -> Result<GameState, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx))?;
        rx.await.map_err(|_| RuntimeError::Closed)
    }

    /// Receive every engine event from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    fn send(&self, command: Command) -> Result<(), RuntimeError> {
        self.commands.send(command).map_err(|_| RuntimeError::Closed)
    }
}

/// Move `engine` onto a new task.
///
/// Must be called inside a tokio runtime.
pub fn spawn(mut engine: GameEngine) -> EngineTask {
    let (commands, rx) = mpsc::unbounded_channel();
    let (events, _) = broadcast::channel(EVENT_CHANNEL_BUFFER);

    let forward = events.clone();
    engine.subscribe(move |event: &EngineEvent| {
        // No receivers is fine
        let _ = forward.send(event.clone());
    });

    let join = tokio::spawn(run(engine, rx));
    EngineTask {
        handle: EngineHandle { commands, events },
        join,
    }
}

async fn run(
    mut engine: GameEngine,
    mut commands: mpsc::UnboundedReceiver<Command>,
) -> GameEngine {
    let origin = Instant::now();
    let base = engine.now();
    let clock = move |origin: Instant| {
        base.after(Tick::from_duration(origin.elapsed()).as_millis())
    };

    tracing::debug!("engine task started");
    loop {
        let deadline = engine
            .next_deadline()
            .map(|at| origin + at.as_duration().saturating_sub(base.as_duration()));

        tokio::select! {
            biased;

            command = commands.recv() => {
                engine.advance_to(clock(origin));
                match command {
                    Some(Command::Start) => engine.start(),
                    Some(Command::Submit(symbol)) => engine.submit_input(symbol),
                    Some(Command::Snapshot(reply)) => {
                        let _ = reply.send(engine.snapshot());
                    }
                    Some(Command::Shutdown) | None => break,
                }
            }

            () = wait_for(deadline) => {
                engine.advance_to(clock(origin));
            }
        }
    }
    tracing::debug!("engine task stopped");
    engine
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
