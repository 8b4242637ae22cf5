//! Tick execution.
//!
//! The [`CombatEngine`] is the authoritative reducer for [`CombatState`]: it
//! takes a state by reference and returns a new one, never touching its
//! input. Each tick runs five strictly ordered phases:
//!
//! 1. Rule evaluation for idle characters (players, then enemies)
//! 2. Countdown of queued actions
//! 3. Simultaneous resolution of actions at zero
//! 4. Status effect processing
//! 5. Battle-end check (victory wins ties)
//!
//! The debug variant runs the same pipeline with a recording trace sink, so
//! its state and events are identical to the plain variant's by construction.
mod errors;
mod reducer;
mod resolve;
mod status;
mod tick;

pub use errors::{EngineError, TickPhase};

use crate::env::CombatEnv;
use crate::event::CombatEvent;
use crate::state::{Action, CombatState};
use crate::trace::{DebugInfo, DebugRecorder, NoTrace, TraceSink};

/// Result of a single tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickOutcome {
    /// The new state; structurally independent of the input.
    pub state: CombatState,
    /// Events of this tick, also appended to `state.event_log`.
    pub events: Vec<CombatEvent>,
    pub battle_ended: bool,
    /// Queued actions removed by interrupts or stuns this tick.
    pub cancelled_actions: Vec<Action>,
}

/// Result of a single tick executed with debug tracing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugTickOutcome {
    pub outcome: TickOutcome,
    pub debug_info: DebugInfo,
}

/// Combat engine bound to an environment (catalog + config).
#[derive(Clone, Copy, Debug, Default)]
pub struct CombatEngine<'a> {
    env: CombatEnv<'a>,
}

impl<'a> CombatEngine<'a> {
    pub fn new(env: CombatEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &CombatEnv<'a> {
        &self.env
    }

    /// Advances `state` by one tick.
    ///
    /// A battle that is already over comes back unchanged with no events.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownSkill` when a resolving action names a
    /// skill that cannot be found. The input state is untouched either way.
    pub fn execute_tick(&self, state: &CombatState) -> Result<TickOutcome, EngineError> {
        self.execute_traced(state, &mut NoTrace)
    }

    /// Advances `state` by one tick and records every decision.
    ///
    /// # Errors
    ///
    /// Same as [`CombatEngine::execute_tick`].
    pub fn execute_tick_with_debug(
        &self,
        state: &CombatState,
    ) -> Result<DebugTickOutcome, EngineError> {
        let mut recorder = DebugRecorder::new(state.tick.next());
        let outcome = self.execute_traced(state, &mut recorder)?;
        let mut debug_info = recorder.finish();
        if state.is_over() {
            debug_info.tick = state.tick;
        }
        Ok(DebugTickOutcome {
            outcome,
            debug_info,
        })
    }

    /// Advances `state` by one tick, reporting decisions to a custom sink.
    ///
    /// # Errors
    ///
    /// Same as [`CombatEngine::execute_tick`].
    pub fn execute_traced<S: TraceSink>(
        &self,
        state: &CombatState,
        sink: &mut S,
    ) -> Result<TickOutcome, EngineError> {
        tick::run_tick(state, &self.env, sink)
    }

    /// Runs ticks until the battle ends or `max_ticks` ticks have executed.
    ///
    /// # Errors
    ///
    /// Propagates the first tick error.
    pub fn run_battle(
        &self,
        state: CombatState,
        max_ticks: u32,
    ) -> Result<CombatState, EngineError> {
        let mut state = state;
        for _ in 0..max_ticks {
            if state.is_over() {
                return Ok(state);
            }
            state = self.execute_tick(&state)?.state;
        }

        if !state.is_over() {
            tracing::warn!(
                max_ticks,
                tick = state.tick.0,
                "battle still ongoing at tick cap"
            );
        }
        Ok(state)
    }

    /// Runs a battle with the configured tick cap.
    ///
    /// # Errors
    ///
    /// Propagates the first tick error.
    pub fn run(&self, state: CombatState) -> Result<CombatState, EngineError> {
        self.run_battle(state, self.env.config().max_ticks)
    }
}

/// Executes one tick with default configuration and no catalog.
///
/// # Errors
///
/// See [`CombatEngine::execute_tick`].
pub fn execute_tick(state: &CombatState) -> Result<TickOutcome, EngineError> {
    CombatEngine::default().execute_tick(state)
}

/// Executes one tick with debug tracing, default configuration, no catalog.
///
/// # Errors
///
/// See [`CombatEngine::execute_tick`].
pub fn execute_tick_with_debug(state: &CombatState) -> Result<DebugTickOutcome, EngineError> {
    CombatEngine::default().execute_tick_with_debug(state)
}

/// Runs a battle to completion or `max_ticks` (pass
/// [`CombatConfig::DEFAULT_MAX_TICKS`](crate::CombatConfig::DEFAULT_MAX_TICKS)
/// for the usual safeguard).
///
/// # Errors
///
/// See [`CombatEngine::run_battle`].
pub fn run_battle(state: CombatState, max_ticks: u32) -> Result<CombatState, EngineError> {
    CombatEngine::default().run_battle(state, max_ticks)
}
