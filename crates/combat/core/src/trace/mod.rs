//! Observation hooks for the tick pipeline.
//!
//! The pipeline reports every decision to a [`TraceSink`]. The plain tick
//! path passes [`NoTrace`], which drops everything; the debug path passes a
//! [`DebugRecorder`]. Both run the exact same phase code, and a sink only
//! ever receives owned records, so it cannot reach back into the state.
mod debug;

pub use debug::{
    DebugInfo, DebugRecorder, ResolutionSubstep, SubstepDetail, SubstepKind, TargetingDecision,
};

use crate::ai::RuleEvaluation;

/// Receives decision records from the tick pipeline.
///
/// All methods default to doing nothing.
pub trait TraceSink {
    /// One idle character went through rule evaluation.
    fn rule_evaluated(&mut self, _evaluation: RuleEvaluation) {}

    /// An action is resolving; reports how its targets were chosen.
    fn action_targeted(&mut self, _decision: TargetingDecision) {}

    /// A resolution substep finished.
    fn substep(&mut self, _substep: ResolutionSubstep) {}
}

/// Sink that discards every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn rule_evaluated(&mut self, evaluation: RuleEvaluation) {
        (**self).rule_evaluated(evaluation);
    }

    fn action_targeted(&mut self, decision: TargetingDecision) {
        (**self).action_targeted(decision);
    }

    fn substep(&mut self, substep: ResolutionSubstep) {
        (**self).substep(substep);
    }
}
