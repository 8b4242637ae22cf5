//! Rule-driven decision making for idle characters.
//!
//! [`conditions`] evaluates single predicates; [`rules`] walks a character's
//! skills and picks the first rule that matches and finds targets.
pub mod conditions;
pub mod rules;

pub use conditions::{ConditionContext, ConditionReading, evaluate, inspect};
pub use rules::{
    ConditionCheck, RuleCheck, RuleEvaluation, RuleOutcome, SelectedRule, evaluate_rules,
};
