//! Temporal-coherence analysis passes run between the broad phase and the
//! constraint solver.
//!
//! The passes must run in this order within one tick, because each one
//! consumes state written by the previous one:
//!
//! * [`CoherenceAnalyzer::analyze()`] right after the broad phase: stamps
//!   the reported edges, applies the cheap pruning/coherence rules, and
//!   flags the pairs whose narrow-phase results can be reused.
//! * (external narrow phase and contact determination)
//! * [`CoherenceAnalyzer::classify()`] right after contact determination:
//!   classifies each surviving pair against the collision envelope.
//! * [`CoherenceAnalyzer::build_groups()`]: partitions bodies, contacts,
//!   and joints into independent simulation groups.
//!
//! Everything here is single-threaded and runs to completion: the analyzer
//! is the only writer of the coherence fields during its pass.

pub use self::analyzer::{CoherenceAnalyzer, ABSOLUTE_REST_TOLERANCE};
pub use self::groups::{ContactGroup, GroupContact};
pub use self::params::{AnalyzerParams, InvalidParams};

mod analyzer;
mod classify;
mod groups;
mod params;
