//! Error types for the parts of the analysis core that can fail.
//!
//! Each concern gets its own small `thiserror`-derived enum, following the
//! same pattern as [`crate::fixed_point::SearchFailure`]: a `Copy`-able (or
//! cheaply cloneable) enum that carries the offending values so a caller can
//! format a message without re-deriving context.

use thiserror::Error;

use crate::time::{Duration, Instant};

/// An [`crate::arrival::ArrivalCurve`] failed one of its construction-time
/// invariants (§3 of the specification this crate implements).
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum InvalidArrivalCurve {
    /// A curve must declare at least one step.
    #[error("arrival curve must declare at least one step")]
    NoSteps,

    /// The first step must occur at offset 1 (a window of size 1 must
    /// always be declared).
    #[error("first step must occur at offset 1, got {0}")]
    FirstStepNotAtOne(Instant),

    /// The first step's job count must be positive.
    #[error("first step's job count must be at least 1, got {0}")]
    FirstStepNotPositive(u128),

    /// Steps must be strictly increasing in both the offset and the job
    /// count.
    #[error("steps are not strictly monotonic at index {index}: ({t0}, {n0}) -> ({t1}, {n1})")]
    NotStrictlyMonotonic {
        index: usize,
        t0: Instant,
        n0: u128,
        t1: Instant,
        n1: u128,
    },

    /// Every step must occur strictly before the horizon.
    #[error("last step at offset {step} is not strictly before horizon {horizon}")]
    StepNotBeforeHorizon { step: Instant, horizon: Instant },
}

/// A [`crate::task::Task`] or [`crate::problem::Problem`] failed one of its
/// construction-time invariants.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum TaskSetError {
    /// The arrival curve backing a task's arrival model was invalid.
    #[error("task {id}: invalid arrival curve: {source}")]
    Curve {
        id: u64,
        #[source]
        source: InvalidArrivalCurve,
    },

    /// A task's deadline must be positive.
    #[error("task {id}: deadline must be positive, got {deadline}")]
    NonPositiveDeadline { id: u64, deadline: Duration },

    /// A task's WCET must be positive.
    #[error("task {id}: worst-case execution time must be positive, got {wcet}")]
    NonPositiveWcet { id: u64, wcet: Duration },

    /// A fixed-priority task set requires every task to declare a priority.
    #[error("task {id}: missing priority, required under fixed-priority scheduling")]
    MissingPriority { id: u64 },

    /// An EDF task set forbids priorities, since priority is implicit in
    /// the deadline.
    #[error("task {id}: priority given, but EDF assigns priority via deadline")]
    UnexpectedPriority { id: u64 },

    /// Task ids must be unique within a problem.
    #[error("duplicate task id {id}")]
    DuplicateId { id: u64 },

    /// A problem must contain at least one task.
    #[error("task set must not be empty")]
    EmptyTaskSet,
}

/// An error produced while serializing a certificate.
///
/// The emitter's only fallible boundary is the `impl std::io::Write` it is
/// handed; retry policy (and everything else about what to do with a
/// write failure) is the out-of-scope CLI driver's concern (§7).
#[derive(Debug, Error)]
pub enum EmitterError {
    #[error("failed to write certificate: {0}")]
    Io(#[from] std::io::Error),

    /// The certificate template did not contain a wildcard this emitter
    /// tried to substitute. Indicates a template/wildcard-alphabet
    /// mismatch, not a data error.
    #[error("template is missing expected wildcard {0}")]
    MissingWildcard(&'static str),
}
