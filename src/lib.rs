/*!
# POET analysis core

This crate computes worst-case response-time bounds for hard-real-time
task sets and renders them as machine-checkable Coq/Prosa certificates.

Given a [`problem::Problem`] — a scheduling policy, a preemption model,
and a validated task set — the [`analysis`] module dispatches each task
to the matching [`fixed_priority`] or [`edf`] analyzer, which computes a
maximum busy-interval bound, a search space of critical offsets, a
per-offset fixpoint solution, and a response-time bound. The
[`certificate`] module then renders those numbers into a deterministic
proof script an external checker can verify independently of this
crate's own arithmetic.

## Scope

This crate is a pure computation library: it does not read task-set
files, does not invoke a proof checker, and does not offer a CLI. Those
concerns belong to callers that embed this crate.
*/

pub mod analysis;
pub mod arrival;
pub mod certificate;
pub mod demand;
pub mod edf;
pub mod error;
pub mod fixed_point;
pub mod fixed_priority;
pub mod problem;
pub mod task;
pub mod time;
