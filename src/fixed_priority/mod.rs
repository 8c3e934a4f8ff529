/*! Fixed-priority (FP) response-time analysis (§4.4–§4.7, FP rows).

Both the fully-preemptive and non-preemptive variants share the same
higher-or-equal-priority workload aggregation and the same search-space
construction; only the per-offset recurrence ψ_A and the blocking-bound
precomputation differ, so those two pieces live in
[`fully_preemptive`]/[`non_preemptive`] while everything else lives here.
*/

pub mod fully_preemptive;
pub mod non_preemptive;

use crate::demand::{Aggregate, RequestBound};
use crate::task::Task;
use crate::time::{Duration, Instant};

/// `total_hep_rbf_fp(tsk, Δ)`: the sum of `task_rbf(Δ)` over every task
/// with priority `<= tsk`'s (higher-or-equal priority, ties included,
/// tsk itself included) (§4.3).
pub fn total_hep_rbf(tasks: &[Task], tsk: &Task, delta: Duration) -> Duration {
    let tsk_priority = tsk.priority().expect("FP task must have a priority");
    let hep: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.priority().expect("FP task must have a priority") <= tsk_priority)
        .collect();
    Aggregate::new(hep).service_needed(delta)
}

/// `total_ohep_rbf_fp(tsk, Δ) = total_hep_rbf_fp(tsk, Δ) − tsk.task_rbf(Δ)`
/// (§4.3): the workload of every *other* higher-or-equal-priority task.
pub fn total_ohep_rbf(tasks: &[Task], tsk: &Task, delta: Duration) -> Duration {
    total_hep_rbf(tasks, tsk, delta) - tsk.rbf(delta)
}

/// The FP-non-preemptive blocking bound: the largest `C − 1` among tasks
/// of strictly lower priority than `tsk`, or 0 if there are none (§4.6).
/// The comparator is strict `>`, deliberately distinct from the `<=` used
/// by `total_hep_rbf` (§9, "the FP priority comparator is inconsistent").
pub fn blocking_bound(tasks: &[Task], tsk: &Task) -> Duration {
    let tsk_priority = tsk.priority().expect("FP task must have a priority");
    tasks
        .iter()
        .filter(|t| t.priority().expect("FP task must have a priority") > tsk_priority)
        .map(|t| t.wcet() - 1)
        .max()
        .unwrap_or(0)
}

/// The FP search space (§4.5): for the analyzed task only, the offsets
/// `max(0, o - 1)` for every `o` in `time_steps_with_offset(h * r)`, for
/// `r` from 0 up to `L / h`.
///
/// Deliberately not deduplicated: §4.5 only requires the set of
/// candidates to be a superset of the exact search space, since §4.6
/// computes F at every candidate and takes the maximum.
pub fn search_space(tsk: &Task, l: Duration) -> Vec<Instant> {
    let h = tsk.curve().horizon();
    let max_r = l / h;
    let mut ss = Vec::new();
    for r in 0..=max_r {
        for o in tsk.curve().time_steps_with_offset(h * r) {
            ss.push(o.saturating_sub(1));
        }
    }
    ss
}
