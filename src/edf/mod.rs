/*! Earliest-deadline-first (EDF) response-time analysis (§4.4–§4.7, EDF
rows).

Under EDF, priority is implicit in the deadline, so the
higher-or-equal-priority workload bound ([`bound_hep`]) is a
deadline-offset clamp rather than a priority filter, and the search space
is built per interferer rather than once for the analyzed task (§4.5).
*/

pub mod fully_preemptive;
pub mod non_preemptive;

use crate::demand::{Aggregate, RequestBound};
use crate::task::Task;
use crate::time::{Duration, Instant};

/// `total_rbf(Δ)`: the sum of every task's RBF, with no priority
/// filtering — under EDF, all tasks may interfere (§4.3, §4.4).
pub fn total_rbf(tasks: &[Task], delta: Duration) -> Duration {
    Aggregate::new(tasks.iter().collect()).service_needed(delta)
}

/// `bound_hep_edf(tsk, A, Δ)`: the sum, over every task other than
/// `tsk`, of `t.task_rbf(clamp(min(A + 1 + tsk.D - t.D, Δ), 0))` (§4.3).
///
/// A larger-deadline interferer contributes only while
/// `A + 1 + tsk.D - t.D` is still positive — i.e. only while some part of
/// its job, released before `tsk`'s absolute deadline, could still be
/// pending.
pub fn bound_hep(tasks: &[Task], tsk: &Task, a: Duration, delta: Duration) -> Duration {
    tasks
        .iter()
        .filter(|t| t.id() != tsk.id())
        .map(|t| {
            let raw = a as i128 + 1 + tsk.deadline() as i128 - t.deadline() as i128;
            let clamped = raw.min(delta as i128).max(0) as Duration;
            t.rbf(clamped)
        })
        .sum()
}

/// The EDF-non-preemptive blocking bound: the largest `C - 1` among
/// tasks with a strictly larger deadline than `tsk`, or 0 (§4.6).
pub fn blocking_bound(tasks: &[Task], tsk: &Task) -> Duration {
    tasks
        .iter()
        .filter(|t| t.deadline() > tsk.deadline())
        .map(|t| t.wcet() - 1)
        .max()
        .unwrap_or(0)
}

/// `offset_to_steps(tsk, tsko, offset)` (§4.5): the candidate offsets
/// contributed by interferer `tsko` releasing at `offset`, deadline-
/// shifted relative to `tsk`.
fn offset_to_steps(tsk: &Task, tsko: &Task, offset: Instant) -> Vec<Instant> {
    tsko.curve()
        .time_steps_with_offset(offset)
        .into_iter()
        .filter(|o| o + tsko.deadline() >= tsk.deadline())
        .map(|o| (o + tsko.deadline()).saturating_sub(tsk.deadline()).saturating_sub(1))
        .collect()
}

/// Find the largest `r` below which [`offset_to_steps`] (at `h * r`) is
/// empty, by binary search over `[0, r_max]`, stopping once the
/// remaining window is at most 10 steps wide (§4.5, §9 "Search-space
/// binary search edge" — the slack must be preserved exactly).
fn binary_search_boundary(
    tsk: &Task,
    tsko: &Task,
    h: Instant,
    r_max: u128,
) -> u128 {
    let mut lo = 0u128;
    let mut hi = r_max;
    while hi - lo > 10 {
        let mid = lo + (hi - lo) / 2;
        if offset_to_steps(tsk, tsko, h * mid).is_empty() {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

/// The per-interferer EDF search space contributed by `tsko` (§4.5):
/// candidates at multiples of `tsko`'s horizon, scanned linearly over
/// `[l, r_max)` after a binary search narrows the starting point.
pub fn interferer_search_space(tsk: &Task, tsko: &Task, l: Duration) -> Vec<Instant> {
    let h = tsko.curve().horizon();
    let r_max = (l + tsk.deadline().saturating_sub(tsko.deadline())) / h + 1;
    let lower = binary_search_boundary(tsk, tsko, h, r_max);

    let mut ss = Vec::new();
    let mut r = lower;
    while r < r_max {
        ss.extend(offset_to_steps(tsk, tsko, h * r));
        r += 1;
    }
    ss
}

/// The full EDF search space for `tsk` (§4.5): one list per interferer,
/// including `tsk` itself, in task-set order.
pub fn search_space(tasks: &[Task], tsk: &Task, l: Duration) -> Vec<Vec<Instant>> {
    tasks
        .iter()
        .map(|tsko| interferer_search_space(tsk, tsko, l))
        .collect()
}
