//! RTA for fully non-preemptive fixed-priority scheduling (**FP-NP**).

use super::{blocking_bound, search_space, total_ohep_rbf};
use crate::fixed_point;
use crate::task::Task;
use crate::time::{Duration, Instant};

/// The (L, SS, Fs, R) solution for one task under FP-NP scheduling.
pub struct Solution {
    pub l: Option<Duration>,
    pub ss: Vec<Instant>,
    pub fs: Vec<Duration>,
    pub r: Option<Duration>,
}

/// Analyze `tsk` under non-preemptive fixed-priority scheduling, given
/// the full task set it shares a processor with.
///
/// The busy-interval fixpoint includes the precomputed blocking bound
/// (§4.4); the per-offset recurrence subtracts `C - 1` from the task's
/// own demand to avoid double-counting the non-preemptive tail that
/// response-time extraction (§4.7) adds back at the end.
#[allow(non_snake_case)]
pub fn analyze(tasks: &[Task], tsk: &Task) -> Solution {
    let blocking = blocking_bound(tasks, tsk);
    let tsk_cost_tail = tsk.wcet() - 1;

    let L = fixed_point::fixpoint(
        |delta| blocking + super::total_hep_rbf(tasks, tsk, delta),
        1,
    );

    let l = match L {
        Ok(l) => l,
        Err(fixed_point::Unbounded) => {
            return Solution {
                l: None,
                ss: Vec::new(),
                fs: Vec::new(),
                r: None,
            }
        }
    };

    let ss = search_space(tsk, l);
    let results: Vec<fixed_point::FixpointResult> = ss
        .iter()
        .map(|&a| {
            let psi_a = |f: Duration| {
                let af = a + f;
                let rhs: i128 = blocking as i128 + tsk.rbf(a + 1) as i128 - tsk_cost_tail as i128
                    + total_ohep_rbf(tasks, tsk, af) as i128
                    - a as i128;
                rhs.max(0) as Duration
            };
            fixed_point::fixpoint(psi_a, 1)
        })
        .collect();

    match fixed_point::max_of(results.iter().copied()) {
        Ok(max_f) => {
            let fs = results.into_iter().map(Result::unwrap).collect();
            Solution {
                l: Some(l),
                ss,
                fs,
                r: Some(response_time(max_f, tsk)),
            }
        }
        Err(fixed_point::Unbounded) => Solution {
            l: Some(l),
            ss,
            fs: Vec::new(),
            r: None,
        },
    }
}

/// `R = max(0, max Fs) + (C - 1)` (§4.7, non-preemptive).
fn response_time(max_f: Duration, tsk: &Task) -> Duration {
    max_f + (tsk.wcet() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::ArrivalModel;

    fn periodic(id: u64, wcet: Duration, deadline: Duration, period: Duration, priority: u32) -> Task {
        Task::new(id, deadline, wcet, Some(priority), ArrivalModel::Periodic { period }).unwrap()
    }

    #[test]
    fn unschedulable_by_blocking() {
        // FP-FP, unschedulable by blocking (end-to-end scenario in §8):
        // (id 1, C=1, D=T=5, prio=1), (id 2, C=10, D=T=50, prio=2), non-preemptive
        let tasks = vec![periodic(1, 1, 5, 5, 1), periodic(2, 10, 50, 50, 2)];
        let sol = analyze(&tasks, &tasks[0]);
        let r = sol.r.expect("task 1 should still converge to a (bad) bound");
        assert!(r >= 10, "expected R1 >= 10, got {r}");
        assert!(r > tasks[0].deadline());
    }
}
