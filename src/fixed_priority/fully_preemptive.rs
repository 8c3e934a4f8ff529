//! RTA for fully preemptive fixed-priority scheduling (**FP-FP**).

use super::{search_space, total_ohep_rbf};
use crate::fixed_point;
use crate::task::Task;
use crate::time::{Duration, Instant};

/// The (L, SS, Fs, R) solution for one task under FP-FP scheduling.
pub struct Solution {
    pub l: Option<Duration>,
    pub ss: Vec<Instant>,
    pub fs: Vec<Duration>,
    pub r: Option<Duration>,
}

/// Analyze `tsk` under fully preemptive fixed-priority scheduling, given
/// the full task set it shares a processor with (§4.4–§4.7, FP-FP row).
///
/// There is no blocking under full preemption, so the busy-interval
/// fixpoint is just the higher-or-equal-priority workload, and the
/// per-offset recurrence has no blocking or cost-tail term.
#[allow(non_snake_case)]
pub fn analyze(tasks: &[Task], tsk: &Task) -> Solution {
    let L = fixed_point::fixpoint(|delta| super::total_hep_rbf(tasks, tsk, delta), 1);

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
                let rhs: i128 =
                    tsk.rbf(a + 1) as i128 + total_ohep_rbf(tasks, tsk, af) as i128 - a as i128;
                rhs.max(0) as Duration
            };
            fixed_point::fixpoint(psi_a, 1)
        })
        .collect();

    match fixed_point::max_of(results.iter().copied()) {
        Ok(r) => {
            let fs = results.into_iter().map(Result::unwrap).collect();
            Solution {
                l: Some(l),
                ss,
                fs,
                r: Some(r),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::ArrivalModel;

    fn periodic(id: u64, wcet: Duration, deadline: Duration, period: Duration, priority: u32) -> Task {
        Task::new(id, deadline, wcet, Some(priority), ArrivalModel::Periodic { period }).unwrap()
    }

    #[test]
    fn three_task_schedulable_set() {
        // FP-FP, schedulable (end-to-end scenario in §8)
        let tasks = vec![
            periodic(1, 1, 5, 5, 1),
            periodic(2, 2, 10, 10, 2),
            periodic(3, 3, 20, 20, 3),
        ];
        let sol1 = analyze(&tasks, &tasks[0]);
        assert_eq!(sol1.l, Some(1));
        assert_eq!(sol1.r, Some(1));

        let sol2 = analyze(&tasks, &tasks[1]);
        assert_eq!(sol2.l, Some(3));
        assert_eq!(sol2.r, Some(3));

        let sol3 = analyze(&tasks, &tasks[2]);
        assert_eq!(sol3.l, Some(7));
        assert_eq!(sol3.r, Some(7));
    }

    #[test]
    fn unbounded_utilization_yields_unbounded_l() {
        // two tasks each with utilization 0.6
        let tasks = vec![periodic(1, 6, 10, 10, 1), periodic(2, 6, 10, 10, 2)];
        let sol = analyze(&tasks, &tasks[1]);
        assert_eq!(sol.l, None);
        assert_eq!(sol.r, None);
    }

    #[test]
    fn all_f_values_are_nonnegative() {
        let tasks = vec![periodic(1, 1, 5, 5, 1), periodic(2, 2, 10, 10, 2)];
        let sol = analyze(&tasks, &tasks[1]);
        for f in sol.fs {
            assert!(f >= 0);
        }
    }
}
