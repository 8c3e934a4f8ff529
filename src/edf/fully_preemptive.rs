//! RTA for fully preemptive EDF scheduling (**EDF-FP**).

use super::{bound_hep, search_space, total_rbf};
use crate::fixed_point;
use crate::task::Task;
use crate::time::{Duration, Instant};

/// The (L, SS, Fs, R) solution for one task under fully preemptive EDF
/// scheduling. `ss`/`fs` carry one entry per interferer, in task-set
/// order (§3, §4.5).
pub struct Solution {
    pub l: Option<Duration>,
    pub ss: Vec<Vec<Instant>>,
    pub fs: Vec<Vec<Duration>>,
    pub r: Option<Duration>,
}

/// Analyze `tsk` under fully preemptive EDF scheduling (§4.4–§4.7,
/// EDF-FP row).
#[allow(non_snake_case)]
pub fn analyze(tasks: &[Task], tsk: &Task) -> Solution {
    let L = fixed_point::fixpoint(|delta| total_rbf(tasks, delta), 1);

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

    let ss = search_space(tasks, tsk, l);
    let results: Vec<Vec<fixed_point::FixpointResult>> = ss
        .iter()
        .map(|offsets| {
            offsets
                .iter()
                .map(|&a| {
                    let psi_a = |f: Duration| {
                        let af = a + f;
                        let rhs: i128 = tsk.rbf(a + 1) as i128
                            + bound_hep(tasks, tsk, a, af) as i128
                            - a as i128;
                        rhs.max(0) as Duration
                    };
                    fixed_point::fixpoint(psi_a, 1)
                })
                .collect()
        })
        .collect();

    match fixed_point::max_of(results.iter().flatten().copied()) {
        Ok(r) => {
            let fs = results
                .into_iter()
                .map(|per_interferer| per_interferer.into_iter().map(Result::unwrap).collect())
                .collect();
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

    fn periodic(id: u64, wcet: Duration, deadline: Duration, period: Duration) -> Task {
        Task::new(id, deadline, wcet, None, ArrivalModel::Periodic { period }).unwrap()
    }

    #[test]
    fn two_periodic_tasks_meet_their_deadlines() {
        // EDF-FP, periodic (end-to-end scenario in §8)
        let tasks = vec![periodic(1, 2, 10, 10), periodic(2, 3, 15, 15)];
        let sol1 = analyze(&tasks, &tasks[0]);
        let sol2 = analyze(&tasks, &tasks[1]);
        assert!(sol1.r.unwrap() <= 10);
        assert!(sol2.r.unwrap() <= 15);
    }

    #[test]
    fn single_step_curve_matches_periodic_task() {
        use crate::arrival::ArrivalCurve;
        let periodic_task = periodic(1, 1, 10, 10);
        let curve_task = Task::new(
            1,
            10,
            1,
            None,
            ArrivalModel::ArrivalCurveModel(ArrivalCurve::single_step(10).unwrap()),
        )
        .unwrap();
        let others = vec![periodic(2, 1, 20, 20)];

        let mut with_periodic = others.clone();
        with_periodic.insert(0, periodic_task.clone());
        let mut with_curve = others;
        with_curve.insert(0, curve_task.clone());

        let r_periodic = analyze(&with_periodic, &with_periodic[0]).r;
        let r_curve = analyze(&with_curve, &with_curve[0]).r;
        assert_eq!(r_periodic, r_curve);
        assert_eq!(r_curve, Some(1));
    }
}
