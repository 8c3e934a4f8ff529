//! RTA for fully non-preemptive EDF scheduling (**NP-EDF**).

use super::{blocking_bound, bound_hep, search_space, total_rbf};
use crate::fixed_point;
use crate::task::Task;
use crate::time::{Duration, Instant};

/// The (L, SS, Fs, R) solution for one task under non-preemptive EDF
/// scheduling.
pub struct Solution {
    pub l: Option<Duration>,
    pub ss: Vec<Vec<Instant>>,
    pub fs: Vec<Vec<Duration>>,
    pub r: Option<Duration>,
}

/// Analyze `tsk` under non-preemptive EDF scheduling (§4.4–§4.7, EDF-NP
/// row).
#[allow(non_snake_case)]
pub fn analyze(tasks: &[Task], tsk: &Task) -> Solution {
    let blocking = blocking_bound(tasks, tsk);
    let tsk_cost_tail = tsk.wcet() - 1;

    let L = fixed_point::fixpoint(|delta| blocking + total_rbf(tasks, delta), 1);

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
                        let self_demand = (tsk.rbf(a + 1) as i128 - tsk_cost_tail as i128).max(0);
                        let rhs: i128 = blocking as i128
                            + self_demand
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
        Ok(max_f) => {
            let fs = results
                .into_iter()
                .map(|per_interferer| per_interferer.into_iter().map(Result::unwrap).collect())
                .collect();
            Solution {
                l: Some(l),
                ss,
                fs,
                r: Some(max_f + tsk_cost_tail),
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
