/*! The analysis driver (§4.9): per-task dispatch across the four
(policy, preemption) combinations, aggregated into an [`AnalysisResults`]
that reports overall schedulability.
*/

use crate::edf;
use crate::fixed_priority;
use crate::problem::{PreemptionModel, Problem, SchedulingPolicy};
use crate::task::Task;
use crate::time::{Duration, Instant};

/// The shape shared by a task's search space and its per-offset
/// solutions: a flat list under FP, or one list per interferer under
/// EDF (§3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shaped<T> {
    Flat(Vec<T>),
    PerInterferer(Vec<Vec<T>>),
}

impl<T> Shaped<T> {
    pub fn is_empty(&self) -> bool {
        match self {
            Shaped::Flat(v) => v.is_empty(),
            Shaped::PerInterferer(v) => v.iter().all(Vec::is_empty),
        }
    }
}

/// The full (L, SS, Fs, R) result for one task (§3).
///
/// `l` and `r` are `None` to represent the spec's `-1` "unbounded"/
/// "unschedulable" sentinel; everywhere else in this crate, `-1` would
/// have had to be smuggled through an unsigned integer, which is exactly
/// the kind of thing `Option` exists to avoid.
pub struct TaskAnalysisResults {
    pub l: Option<Duration>,
    pub ss: Shaped<Instant>,
    pub fs: Shaped<Duration>,
    pub r: Option<Duration>,
}

impl TaskAnalysisResults {
    /// §4.7: bounded if R > 0.
    pub fn is_bounded(&self) -> bool {
        matches!(self.r, Some(r) if r > 0)
    }

    /// §4.7: deadline-respected if additionally R <= D.
    pub fn is_deadline_respected(&self, task: &Task) -> bool {
        matches!(self.r, Some(r) if r > 0 && r <= task.deadline())
    }
}

/// Analyze one task against the rest of the task set under the given
/// policy and preemption model (§4.9).
pub fn analyze_task(tasks: &[Task], tsk: &Task, policy: SchedulingPolicy, preemption: PreemptionModel) -> TaskAnalysisResults {
    match (policy, preemption) {
        (SchedulingPolicy::FixedPriority, PreemptionModel::FullyPreemptive) => {
            let sol = fixed_priority::fully_preemptive::analyze(tasks, tsk);
            TaskAnalysisResults {
                l: sol.l,
                ss: Shaped::Flat(sol.ss),
                fs: Shaped::Flat(sol.fs),
                r: sol.r,
            }
        }
        (SchedulingPolicy::FixedPriority, PreemptionModel::NonPreemptive) => {
            let sol = fixed_priority::non_preemptive::analyze(tasks, tsk);
            TaskAnalysisResults {
                l: sol.l,
                ss: Shaped::Flat(sol.ss),
                fs: Shaped::Flat(sol.fs),
                r: sol.r,
            }
        }
        (SchedulingPolicy::EarliestDeadlineFirst, PreemptionModel::FullyPreemptive) => {
            let sol = edf::fully_preemptive::analyze(tasks, tsk);
            TaskAnalysisResults {
                l: sol.l,
                ss: Shaped::PerInterferer(sol.ss),
                fs: Shaped::PerInterferer(sol.fs),
                r: sol.r,
            }
        }
        (SchedulingPolicy::EarliestDeadlineFirst, PreemptionModel::NonPreemptive) => {
            let sol = edf::non_preemptive::analyze(tasks, tsk);
            TaskAnalysisResults {
                l: sol.l,
                ss: Shaped::PerInterferer(sol.ss),
                fs: Shaped::PerInterferer(sol.fs),
                r: sol.r,
            }
        }
    }
}

/// The per-task results of analyzing an entire [`Problem`], plus the
/// schedulability predicates the driver reports (§4.9).
pub struct AnalysisResults<'a> {
    problem: &'a Problem,
    results: Vec<TaskAnalysisResults>,
}

impl<'a> AnalysisResults<'a> {
    /// Analyze every task in `problem` against the rest of the task set.
    pub fn analyze(problem: &'a Problem) -> Self {
        let tasks = problem.tasks();
        let results = tasks
            .iter()
            .map(|tsk| analyze_task(tasks, tsk, problem.policy(), problem.preemption()))
            .collect();
        AnalysisResults { problem, results }
    }

    pub fn problem(&self) -> &Problem {
        self.problem
    }

    /// The per-task results, in the same order as `problem.tasks()`.
    pub fn results(&self) -> &[TaskAnalysisResults] {
        &self.results
    }

    /// The analysis result for the task at the given index, if any.
    pub fn for_task(&self, index: usize) -> Option<(&Task, &TaskAnalysisResults)> {
        self.problem.tasks().get(index).zip(self.results.get(index))
    }

    /// True iff every task's response time is bounded (§4.9).
    pub fn response_time_is_bounded(&self) -> bool {
        self.results.iter().all(TaskAnalysisResults::is_bounded)
    }

    /// True iff every task's response time is bounded and within its
    /// deadline (§4.9).
    pub fn all_deadlines_respected(&self) -> bool {
        self.problem
            .tasks()
            .iter()
            .zip(self.results.iter())
            .all(|(task, result)| result.is_deadline_respected(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Problem;
    use crate::task::ArrivalModel;

    fn periodic(id: u64, wcet: Duration, deadline: Duration, period: Duration, priority: Option<u32>) -> Task {
        Task::new(id, deadline, wcet, priority, ArrivalModel::Periodic { period }).unwrap()
    }

    #[test]
    fn fp_fp_schedulable_end_to_end() {
        let tasks = vec![
            periodic(1, 1, 5, 5, Some(1)),
            periodic(2, 2, 10, 10, Some(2)),
            periodic(3, 3, 20, 20, Some(3)),
        ];
        let problem = Problem::new(
            SchedulingPolicy::FixedPriority,
            PreemptionModel::FullyPreemptive,
            tasks,
        )
        .unwrap();
        let results = AnalysisResults::analyze(&problem);
        assert!(results.all_deadlines_respected());
        assert!(results.response_time_is_bounded());

        let (_, r1) = results.for_task(0).unwrap();
        assert_eq!(r1.l, Some(1));
        assert_eq!(r1.r, Some(1));
    }

    #[test]
    fn unbounded_utilization_breaks_schedulability() {
        let tasks = vec![
            periodic(1, 6, 10, 10, Some(1)),
            periodic(2, 6, 10, 10, Some(2)),
        ];
        let problem = Problem::new(
            SchedulingPolicy::FixedPriority,
            PreemptionModel::FullyPreemptive,
            tasks,
        )
        .unwrap();
        let results = AnalysisResults::analyze(&problem);
        assert!(!results.response_time_is_bounded());
        assert!(!results.all_deadlines_respected());
    }

    #[test]
    fn unschedulable_results_have_empty_search_space_and_negative_r() {
        // invariant from §3: if L <= 0 then SS, Fs empty and R = -1
        let tasks = vec![
            periodic(1, 6, 10, 10, Some(1)),
            periodic(2, 6, 10, 10, Some(2)),
        ];
        let results = analyze_task(&tasks, &tasks[1], SchedulingPolicy::FixedPriority, PreemptionModel::FullyPreemptive);
        assert_eq!(results.l, None);
        assert_eq!(results.r, None);
        assert!(results.ss.is_empty());
        assert!(results.fs.is_empty());
    }

    #[test]
    fn edf_fp_periodic_end_to_end() {
        let tasks = vec![
            periodic(1, 2, 10, 10, None),
            periodic(2, 3, 15, 15, None),
        ];
        let problem = Problem::new(
            SchedulingPolicy::EarliestDeadlineFirst,
            PreemptionModel::FullyPreemptive,
            tasks,
        )
        .unwrap();
        let results = AnalysisResults::analyze(&problem);
        let (_, r1) = results.for_task(0).unwrap();
        let (_, r2) = results.for_task(1).unwrap();
        assert!(r1.r.unwrap() <= 10);
        assert!(r2.r.unwrap() <= 15);
    }
}
