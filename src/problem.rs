/*! The [`Problem`] type: a scheduling policy, a preemption model, and a
validated task set (§3).

Construction performs exactly the cross-field checks the original
parser's `parse_task`/`ProblemInstance` constructor performed — unique
ids, and priority presence iff the policy is fixed-priority — but as an
explicit `Result`-returning constructor rather than assertions backed by
a global mutable parser-status string (§9, "Global mutable parser
state").
*/

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::TaskSetError;
use crate::task::Task;

/// The scheduling policy used to prioritize jobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulingPolicy {
    FixedPriority,
    EarliestDeadlineFirst,
}

/// The preemption model assumed by the analysis.
///
/// Limited-preemptive and floating non-preemptive-segment models are a
/// declared non-goal (§1) and have no variant here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreemptionModel {
    FullyPreemptive,
    NonPreemptive,
}

/// A validated task set together with the policy and preemption model it
/// is to be analyzed under.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "ProblemData", into = "ProblemData")]
pub struct Problem {
    policy: SchedulingPolicy,
    preemption: PreemptionModel,
    tasks: Vec<Task>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ProblemData {
    policy: SchedulingPolicy,
    preemption: PreemptionModel,
    tasks: Vec<Task>,
}

impl From<Problem> for ProblemData {
    fn from(p: Problem) -> Self {
        ProblemData {
            policy: p.policy,
            preemption: p.preemption,
            tasks: p.tasks,
        }
    }
}

impl TryFrom<ProblemData> for Problem {
    type Error = TaskSetError;

    fn try_from(d: ProblemData) -> Result<Self, Self::Error> {
        Problem::new(d.policy, d.preemption, d.tasks)
    }
}

impl Problem {
    /// Construct a new problem, validating that the task set is
    /// nonempty, has unique ids, and that every task's priority presence
    /// matches what `policy` requires (§3).
    pub fn new(
        policy: SchedulingPolicy,
        preemption: PreemptionModel,
        tasks: Vec<Task>,
    ) -> Result<Self, TaskSetError> {
        if tasks.is_empty() {
            return Err(TaskSetError::EmptyTaskSet);
        }

        let mut seen = HashSet::new();
        for task in &tasks {
            if !seen.insert(task.id()) {
                return Err(TaskSetError::DuplicateId { id: task.id() });
            }
            match (policy, task.priority()) {
                (SchedulingPolicy::FixedPriority, None) => {
                    return Err(TaskSetError::MissingPriority { id: task.id() })
                }
                (SchedulingPolicy::EarliestDeadlineFirst, Some(_)) => {
                    return Err(TaskSetError::UnexpectedPriority { id: task.id() })
                }
                _ => {}
            }
        }

        Ok(Problem {
            policy,
            preemption,
            tasks,
        })
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    pub fn preemption(&self) -> PreemptionModel {
        self.preemption
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The total utilization of the task set, the sum of each task's
    /// `n_last · C / h` (§8, property 10).
    pub fn total_utilization(&self) -> f64 {
        self.tasks.iter().map(Task::utilization).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::ArrivalModel;

    fn task(id: u64, priority: Option<u32>) -> Task {
        Task::new(id, 10, 1, priority, ArrivalModel::Periodic { period: 10 }).unwrap()
    }

    #[test]
    fn rejects_empty_task_set() {
        assert_eq!(
            Problem::new(SchedulingPolicy::EarliestDeadlineFirst, PreemptionModel::FullyPreemptive, vec![])
                .unwrap_err(),
            TaskSetError::EmptyTaskSet
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let tasks = vec![task(1, None), task(1, None)];
        assert_eq!(
            Problem::new(SchedulingPolicy::EarliestDeadlineFirst, PreemptionModel::FullyPreemptive, tasks)
                .unwrap_err(),
            TaskSetError::DuplicateId { id: 1 }
        );
    }

    #[test]
    fn fp_requires_priority() {
        let tasks = vec![task(1, None)];
        assert_eq!(
            Problem::new(SchedulingPolicy::FixedPriority, PreemptionModel::FullyPreemptive, tasks)
                .unwrap_err(),
            TaskSetError::MissingPriority { id: 1 }
        );
    }

    #[test]
    fn edf_forbids_priority() {
        let tasks = vec![task(1, Some(1))];
        assert_eq!(
            Problem::new(SchedulingPolicy::EarliestDeadlineFirst, PreemptionModel::FullyPreemptive, tasks)
                .unwrap_err(),
            TaskSetError::UnexpectedPriority { id: 1 }
        );
    }

    #[test]
    fn accepts_well_formed_fp_problem() {
        let tasks = vec![task(1, Some(1)), task(2, Some(2))];
        assert!(Problem::new(SchedulingPolicy::FixedPriority, PreemptionModel::FullyPreemptive, tasks).is_ok());
    }
}
