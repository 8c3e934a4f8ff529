/*! The [`Task`] type and its arrival model (§3).

A task is characterized by a deadline, a WCET, an optional priority
(present only under fixed-priority scheduling), and one of three arrival
models. Periodic and sporadic tasks are normalized to a single-step
[`ArrivalCurve`] at construction time, so that every downstream RBF
computation (§4.3) only ever has to know about curves — the distinction
between a periodic task and an explicit arrival curve only resurfaces at
the certificate emitter, which needs the original variant to pick the
right Coq record shape (§4.8, §9 "Arrival model union").
*/

use serde::{Deserialize, Serialize};

use crate::arrival::ArrivalCurve;
use crate::demand::RequestBound;
use crate::error::TaskSetError;
use crate::time::Duration;

/// The arrival process governing a task's job releases.
///
/// `Periodic` and `Sporadic` carry only their period; the single-step
/// curve they normalize to is derived, not stored, so that the original
/// variant survives for emission (§9).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrivalModel {
    Periodic { period: Duration },
    Sporadic { min_inter_arrival: Duration },
    ArrivalCurveModel(ArrivalCurve),
}

impl ArrivalModel {
    fn normalize(&self, id: u64) -> Result<ArrivalCurve, TaskSetError> {
        match self {
            ArrivalModel::Periodic { period } | ArrivalModel::Sporadic { min_inter_arrival: period } => {
                ArrivalCurve::single_step(*period).map_err(|source| TaskSetError::Curve { id, source })
            }
            ArrivalModel::ArrivalCurveModel(curve) => Ok(curve.clone()),
        }
    }
}

/// A single real-time task (§3).
///
/// `curve` is the normalized arrival curve derived from `arrival` at
/// construction time; all RBF arithmetic goes through it, while `arrival`
/// is retained verbatim so the emitter can still tell a periodic task
/// from an arrival-curve one.
///
/// `Deserialize` goes through [`TaskData`] and [`Task::new`] rather than
/// being derived directly: the cross-field invariants (positive deadline
/// and WCET, a well-formed arrival curve) cannot be expressed by `serde`
/// alone, and a `Task` that skipped them would violate §3 (SPEC_FULL §2.1,
/// "Configuration / data model").
#[derive(Clone, Debug, Serialize)]
#[serde(into = "TaskData")]
pub struct Task {
    id: u64,
    deadline: Duration,
    wcet: Duration,
    priority: Option<u32>,
    arrival: ArrivalModel,
    curve: ArrivalCurve,
}

/// The plain-data shape of a [`Task`], used both as the `serde` wire
/// format and as the input to [`Task::new`].
#[derive(Clone, Debug, Serialize, Deserialize)]
struct TaskData {
    id: u64,
    deadline: Duration,
    wcet: Duration,
    priority: Option<u32>,
    arrival: ArrivalModel,
}

impl From<Task> for TaskData {
    fn from(t: Task) -> Self {
        TaskData {
            id: t.id,
            deadline: t.deadline,
            wcet: t.wcet,
            priority: t.priority,
            arrival: t.arrival,
        }
    }
}

impl<'de> Deserialize<'de> for Task {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = TaskData::deserialize(deserializer)?;
        Task::new(data.id, data.deadline, data.wcet, data.priority, data.arrival)
            .map_err(serde::de::Error::custom)
    }
}

impl Task {
    /// Construct a new task, validating its deadline, WCET, and arrival
    /// model.
    pub fn new(
        id: u64,
        deadline: Duration,
        wcet: Duration,
        priority: Option<u32>,
        arrival: ArrivalModel,
    ) -> Result<Self, TaskSetError> {
        if deadline == 0 {
            return Err(TaskSetError::NonPositiveDeadline { id, deadline });
        }
        if wcet == 0 {
            return Err(TaskSetError::NonPositiveWcet { id, wcet });
        }
        let curve = arrival.normalize(id)?;
        Ok(Task {
            id,
            deadline,
            wcet,
            priority,
            arrival,
            curve,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn wcet(&self) -> Duration {
        self.wcet
    }

    pub fn priority(&self) -> Option<u32> {
        self.priority
    }

    pub fn arrival(&self) -> &ArrivalModel {
        &self.arrival
    }

    pub fn curve(&self) -> &ArrivalCurve {
        &self.curve
    }

    /// The display name used both by certificates and by diagnostics,
    /// e.g. `tsk01`.
    pub fn name(&self) -> String {
        format!("tsk{:02}", self.id)
    }

    /// `rbf(Δ) = 0` if Δ = 0, else `curve.at(Δ) · C` (§3).
    pub fn rbf(&self, delta: Duration) -> Duration {
        if delta == 0 {
            0
        } else {
            self.curve.at(delta) * self.wcet
        }
    }

    /// `n_last · C / h` over the task's normalized curve, as an `f64`
    /// (§3, "Utilization"; §9, replacing the legacy `10 ^ 20` typo with a
    /// direct computation).
    pub fn utilization(&self) -> f64 {
        (self.curve.n_last() as f64) * (self.wcet as f64) / (self.curve.horizon() as f64)
    }
}

impl RequestBound for Task {
    fn service_needed(&self, delta: Duration) -> Duration {
        self.rbf(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn periodic(id: u64, wcet: Duration, deadline: Duration, period: Duration, priority: Option<u32>) -> Task {
        Task::new(id, deadline, wcet, priority, ArrivalModel::Periodic { period }).unwrap()
    }

    #[test]
    fn rejects_zero_deadline() {
        assert!(matches!(
            Task::new(1, 0, 1, None, ArrivalModel::Periodic { period: 10 }),
            Err(TaskSetError::NonPositiveDeadline { id: 1, deadline: 0 })
        ));
    }

    #[test]
    fn rejects_zero_wcet() {
        assert!(matches!(
            Task::new(1, 10, 0, None, ArrivalModel::Periodic { period: 10 }),
            Err(TaskSetError::NonPositiveWcet { id: 1, wcet: 0 })
        ));
    }

    #[test]
    fn rbf_is_zero_at_zero() {
        let t = periodic(1, 2, 10, 10, None);
        assert_eq!(t.rbf(0), 0);
    }

    #[test]
    fn rbf_matches_ceiling_division_for_periodic_tasks() {
        let t = periodic(1, 3, 5, 5, None);
        for delta in 1..30u128 {
            let expected = ((delta + 4) / 5) * 3; // ceil(delta/5) * 3
            assert_eq!(t.rbf(delta), expected, "delta={delta}");
        }
    }

    #[test]
    fn rbf_is_monotone() {
        // property 2
        let t = periodic(1, 3, 5, 7, None);
        let mut previous = t.rbf(0);
        for delta in 1..50u128 {
            let current = t.rbf(delta);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn single_step_curve_equivalent_to_periodic() {
        // property 9
        let from_curve = Task::new(
            1,
            10,
            1,
            None,
            ArrivalModel::ArrivalCurveModel(ArrivalCurve::single_step(10).unwrap()),
        )
        .unwrap();
        let from_period = periodic(1, 1, 10, 10, None);
        for delta in 0..50u128 {
            assert_eq!(from_curve.rbf(delta), from_period.rbf(delta));
        }
    }

    #[test]
    fn utilization_is_cost_over_period() {
        let t = periodic(1, 3, 10, 10, None);
        assert_approx_eq::assert_approx_eq!(t.utilization(), 0.3);
    }
}
