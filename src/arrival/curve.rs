use serde::{Deserialize, Serialize};

use crate::error::InvalidArrivalCurve;
use crate::time::{Duration, Instant};

/// A single step of an [`ArrivalCurve`]: at offset `t`, the cumulative
/// job count upper bound becomes (at least) `n`.
type Step = (Instant, u128);

/// An *η-max prefix*: a step function over a horizon `h`, extended
/// periodically, upper-bounding the number of job activations in any
/// window of length Δ (§3, §4.1).
///
/// Construction validates every invariant eagerly; once built, an
/// `ArrivalCurve` is immutable, so every derived bound ([`Self::at`],
/// [`Self::time_step_after`]) is a pure function of its steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalCurve {
    horizon: Instant,
    steps: Vec<Step>,
}

impl ArrivalCurve {
    /// Construct a new arrival curve from a horizon and an ordered
    /// sequence of `(offset, count)` steps.
    ///
    /// Fails with [`InvalidArrivalCurve`] unless: the sequence is
    /// nonempty; the first step occurs at offset 1 with a positive count;
    /// both offsets and counts are strictly increasing; and every step
    /// occurs strictly before `horizon`.
    pub fn new(horizon: Instant, steps: Vec<Step>) -> Result<Self, InvalidArrivalCurve> {
        let (first_t, first_n) = *steps.first().ok_or(InvalidArrivalCurve::NoSteps)?;
        if first_t != 1 {
            return Err(InvalidArrivalCurve::FirstStepNotAtOne(first_t));
        }
        if first_n == 0 {
            return Err(InvalidArrivalCurve::FirstStepNotPositive(first_n));
        }
        for (index, pair) in steps.windows(2).enumerate() {
            let (t0, n0) = pair[0];
            let (t1, n1) = pair[1];
            if !(t0 < t1) || !(n0 < n1) {
                return Err(InvalidArrivalCurve::NotStrictlyMonotonic {
                    index,
                    t0,
                    n0,
                    t1,
                    n1,
                });
            }
        }
        let (last_t, _) = *steps.last().unwrap();
        if !(last_t < horizon) {
            return Err(InvalidArrivalCurve::StepNotBeforeHorizon {
                step: last_t,
                horizon,
            });
        }
        Ok(ArrivalCurve { horizon, steps })
    }

    /// A single-step curve with horizon `period` and one step `(1, 1)`,
    /// the normalized representation of a periodic or sporadic task
    /// (§3, "Derived").
    pub fn single_step(period: Duration) -> Result<Self, InvalidArrivalCurve> {
        Self::new(period, vec![(1, 1)])
    }

    pub fn horizon(&self) -> Instant {
        self.horizon
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The cumulative job count upper bound in any window of length Δ.
    ///
    /// `at(Δ) = ⌊Δ/h⌋·n_last + prefix(Δ mod h)`.
    pub fn at(&self, delta: Duration) -> u128 {
        let cycles = delta / self.horizon;
        let tau = delta % self.horizon;
        let n_last = self.steps.last().unwrap().1;
        cycles * n_last + self.prefix(tau)
    }

    /// `n_j` for the largest `j` with `t_j <= tau`, else 0.
    fn prefix(&self, tau: Instant) -> u128 {
        self.steps
            .iter()
            .rev()
            .find(|(t, _)| *t <= tau)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// The least `t' > t` at which [`Self::at`] increments.
    ///
    /// Found by locating the least step strictly above `(t mod h) + 1`;
    /// if none remains within the current horizon, wraps to the first
    /// step of the next horizon, then subtracts one epsilon so the
    /// returned value is the last instant before the step actually
    /// occurs.
    pub fn time_step_after(&self, t: Instant) -> Instant {
        let offset = (t / self.horizon) * self.horizon;
        let tau = t % self.horizon;
        let next_within_horizon = self
            .steps
            .iter()
            .map(|(s, _)| *s)
            .find(|s| *s > tau + 1);
        let next = next_within_horizon.unwrap_or(self.horizon + self.steps[0].0);
        offset + next - 1
    }

    /// The sequence `[t_i + offset]` over every step in the curve.
    pub fn time_steps_with_offset(&self, offset: Instant) -> Vec<Instant> {
        self.steps.iter().map(|(t, _)| t + offset).collect()
    }

    /// The job count of the curve's last declared step, `n_{k-1}`.
    pub fn n_last(&self) -> u128 {
        self.steps.last().unwrap().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_step() -> ArrivalCurve {
        // horizon 10, one job by time 1, two jobs by time 6
        ArrivalCurve::new(10, vec![(1, 1), (6, 2)]).unwrap()
    }

    #[test]
    fn rejects_empty_steps() {
        assert_eq!(
            ArrivalCurve::new(10, vec![]).unwrap_err(),
            InvalidArrivalCurve::NoSteps
        );
    }

    #[test]
    fn rejects_first_step_not_at_one() {
        assert!(matches!(
            ArrivalCurve::new(10, vec![(2, 1)]).unwrap_err(),
            InvalidArrivalCurve::FirstStepNotAtOne(2)
        ));
    }

    #[test]
    fn rejects_non_monotonic_steps() {
        assert!(ArrivalCurve::new(10, vec![(1, 1), (1, 2)]).is_err());
        assert!(ArrivalCurve::new(10, vec![(1, 2), (5, 1)]).is_err());
    }

    #[test]
    fn rejects_step_not_before_horizon() {
        assert!(ArrivalCurve::new(5, vec![(1, 1), (5, 2)]).is_err());
    }

    #[test]
    fn at_zero_is_zero() {
        let c = two_step();
        assert_eq!(c.at(0), 0);
    }

    #[test]
    fn at_matches_prefix_within_horizon() {
        let c = two_step();
        assert_eq!(c.at(1), 1);
        assert_eq!(c.at(5), 1);
        assert_eq!(c.at(6), 2);
        assert_eq!(c.at(9), 2);
    }

    #[test]
    fn at_is_periodic_beyond_horizon() {
        // property 1: at(delta + h) = at(delta) + n_last
        let c = two_step();
        for delta in 0..25u128 {
            assert_eq!(c.at(delta + c.horizon()), c.at(delta) + c.n_last());
        }
    }

    #[test]
    fn time_step_after_is_strictly_increasing_and_never_goes_backwards() {
        // property 11
        let c = two_step();
        for t in 0..40u128 {
            let next = c.time_step_after(t);
            assert!(next > t, "time_step_after({t}) = {next} <= {t}");
        }
    }

    #[test]
    fn time_step_after_lands_on_an_actual_step() {
        let c = two_step();
        for t in 0..40u128 {
            let next = c.time_step_after(t);
            assert!(c.at(next) > c.at(t) || c.at(next + 1) > c.at(next));
        }
    }

    #[test]
    fn single_step_curve_matches_periodic_normalization() {
        let periodic = ArrivalCurve::single_step(10).unwrap();
        assert_eq!(periodic.at(9), 0);
        assert_eq!(periodic.at(10), 1);
        assert_eq!(periodic.at(20), 2);
    }

    #[test]
    fn time_steps_with_offset_shifts_every_step() {
        let c = two_step();
        assert_eq!(c.time_steps_with_offset(100), vec![101, 106]);
    }
}
