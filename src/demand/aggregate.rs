use super::RequestBound;
use crate::time::Duration;

/// The combined demand of a collection of individual [`RequestBound`]s,
/// e.g. the higher-or-equal-priority task set under fixed-priority
/// scheduling, or the whole task set under EDF.
///
/// Holds borrowed references rather than owning its members: the same
/// task set is aggregated differently (and repeatedly, once per
/// candidate offset) depending on which task is currently under
/// analysis, so cloning tasks into every aggregate would be wasteful.
pub struct Aggregate<'a, T: RequestBound> {
    members: Vec<&'a T>,
}

impl<'a, T: RequestBound> Aggregate<'a, T> {
    pub fn new(members: Vec<&'a T>) -> Self {
        Aggregate { members }
    }
}

impl<T: RequestBound> RequestBound for Aggregate<'_, T> {
    fn service_needed(&self, delta: Duration) -> Duration {
        self.members.iter().map(|m| m.service_needed(delta)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(Duration);
    impl RequestBound for Constant {
        fn service_needed(&self, _delta: Duration) -> Duration {
            self.0
        }
    }

    #[test]
    fn sums_members() {
        let a = Constant(3);
        let b = Constant(5);
        let agg = Aggregate::new(vec![&a, &b]);
        assert_eq!(agg.service_needed(0), 8);
    }

    #[test]
    fn empty_aggregate_has_no_demand() {
        let agg: Aggregate<Constant> = Aggregate::new(vec![]);
        assert_eq!(agg.service_needed(100), 0);
    }
}
