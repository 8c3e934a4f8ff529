/*! The *request-bound function* (RBF) abstraction (§4.3).

[`RequestBound`] characterizes the total demand for processor service by
one or more tasks over a window of length Δ. A single [`crate::task::Task`]
is itself a `RequestBound`; [`Aggregate`] sums the demand of an arbitrary
collection of tasks, which is how the busy-interval and per-offset
fixpoints (§4.4, §4.6) build up `total_rbf`, `total_hep_rbf_fp`, and
friends from individual task RBFs.
*/

use auto_impl::auto_impl;

use crate::time::Duration;

mod aggregate;

pub use aggregate::Aggregate;

/// The general interface for processor demand: the demand of a single
/// task, or the cumulative demand of several.
#[auto_impl(&, Box, Rc)]
pub trait RequestBound {
    /// Bound the total amount of service needed in an interval of length
    /// `delta` (§4.3).
    fn service_needed(&self, delta: Duration) -> Duration;
}
