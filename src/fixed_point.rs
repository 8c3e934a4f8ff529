/*! The monotone fixpoint search that underlies every bound computed by this
crate: the maximum busy-interval *L* (§4.4) and every per-offset solution
*F(A)* (§4.6) are both least fixpoints of a monotone nondecreasing function.

This module knows nothing about tasks, policies, or priorities — it is
handed a closure and a seed, and either converges or reports
[`Unbounded`].
*/

use crate::time::Duration;

/// The fixpoint search exceeded its divergence ceiling without converging.
///
/// Per §4.2, any arithmetic failure observed while iterating is also
/// folded into this outcome — there is no distinction between "grew past
/// the ceiling" and "the workload function itself diverges" at this
/// layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Unbounded;

/// The default divergence ceiling (10^30), per §4.2.
pub const DEFAULT_CEILING: Duration = 1_000_000_000_000_000_000_000_000_000_000;

/// The result of a fixpoint search: either the least fixpoint at or above
/// the seed, or [`Unbounded`] if no fixpoint was found below the ceiling.
pub type FixpointResult = Result<Duration, Unbounded>;

/// Find the least fixpoint of a monotone nondecreasing function `f`, at or
/// above `seed`, using the default divergence ceiling.
///
/// See [`fixpoint_with_ceiling`] for the full contract.
pub fn fixpoint(f: impl Fn(Duration) -> Duration, seed: Duration) -> FixpointResult {
    fixpoint_with_ceiling(f, seed, DEFAULT_CEILING)
}

/// Find the least fixpoint of a monotone nondecreasing function `f`, at or
/// above `seed`, iterating `t <- f(t)` until two consecutive iterates
/// coincide.
///
/// If the current iterate ever exceeds `ceiling`, the search aborts and
/// reports [`Unbounded`] rather than continuing to iterate a value that
/// has (by assumption of monotonicity) already diverged. The caller
/// supplies `f` as a plain closure, so the engine carries no knowledge of
/// the policy, task set, or offset that produced it (§9, "Fixpoint
/// callbacks").
pub fn fixpoint_with_ceiling(
    f: impl Fn(Duration) -> Duration,
    seed: Duration,
    ceiling: Duration,
) -> FixpointResult {
    let mut t = seed;
    loop {
        if t > ceiling {
            return Err(Unbounded);
        }
        let next = f(t);
        if next == t {
            return Ok(t);
        }
        t = next;
    }
}

/// Reduce a sequence of per-offset [`FixpointResult`]s down to a single
/// response-time bound: the maximum of the finite results, or
/// [`Unbounded`] if any offset diverged. An empty sequence (no candidate
/// offsets) trivially yields zero.
pub fn max_of(results: impl Iterator<Item = FixpointResult>) -> FixpointResult {
    let mut max = 0;
    for r in results {
        max = max.max(r?);
    }
    Ok(max)
}
