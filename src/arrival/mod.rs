/*! The *η-max prefix* arrival curve abstraction (§3, §4.1).

Unlike the wider family of arrival-process models in the crate this one
is adapted from (periodic, sporadic, Poisson, propagated-with-jitter,
aggregated, ...), this crate needs exactly one concrete representation:
a finite step prefix over a horizon, since periodic and sporadic tasks
are themselves normalized down to a single-step curve before any RBF
arithmetic happens (see [`crate::task::ArrivalModel`]).
*/

mod curve;

pub use curve::ArrivalCurve;
