//! Handle rules shared by the Duelground backend.
//!
//! A handle is the short, user-chosen, public-facing name on a wizard
//! profile. This crate owns the rules a candidate handle must satisfy, the
//! case fold applied before any uniqueness comparison, and the heuristic
//! generation of alternatives when a candidate is rejected or already
//! claimed.
//!
//! Everything here is a pure, total function over strings. Invalid input is
//! reported as data, never raised: callers get a [`ValidationResult`] or a
//! [`Violation`], and [`suggestions`] degrades to a shorter (possibly empty)
//! list rather than failing. Whether a handle is *taken* is deliberately not
//! this crate's concern; the backing index lives with the caller.

mod normalize;
mod reserved;
mod suggest;
mod validate;

pub use normalize::normalize;
pub use suggest::{suggestions, suggestions_with_year};
pub use validate::{HANDLE_MAX, HANDLE_MIN, ValidationResult, Violation, check, validate};
