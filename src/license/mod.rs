//! License compliance policy.
//!
//! - [`rules`] — the ordered pattern table mapping one license string to a
//!   [`Verdict`](rules::Verdict).
//! - [`classifier`] — walks a collected [`Package`](crate::models::Package)
//!   tree and turns non-compliant verdicts into diagnostics.

pub mod classifier;
pub mod rules;
