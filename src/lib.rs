//! SMT-backed search for combining a multiset of integers into a goal value.
//!
//! The search core encodes combination steps as constraints for the Z3
//! solver and drives it with iterative deepening over the step count:
//! - [`encode`] holds the two step encodings (chained and pairwise),
//! - [`search`] holds the exact, approximate and resilient algorithms,
//! - [`puzzle`] and [`ops`] hold the problem inputs and operation domain.

pub mod encode;
pub mod ops;
pub mod puzzle;
pub mod search;
