//! Symbolic step encodings for the two combination topologies.
//!
//! An encoder owns the symbolic step log of one attempt: each call to
//! [`StepEncoder::extend_step`] appends fresh variables and constraints for
//! one more combination step to the attempt's persistent store and never
//! retracts them. Speculative constraints (goal probes, bound tightenings)
//! are scoped by the search layer, not by the encoder.
//!
//! Symbolic indexing is expressed as if-then-else chains over the concrete
//! positions instead of array theory, so every constraint stays in plain
//! linear integer arithmetic.

pub mod chained;
pub mod pairwise;

pub use chained::ChainedEncoder;
pub use pairwise::PairwiseEncoder;

use z3::ast::{Bool, Int};
use z3::{Model, Solver};

use crate::ops::{Operation, OPERATION_COUNT};
use crate::search::solution::Steps;

/// One combination topology. Selected once per attempt, never mixed.
pub trait StepEncoder {
    /// Number of steps encoded so far.
    fn steps(&self) -> usize;

    /// Append fresh variables and constraints for one more step.
    fn extend_step(&mut self, solver: &Solver);

    /// Symbolic value produced by the latest step.
    ///
    /// # Panics
    /// Panics if no step has been encoded yet.
    fn result(&self) -> &Int;

    /// Read back the concrete steps chosen by a satisfying model.
    fn decode(&self, model: &Model) -> Option<Steps>;
}

/// Constrain `index` to a valid position: `0 <= index < len`.
pub(crate) fn in_range(solver: &Solver, index: &Int, len: i64) {
    solver.assert(index.ge(0) & index.lt(len));
}

/// Fresh operation selector for `step`, constrained to the 4-element domain.
pub(crate) fn operation_selector(solver: &Solver, step: usize) -> Int {
    let op = Int::new_const(format!("operation_{}", step));
    solver.assert(op.ge(0) & op.lt(OPERATION_COUNT));
    op
}

/// `op` selects the concrete operation `choice`.
pub(crate) fn selects(op: &Int, choice: Operation) -> Bool {
    op.eq(choice.index())
}

/// The four-way step constraint: `result` equals the chosen operation applied
/// to `lhs` and `rhs`, with the `Div` arm guarded by a non-zero, exactly
/// dividing divisor. Exactly one arm can hold because the selector equations
/// are mutually exclusive.
pub(crate) fn operation_link(op: &Int, result: &Int, lhs: &Int, rhs: &Int) -> Bool {
    let add = selects(op, Operation::Add) & result.eq(&(lhs + rhs));
    let sub = selects(op, Operation::Sub) & result.eq(&(lhs - rhs));
    let mul = selects(op, Operation::Mul) & result.eq(&(lhs * rhs));
    let div = rhs.eq(0).not()
        & lhs.modulo(rhs).eq(0)
        & selects(op, Operation::Div)
        & result.eq(&lhs.div(rhs));
    add | sub | mul | div
}

/// Value at the symbolic position `index` of `slots`, as an if-then-else
/// chain. The last slot is the fallback arm; a range constraint on `index`
/// makes the fallback unreachable except at the last position itself.
pub(crate) fn select(index: &Int, slots: &[Int]) -> Int {
    let mut expr = slots[slots.len() - 1].clone();
    for (position, slot) in slots.iter().enumerate().rev().skip(1) {
        expr = index.eq(position as i64).ite(slot, &expr);
    }
    expr
}

/// Symbolic `|goal - value|`.
pub(crate) fn distance_to(goal: i64, value: &Int) -> Int {
    let diff = &Int::from_i64(goal) - value;
    diff.lt(0).ite(&diff.unary_minus(), &diff)
}

/// Symbolic maximum of two values.
pub(crate) fn max(a: &Int, b: &Int) -> Int {
    a.ge(b).ite(a, b)
}
