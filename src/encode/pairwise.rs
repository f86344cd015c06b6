//! Variant B: pairwise reduction.
//!
//! The working multiset starts as the puzzle numbers. Each step picks two
//! live positions, combines their values and writes the result back into the
//! first position; the second position is retired and may never be selected
//! again. Any two live numbers may combine, so this search space strictly
//! contains variant A's.

use z3::ast::Int;
use z3::{Model, Solver};

use crate::encode::{in_range, operation_link, operation_selector, select, StepEncoder};
use crate::ops::Operation;
use crate::puzzle::Puzzle;
use crate::search::solution::{PairwiseStep, Steps};

/// Symbolic step log for one pairwise attempt.
pub struct PairwiseEncoder {
    numbers: Vec<i64>,
    /// `snapshots[k]` is the working array after `k` steps; snapshot 0 holds
    /// the puzzle numbers as constant terms.
    snapshots: Vec<Vec<Int>>,
    operations: Vec<Int>,
    firsts: Vec<Int>,
    seconds: Vec<Int>,
    /// `results[k]` is the combined value written back at step `k`.
    results: Vec<Int>,
}

impl PairwiseEncoder {
    pub fn new(puzzle: &Puzzle, _solver: &Solver) -> Self {
        let numbers = puzzle.numbers().to_vec();
        let initial: Vec<Int> = numbers.iter().map(|n| Int::from_i64(*n)).collect();
        Self {
            numbers,
            snapshots: vec![initial],
            operations: Vec::new(),
            firsts: Vec::new(),
            seconds: Vec::new(),
            results: Vec::new(),
        }
    }
}

impl StepEncoder for PairwiseEncoder {
    fn steps(&self) -> usize {
        self.operations.len()
    }

    fn extend_step(&mut self, solver: &Solver) {
        let step = self.operations.len();
        let len = self.numbers.len() as i64;
        let op = operation_selector(solver, step);

        let first = Int::new_const(format!("first_{}", step));
        let second = Int::new_const(format!("second_{}", step));
        in_range(solver, &first, len);
        in_range(solver, &second, len);
        solver.assert(first.eq(&second).not());
        // Retired positions stay dead; surviving (first) positions may be
        // chosen again because the combined value lives there.
        for retired in &self.seconds {
            solver.assert(first.eq(retired).not());
            solver.assert(second.eq(retired).not());
        }

        let old = &self.snapshots[step];
        let lhs = select(&first, old);
        let rhs = select(&second, old);
        let result = Int::new_const(format!("combined_{}", step));
        solver.assert(operation_link(&op, &result, &lhs, &rhs));

        // Next snapshot: the first position is overwritten by the combined
        // value, every other position carries over unchanged.
        let next: Vec<Int> = old
            .iter()
            .enumerate()
            .map(|(position, slot)| first.eq(position as i64).ite(&result, slot))
            .collect();

        self.snapshots.push(next);
        self.operations.push(op);
        self.firsts.push(first);
        self.seconds.push(second);
        self.results.push(result);
    }

    fn result(&self) -> &Int {
        self.results.last().expect("no step encoded")
    }

    fn decode(&self, model: &Model) -> Option<Steps> {
        let mut working = self.numbers.clone();
        let mut steps = Vec::with_capacity(self.operations.len());
        for k in 0..self.operations.len() {
            let op = Operation::from_index(model.eval(&self.operations[k], true)?.as_i64()?)?;
            let first = model.eval(&self.firsts[k], true)?.as_i64()? as usize;
            let second = model.eval(&self.seconds[k], true)?.as_i64()? as usize;
            let lhs = *working.get(first)?;
            let rhs = *working.get(second)?;
            let value = model.eval(&self.results[k], true)?.as_i64()?;
            *working.get_mut(first)? = value;
            steps.push(PairwiseStep {
                op,
                first,
                second,
                lhs,
                rhs,
                value,
            });
        }
        Some(Steps::Pairwise { steps })
    }
}
