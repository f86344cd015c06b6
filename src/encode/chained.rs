//! Variant A: chained combination.
//!
//! A running result starts at one freshly chosen puzzle number and each step
//! folds in one more unused number. Every consumed number is referenced by
//! its original position, and all consumed positions stay pairwise distinct.

use z3::ast::Int;
use z3::{Model, Solver};

use crate::encode::{in_range, operation_link, operation_selector, select, StepEncoder};
use crate::ops::Operation;
use crate::puzzle::Puzzle;
use crate::search::solution::{ChainedStep, Steps};

/// Symbolic step log for one chained attempt.
pub struct ChainedEncoder {
    numbers: Vec<i64>,
    /// The puzzle numbers as constant terms, selectable by a symbolic index.
    slots: Vec<Int>,
    initial_index: Int,
    /// `results[k]` is the running result after `k` steps.
    results: Vec<Int>,
    operations: Vec<Int>,
    operand_indices: Vec<Int>,
}

impl ChainedEncoder {
    /// Set up the step-0 state: a range-constrained initial index and a
    /// running result fixed to the number at that position.
    pub fn new(puzzle: &Puzzle, solver: &Solver) -> Self {
        let numbers = puzzle.numbers().to_vec();
        let slots: Vec<Int> = numbers.iter().map(|n| Int::from_i64(*n)).collect();

        let initial_index = Int::new_const("initial_index");
        in_range(solver, &initial_index, numbers.len() as i64);

        let initial = Int::new_const("result_0");
        solver.assert(initial.eq(&select(&initial_index, &slots)));

        Self {
            numbers,
            slots,
            initial_index,
            results: vec![initial],
            operations: Vec::new(),
            operand_indices: Vec::new(),
        }
    }

    /// Operation selector of the latest step.
    ///
    /// # Panics
    /// Panics if no step has been encoded yet.
    pub fn last_operation(&self) -> &Int {
        self.operations.last().expect("no step encoded")
    }

    /// Running result entering the latest step.
    ///
    /// # Panics
    /// Panics if no step has been encoded yet.
    pub fn previous_result(&self) -> &Int {
        &self.results[self.results.len() - 2]
    }
}

impl StepEncoder for ChainedEncoder {
    fn steps(&self) -> usize {
        self.operations.len()
    }

    fn extend_step(&mut self, solver: &Solver) {
        let step = self.operations.len();
        let op = operation_selector(solver, step);

        let index = Int::new_const(format!("operand_index_{}", step));
        in_range(solver, &index, self.numbers.len() as i64);
        solver.assert(index.eq(&self.initial_index).not());
        for prior in &self.operand_indices {
            solver.assert(index.eq(prior).not());
        }

        let operand = select(&index, &self.slots);
        let result = Int::new_const(format!("result_{}", step + 1));
        solver.assert(operation_link(&op, &result, &self.results[step], &operand));

        self.operations.push(op);
        self.operand_indices.push(index);
        self.results.push(result);
    }

    fn result(&self) -> &Int {
        assert!(!self.operations.is_empty(), "no step encoded");
        &self.results[self.results.len() - 1]
    }

    fn decode(&self, model: &Model) -> Option<Steps> {
        let initial_index = model.eval(&self.initial_index, true)?.as_i64()? as usize;
        let initial = *self.numbers.get(initial_index)?;

        let mut steps = Vec::with_capacity(self.operations.len());
        for k in 0..self.operations.len() {
            let op = Operation::from_index(model.eval(&self.operations[k], true)?.as_i64()?)?;
            let index = model.eval(&self.operand_indices[k], true)?.as_i64()? as usize;
            let value = model.eval(&self.results[k + 1], true)?.as_i64()?;
            steps.push(ChainedStep {
                op,
                index,
                operand: *self.numbers.get(index)?,
                value,
            });
        }

        Some(Steps::Chained {
            initial_index,
            initial,
            steps,
        })
    }
}
