//! Concrete solution records decoded from satisfying models.

use std::fmt;
use std::time::Duration;

use crate::ops::Operation;

/// One chained step: the running result combined with the puzzle number at
/// `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainedStep {
    pub op: Operation,
    /// Position of the consumed number in the puzzle.
    pub index: usize,
    /// The consumed number itself.
    pub operand: i64,
    /// Running result after this step.
    pub value: i64,
}

/// One pairwise step: the values at two live positions combined, the result
/// written back into `first`, `second` retired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairwiseStep {
    pub op: Operation,
    pub first: usize,
    pub second: usize,
    /// Value at `first` before the step.
    pub lhs: i64,
    /// Value at `second` before the step.
    pub rhs: i64,
    /// Combined value written back to `first`.
    pub value: i64,
}

/// Per-variant step trace of one solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Steps {
    Chained {
        initial_index: usize,
        initial: i64,
        steps: Vec<ChainedStep>,
    },
    Pairwise {
        steps: Vec<PairwiseStep>,
    },
}

impl Steps {
    /// Number of combination steps in the trace.
    pub fn count(&self) -> usize {
        match self {
            Steps::Chained { steps, .. } => steps.len(),
            Steps::Pairwise { steps } => steps.len(),
        }
    }

    /// Puzzle positions this trace consumed, in consumption order. For a
    /// chained trace that is the initial position plus one operand position
    /// per step; for a pairwise trace, the retired position per step.
    pub fn consumed_positions(&self) -> Vec<usize> {
        match self {
            Steps::Chained {
                initial_index,
                steps,
                ..
            } => {
                let mut positions = vec![*initial_index];
                positions.extend(steps.iter().map(|step| step.index));
                positions
            }
            Steps::Pairwise { steps } => steps.iter().map(|step| step.second).collect(),
        }
    }
}

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Steps::Chained { initial, steps, .. } => {
                writeln!(f, "Initial number: {}", initial)?;
                for (k, step) in steps.iter().enumerate() {
                    writeln!(
                        f,
                        "Step {}: operation {} with number {} -> result {}",
                        k + 1,
                        step.op,
                        step.operand,
                        step.value
                    )?;
                }
                Ok(())
            }
            Steps::Pairwise { steps } => {
                for step in steps {
                    writeln!(f, "{} {} {} = {}", step.lhs, step.op, step.rhs, step.value)?;
                }
                Ok(())
            }
        }
    }
}

/// Frozen snapshot of one found assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub steps: Steps,
    /// Numbers consumed: step count + 1.
    pub size: usize,
    /// Achieved value; in resilient mode, the unattacked value.
    pub result: i64,
    /// `|goal - result|`; in resilient mode, the worst-case distance over
    /// the attack menu.
    pub distance: i64,
}

/// Counters accumulated over one attempt.
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Satisfiability queries issued to the solver.
    pub solver_queries: u64,
    /// Times the best-known solution was replaced by a strictly better one.
    pub improvements_found: u64,
    /// Step counts the iterative-deepening driver worked through.
    pub step_counts_explored: usize,
    /// Wall-clock time of the attempt.
    pub elapsed_time: Duration,
}

impl SearchStatistics {
    /// Fold another attempt's counters into this one (used when exact search
    /// falls through to the approximate optimizer).
    pub fn absorb(&mut self, other: &SearchStatistics) {
        self.solver_queries += other.solver_queries;
        self.improvements_found += other.improvements_found;
        self.step_counts_explored += other.step_counts_explored;
        self.elapsed_time += other.elapsed_time;
    }
}
