//! Iterative-deepening search over symbolic combination steps.
//!
//! Three algorithms share one driver shape: grow the step count from 1 up to
//! `puzzle size - 1`, extending the attempt's persistent constraint store by
//! one step per level, and probe the solver under scoped extra constraints:
//! - Exact: is the goal exactly reachable at this step count?
//! - Approximate: branch-and-bound on `|goal - result|` until provably tight.
//! - Resilient: branch-and-bound on the worst-case distance when the final
//!   operand may be swapped for any value from a fixed attack menu.

mod approx;
mod exact;
mod resilient;
pub mod solution;

pub use solution::{ChainedStep, PairwiseStep, SearchStatistics, Solution, Steps};

use std::fmt;

use z3::{Model, SatResult, Solver};

use crate::encode::{ChainedEncoder, PairwiseEncoder, StepEncoder};
use crate::puzzle::Puzzle;

/// Which step encoding an attempt uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Chained combination: fold one fresh number into a running result.
    #[default]
    Chained,
    /// Pairwise reduction: combine any two live numbers.
    Pairwise,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Chained => write!(f, "chained"),
            Encoding::Pairwise => write!(f, "pairwise"),
        }
    }
}

/// Search configuration: encoding choice plus diagnostics.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Step encoding to search with.
    pub encoding: Encoding,
    /// Print progress lines while searching.
    pub verbose: bool,
}

impl SearchConfig {
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Fatal faults from the solving collaborator. The step theory (linear
/// integer arithmetic over bounded selectors) is expected to decide, so an
/// `unknown` verdict is an internal error, not a search outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The solver answered `unknown`.
    SolverUnknown,
    /// A satisfiable store produced no model.
    ModelUnavailable,
    /// A model did not evaluate to the concrete steps it satisfies.
    ModelDecode,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::SolverUnknown => write!(f, "solver returned unknown"),
            SearchError::ModelUnavailable => {
                write!(f, "satisfiable store produced no model")
            }
            SearchError::ModelDecode => write!(f, "model could not be decoded"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Result of one full attempt: the best solution found (if any) plus the
/// attempt's counters. `solution: None` is the explicit unsatisfiable
/// outcome, distinct from an error.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub solution: Option<Solution>,
    pub statistics: SearchStatistics,
}

/// Scoped checkpoint on the constraint store, released when dropped so that
/// speculative constraints never leak into later step counts on any exit
/// path.
struct Frame<'s> {
    solver: &'s Solver,
}

impl<'s> Frame<'s> {
    fn open(solver: &'s Solver) -> Self {
        solver.push();
        Self { solver }
    }
}

impl Drop for Frame<'_> {
    fn drop(&mut self) {
        self.solver.pop(1);
    }
}

/// One algorithm run for one puzzle: a fresh solver, a fresh encoder and the
/// step log they share. Attempts never share state with each other.
pub struct Attempt<'p, E> {
    puzzle: &'p Puzzle,
    solver: Solver,
    encoder: E,
    config: SearchConfig,
    statistics: SearchStatistics,
}

impl<'p> Attempt<'p, ChainedEncoder> {
    pub fn chained(puzzle: &'p Puzzle, config: &SearchConfig) -> Self {
        let solver = Solver::new();
        let encoder = ChainedEncoder::new(puzzle, &solver);
        Self {
            puzzle,
            solver,
            encoder,
            config: config.clone(),
            statistics: SearchStatistics::default(),
        }
    }
}

impl<'p> Attempt<'p, PairwiseEncoder> {
    pub fn pairwise(puzzle: &'p Puzzle, config: &SearchConfig) -> Self {
        let solver = Solver::new();
        let encoder = PairwiseEncoder::new(puzzle, &solver);
        Self {
            puzzle,
            solver,
            encoder,
            config: config.clone(),
            statistics: SearchStatistics::default(),
        }
    }
}

/// Issue one satisfiability query, mapping `unknown` to a fatal error.
fn query(solver: &Solver, statistics: &mut SearchStatistics) -> Result<bool, SearchError> {
    statistics.solver_queries += 1;
    match solver.check() {
        SatResult::Sat => Ok(true),
        SatResult::Unsat => Ok(false),
        SatResult::Unknown => Err(SearchError::SolverUnknown),
    }
}

/// Evaluate a symbolic term to a concrete integer under `model`.
fn eval_i64(model: &Model, term: &z3::ast::Int) -> Result<i64, SearchError> {
    model
        .eval(term, true)
        .and_then(|value| value.as_i64())
        .ok_or(SearchError::ModelDecode)
}

/// Build a solution snapshot from the current model.
fn snapshot<E: StepEncoder>(
    encoder: &E,
    model: &Model,
    result: i64,
    distance: i64,
) -> Result<Solution, SearchError> {
    let steps = encoder.decode(model).ok_or(SearchError::ModelDecode)?;
    Ok(Solution {
        size: steps.count() + 1,
        steps,
        result,
        distance,
    })
}

/// Exact search first; on failure, branch-and-bound on a fresh store.
/// Statistics of both attempts are combined.
pub fn solve(puzzle: &Puzzle, config: &SearchConfig) -> Result<SearchReport, SearchError> {
    match config.encoding {
        Encoding::Chained => exact_then_approximate(Attempt::chained(puzzle, config), || {
            Attempt::chained(puzzle, config)
        }),
        Encoding::Pairwise => exact_then_approximate(Attempt::pairwise(puzzle, config), || {
            Attempt::pairwise(puzzle, config)
        }),
    }
}

/// Minimize the worst-case distance under last-operand substitution. Uses the
/// chained encoding only.
pub fn solve_resilient(
    puzzle: &Puzzle,
    config: &SearchConfig,
) -> Result<SearchReport, SearchError> {
    Attempt::chained(puzzle, config).resilient()
}

fn exact_then_approximate<'p, E: StepEncoder>(
    exact: Attempt<'p, E>,
    approximate: impl FnOnce() -> Attempt<'p, E>,
) -> Result<SearchReport, SearchError> {
    let exact_report = exact.exact()?;
    if exact_report.solution.is_some() {
        return Ok(exact_report);
    }

    let report = approximate().approximate()?;
    let mut statistics = exact_report.statistics;
    statistics.absorb(&report.statistics);
    Ok(SearchReport {
        solution: report.solution,
        statistics,
    })
}
