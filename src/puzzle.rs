//! Puzzle input: an ordered multiset of numbers and a goal value.

use std::fmt;

/// One puzzle instance. The numbers keep their input order so that solutions
/// can refer to positions; duplicates are legal and stay distinguishable by
/// position. Immutable for the lifetime of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    numbers: Vec<i64>,
    goal: i64,
}

/// Configuration errors detected before any search begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// Fewer than two numbers: no combination step is possible.
    TooFewNumbers(usize),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::TooFewNumbers(count) => {
                write!(f, "at least two numbers required, got {}", count)
            }
        }
    }
}

impl std::error::Error for PuzzleError {}

impl Puzzle {
    /// Validate and freeze a puzzle instance.
    pub fn new(numbers: Vec<i64>, goal: i64) -> Result<Self, PuzzleError> {
        if numbers.len() < 2 {
            return Err(PuzzleError::TooFewNumbers(numbers.len()));
        }
        Ok(Self { numbers, goal })
    }

    pub fn numbers(&self) -> &[i64] {
        &self.numbers
    }

    pub fn goal(&self) -> i64 {
        self.goal
    }

    /// Count of input numbers.
    pub fn size(&self) -> usize {
        self.numbers.len()
    }

    /// Step budget for the iterative-deepening driver: with `n` numbers at
    /// most `n - 1` combination steps can consume them all.
    pub fn max_steps(&self) -> usize {
        self.numbers.len() - 1
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.numbers.iter().map(i64::to_string).collect();
        writeln!(f, "Numbers: {}", rendered.join(", "))?;
        write!(f, "Goal: {}", self.goal)
    }
}
