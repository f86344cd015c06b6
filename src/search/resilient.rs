//! Resilient optimizer: minimize the worst-case distance when an adversary
//! may swap the final step's operand for any value from a fixed menu.
//!
//! The defender commits to a full strategy first; the adversary then replaces
//! the last consumed number with one of the menu values, applied under the
//! same operation to the same prior running result. Branch and bound runs on
//! the maximum distance over the real outcome and all substituted outcomes.

use std::ops::RangeInclusive;
use std::time::Instant;

use z3::ast::Int;

use crate::encode::{self, distance_to, operation_link, ChainedEncoder, StepEncoder};

use super::{eval_i64, query, Attempt, Frame, SearchError, SearchReport, Solution};

/// Substitute values the adversary may force into the final step.
const ATTACK_MENU: RangeInclusive<i64> = 0..=10;

impl Attempt<'_, ChainedEncoder> {
    /// Branch-and-bound as in the approximate optimizer, but bounding the
    /// worst-case distance. One frame is opened per step count and the bound
    /// tightenings accumulate inside it; the frame is released before the
    /// driver moves on, so each step count attacks only its own final step.
    pub fn resilient(mut self) -> Result<SearchReport, SearchError> {
        let started = Instant::now();
        let goal = self.puzzle.goal();
        let max_steps = self.puzzle.max_steps();
        let Attempt {
            solver,
            encoder,
            config,
            statistics,
            ..
        } = &mut self;

        // One alternative-result variable per substitute, shared across step
        // counts; they are re-constrained inside each step count's frame.
        let altered: Vec<Int> = ATTACK_MENU
            .map(|value| Int::new_const(format!("altered_result_{}", value)))
            .collect();

        let mut best: Option<Solution> = None;
        while encoder.steps() < max_steps {
            encoder.extend_step(solver);
            statistics.step_counts_explored += 1;

            let _frame = Frame::open(solver);
            for (value, alternative) in ATTACK_MENU.zip(altered.iter()) {
                let substitute = Int::from_i64(value);
                solver.assert(operation_link(
                    encoder.last_operation(),
                    alternative,
                    encoder.previous_result(),
                    &substitute,
                ));
            }

            let mut worst = distance_to(goal, encoder.result());
            for alternative in &altered {
                worst = encode::max(&worst, &distance_to(goal, alternative));
            }

            loop {
                if let Some(bound) = &best {
                    solver.assert(worst.lt(bound.distance));
                }
                if !query(solver, statistics)? {
                    break;
                }

                let model = solver.get_model().ok_or(SearchError::ModelUnavailable)?;
                let result = eval_i64(&model, encoder.result())?;
                let worst_distance = eval_i64(&model, &worst)?;
                if best
                    .as_ref()
                    .map_or(true, |bound| worst_distance < bound.distance)
                {
                    statistics.improvements_found += 1;
                    if config.verbose {
                        println!(
                            "Resilient search: worst-case distance {} using {} numbers",
                            worst_distance,
                            encoder.steps() + 1
                        );
                    }
                    best = Some(super::snapshot(&*encoder, &model, result, worst_distance)?);
                }
            }
            // The frame drops here, discarding the attack constraints and the
            // accumulated bounds for this step count.
        }

        statistics.elapsed_time = started.elapsed();
        Ok(SearchReport {
            solution: best,
            statistics: statistics.clone(),
        })
    }
}
