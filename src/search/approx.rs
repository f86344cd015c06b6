//! Approximate optimizer: branch-and-bound on the distance to the goal.

use std::time::Instant;

use crate::encode::{distance_to, StepEncoder};

use super::{eval_i64, query, Attempt, Frame, SearchError, SearchReport, Solution};

impl<E: StepEncoder> Attempt<'_, E> {
    /// At each step count, repeatedly probe for a strictly smaller distance
    /// than the best known until the probe turns unsatisfiable; the bound is
    /// then provably tight at that step count and the driver advances. The
    /// best solution is carried across step counts and only replaced by a
    /// strict improvement, so a smaller solution always wins a tie.
    pub fn approximate(mut self) -> Result<SearchReport, SearchError> {
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

        let mut best: Option<Solution> = None;
        while encoder.steps() < max_steps {
            encoder.extend_step(solver);
            statistics.step_counts_explored += 1;

            loop {
                let _frame = Frame::open(solver);
                if let Some(bound) = &best {
                    solver.assert(distance_to(goal, encoder.result()).lt(bound.distance));
                }
                if !query(solver, statistics)? {
                    break;
                }

                let model = solver.get_model().ok_or(SearchError::ModelUnavailable)?;
                let result = eval_i64(&model, encoder.result())?;
                let distance = (goal - result).abs();
                if best.as_ref().map_or(true, |bound| distance < bound.distance) {
                    statistics.improvements_found += 1;
                    if config.verbose {
                        println!(
                            "Approximate search: distance {} using {} numbers",
                            distance,
                            encoder.steps() + 1
                        );
                    }
                    best = Some(super::snapshot(&*encoder, &model, result, distance)?);
                }
            }
        }

        statistics.elapsed_time = started.elapsed();
        Ok(SearchReport {
            solution: best,
            statistics: statistics.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Attempt, SearchConfig};
    use crate::puzzle::Puzzle;

    #[test]
    fn test_approximate_finds_closest_value() {
        // {3, 5} cannot reach 100; the closest reachable value is 15.
        let puzzle = Puzzle::new(vec![3, 5], 100).unwrap();
        let report = Attempt::chained(&puzzle, &SearchConfig::default())
            .approximate()
            .unwrap();

        let solution = report.solution.expect("some value is always reachable");
        assert_eq!(solution.result, 15);
        assert_eq!(solution.distance, 85);
        assert!(report.statistics.improvements_found >= 1);
    }

    #[test]
    fn test_approximate_reaches_exact_goal_too() {
        // Branch and bound converges to distance 0 when the goal is
        // reachable.
        let puzzle = Puzzle::new(vec![2, 3, 10], 5).unwrap();
        let report = Attempt::chained(&puzzle, &SearchConfig::default())
            .approximate()
            .unwrap();

        let solution = report.solution.unwrap();
        assert_eq!(solution.distance, 0);
        assert_eq!(solution.result, 5);
    }

    #[test]
    fn test_smaller_solution_wins_ties() {
        // 6 is reachable in one step (2 * 3); longer step counts can only
        // tie on distance 0 and must not displace the two-number solution.
        let puzzle = Puzzle::new(vec![2, 3, 1], 6).unwrap();
        let report = Attempt::chained(&puzzle, &SearchConfig::default())
            .approximate()
            .unwrap();

        let solution = report.solution.unwrap();
        assert_eq!(solution.distance, 0);
        assert_eq!(solution.size, 2);
    }
}
