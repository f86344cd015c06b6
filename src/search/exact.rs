//! Exact search: is the goal exactly reachable?

use std::time::Instant;

use crate::encode::StepEncoder;

use super::{eval_i64, query, Attempt, Frame, SearchError, SearchReport};

impl<E: StepEncoder> Attempt<'_, E> {
    /// Probe `result == goal` at each step count under a scoped frame. Step
    /// counts are tried smallest first, so the first satisfiable probe is the
    /// minimal-size exact solution; on total failure the report carries no
    /// solution and control usually falls through to the approximate
    /// optimizer.
    pub fn exact(mut self) -> Result<SearchReport, SearchError> {
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

        let mut solution = None;
        while encoder.steps() < max_steps && solution.is_none() {
            encoder.extend_step(solver);
            statistics.step_counts_explored += 1;
            if config.verbose {
                println!("Exact search: probing at {} steps...", encoder.steps());
            }

            let _frame = Frame::open(solver);
            solver.assert(encoder.result().eq(goal));
            if query(solver, statistics)? {
                let model = solver.get_model().ok_or(SearchError::ModelUnavailable)?;
                let result = eval_i64(&model, encoder.result())?;
                solution = Some(super::snapshot(&*encoder, &model, result, 0)?);
            }
            // The frame drops here, so the goal probe never reaches the next
            // step count.
        }

        statistics.elapsed_time = started.elapsed();
        Ok(SearchReport {
            solution,
            statistics: statistics.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Attempt, SearchConfig};
    use crate::puzzle::Puzzle;

    #[test]
    fn test_exact_finds_minimal_solution() {
        // 5 is reachable in one step (2 + 3), so size must be 2 even though
        // three numbers are available.
        let puzzle = Puzzle::new(vec![2, 3, 10], 5).unwrap();
        let report = Attempt::chained(&puzzle, &SearchConfig::default())
            .exact()
            .unwrap();

        let solution = report.solution.expect("2 + 3 reaches 5");
        assert_eq!(solution.size, 2);
        assert_eq!(solution.result, 5);
        assert_eq!(solution.distance, 0);
    }

    #[test]
    fn test_exact_reports_failure() {
        // {2, 4} reaches only -2, 2, 6, 8 and the divisions; 7 is not there.
        let puzzle = Puzzle::new(vec![2, 4], 7).unwrap();
        let report = Attempt::chained(&puzzle, &SearchConfig::default())
            .exact()
            .unwrap();

        assert!(report.solution.is_none());
        assert_eq!(report.statistics.step_counts_explored, 1);
    }

    #[test]
    fn test_exact_consumes_distinct_positions() {
        let puzzle = Puzzle::new(vec![3, 3, 8, 8, 50], 378).unwrap();
        let report = Attempt::chained(&puzzle, &SearchConfig::default())
            .exact()
            .unwrap();

        let solution = report.solution.expect("378 is exactly reachable");
        let positions = solution.steps.consumed_positions();
        assert_eq!(positions.len(), solution.size);
        for (k, position) in positions.iter().enumerate() {
            assert!(*position < puzzle.size());
            assert!(!positions[k + 1..].contains(position));
        }
    }
}
