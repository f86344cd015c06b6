//! End-to-end scenarios: solve real puzzles and replay every reported trace
//! concretely to confirm the solver's model matches ordinary arithmetic.

use std::collections::HashSet;

use reckon::ops::Operation;
use reckon::puzzle::Puzzle;
use reckon::search::{solve, solve_resilient, Encoding, SearchConfig, Solution, Steps};

/// Minimal `|goal - value|` over every chained strategy of every length, by
/// exhaustive enumeration. Independent of the solver, so it can confirm the
/// branch-and-bound answer is actually optimal.
fn minimal_chained_distance(numbers: &[i64], goal: i64) -> i64 {
    fn explore(numbers: &[i64], used: &mut [bool], value: i64, goal: i64, best: &mut i64) {
        for i in 0..numbers.len() {
            if used[i] {
                continue;
            }
            for op in Operation::ALL {
                if let Some(next) = op.apply(value, numbers[i]) {
                    *best = (*best).min((goal - next).abs());
                    used[i] = true;
                    explore(numbers, used, next, goal, best);
                    used[i] = false;
                }
            }
        }
    }

    let mut best = i64::MAX;
    let mut used = vec![false; numbers.len()];
    for i in 0..numbers.len() {
        used[i] = true;
        explore(numbers, &mut used, numbers[i], goal, &mut best);
        used[i] = false;
    }
    best
}

/// Replay a solution trace against the puzzle numbers and check every
/// structural invariant: positions in bounds and never reused, division
/// exact, step values consistent, final value equal to the reported result.
fn verify_trace(puzzle: &Puzzle, solution: &Solution) {
    let numbers = puzzle.numbers();
    assert_eq!(solution.size, solution.steps.count() + 1);

    match &solution.steps {
        Steps::Chained {
            initial_index,
            initial,
            steps,
        } => {
            assert_eq!(numbers[*initial_index], *initial);

            let positions = solution.steps.consumed_positions();
            assert_eq!(positions.len(), solution.size);
            let distinct: HashSet<usize> = positions.iter().copied().collect();
            assert_eq!(distinct.len(), positions.len(), "a position was reused");
            assert!(positions.iter().all(|position| *position < puzzle.size()));

            let mut value = *initial;
            for step in steps {
                assert_eq!(numbers[step.index], step.operand);
                value = step
                    .op
                    .apply(value, step.operand)
                    .expect("every reported step is arithmetically valid");
                assert_eq!(value, step.value);
            }
            assert_eq!(value, solution.result);
        }
        Steps::Pairwise { steps } => {
            let mut working = numbers.to_vec();
            let mut retired: HashSet<usize> = HashSet::new();
            for step in steps {
                assert!(step.first < working.len());
                assert!(step.second < working.len());
                assert_ne!(step.first, step.second);
                assert!(!retired.contains(&step.first), "retired position reused");
                assert!(!retired.contains(&step.second), "retired position reused");

                assert_eq!(working[step.first], step.lhs);
                assert_eq!(working[step.second], step.rhs);
                let value = step
                    .op
                    .apply(step.lhs, step.rhs)
                    .expect("every reported step is arithmetically valid");
                assert_eq!(value, step.value);

                working[step.first] = value;
                retired.insert(step.second);
            }
            assert_eq!(working[steps.last().unwrap().first], solution.result);
        }
    }
}

#[test]
fn test_scenario_exact_chained() {
    let puzzle = Puzzle::new(vec![1, 3, 5, 8, 10, 50], 462).unwrap();
    let report = solve(&puzzle, &SearchConfig::default()).unwrap();

    let solution = report.solution.expect("462 is exactly reachable");
    assert_eq!(solution.distance, 0);
    assert_eq!(solution.result, 462);
    verify_trace(&puzzle, &solution);
}

#[test]
fn test_scenario_duplicate_numbers() {
    let puzzle = Puzzle::new(vec![3, 3, 8, 8, 50], 378).unwrap();
    let report = solve(&puzzle, &SearchConfig::default()).unwrap();

    let solution = report.solution.expect("378 is exactly reachable");
    assert_eq!(solution.distance, 0);
    assert_eq!(solution.result, 378);
    verify_trace(&puzzle, &solution);
}

#[test]
fn test_scenario_no_exact_solution() {
    let puzzle = Puzzle::new(vec![4, 6, 6, 8, 8, 4], 517).unwrap();
    let report = solve(&puzzle, &SearchConfig::default()).unwrap();

    // Exact search fails, so the approximate optimizer answers with the
    // provably closest reachable value.
    let solution = report.solution.expect("some value is always reachable");
    assert!(solution.distance > 0);
    assert_eq!(solution.distance, (517 - solution.result).abs());
    verify_trace(&puzzle, &solution);

    // Exhaustive enumeration agrees: no chained strategy gets closer, so the
    // bound did not stop tightening early.
    assert_eq!(
        solution.distance,
        minimal_chained_distance(puzzle.numbers(), 517)
    );
}

#[test]
fn test_scenario_pairwise_not_larger() {
    let puzzle = Puzzle::new(vec![1, 3, 5, 8, 10, 50], 462).unwrap();

    let chained = solve(&puzzle, &SearchConfig::default()).unwrap();
    let pairwise = solve(
        &puzzle,
        &SearchConfig::default().with_encoding(Encoding::Pairwise),
    )
    .unwrap();

    let chained_solution = chained.solution.unwrap();
    let pairwise_solution = pairwise.solution.unwrap();
    assert_eq!(pairwise_solution.distance, 0);
    verify_trace(&puzzle, &pairwise_solution);

    // The pairwise search space contains every chained strategy, so its
    // minimal exact solution cannot consume more numbers.
    assert!(pairwise_solution.size <= chained_solution.size);
}

#[test]
fn test_resilient_end_to_end() {
    let puzzle = Puzzle::new(vec![3, 5, 8, 10], 47).unwrap();
    let report = solve_resilient(&puzzle, &SearchConfig::default()).unwrap();

    let solution = report.solution.expect("a strategy always exists");
    verify_trace(&puzzle, &solution);

    // The reported distance is the worst case over the attack menu, so it
    // dominates the real outcome's distance.
    assert!(solution.distance >= (47 - solution.result).abs());
}
