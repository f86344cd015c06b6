use clap::{Parser, Subcommand, ValueEnum};

use reckon::puzzle::Puzzle;
use reckon::search::{
    solve, solve_resilient, Encoding, SearchConfig, SearchReport, SearchStatistics, Solution,
};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "reckon")]
#[command(about = "reckon - arithmetic combination solver")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// CLI encoding selection
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum CliEncoding {
    /// Fold one fresh number into a running result per step
    #[default]
    Chained,
    /// Combine any two live numbers per step
    Pairwise,
}

impl From<CliEncoding> for Encoding {
    fn from(cli: CliEncoding) -> Self {
        match cli {
            CliEncoding::Chained => Encoding::Chained,
            CliEncoding::Pairwise => Encoding::Pairwise,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a combination of the numbers reaching the goal
    #[command(allow_negative_numbers = true)]
    Solve {
        /// Input numbers (at least two)
        #[arg(required = true, num_args = 2..)]
        numbers: Vec<i64>,
        /// Target value
        #[arg(short, long)]
        goal: i64,
        /// Step encoding to search with
        #[arg(short, long, value_enum, default_value = "chained")]
        encoding: CliEncoding,
        /// Minimize the worst-case distance under last-operand substitution
        #[arg(short, long)]
        resilient: bool,
        /// Print search progress and statistics
        #[arg(short, long)]
        verbose: bool,
    },
    /// Run the showcase scenarios
    Demo,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command {
        Commands::Solve {
            numbers,
            goal,
            encoding,
            resilient,
            verbose,
        } => {
            if resilient && matches!(encoding, CliEncoding::Pairwise) {
                return Err("resilient search uses the chained encoding only".into());
            }
            let puzzle = Puzzle::new(numbers, goal)?;
            let config = SearchConfig::default()
                .with_encoding(encoding.into())
                .with_verbose(verbose);
            if resilient {
                run_resilient(&puzzle, &config)?;
            } else {
                run_solve(&puzzle, &config)?;
            }
        }
        Commands::Demo => demo()?,
    }

    Ok(())
}

fn run_solve(puzzle: &Puzzle, config: &SearchConfig) -> Result<(), Box<dyn std::error::Error>> {
    print_problem(puzzle);
    let report = solve(puzzle, config)?;
    print_report(&report, false, config.verbose);
    Ok(())
}

fn run_resilient(puzzle: &Puzzle, config: &SearchConfig) -> Result<(), Box<dyn std::error::Error>> {
    print_problem(puzzle);
    let report = solve_resilient(puzzle, config)?;
    print_report(&report, true, config.verbose);
    Ok(())
}

fn print_problem(puzzle: &Puzzle) {
    println!("{}", puzzle);
    println!("Solution:");
    println!();
}

fn print_report(report: &SearchReport, resilient: bool, verbose: bool) {
    match &report.solution {
        Some(solution) => print_solution(solution, resilient),
        None => println!("unsat"),
    }
    if verbose {
        print_statistics(&report.statistics);
    }
    println!();
}

fn print_solution(solution: &Solution, resilient: bool) {
    print!("{}", solution.steps);
    println!("Final number: {}", solution.result);
    if resilient {
        println!("Distance from goal after attack: {}", solution.distance);
    } else {
        println!("Distance from goal: {}", solution.distance);
    }
    println!("Numbers used: {}", solution.size);
}

fn print_statistics(statistics: &SearchStatistics) {
    println!();
    println!("Search statistics:");
    println!("  Solver queries: {}", statistics.solver_queries);
    println!("  Improvements found: {}", statistics.improvements_found);
    println!(
        "  Step counts explored: {}",
        statistics.step_counts_explored
    );
    println!("  Elapsed time: {:?}", statistics.elapsed_time);
}

/// Fixed showcase scenarios exercising every search mode.
fn demo() -> Result<(), Box<dyn std::error::Error>> {
    let chained = SearchConfig::default();
    let pairwise = SearchConfig::default().with_encoding(Encoding::Pairwise);

    println!("Chained encoding example:\n");
    run_solve(&Puzzle::new(vec![1, 3, 5, 8, 10, 50], 462)?, &chained)?;

    println!("An example with repetitions:\n");
    run_solve(&Puzzle::new(vec![3, 3, 8, 8, 50], 378)?, &chained)?;
    println!("The number 3 is used twice.\n");

    println!("An example without an exact solution:\n");
    run_solve(&Puzzle::new(vec![4, 6, 6, 8, 8, 4], 517)?, &chained)?;

    println!("Pairwise encoding example:\n");
    run_solve(&Puzzle::new(vec![1, 3, 5, 8, 10, 50], 462)?, &pairwise)?;

    println!("Encoding comparison:\n");
    println!("Using the {} encoding:\n", chained.encoding);
    run_solve(&Puzzle::new(vec![1, 3, 5, 8, 10, 50], 274)?, &chained)?;
    println!("Using the {} encoding:\n", pairwise.encoding);
    run_solve(&Puzzle::new(vec![1, 3, 5, 8, 10, 50], 274)?, &pairwise)?;
    println!("The pairwise encoding may use fewer numbers.\n");

    println!("Resilient example:\n");
    run_resilient(&Puzzle::new(vec![1, 3, 5, 8, 10, 50], 462)?, &chained)?;

    Ok(())
}
