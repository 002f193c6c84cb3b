use barrierlp_solver::{InteriorPointSolver, LpProblem, SimplexResult, SimplexSolver, SolverError};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const DEFAULT_MAX_ITERATIONS: usize = 10000;

#[derive(Parser)]
#[command(name = "barrierlp")]
#[command(about = "Simplex and interior-point solvers for max cᵀx s.t. Ax <= b, x >= 0", long_about = None)]
struct Cli {
    /// Log solver progress to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file and print the optimal solution
    Solve {
        /// JSON file with `objective`, `constraints` and `rhs`
        file: PathBuf,
        /// Which algorithm(s) to run
        #[arg(short, long, value_enum, default_value_t = Method::Both)]
        method: Method,
        /// Approximation accuracy
        #[arg(long, default_value_t = 1e-4)]
        eps: f64,
        /// Barrier shrink factor for the interior-point method (repeatable)
        #[arg(short, long, default_values_t = [0.5])]
        alpha: Vec<f64>,
        /// Maximum interior-point outer iterations
        #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
    /// Solve the built-in three variable sample problem
    Demo {
        /// Approximation accuracy
        #[arg(long, default_value_t = 1e-4)]
        eps: f64,
        /// Barrier shrink factor for the interior-point method (repeatable)
        #[arg(short, long, default_values_t = [0.5, 0.9])]
        alpha: Vec<f64>,
        /// Maximum interior-point outer iterations
        #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,
    },
    /// Check a problem file for errors
    Check {
        /// The file to check
        file: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    Simplex,
    InteriorPoint,
    Both,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

#[derive(Serialize)]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    simplex: Option<SimplexResult>,
    interior_point: Vec<InteriorPointReport>,
}

#[derive(Serialize)]
struct InteriorPointReport {
    alpha: f64,
    values: Vec<f64>,
    objective: f64,
    iterations: usize,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose > 0 {
        let level = if cli.verbose > 1 { Level::TRACE } else { Level::DEBUG };
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish();
        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Failed to set tracing subscriber: {}", e);
            std::process::exit(1);
        }
    }

    match cli.command {
        Commands::Solve {
            file,
            method,
            eps,
            alpha,
            max_iterations,
            format,
        } => {
            let problem = load_problem(&file);
            let report = match solve(&problem, method, eps, &alpha, max_iterations) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Solve error: {}", e);
                    std::process::exit(1);
                }
            };

            match format {
                Format::Json => match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error writing JSON: {}", e);
                        std::process::exit(1);
                    }
                },
                Format::Pretty => print_report(&report),
            }
        }
        Commands::Demo {
            eps,
            alpha,
            max_iterations,
        } => {
            // maximize 2x1 + 3x2 + 4x3
            // subject to:
            //   3x1 + 2x2 +  x3 <= 10
            //   2x1 + 5x2 + 3x3 <= 15
            //   4x1 +  x2 + 2x3 <= 8
            //   x1, x2, x3 >= 0
            let problem = demo_problem();

            match solve(&problem, Method::Both, eps, &alpha, max_iterations) {
                Ok(report) => print_report(&report),
                Err(e) => {
                    println!("The problem does not have a solution! ({})", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Check { file } => {
            let problem = load_problem(&file);
            match problem.validate() {
                Ok(()) => {
                    println!("✓ {} is valid", file.display());
                    println!("  {} variables", problem.num_variables());
                    println!("  {} constraints", problem.num_constraints());
                    if let Some(note) = interior_point_note(&problem) {
                        println!("  note: {}", note);
                    }
                }
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn load_problem(path: &Path) -> LpProblem {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    match parse_problem(&source) {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_problem(source: &str) -> Result<LpProblem, serde_json::Error> {
    serde_json::from_str(source)
}

/// Why the interior-point method will refuse this problem, if it will
fn interior_point_note(problem: &LpProblem) -> Option<String> {
    problem.first_non_positive_rhs().map(|(i, b)| {
        format!(
            "right-hand side {} is {}, interior-point method unavailable",
            i, b
        )
    })
}

fn demo_problem() -> LpProblem {
    LpProblem::new(
        vec![2.0, 3.0, 4.0],
        vec![
            vec![3.0, 2.0, 1.0],
            vec![2.0, 5.0, 3.0],
            vec![4.0, 1.0, 2.0],
        ],
        vec![10.0, 15.0, 8.0],
    )
}

/// Run the requested methods. With `Method::Both` the simplex solve must
/// succeed before any interior-point solve is attempted.
fn solve(
    problem: &LpProblem,
    method: Method,
    eps: f64,
    alphas: &[f64],
    max_iterations: usize,
) -> Result<Report, SolverError> {
    let simplex = match method {
        Method::Simplex | Method::Both => Some(SimplexSolver::new().with_tolerance(eps).solve(problem)?),
        Method::InteriorPoint => None,
    };

    let mut interior_point = Vec::new();
    if method != Method::Simplex {
        for &alpha in alphas {
            let solution = InteriorPointSolver::new(alpha)
                .with_tolerance(eps)
                .with_max_iterations(max_iterations)
                .solve(problem)?;
            interior_point.push(InteriorPointReport {
                alpha,
                objective: problem.objective_value(solution.values()),
                iterations: solution.iterations(),
                values: solution.into_values(),
            });
        }
    }

    Ok(Report {
        simplex,
        interior_point,
    })
}

fn print_report(report: &Report) {
    if let Some(ref result) = report.simplex {
        println!("--- Simplex Method ---");
        println!();
        println!("x* by Simplex algorithm: {}", format_vector(result.values()));
        println!(
            "Maximum value of the objective function: {:.4}",
            result.objective()
        );
        println!();
    }

    if !report.interior_point.is_empty() {
        println!("--- Interior-Point Method ---");
        println!();
        for ip in &report.interior_point {
            println!(
                "x* by Interior-Point algorithm (alpha = {}): {}",
                ip.alpha,
                format_vector(&ip.values)
            );
            println!(
                "Maximum value of the objective function (alpha = {}): {:.4}",
                ip.alpha, ip.objective
            );
        }
    }
}

/// `[a, b, c]` with 4 decimal places per entry
fn format_vector(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{:.4}", v)).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vector() {
        assert_eq!(format_vector(&[0.0, 6.0 / 7.0, 25.0 / 7.0]), "[0.0000, 0.8571, 3.5714]");
        assert_eq!(format_vector(&[]), "[]");
    }

    #[test]
    fn test_parse_problem() {
        let source = r#"{
            "objective": [3.0, 2.0],
            "constraints": [[1.0, 1.0], [1.0, 0.0], [0.0, 1.0]],
            "rhs": [4.0, 3.0, 3.0]
        }"#;

        let problem = parse_problem(source).expect("valid problem");

        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_constraints(), 3);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_parse_problem_missing_field() {
        assert!(parse_problem(r#"{"objective": [1.0], "rhs": [1.0]}"#).is_err());
    }

    #[test]
    fn test_interior_point_note() {
        let mut problem = demo_problem();
        assert_eq!(interior_point_note(&problem), None);

        problem.rhs[1] = f64::NAN;
        assert_eq!(
            interior_point_note(&problem).as_deref(),
            Some("right-hand side 1 is NaN, interior-point method unavailable")
        );

        problem.rhs[1] = 15.0;
        problem.rhs[2] = -1.0;
        assert!(interior_point_note(&problem).is_some());
    }

    #[test]
    fn test_demo_iteration_cap_is_applied() {
        let result = solve(&demo_problem(), Method::Both, 1e-4, &[0.5], 3);
        assert!(matches!(result, Err(SolverError::IterationLimit { iterations: 3 })));
    }

    #[test]
    fn test_demo_report() {
        let report = solve(&demo_problem(), Method::Both, 1e-4, &[0.5, 0.9], DEFAULT_MAX_ITERATIONS).unwrap();

        let simplex = report.simplex.as_ref().expect("simplex result");
        assert_eq!(format_vector(simplex.values()), "[0.0000, 0.8571, 3.5714]");
        assert_eq!(report.interior_point.len(), 2);
        for ip in &report.interior_point {
            assert_eq!(format_vector(&ip.values), "[0.0000, 0.8571, 3.5714]");
            assert_eq!(format!("{:.4}", ip.objective), "16.8571");
        }
    }

    #[test]
    fn test_simplex_only_skips_interior_point() {
        let report = solve(&demo_problem(), Method::Simplex, 1e-4, &[0.5], DEFAULT_MAX_ITERATIONS).unwrap();
        assert!(report.simplex.is_some());
        assert!(report.interior_point.is_empty());
    }

    #[test]
    fn test_both_stops_on_simplex_failure() {
        let problem = LpProblem::new(vec![1.0, 1.0], vec![vec![-1.0, 1.0]], vec![1.0]);
        let result = solve(&problem, Method::Both, 1e-4, &[0.5], DEFAULT_MAX_ITERATIONS);
        assert!(matches!(result, Err(SolverError::Unbounded)));
    }

    #[test]
    fn test_json_report() {
        let report = solve(&demo_problem(), Method::InteriorPoint, 1e-4, &[0.5], DEFAULT_MAX_ITERATIONS).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("simplex").is_none());
        assert_eq!(json["interior_point"][0]["alpha"], 0.5);
        assert_eq!(json["interior_point"][0]["values"].as_array().unwrap().len(), 3);
    }
}
