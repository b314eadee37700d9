//! slaekit CLI.
//!
//! Solves small dense systems Ax = b with Jacobi, Gauss-Seidel or steepest
//! descent and prints the per-iteration history.

mod input;
mod output;

use std::process::ExitCode;

use anyhow::{Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use slaekit_solver::dispatch::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use slaekit_solver::{
    MAX_ORDER, Method, SolverConfig, compare_methods, is_diagonally_dominant, is_symmetric,
    is_symmetric_positive_definite, leading_principal_minors, solve, stability_warnings,
};

use crate::input::{parse_matrix, parse_vector};
use crate::output::{ComparisonRow, SolveReport, print_comparison, print_solve_report};

#[derive(Parser)]
#[command(name = "slaekit")]
#[command(about = "Iterative solvers for small dense linear systems")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SystemArgs {
    /// Coefficient matrix, rows separated by ';' (e.g. "4,1;2,3")
    #[arg(short, long)]
    matrix: String,

    /// Right-hand side vector (e.g. "1,2")
    #[arg(short, long)]
    rhs: String,

    /// Stopping tolerance on the max-norm iterate difference
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Iteration cap
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Output results as JSON
    #[arg(long)]
    json: bool,
}

impl SystemArgs {
    fn config(&self) -> SolverConfig {
        SolverConfig::default()
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a system with one method
    Solve {
        /// jacobi, gauss-seidel or gradient
        #[arg(long, default_value = "jacobi", value_parser = parse_method)]
        method: Method,

        /// Refuse to solve if any stability warning is raised
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        system: SystemArgs,
    },

    /// Solve a system with every method and compare
    Compare {
        #[command(flatten)]
        system: SystemArgs,
    },

    /// Report convergence conditions and stability warnings for a matrix
    Check {
        /// Coefficient matrix, rows separated by ';'
        #[arg(short, long)]
        matrix: String,

        /// Method to check warnings for (all methods if omitted)
        #[arg(long, value_parser = parse_method)]
        method: Option<Method>,
    },
}

fn parse_method(name: &str) -> std::result::Result<Method, String> {
    Method::from_name(name).ok_or_else(|| format!("unknown method '{}'", name))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Only fails if a logger is already installed
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Solve {
            method,
            strict,
            system,
        } => cmd_solve(method, strict, &system),
        Commands::Compare { system } => cmd_compare(&system),
        Commands::Check { matrix, method } => cmd_check(&matrix, method),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_solve(method: Method, strict: bool, system: &SystemArgs) -> Result<()> {
    let a = parse_matrix(&system.matrix)?;
    let b = parse_vector(&system.rhs)?;

    let warnings: Vec<String> = stability_warnings(&a, method)
        .iter()
        .map(ToString::to_string)
        .collect();
    for w in &warnings {
        eprintln!("Warning: {}", w);
    }
    if strict && !warnings.is_empty() {
        bail!("{} stability warning(s) raised, not solving (--strict)", warnings.len());
    }

    let history = solve(method, &a, &b, &system.config())?;
    let report = SolveReport::new(&history, &a, &b, warnings);

    if system.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_solve_report(&report);
    }
    Ok(())
}

fn cmd_compare(system: &SystemArgs) -> Result<()> {
    let a = parse_matrix(&system.matrix)?;
    let b = parse_vector(&system.rhs)?;

    let outcomes = compare_methods(&a, &b, &system.config());
    let rows: Vec<ComparisonRow> = outcomes
        .iter()
        .map(|o| ComparisonRow::new(o, &a, &b))
        .collect();

    if system.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_comparison(&rows);
    }

    if rows.iter().any(|r| r.converged) {
        Ok(())
    } else {
        Err(anyhow!("no method converged"))
    }
}

fn cmd_check(matrix: &str, method: Option<Method>) -> Result<()> {
    let a = parse_matrix(matrix)?;

    println!("Matrix Diagnostics");
    println!("==================");
    println!();
    println!("  Order:                {}x{}", a.nrows(), a.ncols());
    println!("  Diagonally dominant:  {}", yes_no(is_diagonally_dominant(&a)));
    println!("  Symmetric:            {}", yes_no(is_symmetric(&a)));
    if a.is_square() && a.nrows() <= MAX_ORDER {
        let minors: Vec<String> = leading_principal_minors(&a)
            .iter()
            .map(|d| format!("{:.6e}", d))
            .collect();
        println!("  Leading minors:       {}", minors.join(", "));
        println!(
            "  Positive definite:    {}",
            yes_no(is_symmetric_positive_definite(&a))
        );
    }
    println!();

    let methods = match method {
        Some(m) => vec![m],
        None => Method::ALL.to_vec(),
    };
    for m in methods {
        let warnings = stability_warnings(&a, m);
        if warnings.is_empty() {
            println!("{}: no warnings", m);
        } else {
            println!("{}:", m);
            for w in warnings {
                println!("  - {}", w);
            }
        }
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn stopping_rule_defaults_match_solver() {
        let cli = Cli::try_parse_from(["slaekit", "solve", "-m", "4,1;2,3", "-r", "1,2"]).unwrap();
        let Commands::Solve { method, system, .. } = cli.command else {
            panic!("expected solve subcommand");
        };
        let config = system.config();
        let defaults = SolverConfig::default();
        assert_eq!(method, Method::Jacobi);
        assert_eq!(config.tolerance, defaults.tolerance);
        assert_eq!(config.max_iterations, defaults.max_iterations);
    }

    #[test]
    fn stopping_rule_can_be_overridden() {
        let cli = Cli::try_parse_from([
            "slaekit",
            "compare",
            "-m",
            "4,1;2,3",
            "-r",
            "1,2",
            "--tolerance",
            "1e-9",
            "--max-iterations",
            "50",
        ])
        .unwrap();
        let Commands::Compare { system } = cli.command else {
            panic!("expected compare subcommand");
        };
        assert_eq!(system.config().tolerance, 1e-9);
        assert_eq!(system.config().max_iterations, 50);
    }
}
