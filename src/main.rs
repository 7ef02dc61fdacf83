//! makes-sense CLI
//!
//! Commands:
//!   validate - Check a table definition is exhaustive and unique
//!   expand   - Print a table's wildcard-free rows
//!   schema   - Print the JSON schema for table definitions or reports

mod cli;

use makes_sense::VERSION;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-V");

    // RUST_LOG wins; otherwise --verbose selects debug
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("makes_sense=debug")
    } else {
        EnvFilter::new("makes_sense=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let rest: Vec<String> = args[2..]
        .iter()
        .filter(|a| *a != "--verbose" && *a != "-V")
        .cloned()
        .collect();

    let result = match args[1].as_str() {
        "validate" => cli::cmd_validate(&rest),
        "expand" => cli::cmd_expand(&rest),
        "schema" => cli::cmd_schema(&rest),
        "version" | "--version" | "-v" => {
            println!("makes-sense {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
makes-sense - Decision tables that add up

USAGE:
    makes-sense <COMMAND> [OPTIONS]

COMMANDS:
    validate <table.yaml>            Check every combination is covered exactly once
    expand <table.yaml>              Print the wildcard-free rows
    schema [table|report|config]     Print JSON schema
    version                          Print version

OPTIONS:
    --json                            JSON output format (validate, expand)
    --config <file>                   Engine config (default: ./makes-sense.yaml if present)
    --verbose, -V                     Debug logging (RUST_LOG overrides)

EXAMPLES:
    makes-sense validate fizzbuzz.yaml
    makes-sense expand access.yaml --json
    RUST_LOG=makes_sense=trace makes-sense validate access.yaml
"#
    );
}
