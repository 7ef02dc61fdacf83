//! Validation CLI command

use super::util::{load_config, load_table, parse_table_arg};
use makes_sense::*;

pub fn cmd_validate(args: &[String]) -> Result<()> {
    let Some(table_path) = parse_table_arg(args) else {
        return Err("Usage: makes-sense validate <table.yaml> [--json] [--config <file>]".into());
    };
    let json_output = args.contains(&"--json".to_string());

    let config = load_config(args)?;
    let table = load_table(table_path, &config)?;
    let outcome = table.validate();
    let report = ValidationReport::new(&table, &outcome);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_report());
        if report.is_valid {
            println!();
        }
    }

    // Exit code: 0 = valid, 1 = invalid
    if report.is_valid {
        Ok(())
    } else {
        Err(format!("{}: validation failed", table_path).into())
    }
}
