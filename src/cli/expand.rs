//! Expansion CLI command

use super::util::{load_config, load_table, parse_table_arg};
use makes_sense::*;

pub fn cmd_expand(args: &[String]) -> Result<()> {
    let Some(table_path) = parse_table_arg(args) else {
        return Err("Usage: makes-sense expand <table.yaml> [--json] [--config <file>]".into());
    };

    let json_output = args.contains(&"--json".to_string());
    let config = load_config(args)?;
    let table = load_table(table_path, &config)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(table.expanded())?);
        return Ok(());
    }

    let names = table.condition_names();
    println!("{} ({} rows → {} expanded)", table.name(), table.rows().len(), table.expanded().len());
    println!("  row | {} | result", names.join(" | "));
    for row in table.expanded() {
        let cells: Vec<_> = row.conditions.iter().map(|l| l.to_string()).collect();
        println!("  {:>3} | {} | {}", row.source_row, cells.join(" | "), row.result);
    }
    Ok(())
}
