//! Schema CLI command

use makes_sense::*;

pub fn cmd_schema(args: &[String]) -> Result<()> {
    let schema_name = args.first().map(|s| s.as_str()).unwrap_or("table");

    match schema_name {
        "list" => {
            println!("Available schemas: table, report, config");
            Ok(())
        }
        "table" => print_schema::<TableDefinition>(),
        "report" | "validate" => print_schema::<ValidationReport>(),
        "config" => print_schema::<EngineConfig>(),
        _ => Err(format!("Unknown schema: {}", schema_name).into()),
    }
}

fn print_schema<T: schemars::JsonSchema>() -> Result<()> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
