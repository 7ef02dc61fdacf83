//! CLI utility helpers

use makes_sense::{DecisionTable, EngineConfig, Result, TableDefinition};
use std::path::{Path, PathBuf};

/// Parse --config argument to find the engine config file
pub fn parse_config_arg(args: &[String]) -> Option<PathBuf> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--config" || arg == "-c" {
            if let Some(path) = args.get(i + 1) {
                return Some(PathBuf::from(path));
            }
        }
    }
    None
}

/// First positional argument: not a flag and not the value of --config
pub fn parse_table_arg(args: &[String]) -> Option<&str> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--config" || arg == "-c" {
            skip_next = true;
        } else if !arg.starts_with('-') {
            return Some(arg);
        }
    }
    None
}

/// Explicit --config, else `makes-sense.yaml` in the working directory
pub fn load_config(args: &[String]) -> Result<EngineConfig> {
    match parse_config_arg(args) {
        Some(path) => EngineConfig::load(&path),
        None => EngineConfig::discover(&std::env::current_dir()?),
    }
}

/// Read a definition file and build its table
pub fn load_table(path: &str, config: &EngineConfig) -> Result<DecisionTable> {
    TableDefinition::load(Path::new(path))?.into_table(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_table_arg_after_flags() {
        assert_eq!(parse_table_arg(&args(&["--json", "t.yaml"])), Some("t.yaml"));
        assert_eq!(
            parse_table_arg(&args(&["--config", "c.yaml", "t.yaml", "--json"])),
            Some("t.yaml")
        );
        assert_eq!(parse_table_arg(&args(&["t.yaml", "-c", "c.yaml"])), Some("t.yaml"));
    }

    #[test]
    fn test_table_arg_absent() {
        assert_eq!(parse_table_arg(&args(&["--json"])), None);
        assert_eq!(parse_table_arg(&args(&["--config", "c.yaml"])), None);
    }

    #[test]
    fn test_config_arg() {
        assert_eq!(
            parse_config_arg(&args(&["t.yaml", "--config", "c.yaml"])),
            Some(PathBuf::from("c.yaml"))
        );
        assert_eq!(parse_config_arg(&args(&["t.yaml"])), None);
    }
}
