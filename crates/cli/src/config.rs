//! Command-line flags with environment fallbacks.

use std::path::PathBuf;

use clap::Parser;
use clap::builder::TypedValueParser;

/// Default number of slots, matching the classic eight-slot bag.
pub const DEFAULT_CAPACITY: usize = 8;

#[derive(Debug, Clone, Parser)]
#[command(name = "armory")]
#[command(about = "Manage a small bag of weapons, armor, rings and shoes.")]
pub struct Config {
    /// Number of items the manager can hold
    #[arg(
        long,
        env = "ARMORY_CAPACITY",
        default_value_t = DEFAULT_CAPACITY,
        value_parser = clap::value_parser!(u32).range(1..).map(|v| v as usize)
    )]
    pub capacity: usize,

    /// Run steps from a JSON script instead of prompting on stdin
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Render the collection as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl Config {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};

    /// Parse flags with the `ARMORY_CAPACITY` fallback switched off, so the
    /// caller's environment cannot leak in.
    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        let matches = Config::command()
            .mut_arg("capacity", |arg| arg.env(None::<&str>))
            .try_get_matches_from(args.iter().copied())?;
        Config::from_arg_matches(&matches)
    }

    #[test]
    fn defaults_without_flags() {
        let config = parse(&["armory"]).unwrap();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.script, None);
        assert!(!config.json);
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&["armory", "--capacity", "3", "--script", "s.json", "--json"]).unwrap();
        assert_eq!(config.capacity, 3);
        assert_eq!(config.script, Some(PathBuf::from("s.json")));
        assert!(config.json);
    }

    #[test]
    fn zero_capacity_is_refused() {
        assert!(parse(&["armory", "--capacity", "0"]).is_err());
    }

    #[test]
    fn non_numeric_capacity_is_refused() {
        assert!(parse(&["armory", "--capacity", "lots"]).is_err());
    }
}
