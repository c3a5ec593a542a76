use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::SimConfig;

#[derive(Parser, Debug)]
#[command(
    name = "checkout-sim",
    about = "Discrete-event simulation of a multi-server FIFO checkout line"
)]
pub struct Args {
    /// TOML or JSON file supplying the base configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub servers: Option<usize>,
    #[arg(long)]
    pub horizon: Option<f64>,
    /// How long a customer waits in line before giving up.
    #[arg(long)]
    pub max_wait: Option<f64>,
    #[arg(long)]
    pub mean_interarrival: Option<f64>,
    #[arg(long)]
    pub rush_start: Option<f64>,
    #[arg(long)]
    pub rush_end: Option<f64>,
    #[arg(long)]
    pub rush_mean_interarrival: Option<f64>,
    /// Flat arrival intensity for the whole run, ignoring any rush window.
    #[arg(
        long,
        conflicts_with_all = ["rush_start", "rush_end", "rush_mean_interarrival"]
    )]
    pub no_rush: bool,
    #[arg(long)]
    pub service_mean: Option<f64>,
    #[arg(long)]
    pub service_std: Option<f64>,
    #[arg(long)]
    pub repair_duration: Option<f64>,
    #[arg(long)]
    pub base_failure_probability: Option<f64>,
    #[arg(long)]
    pub failure_increment: Option<f64>,
    /// Seed for all random draws; omit for the reproducible default of 0.
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Args> {
    Args::try_parse().map_err(|e| Error::Cli(e.to_string()))
}

/// Assembles the effective configuration: file (or defaults) as the base,
/// explicit flags on top.
pub fn build_config(args: Args) -> Result<(SimConfig, FormatArg)> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };

    if let Some(servers) = args.servers {
        config.servers = servers;
    }
    if let Some(horizon) = args.horizon {
        config.horizon = horizon;
    }
    if let Some(max_wait) = args.max_wait {
        config.max_wait = max_wait;
    }
    if let Some(mean) = args.mean_interarrival {
        config.arrivals.mean_interarrival = mean;
    }
    if args.no_rush {
        config.arrivals.rush = None;
    }
    if args.rush_start.is_some() || args.rush_end.is_some() || args.rush_mean_interarrival.is_some()
    {
        let mut rush = config.arrivals.rush.unwrap_or_default();
        if let Some(start) = args.rush_start {
            rush.start = start;
        }
        if let Some(end) = args.rush_end {
            rush.end = end;
        }
        if let Some(mean) = args.rush_mean_interarrival {
            rush.mean_interarrival = mean;
        }
        config.arrivals.rush = Some(rush);
    }
    if let Some(mean) = args.service_mean {
        config.service.mean = mean;
    }
    if let Some(std_dev) = args.service_std {
        config.service.std_dev = std_dev;
    }
    if let Some(repair) = args.repair_duration {
        config.failures.repair_duration = repair;
    }
    if let Some(probability) = args.base_failure_probability {
        config.failures.base_probability = probability;
    }
    if let Some(increment) = args.failure_increment {
        config.failures.per_use_increment = increment;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    Ok((config, args.format))
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["checkout-sim"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).expect("args should parse")
    }

    #[test]
    fn defaults_apply_without_flags() {
        let (config, format) = build_config(parse(&[])).expect("config should build");
        assert_eq!(config.servers, 3);
        assert_eq!(config.max_wait, 1.5);
        assert!(config.arrivals.rush.is_some());
        assert_eq!(format, FormatArg::Human);
    }

    #[test]
    fn flags_override_defaults() {
        let (config, format) = build_config(parse(&[
            "--servers",
            "5",
            "--max-wait",
            "0.5",
            "--seed",
            "42",
            "--format",
            "json",
        ]))
        .expect("config should build");
        assert_eq!(config.servers, 5);
        assert_eq!(config.max_wait, 0.5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(format, FormatArg::Json);
    }

    #[test]
    fn no_rush_clears_the_window() {
        let (config, _) = build_config(parse(&["--no-rush"])).expect("config should build");
        assert!(config.arrivals.rush.is_none());
    }

    #[test]
    fn partial_rush_flags_extend_the_default_window() {
        let (config, _) =
            build_config(parse(&["--rush-start", "10"])).expect("config should build");
        let rush = config.arrivals.rush.expect("rush should be present");
        assert_eq!(rush.start, 10.0);
        assert_eq!(rush.end, 50.0);
        assert_eq!(rush.mean_interarrival, 1.0);
    }

    #[test]
    fn no_rush_conflicts_with_rush_flags() {
        let result = Args::try_parse_from(["checkout-sim", "--no-rush", "--rush-start", "10"]);
        assert!(result.is_err());
    }
}
