//! cogseq CLI - lists the available strategies and lexicons and runs
//! measured experiments.
//!
//! ```text
//! cogseq list
//! cogseq run palindrome --lexicon lex2 --runs 10 --seed 7 --json
//! ```
//!
//! Flags override `~/.cogseq/config.toml` (or the file given by
//! `--config`), which overrides the built-in defaults.

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cogseq_config::{CogseqConfig, catalog};
use cogseq_engine::{Experiment, Strategy};
use cogseq_types::Attribute;

use report::{Listing, TextReport};

#[derive(Parser)]
#[command(name = "cogseq")]
#[command(about = "Measure the complexity of cognitive sequence strategies")]
struct Cli {
    /// Config file to read instead of ~/.cogseq/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List strategies and catalog lexicons
    List,
    /// Run a strategy and report its complexity
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Strategy name, e.g. palindrome or serial_crossed
    strategy: Option<String>,
    /// Lexicon name from the catalog or the config file
    #[arg(long)]
    lexicon: Option<String>,
    /// Number of runs
    #[arg(long)]
    runs: Option<usize>,
    /// Random seed shared by all runs
    #[arg(long)]
    seed: Option<u64>,
    /// Fix the bias attribute instead of letting the policy choose
    #[arg(long, value_parser = parse_attribute)]
    bias: Option<Attribute>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_attribute(s: &str) -> Result<Attribute, String> {
    Attribute::parse(s).ok_or_else(|| format!("expected attribute1 or attribute2, got `{s}`"))
}

fn init_tracing(config_filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<CogseqConfig, cogseq_config::ConfigError> {
    match path {
        Some(path) => CogseqConfig::load_from(path),
        None => CogseqConfig::load().map(Option::unwrap_or_default),
    }
}

/// Combine flags, config file and defaults into one experiment. Returns the
/// lexicon name alongside for reporting.
fn build_experiment(args: &RunArgs, config: &CogseqConfig) -> Result<(Experiment, String)> {
    let defaults = config.experiment();

    let Some(name) = args.strategy.clone().or(defaults.strategy) else {
        bail!("no strategy given; pass one or set `strategy` under [experiment]");
    };
    let strategy: Strategy = name.parse()?;

    let lexicon_name = args
        .lexicon
        .clone()
        .or(defaults.lexicon)
        .unwrap_or_else(|| strategy.default_lexicon().to_string());
    let spec = config
        .lexicon(&lexicon_name)
        .with_context(|| format!("unknown lexicon `{lexicon_name}`"))?;
    let lexicon = spec.build()?;

    let bias = match (args.bias, defaults.bias.as_deref()) {
        (Some(bias), _) => Some(bias),
        (None, Some(name)) => Some(
            Attribute::parse(name)
                .with_context(|| format!("invalid bias `{name}` in config"))?,
        ),
        (None, None) => None,
    };

    let experiment = Experiment::new(strategy, lexicon)
        .with_runs(args.runs.or(defaults.runs).unwrap_or(1))
        .with_seed(args.seed.or(defaults.seed).unwrap_or(cogseq_core::DEFAULT_SEED))
        .with_bias(bias);
    Ok((experiment, lexicon_name))
}

fn run(args: &RunArgs, config: &CogseqConfig) -> Result<()> {
    let (experiment, lexicon) = build_experiment(args, config)?;
    tracing::info!(
        strategy = experiment.strategy.name(),
        lexicon = %lexicon,
        runs = experiment.runs,
        seed = experiment.seed,
        "starting experiment"
    );
    let report = experiment
        .run()
        .with_context(|| format!("{} failed on {lexicon}", experiment.strategy))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{}",
            TextReport {
                report: &report,
                lexicon: &lexicon,
            }
        );
    }
    Ok(())
}

fn list(config: &CogseqConfig) {
    let mut lexicons = config.lexicons.clone();
    lexicons.extend(
        catalog()
            .into_iter()
            .filter(|spec| !config.lexicons.iter().any(|own| own.name == spec.name)),
    );
    println!(
        "{}",
        Listing {
            lexicons: &lexicons,
        }
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = load_config(cli.config.as_ref());
    init_tracing(loaded.as_ref().ok().and_then(CogseqConfig::log_filter));
    let config = loaded.context("loading configuration")?;

    match &cli.command {
        Command::List => {
            list(&config);
            Ok(())
        }
        Command::Run(args) => run(args, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(strategy: Option<&str>) -> RunArgs {
        RunArgs {
            strategy: strategy.map(str::to_string),
            lexicon: None,
            runs: None,
            seed: None,
            bias: None,
            json: false,
        }
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "cogseq", "run", "seriate", "--lexicon", "lex3", "--runs", "4", "--seed", "9",
            "--bias", "attribute2", "--json",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.strategy.as_deref(), Some("seriate"));
        assert_eq!(args.lexicon.as_deref(), Some("lex3"));
        assert_eq!(args.runs, Some(4));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.bias, Some(Attribute::Second));
        assert!(args.json);
    }

    #[test]
    fn cli_rejects_unknown_bias() {
        assert!(Cli::try_parse_from(["cogseq", "run", "iterate", "--bias", "color"]).is_err());
    }

    #[test]
    fn defaults_fill_in_missing_flags() {
        let (experiment, lexicon) =
            build_experiment(&run_args(Some("serial_crossed")), &CogseqConfig::default()).unwrap();
        assert_eq!(experiment.strategy, Strategy::SerialCrossed);
        assert_eq!(lexicon, "lex4");
        assert_eq!(experiment.runs, 1);
        assert_eq!(experiment.seed, cogseq_core::DEFAULT_SEED);
        assert_eq!(experiment.bias, None);
    }

    #[test]
    fn config_values_apply_and_flags_win() {
        let config: CogseqConfig = toml::from_str(
            r#"
            [experiment]
            strategy = "iterate"
            lexicon = "lex2"
            runs = 3
            seed = 5
            bias = "attribute1"
            "#,
        )
        .unwrap();
        let (experiment, lexicon) = build_experiment(&run_args(None), &config).unwrap();
        assert_eq!(experiment.strategy, Strategy::Iterate);
        assert_eq!(lexicon, "lex2");
        assert_eq!(experiment.runs, 3);
        assert_eq!(experiment.seed, 5);
        assert_eq!(experiment.bias, Some(Attribute::First));

        let mut args = run_args(Some("alternate"));
        args.runs = Some(8);
        let (experiment, _) = build_experiment(&args, &config).unwrap();
        assert_eq!(experiment.strategy, Strategy::Alternate);
        assert_eq!(experiment.runs, 8);
    }

    #[test]
    fn missing_strategy_and_unknown_names_are_errors() {
        let config = CogseqConfig::default();
        assert!(build_experiment(&run_args(None), &config).is_err());
        assert!(build_experiment(&run_args(Some("zigzag")), &config).is_err());
        let mut args = run_args(Some("iterate"));
        args.lexicon = Some("nowhere".to_string());
        let err = build_experiment(&args, &config).unwrap_err();
        assert!(err.to_string().contains("nowhere"));
    }
}
