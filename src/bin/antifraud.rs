//! Command-line entry point.
//!
//! ```text
//! antifraud batch_payment.csv stream_payment.csv output1.txt output2.txt output3.txt
//! antifraud --config run.json -v --summary
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use antifraud::Config;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

#[cfg(feature = "alloc-mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "antifraud")]
#[command(version)]
#[command(about = "Flags payments between parties not already close in the transaction graph", long_about = None)]
struct Cli {
    /// Batch input, stream input, then one output per feature
    #[arg(
        value_names = ["BATCH", "STREAM", "OUTPUT1", "OUTPUT2", "OUTPUT3"],
        num_args = 5,
        required_unless_present = "config",
        conflicts_with = "config"
    )]
    paths: Vec<PathBuf>,

    /// JSON run configuration instead of positional paths
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv); -v also logs each skipped record
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run the feature passes one after another
    #[arg(long, default_value_t = false)]
    serial: bool,

    /// Print a JSON run summary to stdout
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let print_summary = cli.summary;
    let config = resolve_config(cli)?;

    let summary = antifraud::run(&config).context("antifraud run failed")?;

    if print_summary {
        let json = serde_json::to_string_pretty(&summary).context("serializing run summary")?;
        println!("{json}");
    }

    Ok(())
}

/// Builds the run configuration, applying command-line switches on top.
fn resolve_config(cli: Cli) -> Result<Config> {
    let mut config = match cli.config {
        Some(path) => Config::from_json_file(&path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => config_from_paths(cli.paths)?,
    };
    config.verbose |= cli.verbose > 0;
    config.parallel &= !cli.serial;
    Ok(config)
}

fn config_from_paths(paths: Vec<PathBuf>) -> Result<Config> {
    let [batch, stream, output1, output2, output3]: [PathBuf; 5] = paths
        .try_into()
        .map_err(|paths: Vec<PathBuf>| anyhow!("expected 5 paths, got {}", paths.len()))?;
    Ok(Config::new(batch, stream, [output1, output2, output3]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATHS: [&str; 6] = ["antifraud", "batch.csv", "stream.csv", "o1.txt", "o2.txt", "o3.txt"];

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn five_positional_paths() {
        let config = resolve_config(parse(&PATHS).unwrap()).unwrap();
        assert_eq!(config.batch, PathBuf::from("batch.csv"));
        assert_eq!(config.stream, PathBuf::from("stream.csv"));
        assert_eq!(
            config.outputs,
            vec![PathBuf::from("o1.txt"), PathBuf::from("o2.txt"), PathBuf::from("o3.txt")]
        );
        assert!(config.parallel);
        assert!(!config.verbose);
    }

    #[test]
    fn wrong_path_count_is_rejected() {
        assert!(parse(&PATHS[..5]).is_err());
        assert!(parse(&["antifraud"]).is_err());
        assert!(config_from_paths(vec![PathBuf::from("a"), PathBuf::from("b")]).is_err());
    }

    #[test]
    fn paths_conflict_with_config_file() {
        let mut args = PATHS.to_vec();
        args.extend(["--config", "run.json"]);
        assert!(parse(&args).is_err());

        let cli = parse(&["antifraud", "--config", "run.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("run.json")));
        assert!(cli.paths.is_empty());
    }

    #[test]
    fn switches_override_the_configuration() {
        let mut args = PATHS.to_vec();
        args.extend(["-vv", "--serial", "--summary"]);
        let cli = parse(&args).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.summary);

        let config = resolve_config(cli).unwrap();
        assert!(config.verbose);
        assert!(!config.parallel);
    }

    #[test]
    fn switches_apply_to_json_configuration() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(
            &path,
            r#"{"batch": "b", "stream": "s", "outputs": ["1", "2", "3"], "parallel": true}"#,
        )
        .unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let cli = parse(&["antifraud", "--config", &path_arg, "-v", "--serial"]).unwrap();
        let config = resolve_config(cli).unwrap();
        assert_eq!(config.batch, PathBuf::from("b"));
        assert!(config.verbose);
        assert!(!config.parallel);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = parse(&["antifraud", "--config", "/nonexistent/run.json"]).unwrap();
        assert!(resolve_config(cli).is_err());
    }
}
