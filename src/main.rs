//! Train a random forest on the passenger training table and write survival
//! predictions for the test table.

use std::path::PathBuf;

use survivor_forest::config::{PipelineConfig, load_config};
use survivor_forest::{logging, pipeline};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let mut config = match &options.config {
        Some(path) => load_config(path).map_err(|err| err.to_string())?,
        None => PipelineConfig::default(),
    };
    if let Some(train) = options.train {
        config.train = train;
    }
    if let Some(test) = options.test {
        config.test = test;
    }
    if let Some(output) = options.output {
        config.output = output;
    }

    pipeline::run(&config).map_err(|err| err.to_string())?;
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
struct CliOptions {
    config: Option<PathBuf>,
    train: Option<PathBuf>,
    test: Option<PathBuf>,
    output: Option<PathBuf>,
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        let slot = match flag {
            "-h" | "--help" => return Err(help_text()),
            "--config" => &mut options.config,
            "--train" => &mut options.train,
            "--test" => &mut options.test,
            "--out" => &mut options.output,
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        };
        idx += 1;
        let value = args
            .get(idx)
            .ok_or_else(|| format!("{flag} requires a value"))?;
        *slot = Some(PathBuf::from(value));
        idx += 1;
    }
    Ok(options)
}

fn help_text() -> String {
    [
        "survivor-forest",
        "",
        "Grid-searches a random forest on the passenger training table and writes",
        "survival predictions for the test table.",
        "",
        "Usage:",
        "  survivor-forest [--train <csv>] [--test <csv>] [--out <csv>] [--config <toml>]",
        "",
        "Options:",
        "  --train <csv>    Labeled passengers (default: data/train.csv).",
        "  --test <csv>     Passengers to predict (default: data/test.csv).",
        "  --out <csv>      Submission output (default: data/submission.csv).",
        "  --config <toml>  Paths and search grid; flags above take precedence.",
        "",
        "RUST_LOG filters log output (default: info).",
    ]
    .join("\n")
}
