//! Offline front end: runs one pipeline operation and prints the JSON the
//! HTTP service would return.
//!
//!   leafcare classify --model model/leaf.json --image leaf.jpg --lang ta
//!   leafcare fertilizer --plant Tomato --stage Vegetative --soil Loamy --temperature 25
//!   leafcare crops --soil Clay --location Coimbatore --temperature 28 --range 25-30 --season Autumn

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use leafcare::agronomy::{crops, fertilizer, CropQuery, FertilizerQuery};
use leafcare::config::{default_log_filter, DEFAULT_IMAGE_SIZE};
use leafcare::response::{crop_report, fertilizer_report};
use leafcare::{AppContext, NetworkClassifier, NpkModel, PipelineError, RuleBook};

#[derive(Debug, Parser)]
#[command(name = "leafcare", version, about = "Leaf disease and agronomy advice from the command line")]
struct Cli {
    /// JSON rule book replacing the built-in tables.
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a leaf photo.
    Classify {
        #[arg(long)]
        model: PathBuf,
        #[arg(long)]
        image: PathBuf,
        #[arg(long, default_value = "en")]
        lang: String,
        #[arg(long, default_value_t = DEFAULT_IMAGE_SIZE)]
        image_size: u32,
    },
    /// NPK recommendation for a plant at a growth stage.
    Fertilizer {
        #[arg(long)]
        plant: String,
        #[arg(long)]
        stage: String,
        #[arg(long)]
        soil: String,
        #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
        temperature: f64,
        /// Use a learned NPK regressor instead of the rule table.
        #[arg(long)]
        npk_model: Option<PathBuf>,
    },
    /// Crops suited to a soil, location and temperature.
    Crops {
        #[arg(long, default_value = "Loamy")]
        soil: String,
        #[arg(long, default_value = "Unknown")]
        location: String,
        #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
        temperature: f64,
        /// `min-max` in °C.
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        range: String,
        #[arg(long, default_value = "")]
        season: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> leafcare::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> leafcare::Result<()> {
    let rules = match &cli.rules {
        Some(path) => RuleBook::load_json(path)?,
        None => RuleBook::builtin(),
    };

    match cli.command {
        Command::Classify { model, image, lang, image_size } => {
            let classifier = NetworkClassifier::load(&model, image_size)?;
            let bytes = std::fs::read(&image)
                .map_err(|e| PipelineError::invalid_input(format!("cannot read {}: {}", image.display(), e)))?;
            let ctx = AppContext::new(Box::new(classifier), rules);
            print_json(&ctx.detect_disease(&bytes, &lang)?)
        }
        Command::Fertilizer { plant, stage, soil, temperature, npk_model } => {
            let query = FertilizerQuery::parse(&plant, &stage, &soil, temperature)?;
            let plan = match npk_model {
                Some(path) => NpkModel::load_json(path)?.recommend(&query)?,
                None => fertilizer::recommend(&rules, &query)?,
            };
            print_json(&fertilizer_report(plan))
        }
        Command::Crops { soil, location, temperature, range, season } => {
            let query = CropQuery::parse(&soil, &location, temperature, &range, &season)?;
            let plan = crops::recommend(&rules, &query);
            print_json(&crop_report(&query, plan))
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_log_filter())))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.to_json());
            ExitCode::FAILURE
        }
    }
}
