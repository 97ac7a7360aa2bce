use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wdi_figures::{return_figures, FigureConfig};

#[derive(Parser, Debug)]
#[command(name = "wdi-figures")]
#[command(about = "Build dashboard figures from World Bank indicator data", long_about = None)]
struct Args {
    /// Indicator dataset (.csv or .json records)
    dataset: PathBuf,

    /// JSON config overriding the country roster, 2020 population figures or column names
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the figures here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FigureConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FigureConfig::default(),
    };

    let figures = return_figures(&args.dataset, &config)
        .with_context(|| format!("Failed to build figures from {}", args.dataset.display()))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&figures)
    } else {
        serde_json::to_string(&figures)
    }
    .context("Failed to serialize figures")?;

    match &args.output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            writeln!(file, "{json}").context("Failed to write figures")?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{json}").context("Failed to write figures to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}
