use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prettytable::{cell, row, Table};
use seg_input::{generate_manifest, pipeline::BatchSummary, InputConfig, InputPipeline, Split};
use std::{env, path::PathBuf, sync::Arc};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
/// Segmentation dataset input tool
struct Args {
    #[clap(long)]
    /// configuration file, built-in defaults are used if omitted
    pub config_file: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Write the CSV manifest of a split
    GenManifest {
        #[clap(long)]
        split: Split,
        #[clap(long)]
        session_id: Option<String>,
    },
    /// Read batches from a manifest and print their statistics
    Inspect {
        #[clap(long)]
        split: Split,
        #[clap(long)]
        session_id: Option<String>,
        #[clap(long, default_value = "1")]
        num_batches: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // setup tracing
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true).compact();
    let filter_layer = {
        let filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            filter.add_directive(LevelFilter::INFO.into())
        } else {
            filter
        }
    };
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    // parse arguments
    let Args {
        config_file,
        command,
    } = Args::parse();
    let config = match config_file {
        Some(config_file) => InputConfig::open(&config_file).with_context(|| {
            format!("failed to load config file '{}'", config_file.display())
        })?,
        None => InputConfig::default(),
    };

    match command {
        Command::GenManifest { split, session_id } => {
            let path = generate_manifest(&config, split, session_id.as_deref())?;
            println!("{}", path.display());
        }
        Command::Inspect {
            split,
            session_id,
            num_batches,
        } => {
            inspect(Arc::new(config), split, session_id.as_deref(), num_batches).await?;
        }
    }

    Ok(())
}

async fn inspect(
    config: Arc<InputConfig>,
    split: Split,
    session_id: Option<&str>,
    num_batches: usize,
) -> Result<()> {
    let mut pipeline = InputPipeline::new(config, split, session_id).await?;
    let mut table = Table::new();
    table.add_row(row![
        "batch",
        "images",
        "labels",
        "min",
        "max",
        "mean",
        "foreground",
        "first path"
    ]);

    for index in 0..num_batches {
        let batch = match pipeline.next_batch().await? {
            Some(batch) => batch,
            None => {
                info!("the manifest is exhausted after {} batches", index);
                break;
            }
        };
        let summary = BatchSummary::new(&batch);

        table.add_row(row![
            index,
            format!("{:?}", summary.image_shape),
            format!("{:?}", summary.label_shape),
            format!("{:.3}", summary.image_min),
            format!("{:.3}", summary.image_max),
            format!("{:.3}", summary.image_mean),
            format!("{:.2}%", summary.foreground_ratio * 100.0),
            batch
                .image_paths
                .first()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
        ]);
    }

    table.printstd();
    Ok(())
}
