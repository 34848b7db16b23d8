// SPDX-License-Identifier: MPL-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use supercam::app::GalleryOrder;
use supercam::{Config, SaveTarget};

mod cli;

#[derive(Parser)]
#[command(name = "supercam")]
#[command(about = "Capture photos, name them and browse the gallery")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    /// Photo directory (default: from config, else the app data directory)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Config file (default: ~/.config/supercam/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved photos
    List {
        /// Sort order for the listing
        #[arg(short, long, value_enum, default_value_t = SortOrder::AsListed)]
        sort: SortOrder,
    },

    /// Print the next free sequential photo name
    NextName,

    /// Take a photo, review it and save it
    Capture {
        /// JPEG file to use as the camera image (default: from config)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Save under this name without prompting
        #[arg(short, long, conflicts_with = "auto")]
        name: Option<String>,

        /// Save under the next free sequential name without prompting
        #[arg(short, long)]
        auto: bool,
    },

    /// Copy an existing image into the photo directory
    Save {
        /// Image to copy
        source: PathBuf,

        /// Target name (default: next free sequential name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Open a saved photo in the system viewer (default: the newest one)
    Open {
        /// Photo name, with or without extension
        name: Option<String>,
    },

    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortOrder {
    AsListed,
    Name,
    Newest,
}

impl From<SortOrder> for GalleryOrder {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::AsListed => GalleryOrder::AsListed,
            SortOrder::Name => GalleryOrder::Name,
            SortOrder::Newest => GalleryOrder::Newest,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=supercam=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        match cli.command {
            Commands::List { sort } => cli::list_photos(&config, cli.dir, sort.into()).await,
            Commands::NextName => cli::next_name(&config, cli.dir).await,
            Commands::Capture { source, name, auto } => {
                let target = match (name, auto) {
                    (Some(name), _) => Some(SaveTarget::Named(name)),
                    (None, true) => Some(SaveTarget::Auto),
                    (None, false) => None,
                };
                cli::take_photo(&config, cli.dir, source, target).await
            }
            Commands::Save { source, name } => {
                cli::save_existing(&config, cli.dir, source, name).await
            }
            Commands::Open { name } => cli::open_photo(&config, cli.dir, name).await,
            Commands::Config { init } => cli::show_config(&config, cli.config, init),
        }
    })
}
