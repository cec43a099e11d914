//! `bookshelf`: interactive menu over a personal library.

mod menu;
mod table;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf_core::{load_config, load_env_config, validate_config, Catalog, Config};

use crate::menu::Menu;

#[derive(Parser, Debug)]
#[command(name = "bookshelf", version, about = "Personal library manager")]
struct Args {
    /// TOML config file; defaults and BOOKSHELF_* env vars apply without one.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Library name. Prompted for when omitted.
    #[arg(short, long)]
    library: Option<String>,

    /// Directory holding the library file.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Quiet by default so log lines do not break up the tables
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => load_env_config().context("Failed to load config from environment")?,
    };
    if let Some(dir) = args.data_dir {
        config.library.data_dir = dir;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    writeln!(output, "Welcome to Personal Library Manager!")?;
    config.library.name = match args.library {
        Some(name) => name,
        None => prompt_library_name(&mut input, &mut output, &config)?,
    };
    validate_config(&config).context("Configuration validation failed")?;

    let catalog = Catalog::open_in_dir(&config.library.data_dir, &config.library.name);
    info!(
        "Opened library '{}' from {}",
        catalog.name(),
        catalog.file_path()
    );

    Menu::new(&catalog, input, output)
        .run()
        .context("Menu I/O failed")?;
    Ok(())
}

/// Ask for a library name, keeping the configured one on a blank answer or
/// end of input.
fn prompt_library_name(
    input: &mut impl BufRead,
    output: &mut impl Write,
    config: &Config,
) -> io::Result<String> {
    write!(
        output,
        "Enter your library name (or press Enter for '{}'): ",
        config.library.name
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let name = line.trim();
    Ok(if name.is_empty() {
        config.library.name.clone()
    } else {
        name.to_string()
    })
}
