use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use markup_ui::app::{Preview, PreviewConfig};

/// Build XML widget markup into windows and preview them in the terminal.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Markup files. The first fills the main window; each other file gets
    /// a window of its own.
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Print an outline of every built window instead of opening the UI.
    #[arg(long)]
    dump: bool,
    /// Title of the main window when the markup sets none.
    #[arg(long)]
    title: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut config = PreviewConfig::new().with_dump(cli.dump);
    if let Some(title) = cli.title {
        config = config.with_title(title);
    }

    let mut preview = if config.dump {
        Preview::new_headless(config)
    } else {
        Preview::new(config).context("cannot open the terminal")?
    };
    for file in &cli.files {
        preview
            .load_file(file)
            .with_context(|| format!("failed to build {}", file.display()))?;
    }

    if preview.config.dump {
        print!("{}", preview.dump());
        return Ok(());
    }
    preview.run().context("terminal error")?;
    Ok(())
}
