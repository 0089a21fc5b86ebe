use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hsc::app::AppFactory;

mod cli;

fn open_input(input: Option<PathBuf>) -> anyhow::Result<Box<dyn Read>> {
    match input {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(std::io::BufReader::new(file)))
        }
        None => Ok(Box::new(std::io::stdin().lock())),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let paths = AppFactory::get_paths()?;
    tracing::debug!("base directory: {}", paths.base_path);

    let app = AppFactory::create_app_service(&paths, args.tariff.as_deref())?;

    match args.command {
        cli::Command::Build {} => {
            println!("{} HS codes", app.total());
        }

        cli::Command::Lookup { codes } => {
            let found = app.lookup(&codes);
            println!("{}", serde_json::to_string_pretty(&found)?);
        }

        cli::Command::Enrich { input } => {
            let enriched = app.enrich_json(open_input(input)?)?;
            println!("{}", serde_json::to_string_pretty(&enriched)?);
        }

        cli::Command::Classify { input } => {
            let classified = app.classify_json(open_input(input)?)?;
            println!("{}", serde_json::to_string_pretty(&classified)?);
        }
    }

    Ok(())
}
