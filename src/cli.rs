use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Tariff table CSV. Overrides `tariff_path` from config.yaml
    #[clap(long, global = true)]
    pub tariff: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the hierarchy lookup and print the number of codes.
    Build {},

    /// Print hierarchy path, duty rate and procedures for tariff codes
    Lookup {
        /// One or more tariff codes
        #[clap(required = true)]
        codes: Vec<String>,
    },

    /// Enrich a JSON array of search hits with hierarchy context.
    Enrich {
        /// JSON file to read (stdin when omitted)
        #[clap(short, long)]
        input: Option<PathBuf>,
    },

    /// Classify invoice lines against their retrieved candidates.
    ///
    /// Input is a JSON array of `{"item": {...}, "candidates": [...]}`.
    /// The top candidate of each line is taken.
    Classify {
        /// JSON file to read (stdin when omitted)
        #[clap(short, long)]
        input: Option<PathBuf>,
    },
}
