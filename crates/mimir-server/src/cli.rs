use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mimir-server")]
#[command(author, version, about = "Mimir content moderation service")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the moderation server
    Serve {
        /// Listen port
        #[arg(short, long, default_value = "5000", env = "PORT")]
        port: u16,

        /// Listen address
        #[arg(short, long, default_value = "0.0.0.0")]
        address: String,

        /// Document-level violence threshold for video verdicts
        #[arg(long, default_value = "0.3")]
        threshold: f32,

        /// Training-set snapshot file
        #[arg(long, default_value = "./train_data.jsonl")]
        train_file: PathBuf,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
