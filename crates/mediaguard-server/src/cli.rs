use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mediaguard")]
#[command(author, version, about = "Image and text safety analysis web UI")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web UI and analysis API
    Serve {
        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Listen port
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Configuration file path (environment variables override it)
        #[arg(short, long, default_value = "config.yaml")]
        config: String,

        /// Risk policy file path
        #[arg(long, default_value = "./policies/default.yaml")]
        policy: String,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
