//! CLI module for the Secret Santa service

pub mod serve;

use clap::{Parser, Subcommand};

/// Secret Santa - team gift exchange with one-time registration codes
#[derive(Parser)]
#[command(name = "secret-santa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the admin and bot HTTP APIs
    Serve(serve::ServeArgs),
}
