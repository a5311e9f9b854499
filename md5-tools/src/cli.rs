//! Root CLI structure for md5-tools

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "md5-tools")]
#[command(about = "Command-line tools for id Tech 4 MD5 file formats", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// MD5 animation operations
    Anim {
        #[command(subcommand)]
        command: crate::commands::anim::AnimCommands,
    },
}
