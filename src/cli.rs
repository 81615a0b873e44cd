use clap::{Parser, Subcommand};

pub const USAGE: &str = "You need to either choose the backup or restore command line arguments
Usage: hydrogenbackup <backup|restore>";

#[derive(Parser, Debug)]
#[command(
    about = "Backup and restore a Hydrogen ArangoDB server",
    long_about = None,
    disable_help_subcommand = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Dumps every database into a new timestamped directory
    Backup,
    /// Lists backups in the current directory and restores the chosen one
    Restore,
}
