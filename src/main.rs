mod arango;
mod backup;
mod cli;
mod config;
mod logger;
mod restore;
mod scanner;

use crate::arango::{CommandRunner, SystemRunner};
use crate::logger::Logger;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            println!("{}", cli::USAGE);
            process::exit(1);
        }
    };

    let logger = Logger::new().unwrap_or_else(|e| {
        eprintln!("Logging disabled: {}", e);
        Logger::disabled()
    });

    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to determine the current directory: {}", e);
            process::exit(1);
        }
    };

    let config = Config::load_or_default(&working_dir, &logger);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if let Err(e) = dispatch(cli.command, &config, &mut SystemRunner, &working_dir, &mut input, &mut output, &logger) {
        eprintln!("{}", e);
        logger.log(&format!("Fatal: {}", e)).ok();
        process::exit(1);
    }
}

fn dispatch<R, I, O>(
    command: Commands,
    config: &Config,
    runner: &mut R,
    working_dir: &Path,
    input: &mut I,
    output: &mut O,
    logger: &Logger,
) -> Result<(), String>
where
    R: CommandRunner + ?Sized,
    I: BufRead,
    O: Write,
{
    match command {
        Commands::Backup => {
            let dir_name = backup::run_backup(config, runner, working_dir, logger)?;
            writeln!(output, "Backup written to {}", dir_name).map_err(|e| format!("Failed to write output: {}", e))?;
        }
        Commands::Restore => {
            if let Some(dir_name) = restore::run_restore(config, runner, working_dir, input, output, logger)? {
                writeln!(output, "\nRestored from {}", dir_name).map_err(|e| format!("Failed to write output: {}", e))?;
            }
        }
    }
    Ok(())
}
