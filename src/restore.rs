use chrono::{Local, TimeZone};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::arango::{self, CommandRunner};
use crate::config::Config;
use crate::logger::Logger;
use crate::scanner::{self, BackupEntry, BackupIndex};

/// Lists the backups in `working_dir`, asks which one to use and restores it.
///
/// Returns the restored directory name, or `None` when there was nothing to
/// choose from.
pub fn run_restore<R, I, O>(
    config: &Config,
    runner: &mut R,
    working_dir: &Path,
    input: &mut I,
    output: &mut O,
    logger: &Logger,
) -> Result<Option<String>, String>
where
    R: CommandRunner + ?Sized,
    I: BufRead,
    O: Write,
{
    let index = scanner::scan(working_dir)?;
    if index.is_empty() {
        writeln!(output, "No backups found in {}", working_dir.display())
            .map_err(|e| format!("Failed to write output: {}", e))?;
        return Ok(None);
    }

    print_listing(&index, output)?;
    let entry = select_backup(&index, input, output)?;
    logger.log(&format!("Selected backup [{}] {}", entry.key, entry.name)).ok();

    writeln!(
        output,
        "{} {} {}",
        "Attempting to restore".blue(),
        entry.name.red(),
        "from backup...".blue()
    )
    .and_then(|_| output.flush())
    .map_err(|e| format!("Failed to write output: {}", e))?;

    let invocation = arango::restore(config, &entry.name, working_dir);
    arango::execute(runner, &invocation, logger)
        .map_err(|e| format!("Restore from {} failed: {}", entry.name, e))?;

    logger.log(&format!("Restore from {} complete", entry.name)).ok();
    Ok(Some(entry.name.clone()))
}

fn print_listing<O: Write>(index: &BackupIndex, output: &mut O) -> Result<(), String> {
    for entry in index.entries() {
        writeln!(
            output,
            "[{}] {} : {}",
            entry.key.to_string().yellow(),
            entry.name.red(),
            format_timestamp(entry.timestamp).green()
        )
        .map_err(|e| format!("Failed to write output: {}", e))?;
    }
    Ok(())
}

fn select_backup<'a, I: BufRead, O: Write>(
    index: &'a BackupIndex,
    input: &mut I,
    output: &mut O,
) -> Result<&'a BackupEntry, String> {
    write!(output, "Please enter the {} of the backup you want to restore : ", "[number]".yellow())
        .and_then(|_| output.flush())
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(|e| format!("Failed to read input: {}", e))?;
    let answer = line.trim();

    let number: usize = answer
        .parse()
        .map_err(|e| format!("'{}' is not a backup number: {}", answer, e))?;

    index.get(number).ok_or_else(|| {
        format!("No backup numbered {}. Choose between 1 and {}.", number, index.len())
    })
}

pub fn format_timestamp(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S %z").to_string(),
        None => format!("{} (out of range)", timestamp),
    }
}
