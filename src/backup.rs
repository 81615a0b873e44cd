use chrono::Utc;
use std::path::Path;

use crate::arango::{self, CommandRunner};
use crate::config::Config;
use crate::logger::Logger;

/// Marks the directories this tool creates. Also used to find them again.
pub const DIRECTORY_SIGNATURE: &str = "hydrogenbackup";

pub fn backup_dir_name(timestamp: i64) -> String {
    format!("{}_{}", DIRECTORY_SIGNATURE, timestamp)
}

/// Recovers the Unix seconds embedded after the last underscore.
pub fn timestamp_of(dir_name: &str) -> Result<i64, String> {
    let (_, suffix) = dir_name
        .rsplit_once('_')
        .ok_or_else(|| format!("Backup directory '{}' has no timestamp suffix", dir_name))?;
    suffix
        .parse::<i64>()
        .map_err(|e| format!("Backup directory '{}' has an invalid timestamp '{}': {}", dir_name, suffix, e))
}

/// Dumps everything into `<signature>_<now>` under `working_dir`, returning the directory name.
pub fn run_backup<R: CommandRunner + ?Sized>(
    config: &Config,
    runner: &mut R,
    working_dir: &Path,
    logger: &Logger,
) -> Result<String, String> {
    let dir_name = backup_dir_name(Utc::now().timestamp());
    logger.log(&format!("Starting backup into {}", dir_name)).ok();

    // --include-system-collections is what pulls in the graph definitions
    let invocation = arango::dump(config, &dir_name, working_dir);
    arango::execute(runner, &invocation, logger)
        .map_err(|e| format!("Backup into {} failed: {}", dir_name, e))?;

    logger.log(&format!("Backup {} complete", dir_name)).ok();
    Ok(dir_name)
}
