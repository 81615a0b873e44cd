use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    pub fn new() -> Result<Self, std::io::Error> {
        let log_file = log_path()?;
        if let Some(parent) = log_file.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Logger::to_file(log_file))
    }

    pub fn to_file(log_file: PathBuf) -> Self {
        Logger { log_file: Some(log_file) }
    }

    /// A logger that drops every message.
    pub fn disabled() -> Self {
        Logger { log_file: None }
    }

    pub fn log(&self, message: &str) -> std::io::Result<()> {
        let Some(log_file) = &self.log_file else {
            return Ok(());
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "[{}]: {}", timestamp, message)
    }
}

fn log_path() -> Result<PathBuf, std::io::Error> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "Config directory not found"))?;
    Ok(config_dir.join("hydrogenbackup").join("logs").join("hydrogenbackup.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        let logger = Logger::to_file(path.clone());
        logger.log("first").unwrap();
        logger.log("second").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('[') && lines[0].ends_with("]: first"));
        assert!(lines[1].ends_with("]: second"));
    }

    #[test]
    fn log_file_lives_under_config_dir() {
        if let Some(config_dir) = dirs::config_dir() {
            let path = log_path().unwrap();
            assert!(path.starts_with(&config_dir));
            assert!(path.ends_with("hydrogenbackup/logs/hydrogenbackup.log"));
        }
    }

    #[test]
    fn disabled_logger_is_silent() {
        assert!(Logger::disabled().log("nothing").is_ok());
    }
}
