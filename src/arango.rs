use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::logger::Logger;

pub const DUMP_TOOL: &str = "arangodump";
pub const RESTORE_TOOL: &str = "arangorestore";

/// One external tool call: program, arguments and the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl Invocation {
    /// Command line with the password replaced, safe to write to the log.
    pub fn display_masked(&self) -> String {
        let mut parts = vec![self.program.clone()];
        let mut mask_next = false;
        for arg in &self.args {
            if mask_next {
                parts.push("********".to_string());
            } else {
                parts.push(arg.clone());
            }
            mask_next = arg == "--server.password";
        }
        parts.join(" ")
    }
}

pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<(), String>;
}

/// Runs tools for real, with stdout and stderr going straight to the terminal.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<(), String> {
        let program = which::which(&invocation.program).map_err(|e| {
            format!("Failed to find {}: {}. Make sure it is installed and in your PATH.", invocation.program, e)
        })?;

        let status = Command::new(program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| format!("Failed to execute {}: {}", invocation.program, e))?;

        if !status.success() {
            return Err(format!("{} failed with {}", invocation.program, status));
        }
        Ok(())
    }
}

pub fn dump(config: &Config, output_dir: &str, working_dir: &Path) -> Invocation {
    let mut args = vec!["--output-directory".to_string(), output_dir.to_string()];
    args.extend(server_args(config));
    args.extend(flags(&["--all-databases", "--include-system-collections"]));
    Invocation {
        program: DUMP_TOOL.to_string(),
        args,
        working_dir: working_dir.to_path_buf(),
    }
}

pub fn restore(config: &Config, input_dir: &str, working_dir: &Path) -> Invocation {
    let mut args = vec!["--input-directory".to_string(), input_dir.to_string()];
    args.extend(server_args(config));
    args.extend(flags(&["--all-databases", "--create-database", "--include-system-collections"]));
    Invocation {
        program: RESTORE_TOOL.to_string(),
        args,
        working_dir: working_dir.to_path_buf(),
    }
}

pub fn execute<R: CommandRunner + ?Sized>(runner: &mut R, invocation: &Invocation, logger: &Logger) -> Result<(), String> {
    logger.log(&format!("Executing {}", invocation.display_masked())).ok();
    match runner.run(invocation) {
        Ok(()) => {
            logger.log(&format!("{} successful", invocation.program)).ok();
            Ok(())
        }
        Err(e) => {
            logger.log(&e).ok();
            Err(e)
        }
    }
}

fn server_args(config: &Config) -> Vec<String> {
    vec![
        "--server.endpoint".to_string(),
        config.server_endpoint.clone(),
        "--server.username".to_string(),
        config.server_username.clone(),
        "--server.password".to_string(),
        config.server_password.clone(),
    ]
}

// arangodump/arangorestore take explicit "true" values for boolean flags
fn flags(names: &[&str]) -> Vec<String> {
    names
        .iter()
        .flat_map(|name| [name.to_string(), "true".to_string()])
        .collect()
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingRunner;
    use super::*;

    fn config() -> Config {
        Config {
            server_endpoint: "tcp://127.0.0.1:8529".to_string(),
            server_username: "root".to_string(),
            server_password: "secret".to_string(),
        }
    }

    #[test]
    fn dump_arguments_match_arangodump_flags() {
        let invocation = dump(&config(), "hydrogenbackup_100", Path::new("/data"));
        assert_eq!(invocation.program, "arangodump");
        assert_eq!(invocation.working_dir, PathBuf::from("/data"));
        assert_eq!(
            invocation.args,
            vec![
                "--output-directory", "hydrogenbackup_100",
                "--server.endpoint", "tcp://127.0.0.1:8529",
                "--server.username", "root",
                "--server.password", "secret",
                "--all-databases", "true",
                "--include-system-collections", "true",
            ]
        );
    }

    #[test]
    fn restore_arguments_create_databases() {
        let invocation = restore(&config(), "hydrogenbackup_200", Path::new("."));
        assert_eq!(invocation.program, "arangorestore");
        assert_eq!(invocation.arg_value("--input-directory"), Some("hydrogenbackup_200"));
        assert_eq!(invocation.arg_value("--create-database"), Some("true"));
        assert_eq!(invocation.arg_value("--all-databases"), Some("true"));
        assert_eq!(invocation.arg_value("--include-system-collections"), Some("true"));
        assert_eq!(invocation.args.len(), 14);
    }

    #[test]
    fn masked_display_hides_password() {
        let shown = dump(&config(), "hydrogenbackup_100", Path::new(".")).display_masked();
        assert!(shown.starts_with("arangodump --output-directory hydrogenbackup_100"));
        assert!(shown.contains("--server.password ******** --all-databases true"));
        assert!(!shown.contains("secret"));
    }

    #[test]
    fn execute_passes_runner_failure_through() {
        let mut runner = RecordingRunner {
            fail_with: Some("arangodump failed with exit status: 1".to_string()),
            ..RecordingRunner::default()
        };
        let invocation = dump(&config(), "hydrogenbackup_1", Path::new("."));
        let err = execute(&mut runner, &invocation, &Logger::disabled()).unwrap_err();
        assert!(err.contains("exit status: 1"));
        assert_eq!(runner.invocations.len(), 1);
    }

    #[test]
    fn system_runner_reports_missing_binary() {
        let invocation = Invocation {
            program: "hydrogenbackup-no-such-tool".to_string(),
            args: Vec::new(),
            working_dir: PathBuf::from("."),
        };
        let err = SystemRunner.run(&invocation).unwrap_err();
        assert!(err.contains("hydrogenbackup-no-such-tool"));
    }
}
