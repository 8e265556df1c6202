use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

pub const SCRIPT_HEADER: &str = "# Generated script";

/// Script text: header line, then one command per line.
pub fn render_script(commands: &[String]) -> String {
    let mut script = String::with_capacity(
        SCRIPT_HEADER.len() + 1 + commands.iter().map(|c| c.len() + 1).sum::<usize>(),
    );
    script.push_str(SCRIPT_HEADER);
    script.push('\n');
    for command in commands {
        script.push_str(command);
        script.push('\n');
    }
    script
}

/// `generated-script_<DD_MM_YYYY_HHMMSS>.sh`
pub fn default_script_name(now: DateTime<Local>) -> String {
    format!("generated-script_{}.sh", now.format("%d_%m_%Y_%H%M%S"))
}

/// Write the script to `path`, or to a timestamped file in the current directory.
pub fn write_script(path: Option<&Path>, commands: &[String]) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_script_name(Local::now())),
    };
    fs::write(&path, render_script(commands))
        .with_context(|| format!("Failed to write script to {}", path.display()))?;
    tracing::info!(path = %path.display(), commands = commands.len(), "script written");
    Ok(path)
}

/// Run a command through `bash -c` and stream output directly to the terminal.
pub fn run_command_streaming(cmd: &str) -> Result<ExitStatus> {
    let status = Command::new("bash")
        .arg("-c")
        .arg(cmd)
        .status()
        .with_context(|| format!("Failed to execute command: {}", cmd))?;
    Ok(status)
}

/// Run a written script with `bash <file>`.
pub fn run_script(path: &Path) -> Result<ExitStatus> {
    tracing::info!(path = %path.display(), "executing script");
    Command::new("bash")
        .arg(path)
        .status()
        .with_context(|| format!("Failed to execute script: {}", path.display()))
}

/// Outcome of running commands one by one.
#[derive(Debug, PartialEq, Eq)]
pub enum RunReport {
    Completed,
    /// Index and text of the command that failed; later commands did not run.
    Failed { index: usize, command: String },
}

/// Run each command in order, stopping at the first non-zero exit.
pub fn run_commands(commands: &[String]) -> Result<RunReport> {
    for (index, command) in commands.iter().enumerate() {
        tracing::debug!(index, %command, "running command");
        let status = run_command_streaming(command)?;
        if !status.success() {
            tracing::warn!(index, code = ?status.code(), %command, "command failed");
            return Ok(RunReport::Failed {
                index,
                command: command.clone(),
            });
        }
    }
    Ok(RunReport::Completed)
}
