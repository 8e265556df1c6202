mod alias;
mod builder;
mod collector;
mod config;
mod error;
mod executor;
mod logging;
mod model;
mod navigator;
mod source;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Confirm;
use std::path::{Path, PathBuf};

use config::{Overrides, Settings};
use executor::RunReport;
use source::Location;

/// Arch-based GNU/Linux post install tool
#[derive(Parser, Debug)]
#[command(name = "postinstall-wizard")]
#[command(version, about, long_about = None)]
struct Cli {
    /// YAML checklist: path, `-` for stdin, or http(s):// / file:// URL
    #[arg(short, long, value_name = "FILE|URL")]
    file: String,

    /// Execute the generated commands
    #[arg(short, long)]
    exec: bool,

    /// Write the script to a file (timestamped name when FILE is omitted)
    #[arg(short, long, value_name = "FILE", num_args = 0..=1)]
    write: Option<Option<PathBuf>>,

    /// Do not ask for confirmation before executing
    #[arg(short, long)]
    yes: bool,

    /// Skip interactive selection and use the document defaults
    #[arg(long)]
    no_tui: bool,

    /// Settings file (defaults to ~/.config/postinstall-wizard/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Package manager invocation prefix
    #[arg(long, value_name = "CMD")]
    package_manager: Option<String>,

    /// Notification command invocation prefix
    #[arg(long, value_name = "CMD")]
    notify_command: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.as_deref())?;
    if cli.verbose > 0 && cli.log_file.is_none() && !cli.no_tui {
        tracing::warn!("logs emitted during the interactive session are discarded; use --log-file");
    }

    let overrides = Overrides {
        package_manager: cli.package_manager.clone(),
        notify_command: cli.notify_command.clone(),
    };
    let settings =
        Settings::load(cli.config.as_deref(), &overrides).context("Failed to load settings")?;

    let document = source::load_document(&Location::parse(&cli.file))
        .context("Failed to load YAML")?;
    let mut checklist = builder::build(&document);
    if checklist.dropped > 0 {
        tracing::warn!(dropped = checklist.dropped, "some checklist items were skipped");
    }

    if !cli.no_tui && tui::run_tui(&mut checklist.sections)? == tui::Outcome::Aborted {
        std::process::exit(130);
    }

    let commands = collector::collect(&checklist, &settings.aliases());
    emit(&cli, &commands)
}

fn emit(cli: &Cli, commands: &[String]) -> Result<()> {
    if let Some(target) = &cli.write {
        let path = executor::write_script(target.as_deref(), commands)?;
        println!("# Script saved to {}", display_path(&path));

        if cli.exec && confirm(cli.yes, commands.len())? {
            println!("Executing script...");
            let status = executor::run_script(&path)?;
            println!(
                "Execution finished with code {}",
                status.code().unwrap_or(-1)
            );
        }
    } else if cli.exec {
        if !confirm(cli.yes, commands.len())? {
            return Ok(());
        }
        println!("Executing directly...");
        if let RunReport::Failed { command, .. } = executor::run_commands(commands)? {
            eprintln!("Command failed: {}", command);
        }
    } else {
        print!("{}", executor::render_script(commands));
    }
    Ok(())
}

fn confirm(assume_yes: bool, count: usize) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let accepted = Confirm::new()
        .with_prompt(format!("Execute {} command(s) now?", count))
        .default(false)
        .interact()
        .context("Failed to read confirmation")?;
    if !accepted {
        println!("Execution cancelled.");
    }
    Ok(accepted)
}

fn display_path(path: &Path) -> String {
    if path.is_absolute() || path.starts_with(".") {
        path.display().to_string()
    } else {
        format!("./{}", path.display())
    }
}
