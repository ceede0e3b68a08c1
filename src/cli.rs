// Command line: `dni-desk [--demo]` opens the TUI, `config` manages
// ~/.config/dni-desk/config.toml, `serve-demo` runs the demo backend alone.
// Config handlers return errors to `dispatch`, which reports them and exits 1.

use crate::config::{Config, VERSION};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default bind address for `serve-demo`, matching the default `api_url`
pub const DEFAULT_DEMO_BIND: &str = "127.0.0.1:5000";

/// DNI desk - terminal client for DNI person records
#[derive(Parser)]
#[command(name = "dni-desk")]
#[command(version = VERSION)]
#[command(about = "Look up, register and manage persons by DNI", long_about = None)]
pub struct Cli {
    /// Run against an in-process demo backend with sample data
    #[arg(long)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Update config with new defaults (preserves user values)
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Serve the in-memory demo backend without the TUI (Ctrl+C to stop)
    ServeDemo {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_DEMO_BIND)]
        bind: String,
    },
}

/// What main should do after argument parsing
#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    /// A command already ran to completion
    Exit,
    Tui { demo: bool },
    ServeDemo { bind: String },
}

/// Parse arguments and run one-shot commands
pub fn handle_cli() -> CliAction {
    dispatch(Cli::parse())
}

fn dispatch(cli: Cli) -> CliAction {
    match cli.command {
        Some(Commands::Config {
            show,
            reset,
            edit,
            update,
            path,
        }) => {
            let result = if path {
                config_file().map(|file| println!("{}", file.display()))
            } else if show {
                config_show()
            } else if reset {
                config_file().and_then(|file| config_reset(&file))
            } else if edit {
                config_file().and_then(|file| config_edit(&file))
            } else if update {
                config_file().and_then(|file| config_update(&file))
            } else {
                print!("{}", CONFIG_USAGE);
                Ok(())
            };
            if let Err(e) = result {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
            CliAction::Exit
        }
        Some(Commands::ServeDemo { bind }) => CliAction::ServeDemo { bind },
        None => CliAction::Tui { demo: cli.demo },
    }
}

const CONFIG_USAGE: &str = "\
Usage: dni-desk config [--show|--reset|--edit|--update|--path]

  --show    Print the settings in effect
  --reset   Overwrite the config file with defaults
  --edit    Open the config file in $EDITOR
  --update  Rewrite the config file in the current layout, keeping values
  --path    Print where the config file lives
";

fn config_file() -> Result<PathBuf> {
    Config::config_path().context("no home directory, cannot locate config.toml")
}

fn config_show() -> Result<()> {
    let config = Config::from_env();
    let source = match Config::config_path() {
        Some(file) if file.exists() => file.display().to_string(),
        _ => "defaults only".to_string(),
    };

    println!("# dni-desk settings in effect (env > file > defaults)");
    println!("# read from: {}", source);
    println!();
    println!("api_url = {:?}", config.api_url);
    println!("theme = {:?}", config.theme);
    println!("search_min_chars = {}", config.search_min_chars);
    println!("demo_mode = {}", config.demo_mode);
    println!();
    println!("[logging]");
    let logging = &config.logging;
    println!("level = {:?}", logging.level);
    println!("file_enabled = {}", logging.file_enabled);
    println!("file_dir = {:?}", logging.file_dir.display().to_string());
    println!("file_rotation = {:?}", logging.file_rotation.as_str());
    println!("file_prefix = {:?}", logging.file_prefix);
    Ok(())
}

/// Ask on stderr so piping stdout stays clean; anything but "y" declines
fn confirm(question: &str) -> Result<bool> {
    eprint!("{} [y/N] ", question);
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn write_config(file: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = file.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    std::fs::write(file, contents).with_context(|| format!("writing {}", file.display()))
}

fn config_reset(file: &Path) -> Result<()> {
    if file.exists() && !confirm(&format!("Replace {} with defaults?", file.display()))? {
        println!("Left unchanged.");
        return Ok(());
    }
    write_config(file, &Config::default().to_toml())?;
    println!("Wrote default settings to {}", file.display());
    Ok(())
}

fn config_edit(file: &Path) -> Result<()> {
    if !file.exists() {
        write_config(file, &Config::default().to_toml())?;
        println!("Created {}", file.display());
    }

    let fallback = if cfg!(windows) { "notepad" } else { "nano" };
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| fallback.to_string());

    let status = Command::new(&editor)
        .arg(file)
        .status()
        .with_context(|| format!("launching '{}' (set $EDITOR to choose another)", editor))?;
    if !status.success() {
        bail!("{} exited with {}", editor, status);
    }
    Ok(())
}

fn config_update(file: &Path) -> Result<()> {
    if !file.exists() {
        write_config(file, &Config::default().to_toml())?;
        println!("Created {}", file.display());
        return Ok(());
    }

    // Only the file's own values are kept; env overrides stay out of it
    let rendered = Config::from_file_only().to_toml();

    let backup = file.with_extension("toml.bak");
    match std::fs::copy(file, &backup) {
        Ok(_) => println!("Previous file saved as {}", backup.display()),
        Err(e) => eprintln!("Warning: no backup written: {}", e),
    }
    write_config(file, &rendered)?;
    println!("Rewrote {} in the current layout", file.display());
    Ok(())
}
