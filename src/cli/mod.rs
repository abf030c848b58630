//! Command-line interface wiring for the `valentine` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! submodules, one per command family.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use valentine::AppConfig;

pub mod common;
pub mod letter;
pub mod render;
pub mod share;
pub mod template;
pub mod utils;

/// Parsed CLI entrypoint for the `valentine` binary.
#[derive(Parser, Debug)]
#[command(
    name = "valentine",
    version,
    about = "Write Valentine's letters and export them as story cards"
)]
pub struct Cli {
    /// JSON config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Letter store, overriding the config.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
    /// Log debug detail.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
    /// Disable logging.
    #[arg(short, long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Letter(letter::LetterCommand),
    #[command(subcommand)]
    Render(render::RenderCommand),
    /// Share a letter card through the best available route.
    Share(share::ShareArgs),
    #[command(subcommand)]
    Template(template::TemplateCommand),
}

/// Set up `env_logger`; `RUST_LOG` still wins over the default level.
pub fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        log::set_max_level(LevelFilter::Off);
        return;
    }
    let default = if verbose { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default));
    builder.format_timestamp(None);
    builder.init();
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.store = store;
    }
    match cli.command {
        Command::Letter(cmd) => letter::handle(cmd, &config),
        Command::Render(cmd) => render::handle(cmd, &config),
        Command::Share(args) => share::handle(args, &config),
        Command::Template(cmd) => template::handle(cmd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_logging_installs_the_logger() {
        init_logging(true, false);
        assert!(log::max_level() >= LevelFilter::Info);
    }
}
