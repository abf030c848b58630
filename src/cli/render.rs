//! Rendering commands (`valentine render ...`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use valentine::{AppConfig, card_digest};

use crate::cli::utils::{ensure_parent, find_letter, load_store};

#[derive(Subcommand, Debug)]
pub enum RenderCommand {
    /// Render the story card PNG of a letter.
    Card(RenderCardArgs),
    /// Print how the message body wraps on the card.
    Lines(RenderLinesArgs),
}

#[derive(Args, Debug)]
pub struct RenderCardArgs {
    pub id: String,
    /// Output file or directory; defaults to the configured output directory.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RenderLinesArgs {
    pub id: String,
}

pub fn handle(command: RenderCommand, config: &AppConfig) -> Result<()> {
    match command {
        RenderCommand::Card(args) => card(args, config),
        RenderCommand::Lines(args) => lines(args, config),
    }
}

fn card(args: RenderCardArgs, config: &AppConfig) -> Result<()> {
    let store = load_store(&config.store)?;
    let letter = find_letter(&store, &args.id)?;

    let target = args.output.unwrap_or_else(|| config.output_dir.clone());
    let is_file_target = target
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    let target = if is_file_target {
        target
    } else {
        target.join(letter.export_filename())
    };
    ensure_parent(&target)?;

    let bytes = config
        .renderer()
        .render(letter)
        .with_context(|| format!("failed to render letter {}", letter.id))?;
    fs::write(&target, &bytes)
        .with_context(|| format!("failed to write {}", target.display()))?;
    println!(
        "Rendered card to {} ({} bytes, sha256 {})",
        target.display(),
        bytes.len(),
        card_digest(&bytes)
    );
    Ok(())
}

fn lines(args: RenderLinesArgs, config: &AppConfig) -> Result<()> {
    let store = load_store(&config.store)?;
    let letter = find_letter(&store, &args.id)?;
    let layout = config.renderer().layout_message(&letter.message);
    for line in &layout.lines {
        println!("{:>5} | {}", line.baseline, line.text);
    }
    if layout.truncated {
        println!("(message truncated to fit the card)");
    }
    Ok(())
}
