//! Letter commands (`valentine letter ...`).

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Subcommand};
use log::warn;
use valentine::share::links::{email_link, letter_preview, share_card_text, x_intent_url};
use valentine::{AVAILABLE_REACTIONS, AppConfig, NewLetter, TemplateRegistry};

use crate::cli::utils::{find_letter, load_store, read_text_arg};

#[derive(Subcommand, Debug)]
pub enum LetterCommand {
    /// Write a new letter.
    Write(LetterWriteArgs),
    /// List all letters, oldest first.
    List,
    /// Show one letter with its reactions.
    Show(LetterIdArgs),
    /// React to a letter with an emoji.
    React(LetterReactArgs),
    /// Print text and links for sharing a letter.
    Links(LetterIdArgs),
}

#[derive(Args, Debug)]
pub struct LetterWriteArgs {
    #[arg(long = "to")]
    pub recipient: String,
    #[arg(long = "from")]
    pub sender: String,
    /// Message text.
    #[arg(long, conflicts_with_all = ["message_file", "template"])]
    pub message: Option<String>,
    /// Read the message from a file (`-` for stdin).
    #[arg(long = "message-file", conflicts_with = "template")]
    pub message_file: Option<PathBuf>,
    /// Start from a built-in template.
    #[arg(long)]
    pub template: Option<String>,
}

#[derive(Args, Debug)]
pub struct LetterIdArgs {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct LetterReactArgs {
    pub id: String,
    pub emoji: String,
}

pub fn handle(command: LetterCommand, config: &AppConfig) -> Result<()> {
    match command {
        LetterCommand::Write(args) => write(args, config),
        LetterCommand::List => list(config),
        LetterCommand::Show(args) => show(args, config),
        LetterCommand::React(args) => react(args, config),
        LetterCommand::Links(args) => links(args, config),
    }
}

fn write(args: LetterWriteArgs, config: &AppConfig) -> Result<()> {
    let message = match &args.template {
        Some(id) => Some(TemplateRegistry::get(id)?.fill(&args.recipient, &args.sender)),
        None => read_text_arg(args.message, args.message_file)?,
    };
    let message = message.ok_or_else(|| {
        anyhow!("a message is required (--message, --message-file or --template)")
    })?;

    let mut store = load_store(&config.store)?;
    let id = store
        .create(NewLetter {
            recipient: args.recipient,
            sender: args.sender,
            message,
        })?
        .id
        .clone();
    store
        .save(&config.store)
        .with_context(|| format!("failed to save letter store {}", config.store.display()))?;
    println!("Saved letter {} to {}", id, config.store.display());
    Ok(())
}

fn list(config: &AppConfig) -> Result<()> {
    let store = load_store(&config.store)?;
    if store.is_empty() {
        println!("No letters yet.");
        return Ok(());
    }
    for letter in store.all() {
        println!(
            "{}  {}  {} -> {}  {}",
            letter.id,
            letter.created_at.format("%Y-%m-%d %H:%M"),
            letter.sender,
            letter.recipient,
            letter.reactions.format()
        );
    }
    Ok(())
}

fn show(args: LetterIdArgs, config: &AppConfig) -> Result<()> {
    let store = load_store(&config.store)?;
    let letter = find_letter(&store, &args.id)?;
    println!("To: {}", letter.recipient);
    println!("From: {}", letter.sender);
    println!("Written: {}", letter.created_at.to_rfc3339());
    println!();
    println!("{}", letter.message);
    println!();
    if letter.reactions.is_empty() {
        println!("No reactions yet.");
    } else {
        println!(
            "Reactions ({}): {}",
            letter.reactions.total(),
            letter.reactions.format()
        );
    }
    Ok(())
}

fn react(args: LetterReactArgs, config: &AppConfig) -> Result<()> {
    if !AVAILABLE_REACTIONS.contains(&args.emoji.as_str()) {
        warn!(
            "{} is not one of the usual reactions ({})",
            args.emoji,
            AVAILABLE_REACTIONS.join(" ")
        );
    }
    let mut store = load_store(&config.store)?;
    let summary = store.add_reaction(&args.id, &args.emoji)?.reactions.format();
    store
        .save(&config.store)
        .with_context(|| format!("failed to save letter store {}", config.store.display()))?;
    println!("{summary}");
    Ok(())
}

fn links(args: LetterIdArgs, config: &AppConfig) -> Result<()> {
    let store = load_store(&config.store)?;
    let letter = find_letter(&store, &args.id)?;
    println!("{}\n", share_card_text(letter, &config.branding));
    println!("Preview:\n{}\n", letter_preview(letter, 280));
    println!("X: {}", x_intent_url(letter));
    println!("Email: {}", email_link(letter));
    Ok(())
}
