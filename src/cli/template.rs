//! Template commands (`valentine template ...`).

use anyhow::Result;
use clap::{Args, Subcommand};
use valentine::TemplateRegistry;

use crate::cli::common::ThemeArg;

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// List built-in templates.
    List(TemplateListArgs),
    /// Print a template body with its placeholders.
    Show(TemplateShowArgs),
    /// Print a template with names filled in.
    Apply(TemplateApplyArgs),
}

#[derive(Args, Debug)]
pub struct TemplateListArgs {
    /// Only templates of this theme.
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,
}

#[derive(Args, Debug)]
pub struct TemplateShowArgs {
    /// Template id, e.g. `romantic-1`.
    pub id: String,
}

#[derive(Args, Debug)]
pub struct TemplateApplyArgs {
    pub id: String,
    #[arg(long = "to")]
    pub recipient: String,
    #[arg(long = "from")]
    pub sender: String,
}

pub fn handle(command: TemplateCommand) -> Result<()> {
    match command {
        TemplateCommand::List(args) => list(args),
        TemplateCommand::Show(args) => show(args),
        TemplateCommand::Apply(args) => apply(args),
    }
}

fn list(args: TemplateListArgs) -> Result<()> {
    let templates = match args.theme {
        Some(theme) => TemplateRegistry::by_theme(theme.into()),
        None => TemplateRegistry::list(),
    };
    println!("Available templates:");
    for tpl in templates {
        println!(
            "  {} {:<13} {:<20} {} ({})",
            tpl.emoji, tpl.id, tpl.name, tpl.description, tpl.theme
        );
    }
    Ok(())
}

fn show(args: TemplateShowArgs) -> Result<()> {
    let tpl = TemplateRegistry::get(&args.id)?;
    println!("{} {} [{}]", tpl.emoji, tpl.name, tpl.theme);
    println!("{}\n", tpl.theme.description());
    println!("{}", tpl.body);
    Ok(())
}

fn apply(args: TemplateApplyArgs) -> Result<()> {
    let tpl = TemplateRegistry::get(&args.id)?;
    println!("{}", tpl.fill(&args.recipient, &args.sender));
    Ok(())
}
