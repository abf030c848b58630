//! `valentine share`: run the share chain against this machine.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use valentine::share::sdk::share_sdk;
use valentine::{AppConfig, LocalPlatform, ShareDispatcher, ShareOutcome};

use crate::cli::common::CapabilityArg;
use crate::cli::utils::{find_letter, load_store};

#[derive(Args, Debug)]
pub struct ShareArgs {
    pub id: String,
    /// Directory receiving downloaded cards.
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,
    /// User agent used to classify the platform.
    #[arg(long = "user-agent")]
    pub user_agent: Option<String>,
    /// Skip detection and start from this route.
    #[arg(long, value_enum)]
    pub capability: Option<CapabilityArg>,
}

pub fn handle(args: ShareArgs, config: &AppConfig) -> Result<()> {
    let store = load_store(&config.store)?;
    let letter = find_letter(&store, &args.id)?;

    let output_dir = args.output_dir.unwrap_or_else(|| config.output_dir.clone());
    let platform = match args.capability {
        Some(capability) => LocalPlatform::with_capability(capability.into(), &output_dir),
        None => {
            let user_agent = args.user_agent.as_deref().unwrap_or(&config.user_agent);
            LocalPlatform::new(user_agent, share_sdk(), &output_dir)
        }
    };
    let dispatcher = ShareDispatcher::new(platform, config.renderer(), config.share_options());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let outcome = runtime
        .block_on(dispatcher.share_letter(letter))
        .with_context(|| format!("failed to share letter {}", letter.id))?;

    match outcome {
        ShareOutcome::Shared { route } => println!("Shared via {route:?}"),
        ShareOutcome::Downloaded { filename } => {
            println!("Saved {}", output_dir.join(filename).display())
        }
        ShareOutcome::Cancelled => {}
    }
    Ok(())
}
