//! Prints the effective signal configuration.

use crate::commands::process::load_config;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ShowConfigArgs {
    /// Signal config TOML file (INSTI_* environment variables still apply)
    #[arg(short, long, env = "INSTI_CONFIG")]
    pub config: Option<PathBuf>,
}

pub fn run_show_config(args: &ShowConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
