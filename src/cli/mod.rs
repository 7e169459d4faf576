use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// `ccs` - switch the AI provider, model and API key exported to your shell.
#[derive(Parser, Debug)]
#[command(name = "ccs")]
#[command(version)]
#[command(about = "Select an AI provider, model and API key and export them to your shell.", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print the current selection and export block, then exit
    #[arg(short, long)]
    pub show: bool,

    /// Provider document to use instead of ~/.claude/ccs-providers.json
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}
