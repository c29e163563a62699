use super::toml_config::DEFAULT_CONFIG_FILE;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "recruit-sms")]
#[command(about = "Render recruiting SMS templates per recipient and send them through Solapi")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List available template names
    Templates,

    /// Render every recipient's message without sending
    Preview {
        #[command(flatten)]
        template: TemplateArgs,

        /// Recipient list (.txt: one "이름 / 연락처 / 날짜 / 시간 / 장소 / 직무" per line, .csv/.tsv: header row)
        #[arg(short, long)]
        recipients: PathBuf,

        /// Sender number shown in the preview (overrides [sender] number)
        #[arg(short, long)]
        sender: Option<String>,
    },

    /// Render and send one SMS per recipient
    Send {
        #[command(flatten)]
        template: TemplateArgs,

        #[arg(short, long)]
        recipients: PathBuf,

        /// Registered sender number (overrides [sender] number)
        #[arg(short, long)]
        sender: Option<String>,

        /// Actually send; without it the batch is only previewed
        #[arg(long)]
        yes: bool,
    },

    /// Ask the language model for a friendlier version of a template
    Rewrite {
        #[command(flatten)]
        template: TemplateArgs,

        /// Write the rewritten template here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct TemplateArgs {
    /// Template name from the catalog
    #[arg(short, long)]
    pub template: Option<String>,

    /// Read the template body from a file
    #[arg(long)]
    pub template_file: Option<PathBuf>,
}
