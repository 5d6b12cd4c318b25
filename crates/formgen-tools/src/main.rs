//! Formgen CLI - form scaffolding for React projects

use anyhow::Result;
use clap::{Parser, Subcommand};
use formgen_core::tui::CreateArgs;
use formgen_core::OutputSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "formgen")]
#[command(about = "CLI for generating validated React form components")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new form interactively
    Create(CliCreateArgs),
    /// Regenerate a form from a saved configuration without prompting
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Saved configuration (JSON or YAML) to load instead of prompting
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to write the generated files to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show what would be written without writing anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            config: args.config,
            output: args.output,
            dry_run: args.dry_run,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Saved configuration (JSON or YAML)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Directory to write the generated files to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show what would be written without writing anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    match args.command {
        Some(Command::Create(create_args)) => run_create(create_args.into()).await,
        Some(Command::Generate(generate_args)) => {
            let settings = OutputSettings::resolve(generate_args.output, generate_args.dry_run);
            formgen_core::generate_from_snapshot(&generate_args.config, &settings).await
        }
        // No subcommand provided, default to create behavior (interactive mode)
        None => run_create(CreateArgs::default()).await,
    }
}

async fn run_create(args: CreateArgs) -> Result<()> {
    let result = formgen_core::run(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
