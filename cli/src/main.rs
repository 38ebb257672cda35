mod commands;
mod config;

use clap::{Parser, Subcommand};
use commands::classes::ClassesCommands;
use commands::enemies::EnemiesCommands;
use commands::enml::EnmlCommands;
use commands::items::ItemsCommands;
use commands::strings::StringsCommands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "enml-toolkit")]
#[command(about = "CLI for ENML game content files", long_about = None)]
struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Item Operations (Generate)
    #[command(subcommand)]
    Items(ItemsCommands),
    /// Character Class Operations (Generate)
    #[command(subcommand)]
    Classes(ClassesCommands),
    /// Enemy Operations (Generate)
    #[command(subcommand)]
    Enemies(EnemiesCommands),
    /// ENML Operations (Decode/Encode)
    #[command(subcommand)]
    Enml(EnmlCommands),
    /// Translation Operations (Translate)
    #[command(subcommand)]
    Strings(StringsCommands),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Items(cmd) => commands::items::handle(cmd)?,
        Commands::Classes(cmd) => commands::classes::handle(cmd)?,
        Commands::Enemies(cmd) => commands::enemies::handle(cmd)?,
        Commands::Enml(cmd) => commands::enml::handle(cmd)?,
        Commands::Strings(cmd) => commands::strings::handle(cmd)?,
    }

    Ok(())
}
