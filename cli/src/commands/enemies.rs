use super::{FormatArg, report_diagnostics, write_lines};
use anyhow::Result;
use clap::Subcommand;
use codegen::enemy::parse_enemy_dirs;
use codegen::{OutputFormat, enemy_code, enemy_summary};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum EnemiesCommands {
    /// Generate enemy code or summaries from `.character` files
    Generate {
        /// Directories holding `.character` files (repeatable)
        #[arg(short, long = "dir", required = true)]
        dirs: Vec<PathBuf>,
        /// Output file (optional, defaults to enemy_code.txt / enemy_summary.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = FormatArg::Code)]
        format: FormatArg,
    },
}

pub fn handle(cmd: EnemiesCommands) -> Result<()> {
    match cmd {
        EnemiesCommands::Generate {
            dirs,
            output,
            format,
        } => {
            let parsed = parse_enemy_dirs(&dirs)?;
            report_diagnostics(&parsed.diagnostics);

            let format = OutputFormat::from(format);
            let lines = match format {
                OutputFormat::Code => enemy_code(&parsed.data),
                OutputFormat::Human => enemy_summary(&parsed.data),
            };
            let out_path = output.unwrap_or_else(|| PathBuf::from(format.file_name("enemy")));
            write_lines(&out_path, &lines)?;
            println!("Wrote {} enemies to {:?}", lines.len(), out_path);
        }
    }
    Ok(())
}
