use super::{FormatArg, report_diagnostics, write_lines};
use anyhow::{Context, Result};
use clap::Subcommand;
use codegen::{OutputFormat, class_code, class_summary, parse_classes};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ClassesCommands {
    /// Generate class code or summaries from a class definition file
    Generate {
        /// Input file with helmet/hood/hat blocks
        #[arg(short, long)]
        input: PathBuf,
        /// Output file (optional, defaults to class_code.txt / class_summary.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = FormatArg::Code)]
        format: FormatArg,
    },
}

pub fn handle(cmd: ClassesCommands) -> Result<()> {
    match cmd {
        ClassesCommands::Generate {
            input,
            output,
            format,
        } => {
            let parsed = parse_classes(&input)
                .with_context(|| format!("Failed to parse classes from {:?}", input))?;
            report_diagnostics(&parsed.diagnostics);

            let format = OutputFormat::from(format);
            let lines = match format {
                OutputFormat::Code => class_code(&parsed.data),
                OutputFormat::Human => class_summary(&parsed.data),
            };
            let out_path = output.unwrap_or_else(|| PathBuf::from(format.file_name("class")));
            write_lines(&out_path, &lines)?;
            println!("Wrote {} class line(s) to {:?}", lines.len(), out_path);
        }
    }
    Ok(())
}
