use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;
use strings::process::UNMATCHED_FILE;
use strings::{TARGET_LANGUAGES, strings_translate};

#[derive(Subcommand)]
pub enum StringsCommands {
    /// Fill per-language strings.xml files from the game's translation packs
    Translate {
        /// Android strings.xml with the English texts
        #[arg(short, long, default_value = "strings.xml")]
        input: PathBuf,
        /// Folder with one `.strings` pack folder per language code
        #[arg(short, long, default_value = "lang")]
        lang_dir: PathBuf,
        /// Output directory
        #[arg(short, long, default_value = "translations")]
        output: PathBuf,
        /// Language codes to fill (repeatable, defaults to all game languages)
        #[arg(short = 'L', long = "language")]
        languages: Vec<String>,
    },
}

pub fn handle(cmd: StringsCommands) -> Result<()> {
    match cmd {
        StringsCommands::Translate {
            input,
            lang_dir,
            output,
            languages,
        } => {
            let languages = if languages.is_empty() {
                TARGET_LANGUAGES.iter().map(|l| l.to_string()).collect()
            } else {
                languages
            };
            let summary = strings_translate(&input, &lang_dir, &output, &languages)
                .with_context(|| format!("Failed to translate {:?}", input))?;
            for (language, count) in &summary.per_language {
                println!("{}: {} string(s)", language, count);
            }
            println!(
                "Matched {} of {} string(s); {} unmatched written to {:?}",
                summary.matched,
                summary.total,
                summary.unmatched(),
                output.join(UNMATCHED_FILE)
            );
        }
    }
    Ok(())
}
