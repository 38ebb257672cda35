use anyhow::Result;
use clap::Subcommand;
use enml::process::{enml_decode, enml_encode};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum EnmlCommands {
    /// Decode ENML blocks to a JSON array of entities
    Decode {
        /// Input ENML file
        input: PathBuf,
        /// Output JSON file (optional, defaults to input + .json)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Block opener keywords (repeatable)
        #[arg(short, long = "keyword", default_value = enml::ITEM_KEYWORD)]
        keywords: Vec<String>,
    },
    /// Encode a JSON array of entities to ENML blocks
    Encode {
        /// Input JSON file
        input: PathBuf,
        /// Output ENML file (optional, defaults to input + .enml)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Opener keyword of the written blocks
        #[arg(short, long, default_value = enml::ITEM_KEYWORD)]
        keyword: String,
    },
}

pub fn handle(cmd: EnmlCommands) -> Result<()> {
    match cmd {
        EnmlCommands::Decode {
            input,
            output,
            keywords,
        } => enml_decode(&input, &output, keywords.as_slice())?,
        EnmlCommands::Encode {
            input,
            output,
            keyword,
        } => enml_encode(&input, &output, &keyword)?,
    }
    Ok(())
}
