//! Reader and writer for ENML, the `keyword identifier { key = value; }`
//! block format used by the game's content files.

pub mod error;
pub mod process;
pub mod reader;
pub mod types;
pub mod writer;

pub use error::{EnmlError, Result};
pub use reader::*;
pub use types::*;
pub use writer::*;

/// Opener keyword of item definition files.
pub const ITEM_KEYWORD: &str = "item";
