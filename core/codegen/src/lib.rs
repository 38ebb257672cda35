//! Java code snippets and readable summaries for parsed game data.

pub mod armor;
pub mod class;
pub mod enemy;
pub mod error;
pub mod format;
pub mod render;
pub mod ring;
pub mod weapon;

pub use armor::{armor_code, armor_summary};
pub use class::{class_code, class_summary, parse_classes};
pub use enemy::{Enemy, ItemStats, NameCounter, enemy_code, enemy_summary, parse_enemy_dirs};
pub use error::{CodegenError, Result};
pub use format::boost_percent;
pub use render::{OutputFormat, render_items};
pub use ring::{ring_code, ring_summary};
pub use weapon::{weapon_code, weapon_summary};
