//! Item catalog rules: type tags, placeholder filtering, and the online
//! feed used to backfill locally parsed items.

pub mod error;
pub mod filter;
pub mod kind;
pub mod merge;
pub mod online;

pub use error::{CatalogError, Result};
pub use filter::{exclusion_reason, filter_collection};
pub use kind::{ItemKind, PRICE_FIELDS, WeaponKind};
pub use merge::{MergeStats, OnlineIndex, merge_online_fields, normalize_name};
pub use online::{OnlineRecord, collect_records, into_collection, parse_feed};
