//! Fat-to-thin static archive repackaging.
//!
//! # Architecture
//!
//! - `inventory.rs` - Member listing and multiplicity
//! - `group.rs` - Occurrence-indexed, collision-free extraction groups
//! - `mangle.rs` - Per-platform on-disk name casing
//! - `staged.rs` - Unique staged file names and their ordering
//! - `path.rs` - Relative path arithmetic for thin-archive references
//! - `archiver.rs` - Archiver operations and the `ar` front end
//! - `staging.rs` - Staging directory preparation and verification
//! - `repack.rs` - The end-to-end run

pub use archiver::{ArTool, Archiver, Operation};
pub use error::{Error, ErrorKind, Result};
pub use group::{ExtractionGroups, Group};
pub use inventory::Inventory;
pub use mangle::CaseMangling;
pub use path::relative_path;
pub use repack::{Phase, RepackReport, RepackRequest, Repackager};
pub use staged::StagedName;

pub mod archiver;
mod error;
pub mod group;
pub mod inventory;
pub mod mangle;
mod path;
mod repack;
pub mod staged;
mod staging;
