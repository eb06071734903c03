//! Decoder for Mifare Classic memory dumps.
//!
//! Resolves the sector layout implied by a dump's size, decodes the
//! redundant access bits in every sector trailer and describes what each
//! key may do with each block.
//!
//! ```no_run
//! use mfdump_core::{Report, ReportOptions};
//!
//! let dump = std::fs::read("card.mfd").unwrap();
//! let report = Report::build(&dump, &ReportOptions::default()).unwrap();
//! for row in report.rows() {
//!     println!("{} {} {} {}", row.sector, row.block, row.condition.label(), row.permissions);
//! }
//! ```

pub mod access;
pub mod card;
pub mod display;
pub mod error;
pub mod geometry;
pub mod permission;
pub mod report;

pub use access::{AccessCondition, ChecksumMismatch};
pub use card::CardInfo;
pub use error::DumpError;
pub use geometry::{CardType, Geometry, SectorKind, SectorLayout};
pub use permission::BlockRole;
pub use report::{ByteTag, Condition, PermissionRow, Report, ReportOptions, Rows, Sector};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
