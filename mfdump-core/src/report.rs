//! Per-block report model.
//!
//! A [`Report`] borrows the dump and yields one [`PermissionRow`] per block,
//! sector by sector. Rows are computed on demand; iterating twice gives the
//! same rows.

use std::iter::FusedIterator;
use std::ops::Range;

use serde::Serialize;

use crate::access::{self, ACCESS_BITS_LEN, AccessCondition, ChecksumMismatch};
use crate::card::{CardInfo, PREAMBLE_LEN};
use crate::error::DumpError;
use crate::geometry::{BLOCK_SIZE, Geometry, SectorKind, SectorLayout};
use crate::permission::{self, BlockRole};

// ---------------------------------------------------------------------------
// Trailer layout
// ---------------------------------------------------------------------------

/// Offsets of the trailer fields, relative to the trailer block.
pub const KEY_A_RANGE: Range<usize> = 0..6;
pub const ACCESS_BITS_RANGE: Range<usize> = 6..10;
pub const KEY_B_RANGE: Range<usize> = 10..16;

/// Marker shown instead of the condition bits when the check fails.
pub const INVALID_MARKER: &str = "ERR";

/// Block that carries the sector number in the rendered table.
const LABEL_BLOCK: usize = 1;

/// Field of a trailer block, used to highlight its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteTag {
    KeyA,
    AccessBits,
    KeyB,
}

/// A tagged byte range within a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedRange {
    pub tag: ByteTag,
    pub range: Range<usize>,
}

/// Tags attached to every trailer row.
pub const TRAILER_TAGS: &[TaggedRange] = &[
    TaggedRange {
        tag: ByteTag::KeyA,
        range: KEY_A_RANGE,
    },
    TaggedRange {
        tag: ByteTag::AccessBits,
        range: ACCESS_BITS_RANGE,
    },
    TaggedRange {
        tag: ByteTag::KeyB,
        range: KEY_B_RANGE,
    },
];

const NO_TAGS: &[TaggedRange] = &[];

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Options that control how a dump is laid out.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Decode the first 1024 bytes as a 1K card, whatever the input length.
    pub force_1k: bool,
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force_1k(mut self, force_1k: bool) -> Self {
        self.force_1k = force_1k;
        self
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// Outcome of decoding a block's access condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Valid(AccessCondition),
    Invalid(ChecksumMismatch),
}

impl Condition {
    pub fn is_valid(&self) -> bool {
        matches!(self, Condition::Valid(_))
    }

    pub fn access_condition(&self) -> Option<AccessCondition> {
        match self {
            Condition::Valid(c) => Some(*c),
            Condition::Invalid(_) => None,
        }
    }

    /// `C1C2C3` bits, or [`INVALID_MARKER`].
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Valid(c) => c.bits(),
            Condition::Invalid(_) => INVALID_MARKER,
        }
    }
}

/// Everything the renderer needs to print one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRow<'a> {
    pub sector: usize,
    pub sector_kind: SectorKind,
    /// Set on exactly one row per sector; that row prints the sector number.
    pub show_sector_label: bool,
    pub block: usize,
    /// Access slot (0-3) the condition was read from.
    pub slot: usize,
    pub role: BlockRole,
    pub data: &'a [u8],
    /// Highlight ranges into `data`; empty except on trailers.
    pub tags: &'static [TaggedRange],
    pub condition: Condition,
    /// Empty when the condition is invalid.
    pub permissions: &'static str,
}

impl<'a> PermissionRow<'a> {
    /// Split `data` along its tags. Untagged blocks come back whole.
    pub fn segments(&self) -> Vec<(Option<ByteTag>, &'a [u8])> {
        if self.tags.is_empty() {
            return vec![(None, self.data)];
        }
        self.tags
            .iter()
            .map(|t| (Some(t.tag), &self.data[t.range.clone()]))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Sector view
// ---------------------------------------------------------------------------

/// Read-only view of one sector's bytes.
#[derive(Debug, Clone, Copy)]
pub struct Sector<'a> {
    layout: SectorLayout,
    bytes: &'a [u8],
}

impl<'a> Sector<'a> {
    pub fn layout(&self) -> SectorLayout {
        self.layout
    }

    pub fn index(&self) -> usize {
        self.layout.index
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Bytes of `block`, relative to this sector.
    pub fn block(&self, block: usize) -> &'a [u8] {
        assert!(
            block < self.layout.block_count,
            "block {block} out of range for sector {}",
            self.layout.index
        );
        let start = block * BLOCK_SIZE;
        &self.bytes[start..start + BLOCK_SIZE]
    }

    pub fn trailer(&self) -> &'a [u8] {
        self.block(self.layout.trailer_block())
    }

    pub fn key_a(&self) -> &'a [u8] {
        &self.trailer()[KEY_A_RANGE]
    }

    pub fn key_b(&self) -> &'a [u8] {
        &self.trailer()[KEY_B_RANGE]
    }

    pub fn access_bits(&self) -> [u8; ACCESS_BITS_LEN] {
        let t = &self.trailer()[ACCESS_BITS_RANGE];
        [t[0], t[1], t[2], t[3]]
    }

    /// Decode and describe a single block.
    pub fn row(&self, block: usize) -> PermissionRow<'a> {
        let role = BlockRole::of(self.layout.index, block, self.layout.block_count);
        let slot = self.layout.access_slot(block);

        let (condition, permissions) = match access::decode(&self.access_bits(), slot) {
            Ok(c) => (Condition::Valid(c), permission::resolve(c, role)),
            Err(e) => {
                log::debug!("sector {} block {}: {}", self.layout.index, block, e);
                (Condition::Invalid(e), "")
            }
        };

        PermissionRow {
            sector: self.layout.index,
            sector_kind: self.layout.kind,
            show_sector_label: block == LABEL_BLOCK,
            block,
            slot,
            role,
            data: self.block(block),
            tags: if role == BlockRole::Trailer {
                TRAILER_TAGS
            } else {
                NO_TAGS
            },
            condition,
            permissions,
        }
    }

    /// Rows for every block of this sector.
    pub fn rows(&self) -> impl Iterator<Item = PermissionRow<'a>> + use<'a> {
        let sector = *self;
        (0..sector.layout.block_count).map(move |b| sector.row(b))
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// A decoded dump, ready to be walked block by block.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    data: &'a [u8],
    geometry: Geometry,
    card: CardInfo,
}

impl<'a> Report<'a> {
    /// Resolve the dump's layout and prepare a report over it.
    ///
    /// Fails if the dump length is not recognized (or, with
    /// [`ReportOptions::force_1k`], shorter than 1024 bytes).
    pub fn build(dump: &'a [u8], options: &ReportOptions) -> Result<Self, DumpError> {
        let geometry = if options.force_1k {
            Geometry::forced_1k(dump.len())?
        } else {
            Geometry::resolve(dump.len())?
        };
        let data = &dump[..geometry.size()];
        let card = CardInfo::parse(data)
            .ok_or_else(|| DumpError::too_small(PREAMBLE_LEN, data.len()))?;

        log::debug!(
            "Resolved {} byte dump as {} ({} standard + {} extended sectors)",
            dump.len(),
            geometry.card_type().display_name(),
            geometry.standard_sector_count(),
            geometry.extended_sector_count(),
        );

        Ok(Self {
            data,
            geometry,
            card,
        })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The bytes being decoded (truncated to 1024 in forced mode).
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn card(&self) -> CardInfo {
        self.card
    }

    pub fn sector(&self, index: usize) -> Sector<'a> {
        let layout = self.geometry.sector(index);
        Sector {
            layout,
            bytes: &self.data[layout.range()],
        }
    }

    pub fn sectors(&self) -> impl Iterator<Item = Sector<'a>> + use<'a> {
        let report = *self;
        (0..report.geometry.sector_count()).map(move |i| report.sector(i))
    }

    /// All rows in increasing (sector, block) order.
    pub fn rows(&self) -> Rows<'a> {
        Rows {
            report: *self,
            sector: 0,
            block: 0,
        }
    }

    /// Number of blocks whose access bits fail their check.
    pub fn invalid_count(&self) -> usize {
        self.rows().filter(|r| !r.condition.is_valid()).count()
    }
}

impl<'a> IntoIterator for &Report<'a> {
    type Item = PermissionRow<'a>;
    type IntoIter = Rows<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

/// Lazy iterator over a report's rows.
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    report: Report<'a>,
    sector: usize,
    block: usize,
}

impl<'a> Iterator for Rows<'a> {
    type Item = PermissionRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.sector >= self.report.geometry.sector_count() {
            return None;
        }

        let sector = self.report.sector(self.sector);
        let row = sector.row(self.block);

        self.block += 1;
        if self.block == sector.layout().block_count {
            self.block = 0;
            self.sector += 1;
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining: usize = self
            .report
            .geometry
            .sectors()
            .skip(self.sector)
            .map(|s| s.block_count)
            .sum::<usize>()
            - self.block;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl FusedIterator for Rows<'_> {}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
