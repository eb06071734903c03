//! Sector and block layout of Mifare Classic dumps.
//!
//! The dump length alone decides the layout. Sectors 0-31 hold 4 blocks of
//! 16 bytes each; the 4K card adds 8 extended sectors (32-39) of 16 blocks
//! that start right after the first 2048 bytes.

use std::ops::Range;

use serde::Serialize;

use crate::error::DumpError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Size of every block on the card.
pub const BLOCK_SIZE: usize = 16;

/// Dump lengths that map onto a known card layout.
pub const VALID_SIZES: [usize; 4] = [320, 1024, 2048, 4096];

/// Largest recognized dump.
pub const MAX_DUMP_SIZE: usize = 4096;

/// Length used when the caller forces 1K decoding.
pub const FORCED_1K_SIZE: usize = 1024;

/// Sectors below this index use the standard 4-block layout.
pub const STANDARD_SECTOR_LIMIT: usize = 32;

const STANDARD_BLOCKS: usize = 4;
const EXTENDED_BLOCKS: usize = 16;
const EXTENDED_BASE: usize = STANDARD_SECTOR_LIMIT * STANDARD_BLOCKS * BLOCK_SIZE;

/// Extended sectors share one access slot per cluster of this many blocks.
pub const CLUSTER_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Card type
// ---------------------------------------------------------------------------

/// Card family implied by the dump size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardType {
    Mini,
    Classic1K,
    Classic2K,
    Classic4K,
}

impl CardType {
    pub fn display_name(&self) -> &'static str {
        match self {
            CardType::Mini => "Mifare Mini",
            CardType::Classic1K => "Mifare Classic 1K",
            CardType::Classic2K => "Mifare Classic 2K",
            CardType::Classic4K => "Mifare Classic 4K",
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Whether a sector uses the 4-block or the 16-block layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorKind {
    Standard,
    Extended,
}

/// Layout of a whole dump, derived from its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    size: usize,
    sector_count: usize,
}

impl Geometry {
    /// Resolve the layout for a dump of `len` bytes.
    pub fn resolve(len: usize) -> Result<Self, DumpError> {
        let sector_count = match len {
            320 => 5,
            1024 => 16,
            2048 => 32,
            4096 => STANDARD_SECTOR_LIMIT + 8,
            _ => return Err(DumpError::invalid_length(len)),
        };
        Ok(Self {
            size: len,
            sector_count,
        })
    }

    /// Treat the input as a 1K dump no matter how long it is.
    ///
    /// Used for stream input where the reader may deliver more than the
    /// card holds. The input still has to cover a full 1K image.
    pub fn forced_1k(len: usize) -> Result<Self, DumpError> {
        if len < FORCED_1K_SIZE {
            return Err(DumpError::too_small(FORCED_1K_SIZE, len));
        }
        Self::resolve(FORCED_1K_SIZE)
    }

    /// Number of bytes covered by this layout.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sector_count(&self) -> usize {
        self.sector_count
    }

    pub fn standard_sector_count(&self) -> usize {
        self.sector_count.min(STANDARD_SECTOR_LIMIT)
    }

    pub fn extended_sector_count(&self) -> usize {
        self.sector_count - self.standard_sector_count()
    }

    pub fn card_type(&self) -> CardType {
        match self.size {
            320 => CardType::Mini,
            1024 => CardType::Classic1K,
            2048 => CardType::Classic2K,
            _ => CardType::Classic4K,
        }
    }

    /// Layout of one sector.
    ///
    /// # Panics
    /// Panics if `index` is not below [`sector_count`](Self::sector_count).
    pub fn sector(&self, index: usize) -> SectorLayout {
        assert!(
            index < self.sector_count,
            "sector {index} out of range for a {}-sector dump",
            self.sector_count
        );
        SectorLayout::new(index)
    }

    /// All sector layouts in increasing index order.
    pub fn sectors(&self) -> impl Iterator<Item = SectorLayout> + use<> {
        (0..self.sector_count).map(SectorLayout::new)
    }
}

/// Position and shape of a single sector inside the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectorLayout {
    pub index: usize,
    pub kind: SectorKind,
    pub offset: usize,
    pub block_count: usize,
}

impl SectorLayout {
    fn new(index: usize) -> Self {
        if index < STANDARD_SECTOR_LIMIT {
            Self {
                index,
                kind: SectorKind::Standard,
                offset: index * STANDARD_BLOCKS * BLOCK_SIZE,
                block_count: STANDARD_BLOCKS,
            }
        } else {
            Self {
                index,
                kind: SectorKind::Extended,
                offset: EXTENDED_BASE
                    + (index - STANDARD_SECTOR_LIMIT) * EXTENDED_BLOCKS * BLOCK_SIZE,
                block_count: EXTENDED_BLOCKS,
            }
        }
    }

    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Sector size in bytes.
    pub fn size(&self) -> usize {
        self.block_count * BLOCK_SIZE
    }

    /// Byte range of the whole sector within the dump.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.size()
    }

    /// Byte range of `block` within the dump.
    pub fn block_range(&self, block: usize) -> Range<usize> {
        assert!(
            block < self.block_count,
            "block {block} out of range for sector {}",
            self.index
        );
        let start = self.offset + block * BLOCK_SIZE;
        start..start + BLOCK_SIZE
    }

    /// Index of the trailer block within the sector.
    pub fn trailer_block(&self) -> usize {
        self.block_count - 1
    }

    pub fn is_trailer(&self, block: usize) -> bool {
        block == self.trailer_block()
    }

    /// Access-bit slot (0-3) that governs `block`.
    ///
    /// Standard sectors have one slot per block. Extended sectors group
    /// their blocks into clusters of five, the trailer landing in slot 3.
    pub fn access_slot(&self, block: usize) -> usize {
        let slot = match self.kind {
            SectorKind::Standard => block,
            SectorKind::Extended => block / CLUSTER_SIZE,
        };
        assert!(
            slot < crate::access::SLOT_COUNT,
            "block {block} of sector {} maps to access slot {slot}",
            self.index
        );
        slot
    }
}
