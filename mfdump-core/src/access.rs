//! Access condition decoding.
//!
//! Every sector trailer carries three access bits (C1, C2, C3) for each of
//! its four slots. The bits are stored twice: once as-is in bytes 1 and 2,
//! once inverted in bytes 0 and 1. A slot is only trusted when both copies
//! agree.
//!
//! ```text
//!          bit 7  bit 6  bit 5  bit 4  bit 3  bit 2  bit 1  bit 0
//! byte 0   /C2_3  /C2_2  /C2_1  /C2_0  /C1_3  /C1_2  /C1_1  /C1_0
//! byte 1    C1_3   C1_2   C1_1   C1_0  /C3_3  /C3_2  /C3_1  /C3_0
//! byte 2    C3_3   C3_2   C3_1   C3_0   C2_3   C2_2   C2_1   C2_0
//! byte 3   (spare, not interpreted)
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Number of access slots per sector.
pub const SLOT_COUNT: usize = 4;

/// Length of the access-bit field in a sector trailer (3 bytes + spare).
pub const ACCESS_BITS_LEN: usize = 4;

// ---------------------------------------------------------------------------
// Bit layout
// ---------------------------------------------------------------------------

/// Location of one access bit: `(byte index, bit index)`.
#[derive(Debug, Clone, Copy)]
struct BitSource {
    byte: usize,
    bit: u8,
}

const fn at(byte: usize, bit: u8) -> BitSource {
    BitSource { byte, bit }
}

/// Where a slot's C1, C2, C3 live, in that order.
#[derive(Debug, Clone, Copy)]
struct SlotLayout {
    direct: [BitSource; 3],
    inverted: [BitSource; 3],
}

const SLOT_LAYOUT: [SlotLayout; SLOT_COUNT] = [
    SlotLayout {
        direct: [at(1, 4), at(2, 0), at(2, 4)],
        inverted: [at(0, 0), at(0, 4), at(1, 0)],
    },
    SlotLayout {
        direct: [at(1, 5), at(2, 1), at(2, 5)],
        inverted: [at(0, 1), at(0, 5), at(1, 1)],
    },
    SlotLayout {
        direct: [at(1, 6), at(2, 2), at(2, 6)],
        inverted: [at(0, 2), at(0, 6), at(1, 2)],
    },
    SlotLayout {
        direct: [at(1, 7), at(2, 3), at(2, 7)],
        inverted: [at(0, 3), at(0, 7), at(1, 3)],
    },
];

/// Collect three bits into a `C1 C2 C3` value, C1 being the most significant.
fn gather(access: &[u8; ACCESS_BITS_LEN], sources: &[BitSource; 3]) -> u8 {
    sources
        .iter()
        .fold(0, |acc, src| (acc << 1) | ((access[src.byte] >> src.bit) & 1))
}

// ---------------------------------------------------------------------------
// Access condition
// ---------------------------------------------------------------------------

/// A validated access condition, named after its `C1 C2 C3` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AccessCondition {
    C000,
    C001,
    C010,
    C011,
    C100,
    C101,
    C110,
    C111,
}

impl AccessCondition {
    /// All conditions in numeric order.
    pub const ALL: [AccessCondition; 8] = [
        AccessCondition::C000,
        AccessCondition::C001,
        AccessCondition::C010,
        AccessCondition::C011,
        AccessCondition::C100,
        AccessCondition::C101,
        AccessCondition::C110,
        AccessCondition::C111,
    ];

    /// Build a condition from a 3-bit value. Returns `None` above 7.
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.get(usize::from(bits)).copied()
    }

    /// Build a condition from the low three bits of `bits`.
    pub fn from_low_bits(bits: u8) -> Self {
        Self::ALL[usize::from(bits & 0b111)]
    }

    /// Numeric value 0-7.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// The `C1 C2 C3` bits as a 3-character string, e.g. `"011"`.
    pub fn bits(self) -> &'static str {
        match self {
            AccessCondition::C000 => "000",
            AccessCondition::C001 => "001",
            AccessCondition::C010 => "010",
            AccessCondition::C011 => "011",
            AccessCondition::C100 => "100",
            AccessCondition::C101 => "101",
            AccessCondition::C110 => "110",
            AccessCondition::C111 => "111",
        }
    }
}

impl fmt::Display for AccessCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bits())
    }
}

/// The two stored copies of a slot's access bits disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[error(
    "access bits of slot {slot} fail their check: C1C2C3 = {bits:03b}, inverted copy = {inverted:03b}"
)]
pub struct ChecksumMismatch {
    pub slot: usize,
    pub bits: u8,
    pub inverted: u8,
}

/// Decode the access condition of `slot` from a trailer's access bytes.
///
/// # Panics
/// Panics if `slot` is not in `0..4`. Callers reduce block indices to a
/// slot first (see [`SectorLayout::access_slot`](crate::SectorLayout::access_slot)).
pub fn decode(
    access: &[u8; ACCESS_BITS_LEN],
    slot: usize,
) -> Result<AccessCondition, ChecksumMismatch> {
    assert!(slot < SLOT_COUNT, "access slot {slot} out of range");

    let layout = &SLOT_LAYOUT[slot];
    let bits = gather(access, &layout.direct);
    let inverted = gather(access, &layout.inverted);

    if bits != !inverted & 0b111 {
        return Err(ChecksumMismatch {
            slot,
            bits,
            inverted,
        });
    }

    Ok(AccessCondition::from_low_bits(bits))
}

/// Decode all four slots at once.
pub fn decode_all(
    access: &[u8; ACCESS_BITS_LEN],
) -> [Result<AccessCondition, ChecksumMismatch>; SLOT_COUNT] {
    std::array::from_fn(|slot| decode(access, slot))
}

#[cfg(test)]
#[path = "tests/access_tests.rs"]
mod tests;
