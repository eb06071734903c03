//! Permission text for decoded access conditions.
//!
//! Data blocks list `read | write | increment | decrement/transfer/restore`,
//! each column naming the key(s) allowed to perform the operation. Trailer
//! blocks list `KeyA r w | Access bits r w | KeyB r w`.

use serde::Serialize;

use crate::access::AccessCondition;

/// Permission text of the manufacturer block, which can never be changed.
pub const MANUFACTURER_PERMISSIONS: &str = "-";

/// What a block is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRole {
    /// Sector 0, block 0: UID and manufacturer data
    Manufacturer,
    /// Ordinary data or value block
    Data,
    /// Sector trailer holding keys and access bits
    Trailer,
}

impl BlockRole {
    /// Role of `block` in `sector`, where the sector has `block_count` blocks.
    pub fn of(sector: usize, block: usize, block_count: usize) -> Self {
        if sector == 0 && block == 0 {
            BlockRole::Manufacturer
        } else if block + 1 == block_count {
            BlockRole::Trailer
        } else {
            BlockRole::Data
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlockRole::Manufacturer => "manufacturer",
            BlockRole::Data => "data",
            BlockRole::Trailer => "trailer",
        }
    }
}

/// Permission text for a block with the given role and condition.
pub fn resolve(condition: AccessCondition, role: BlockRole) -> &'static str {
    match role {
        BlockRole::Manufacturer => MANUFACTURER_PERMISSIONS,
        BlockRole::Data => data_permissions(condition),
        BlockRole::Trailer => trailer_permissions(condition),
    }
}

fn data_permissions(condition: AccessCondition) -> &'static str {
    match condition {
        AccessCondition::C000 => "A/B | A/B   | A/B | A/B [transport]",
        AccessCondition::C001 => "A/B |  -    |  -  | A/B [value]",
        AccessCondition::C010 => "A/B |  -    |  -  |  -  [r/w]",
        AccessCondition::C011 => "  B |   B   |  -  |  -  [r/w]",
        AccessCondition::C100 => "A/B |   B   |  -  |  -  [r/w]",
        AccessCondition::C101 => "  B |  -    |  -  |  -  [r/w]",
        AccessCondition::C110 => "A/B |   B   |   B | A/B [value]",
        AccessCondition::C111 => " -  |  -    |  -  |  -  [r/w]",
    }
}

fn trailer_permissions(condition: AccessCondition) -> &'static str {
    match condition {
        AccessCondition::C000 => "- A | A   - | A A",
        AccessCondition::C001 => "- A | A   A | A A [transport]",
        AccessCondition::C010 => "- - | A   - | A -",
        AccessCondition::C011 => "- B | A/B B | - B",
        AccessCondition::C100 => "- B | A/B - | - B",
        AccessCondition::C101 => "- - | A/B B | - -",
        AccessCondition::C110 => "- - | A/B - | - -",
        AccessCondition::C111 => "- - | A/B - | - -",
    }
}
