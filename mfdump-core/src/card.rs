//! Card identification stored at the start of the manufacturer block.
//!
//! ```text
//! 11223344 44 08 0400 6263646566676869
//! ^^^^^^^^                              UID
//!          ^^                           BCC
//!             ^^                        SAK
//!                ^^^^                   ATQA
//!                     ^^^^^^^^^^^^^^^^  Manufacturer data
//! ```

use serde::Serialize;

/// Bytes of the manufacturer block covered by [`CardInfo`].
pub const PREAMBLE_LEN: usize = 8;

/// UID, check byte and anticollision answers read from block 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardInfo {
    pub uid: [u8; 4],
    pub bcc: u8,
    pub sak: u8,
    pub atqa: [u8; 2],
}

impl CardInfo {
    /// Read the preamble from the start of a dump or manufacturer block.
    ///
    /// Returns `None` if fewer than 8 bytes are available.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let preamble: &[u8; PREAMBLE_LEN] = bytes.get(..PREAMBLE_LEN)?.try_into().ok()?;
        Some(Self {
            uid: [preamble[0], preamble[1], preamble[2], preamble[3]],
            bcc: preamble[4],
            sak: preamble[5],
            atqa: [preamble[6], preamble[7]],
        })
    }

    /// XOR of the four UID bytes.
    pub fn expected_bcc(&self) -> u8 {
        self.uid.iter().fold(0, |acc, b| acc ^ b)
    }

    pub fn bcc_valid(&self) -> bool {
        self.bcc == self.expected_bcc()
    }

    /// Card family advertised by the SAK byte, if it is a known value.
    pub fn sak_description(&self) -> Option<&'static str> {
        match self.sak {
            0x08 => Some("Mifare Classic 1K"),
            0x09 => Some("Mifare Mini"),
            0x18 => Some("Mifare Classic 4K"),
            0x19 => Some("Mifare Classic 2K"),
            0x88 => Some("Mifare Classic 1K (Infineon)"),
            0x28 => Some("Mifare Classic 1K emulation (SmartMX)"),
            0x38 => Some("Mifare Classic 4K emulation (SmartMX)"),
            _ => None,
        }
    }
}
