//! Synthetic dump builders shared by the unit tests.

use crate::geometry::Geometry;

/// Factory access bytes: slots 0-2 condition `000`, trailer slot `001`.
pub const TRANSPORT_ACCESS: [u8; 4] = [0xFF, 0x07, 0x80, 0x69];

/// Encode per-slot `C1 C2 C3` values into consistent access bytes.
pub fn encode_access(conditions: [u8; 4]) -> [u8; 4] {
    let mut bytes = [0u8, 0, 0, 0x69];
    for (slot, &cond) in conditions.iter().enumerate() {
        let c1 = (cond >> 2) & 1;
        let c2 = (cond >> 1) & 1;
        let c3 = cond & 1;
        bytes[1] |= c1 << (4 + slot);
        bytes[2] |= c2 << slot;
        bytes[2] |= c3 << (4 + slot);
        bytes[0] |= (c1 ^ 1) << slot;
        bytes[0] |= (c2 ^ 1) << (4 + slot);
        bytes[1] |= (c3 ^ 1) << slot;
    }
    bytes
}

/// Build a dump of `len` bytes where every block is filled with its
/// absolute block number and every trailer holds `access`.
pub fn make_dump(len: usize, access: [u8; 4]) -> Vec<u8> {
    let geometry = Geometry::resolve(len).unwrap();
    let mut dump = vec![0u8; len];

    for sector in geometry.sectors() {
        for block in 0..sector.block_count {
            let range = sector.block_range(block);
            let absolute = (range.start / 16) as u8;
            dump[range.clone()].fill(absolute);
            if sector.is_trailer(block) {
                set_trailer(&mut dump, range.start, access);
            }
        }
    }

    // UID 01 02 03 04, BCC, SAK 0x08, ATQA 04 00
    dump[..8].copy_from_slice(&[0x01, 0x02, 0x03, 0x04, 0x04, 0x08, 0x04, 0x00]);
    dump
}

/// Write a trailer (KeyA = FF.., access bytes, KeyB = 00..) at `start`.
pub fn set_trailer(dump: &mut [u8], start: usize, access: [u8; 4]) {
    dump[start..start + 6].fill(0xFF);
    dump[start + 6..start + 10].copy_from_slice(&access);
    dump[start + 10..start + 16].fill(0x00);
}
