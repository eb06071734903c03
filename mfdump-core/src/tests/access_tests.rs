use super::*;
use crate::test_support::{TRANSPORT_ACCESS, encode_access};

#[test]
fn test_transport_configuration() {
    assert_eq!(decode(&TRANSPORT_ACCESS, 0), Ok(AccessCondition::C000));
    assert_eq!(decode(&TRANSPORT_ACCESS, 1), Ok(AccessCondition::C000));
    assert_eq!(decode(&TRANSPORT_ACCESS, 2), Ok(AccessCondition::C000));
    assert_eq!(decode(&TRANSPORT_ACCESS, 3), Ok(AccessCondition::C001));
}

#[test]
fn test_all_zero_conditions() {
    let access = [0xFF, 0x0F, 0x00, 0x00];
    for slot in 0..SLOT_COUNT {
        assert_eq!(decode(&access, slot), Ok(AccessCondition::C000));
    }
}

#[test]
fn test_all_zero_bytes_fail() {
    // Both copies read as zero, so the inverted copy cannot match.
    let access = [0x00; 4];
    for slot in 0..SLOT_COUNT {
        assert_eq!(
            decode(&access, slot),
            Err(ChecksumMismatch {
                slot,
                bits: 0,
                inverted: 0
            })
        );
    }
}

#[test]
fn test_every_condition_in_every_slot() {
    for slot in 0..SLOT_COUNT {
        for cond in 0..8u8 {
            let mut conditions = [0u8; 4];
            conditions[slot] = cond;
            let access = encode_access(conditions);
            let decoded = decode(&access, slot).unwrap();
            assert_eq!(decoded.value(), cond, "slot {slot}, condition {cond}");
        }
    }
}

#[test]
fn test_slots_are_independent() {
    let access = encode_access([0b011, 0b101, 0b110, 0b100]);
    let decoded: Vec<u8> = decode_all(&access)
        .into_iter()
        .map(|r| r.unwrap().value())
        .collect();
    assert_eq!(decoded, [0b011, 0b101, 0b110, 0b100]);
}

#[test]
fn test_known_trailer_bytes() {
    // Common "keys readable only with key B" configuration.
    let access = [0x7F, 0x07, 0x88, 0x40];
    assert_eq!(decode(&access, 0), Ok(AccessCondition::C000));
    assert_eq!(decode(&access, 3), Ok(AccessCondition::C011));
}

#[test]
fn test_spare_byte_is_ignored() {
    let mut access = TRANSPORT_ACCESS;
    for spare in [0x00, 0x69, 0xFF] {
        access[3] = spare;
        assert!(decode_all(&access).iter().all(|r| r.is_ok()));
    }
}

#[test]
fn test_single_bit_flip_is_detected() {
    let original = encode_access([0b001, 0b010, 0b100, 0b111]);
    for byte in 0..3 {
        for bit in 0..8 {
            let mut access = original;
            access[byte] ^= 1 << bit;
            let failures = decode_all(&access).iter().filter(|r| r.is_err()).count();
            assert_eq!(
                failures, 1,
                "flipping byte {byte} bit {bit} should break exactly one slot"
            );
        }
    }
}

#[test]
fn test_mismatch_reports_raw_triples() {
    let mut access = TRANSPORT_ACCESS;
    // Clear /C1 of slot 2 so the inverted copy reads 011.
    access[0] &= !(1 << 2);
    let err = decode(&access, 2).unwrap_err();
    assert_eq!(err.slot, 2);
    assert_eq!(err.bits, 0b000);
    assert_eq!(err.inverted, 0b011);
    assert!(err.to_string().contains("slot 2"));
}

#[test]
fn test_condition_bits_and_display() {
    assert_eq!(AccessCondition::C000.bits(), "000");
    assert_eq!(AccessCondition::C110.bits(), "110");
    assert_eq!(AccessCondition::C101.to_string(), "101");
    for (i, cond) in AccessCondition::ALL.iter().enumerate() {
        assert_eq!(usize::from(cond.value()), i);
        assert_eq!(AccessCondition::from_bits(i as u8), Some(*cond));
    }
    assert_eq!(AccessCondition::from_bits(8), None);
}

#[test]
fn test_from_low_bits_masks_high_bits() {
    assert_eq!(AccessCondition::from_low_bits(0b011), AccessCondition::C011);
    assert_eq!(AccessCondition::from_low_bits(0b1111_1011), AccessCondition::C011);
    for (i, cond) in AccessCondition::ALL.iter().enumerate() {
        assert_eq!(AccessCondition::from_low_bits(i as u8), *cond);
    }
}

#[test]
#[should_panic(expected = "out of range")]
fn test_slot_out_of_range_panics() {
    let _ = decode(&TRANSPORT_ACCESS, 4);
}
