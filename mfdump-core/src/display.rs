/// Format bytes as lowercase hex with no separators (e.g., `"a0b1c2"`).
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Render bytes as printable ASCII.
///
/// Printable characters (0x20-0x7E) are kept as-is; everything else,
/// including NUL padding, becomes `.` so the output keeps one column per
/// byte.
pub fn ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if (0x20..0x7F).contains(&b) {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(&[]), "");
        assert_eq!(hex(&[0x00, 0x0a, 0xff]), "000aff");
        assert_eq!(hex(&[0xFF, 0x07, 0x80, 0x69]), "ff078069");
    }

    #[test]
    fn test_ascii() {
        assert_eq!(ascii(b"HELLO"), "HELLO");
        assert_eq!(ascii(b"A\0B\xFF"), "A.B.");
        assert_eq!(ascii(b" ~\x7F"), " ~.");
        assert_eq!(ascii(&[0u8; 16]).len(), 16);
    }
}
