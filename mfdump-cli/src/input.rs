//! Dump acquisition from a file or standard input.

use std::fs::File;
use std::io::{self, Read};

use mfdump_core::geometry::MAX_DUMP_SIZE;

use crate::CliError;

/// Path argument that selects standard input.
pub(crate) const STDIN_PATH: &str = "-";

/// One byte past the largest card, so oversized input is reported as
/// such instead of being silently cut to a valid size.
const READ_LIMIT: usize = MAX_DUMP_SIZE + 1;

/// Read a dump from `source`, or from standard input if it is `-`.
pub(crate) fn read_dump(source: &str) -> Result<Vec<u8>, CliError> {
    if source == STDIN_PATH {
        log::debug!("Reading dump from standard input");
        return read_limited(io::stdin().lock());
    }

    let file = File::open(source).map_err(|e| CliError::open(source, e))?;
    read_limited(file)
}

/// Read at most [`READ_LIMIT`] bytes from `reader`.
pub(crate) fn read_limited(reader: impl Read) -> Result<Vec<u8>, CliError> {
    let mut buf = Vec::with_capacity(READ_LIMIT);
    reader.take(READ_LIMIT as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_read_exact_size() {
        let data = vec![0x5Au8; 1024];
        let read = read_limited(Cursor::new(data.clone())).unwrap();
        assert_eq!(read, data);
    }

    #[test]
    fn test_read_stops_past_largest_card() {
        let read = read_limited(Cursor::new(vec![0u8; 10_000])).unwrap();
        assert_eq!(read.len(), 4097);
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[1u8; 320]).unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let read = read_dump(&path).unwrap();
        assert_eq!(read.len(), 320);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.mfd");
        let err = read_dump(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CliError::Open { .. }));
        assert!(err.to_string().contains("missing.mfd"));
    }
}
