//! The cassette (CAS) program container: a 128-byte UPM tape header, a
//! 16-byte program header, then the program payload. Only the payload
//! ends up on the cartridge; the headers are validated and dropped.

use std::path::Path;

use crate::format::FormatError;

pub const UPM_HEADER_SIZE: usize = 128;
pub const PROGRAM_HEADER_SIZE: usize = 16;
pub const HEADERS_SIZE: usize = UPM_HEADER_SIZE + PROGRAM_HEADER_SIZE;

const UPM_FILE_TYPE: u8 = 0x11;
const PROGRAM_FILE_TYPE: u8 = 0x01;

/// Parsed program header fields of a cassette container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramHeader {
    pub length: u16,
    pub autorun: bool,
    pub version: u8,
}

/// Container-ness is decided by the `.cas` extension, case-insensitive.
#[must_use]
pub fn is_cas_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("cas"))
}

/// Validates both cassette headers and returns the program payload.
///
/// # Errors
/// Returns `FormatError` when either header is structurally invalid or the
/// payload is shorter than the declared length.
pub fn payload(bytes: &[u8]) -> Result<&[u8], FormatError> {
    if bytes.len() < HEADERS_SIZE {
        return Err(FormatError::Truncated);
    }
    let upm = &bytes[..UPM_HEADER_SIZE];
    if upm[0] != UPM_FILE_TYPE || upm[1] != 0x00 {
        return Err(FormatError::InvalidUpmHeader);
    }
    let header = parse_program_header(&bytes[UPM_HEADER_SIZE..HEADERS_SIZE])?;

    let data = &bytes[HEADERS_SIZE..];
    let expected = usize::from(header.length);
    if data.len() < expected {
        return Err(FormatError::PayloadTruncated {
            expected,
            actual: data.len(),
        });
    }
    Ok(&data[..expected])
}

fn parse_program_header(bytes: &[u8]) -> Result<ProgramHeader, FormatError> {
    if bytes[0] != 0x00 || bytes[1] != PROGRAM_FILE_TYPE {
        return Err(FormatError::InvalidProgramHeader);
    }
    Ok(ProgramHeader {
        length: u16::from_le_bytes([bytes[2], bytes[3]]),
        autorun: bytes[4] == 0xff,
        version: bytes[15],
    })
}

#[cfg(test)]
mod tests {
    use super::{is_cas_path, payload, HEADERS_SIZE, UPM_HEADER_SIZE};
    use crate::format::FormatError;

    fn make_cas(data: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADERS_SIZE];
        bytes[0] = 0x11;
        let blocks = (data.len() / 128 + 1) as u16;
        bytes[2..4].copy_from_slice(&blocks.to_le_bytes());
        bytes[4] = (data.len() % 128) as u8;
        bytes[UPM_HEADER_SIZE + 1] = 0x01;
        bytes[UPM_HEADER_SIZE + 2..UPM_HEADER_SIZE + 4]
            .copy_from_slice(&(data.len() as u16).to_le_bytes());
        bytes[UPM_HEADER_SIZE + 4] = 0xff;
        bytes.extend_from_slice(data);
        bytes
    }

    #[test]
    fn extracts_the_declared_payload() {
        let cas = make_cas(b"0123456789");
        assert_eq!(payload(&cas).expect("valid cassette"), b"0123456789");
    }

    #[test]
    fn ignores_trailing_bytes_past_the_declared_length() {
        let mut cas = make_cas(b"abc");
        cas.extend_from_slice(b"junk");
        assert_eq!(payload(&cas).expect("valid cassette"), b"abc");
    }

    #[test]
    fn rejects_a_wrong_upm_file_type() {
        let mut cas = make_cas(b"abc");
        cas[0] = 0x01;
        assert_eq!(payload(&cas), Err(FormatError::InvalidUpmHeader));
    }

    #[test]
    fn rejects_a_copy_protected_cassette() {
        let mut cas = make_cas(b"abc");
        cas[1] = 0x01;
        assert_eq!(payload(&cas), Err(FormatError::InvalidUpmHeader));
    }

    #[test]
    fn rejects_a_wrong_program_file_type() {
        let mut cas = make_cas(b"abc");
        cas[UPM_HEADER_SIZE + 1] = 0x02;
        assert_eq!(payload(&cas), Err(FormatError::InvalidProgramHeader));
    }

    #[test]
    fn rejects_headers_cut_short() {
        let cas = make_cas(b"abc");
        assert_eq!(payload(&cas[..HEADERS_SIZE - 1]), Err(FormatError::Truncated));
    }

    #[test]
    fn rejects_a_payload_shorter_than_declared() {
        let cas = make_cas(b"abcdef");
        assert_eq!(
            payload(&cas[..cas.len() - 2]),
            Err(FormatError::PayloadTruncated {
                expected: 6,
                actual: 4
            })
        );
    }

    #[test]
    fn cas_extension_matches_case_insensitively() {
        assert!(is_cas_path("games/INVADERS.CAS"));
        assert!(is_cas_path("games/invaders.cas"));
        assert!(!is_cas_path("games/invaders.bin"));
        assert!(!is_cas_path("invaders"));
    }
}
