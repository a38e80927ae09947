use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompressError {
    #[error("compressed stream is {0} bytes, too long for a directory entry")]
    StreamTooLong(usize),
    #[error("compressed stream is corrupt: {0}")]
    Corrupt(String),
}

/// Compresses one file range into a self-describing stream: the
/// decompressed size is prepended, so the loader never needs an external
/// length to unpack it.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CompressError> {
    let stream = lz4_flex::compress_prepend_size(data);
    if stream.len() > usize::from(u16::MAX) {
        return Err(CompressError::StreamTooLong(stream.len()));
    }
    Ok(stream)
}

/// Inverse of [`compress`], used to verify stored streams.
pub fn decompress(stream: &[u8]) -> Result<Vec<u8>, CompressError> {
    lz4_flex::decompress_size_prepended(stream).map_err(|err| CompressError::Corrupt(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{compress, decompress};

    #[test]
    fn round_trips_repetitive_data() {
        let data = vec![0x20u8; 4096];
        let stream = compress(&data).expect("compress");
        assert!(stream.len() < data.len());
        assert_eq!(decompress(&stream).expect("decompress"), data);
    }

    #[test]
    fn round_trips_short_incompressible_data() {
        let data: Vec<u8> = (0u8..=255).collect();
        let stream = compress(&data).expect("compress");
        assert_eq!(decompress(&stream).expect("decompress"), data);
    }

    #[test]
    fn rejects_a_garbage_stream() {
        assert!(decompress(&[0xff, 0xff, 0xff, 0xff, 0x00]).is_err());
    }
}
