//! File placement: walks the inputs in order, reuses the recorded
//! placement for byte-identical duplicates, and encodes each new file
//! according to the build mode and its container kind.

use thiserror::Error;

use crate::compress::{self, CompressError};
use crate::image::{ImageError, RomImage};
use crate::pool::{ContentPool, Handle};

/// The per-generation directory counts are single bytes.
pub const MAX_FILE_NUMBER: usize = 255;

/// Bytes at the head of a raw loadable module that the firmware reads
/// through its fixed one-byte input routine, which never decompresses.
pub const DIRECT_READ_BYTES: usize = 16;

#[derive(Debug, Clone)]
pub struct ProgramFile {
    pub path: String,
    pub content: Handle,
    pub cas_container: bool,
    pub extended: bool,
}

/// Where a file's bytes ended up and how many of them were written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub address: u32,
    pub stored_len: u16,
}

#[derive(Debug, Error)]
pub enum PlaceError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Compress(#[from] CompressError),
}

/// Lays out every file in input order and returns one placement per
/// file, parallel to `files`.
pub fn place_files(
    pool: &ContentPool,
    files: &[ProgramFile],
    image: &mut RomImage,
    compressed: bool,
) -> Result<Vec<Placement>, PlaceError> {
    let mut placements: Vec<Placement> = Vec::with_capacity(files.len());

    for (index, file) in files.iter().enumerate() {
        // First-match-wins scan over everything placed so far; two files
        // are duplicates only when their original contents are equal byte
        // for byte. The earlier placement is reused verbatim, nothing is
        // written again.
        let duplicate = (0..index)
            .find(|&earlier| pool.get(files[earlier].content) == pool.get(file.content));
        if let Some(earlier) = duplicate {
            placements.push(placements[earlier]);
            continue;
        }

        // The address is recorded before any byte of this file goes out.
        let address = image.cursor() as u32;
        let content = pool.get(file.content);

        let written = if !compressed {
            image.write_range(content)?;
            content.len()
        } else if file.cas_container {
            let stream = compress::compress(content)?;
            image.write_range(&stream)?;
            stream.len()
        } else if content.len() > DIRECT_READ_BYTES {
            image.write_range(&content[..DIRECT_READ_BYTES])?;
            let stream = compress::compress(&content[DIRECT_READ_BYTES..])?;
            image.write_range(&stream)?;
            DIRECT_READ_BYTES + stream.len()
        } else {
            // Too short for the firmware to ever reach compressed data.
            image.write_range(content)?;
            content.len()
        };

        let stored_len =
            u16::try_from(written).map_err(|_| CompressError::StreamTooLong(written))?;
        placements.push(Placement { address, stored_len });
    }

    Ok(placements)
}
