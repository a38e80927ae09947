//! The on-ROM directory: an 8-byte header with the per-generation file
//! counts and table addresses, followed by one 16-byte entry per file.
//! Its size is known before any file is placed; the contents are patched
//! in afterwards, once every address is fixed.

use crate::filesys::{Placement, ProgramFile};
use crate::format::name;
use crate::image::{RomImage, PAGE_SIZE};

pub const HEADER_SIZE: usize = 8;
pub const ENTRY_SIZE: usize = name::NAME_LENGTH + 5;

/// Serialized size of the whole table, header included.
#[must_use]
pub fn table_size(file_count: usize) -> usize {
    HEADER_SIZE + ENTRY_SIZE * file_count
}

/// Fills the reserved directory region. `table_at` is the region start,
/// `files_at` the address where file data begins. Entries for the legacy
/// generation form a contiguous prefix, split from the extended suffix at
/// the first extended-tagged file; with no extended file both tables
/// alias. All addresses here live in page 0, so the u16/u8 narrowing
/// never truncates.
pub fn write(
    image: &mut RomImage,
    table_at: usize,
    files_at: usize,
    files: &[ProgramFile],
    placements: &[Placement],
) {
    let entries_at = table_at + HEADER_SIZE;

    for (index, (file, placement)) in files.iter().zip(placements).enumerate() {
        let mut entry = [0u8; ENTRY_SIZE];
        entry[..name::NAME_LENGTH].copy_from_slice(&name::to_rom_name(&file.path));

        let offset = (placement.address as usize % PAGE_SIZE) as u16;
        let page = (placement.address as usize / PAGE_SIZE) as u8;
        entry[name::NAME_LENGTH..name::NAME_LENGTH + 2].copy_from_slice(&offset.to_le_bytes());
        entry[name::NAME_LENGTH + 2] = page;
        entry[name::NAME_LENGTH + 3..].copy_from_slice(&placement.stored_len.to_le_bytes());

        image.patch(entries_at + index * ENTRY_SIZE, &entry);
    }

    let split = files.iter().position(|file| file.extended);
    let (legacy_count, extended_count, extended_at) = match split {
        Some(at) => (at, files.len() - at, entries_at + at * ENTRY_SIZE),
        None => (files.len(), files.len(), entries_at),
    };

    let mut header = [0u8; HEADER_SIZE];
    header[0] = legacy_count as u8;
    header[1] = extended_count as u8;
    header[2..4].copy_from_slice(&(entries_at as u16).to_le_bytes());
    header[4..6].copy_from_slice(&(extended_at as u16).to_le_bytes());
    header[6..8].copy_from_slice(&(files_at as u16).to_le_bytes());
    image.patch(table_at, &header);
}
