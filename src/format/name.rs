//! Transliteration of host paths into the fixed-width uppercase 8.3
//! names stored in the ROM directory.

use std::path::Path;

pub const NAME_LENGTH: usize = 11;
const STEM_LENGTH: usize = 8;

/// Maps an arbitrary path to the 11-byte directory name: 8 stem bytes
/// then 3 extension bytes, uppercase, space padded. The path component is
/// dropped; characters outside the printable ASCII range become `_`.
#[must_use]
pub fn to_rom_name(path: &str) -> [u8; NAME_LENGTH] {
    let file_name = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, extension),
        _ => (file_name, ""),
    };

    let mut name = [b' '; NAME_LENGTH];
    pack_field(&mut name[..STEM_LENGTH], stem);
    pack_field(&mut name[STEM_LENGTH..], extension);
    name
}

fn pack_field(field: &mut [u8], text: &str) {
    for (slot, ch) in field.iter_mut().zip(text.chars()) {
        *slot = if ch.is_ascii_graphic() {
            ch.to_ascii_uppercase() as u8
        } else {
            b'_'
        };
    }
}
