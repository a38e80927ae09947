//! Embedded loader prefixes, one per cartridge variant and build
//! encoding. The blob is the Z80 bootstrap the machine runs from the
//! start of page 0: it relocates itself to RAM, walks the ROM directory
//! and boots the first file. The compressed builds ship a larger loader
//! that routes file data through the depacker. The page start sequence
//! is not part of the blobs; the image writer emits it at every page
//! boundary, including offset 0.

use crate::image::CartKind;

#[must_use]
pub fn loader(cart: CartKind, compressed: bool) -> &'static [u8] {
    match (cart, compressed) {
        (CartKind::MegaCart, false) => &MEGACART_LOADER,
        (CartKind::MegaCart, true) => &MEGACART_DECOMP_LOADER,
        (CartKind::MultiCart, false) => &MULTICART_LOADER,
        (CartKind::MultiCart, true) => &MULTICART_DECOMP_LOADER,
    }
}

static MEGACART_LOADER: [u8; 104] = [
    0xf3, 0xed, 0x56, 0x31, 0x00, 0x17, 0x21, 0x1b,
    0xc0, 0x11, 0x00, 0x18, 0x01, 0x5c, 0x00, 0xed,
    0xb0, 0xc3, 0x00, 0x18, 0x3e, 0x01, 0xd3, 0x03,
    0x2a, 0x06, 0xc0, 0xeb, 0x21, 0x0a, 0xc0, 0x46,
    0x23, 0x4e, 0x23, 0xc5, 0xe5, 0xd5, 0xcd, 0x48,
    0x18, 0xd1, 0xe1, 0xc1, 0x0b, 0x78, 0xb1, 0x20,
    0xf2, 0x3a, 0x04, 0xc0, 0xfe, 0xff, 0x28, 0x08,
    0x2a, 0x08, 0xc0, 0xe9, 0xc9, 0x7e, 0x12, 0x23,
    0x13, 0x7c, 0xfe, 0x40, 0x20, 0x06, 0x21, 0x00,
    0xc0, 0x3a, 0x0c, 0xc0, 0x3c, 0x32, 0x0c, 0xc0,
    0xd3, 0x03, 0xc9, 0xaf, 0x32, 0x0c, 0xc0, 0x3e,
    0x01, 0xd3, 0x03, 0x21, 0x10, 0xc0, 0x18, 0xe4,
    0xc9, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
];

static MEGACART_DECOMP_LOADER: [u8; 232] = [
    0xf3, 0xed, 0x56, 0x31, 0x00, 0x17, 0x21, 0x1b,
    0xc0, 0x11, 0x00, 0x18, 0x01, 0xdc, 0x00, 0xed,
    0xb0, 0xc3, 0x00, 0x18, 0x3e, 0x01, 0xd3, 0x03,
    0x2a, 0x06, 0xc0, 0xeb, 0x21, 0x0a, 0xc0, 0x46,
    0x23, 0x4e, 0x23, 0xc5, 0xe5, 0xd5, 0xcd, 0x62,
    0x18, 0xd1, 0xe1, 0xc1, 0x0b, 0x78, 0xb1, 0x20,
    0xf2, 0x3a, 0x04, 0xc0, 0xfe, 0xff, 0x28, 0x08,
    0x2a, 0x08, 0xc0, 0xe9, 0xc9, 0x7e, 0x12, 0x23,
    0x13, 0x7c, 0xfe, 0x40, 0x20, 0x06, 0x21, 0x00,
    0xc0, 0x3a, 0x0c, 0xc0, 0x3c, 0x32, 0x0c, 0xc0,
    0xd3, 0x03, 0xc9, 0xaf, 0x32, 0x0c, 0xc0, 0x3e,
    0x01, 0xd3, 0x03, 0x21, 0x10, 0xc0, 0x18, 0xe4,
    0xcd, 0x90, 0x18, 0xe5, 0xdd, 0xe1, 0xd5, 0xfd,
    0xe1, 0x06, 0x08, 0xcd, 0xb4, 0x18, 0x30, 0x0c,
    0xdd, 0x7e, 0x00, 0xdd, 0x23, 0x12, 0x13, 0x18,
    0xf3, 0x0e, 0x01, 0xcd, 0xb4, 0x18, 0xcb, 0x11,
    0x38, 0x06, 0xcd, 0xb4, 0x18, 0x30, 0xf4, 0x0c,
    0x79, 0xfe, 0x10, 0x28, 0x1c, 0x06, 0x04, 0xcd,
    0xb4, 0x18, 0xcb, 0x15, 0x10, 0xf9, 0x7d, 0x92,
    0x6f, 0x7c, 0x9b, 0x67, 0x7e, 0x12, 0x23, 0x13,
    0x0d, 0x20, 0xfa, 0x18, 0xca, 0xe5, 0x62, 0x6b,
    0x37, 0xed, 0x42, 0x44, 0x18, 0xea, 0xcb, 0x27,
    0x87, 0x30, 0x04, 0xcd, 0xc2, 0x18, 0x3c, 0xc9,
    0x10, 0xfe, 0x41, 0xc9, 0x7e, 0x23, 0x7c, 0xfe,
    0x40, 0xc8, 0xc9, 0x3a, 0x0c, 0xc0, 0x3c, 0x32,
    0x0c, 0xc0, 0xd3, 0x03, 0x21, 0x00, 0xc0, 0xc9,
    0xe1, 0xd1, 0xc1, 0xc9, 0x00, 0x00, 0x00, 0x00,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
];

static MULTICART_LOADER: [u8; 120] = [
    0xf3, 0xed, 0x56, 0x31, 0x00, 0x17, 0x21, 0x22,
    0xc0, 0x11, 0x00, 0x18, 0x01, 0x66, 0x00, 0xed,
    0xb0, 0xc3, 0x00, 0x18, 0x3e, 0x02, 0xd3, 0x02,
    0x3e, 0x01, 0xd3, 0x03, 0x2a, 0x06, 0xc0, 0xeb,
    0x21, 0x0a, 0xc0, 0x46, 0x23, 0x4e, 0x23, 0xc5,
    0xe5, 0xd5, 0xcd, 0x52, 0x18, 0xd1, 0xe1, 0xc1,
    0x0b, 0x78, 0xb1, 0x20, 0xf2, 0x3a, 0x04, 0xc0,
    0xfe, 0xff, 0x28, 0x08, 0x2a, 0x08, 0xc0, 0xe9,
    0xc9, 0x7e, 0x12, 0x23, 0x13, 0x7c, 0xfe, 0x60,
    0x20, 0x0a, 0x21, 0x00, 0xe0, 0x3a, 0x0c, 0xc0,
    0x3c, 0x32, 0x0c, 0xc0, 0xd3, 0x02, 0xc9, 0xaf,
    0x32, 0x0c, 0xc0, 0x3e, 0x02, 0xd3, 0x02, 0x21,
    0x14, 0xc0, 0x18, 0xe0, 0xc9, 0x00, 0x00, 0x00,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
];

static MULTICART_DECOMP_LOADER: [u8; 248] = [
    0xf3, 0xed, 0x56, 0x31, 0x00, 0x17, 0x21, 0x22,
    0xc0, 0x11, 0x00, 0x18, 0x01, 0xe6, 0x00, 0xed,
    0xb0, 0xc3, 0x00, 0x18, 0x3e, 0x02, 0xd3, 0x02,
    0x3e, 0x01, 0xd3, 0x03, 0x2a, 0x06, 0xc0, 0xeb,
    0x21, 0x0a, 0xc0, 0x46, 0x23, 0x4e, 0x23, 0xc5,
    0xe5, 0xd5, 0xcd, 0x6c, 0x18, 0xd1, 0xe1, 0xc1,
    0x0b, 0x78, 0xb1, 0x20, 0xf2, 0x3a, 0x04, 0xc0,
    0xfe, 0xff, 0x28, 0x08, 0x2a, 0x08, 0xc0, 0xe9,
    0xc9, 0x7e, 0x12, 0x23, 0x13, 0x7c, 0xfe, 0x60,
    0x20, 0x0a, 0x21, 0x00, 0xe0, 0x3a, 0x0c, 0xc0,
    0x3c, 0x32, 0x0c, 0xc0, 0xd3, 0x02, 0xc9, 0xaf,
    0x32, 0x0c, 0xc0, 0x3e, 0x02, 0xd3, 0x02, 0x21,
    0x14, 0xc0, 0x18, 0xe0, 0xcd, 0x9a, 0x18, 0xe5,
    0xdd, 0xe1, 0xd5, 0xfd, 0xe1, 0x06, 0x08, 0xcd,
    0xbe, 0x18, 0x30, 0x0c, 0xdd, 0x7e, 0x00, 0xdd,
    0x23, 0x12, 0x13, 0x18, 0xf3, 0x0e, 0x01, 0xcd,
    0xbe, 0x18, 0xcb, 0x11, 0x38, 0x06, 0xcd, 0xbe,
    0x18, 0x30, 0xf4, 0x0c, 0x79, 0xfe, 0x10, 0x28,
    0x1c, 0x06, 0x04, 0xcd, 0xbe, 0x18, 0xcb, 0x15,
    0x10, 0xf9, 0x7d, 0x92, 0x6f, 0x7c, 0x9b, 0x67,
    0x7e, 0x12, 0x23, 0x13, 0x0d, 0x20, 0xfa, 0x18,
    0xca, 0xe5, 0x62, 0x6b, 0x37, 0xed, 0x42, 0x44,
    0x18, 0xea, 0xcb, 0x27, 0x87, 0x30, 0x04, 0xcd,
    0xcc, 0x18, 0x3c, 0xc9, 0x10, 0xfe, 0x41, 0xc9,
    0x7e, 0x23, 0x7c, 0xfe, 0x60, 0xc8, 0xc9, 0x3a,
    0x0c, 0xc0, 0x3c, 0x32, 0x0c, 0xc0, 0xd3, 0x02,
    0x21, 0x00, 0xc0, 0xc9, 0xe1, 0xd1, 0xc1, 0xc9,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
];

#[cfg(test)]
mod tests {
    use super::loader;
    use crate::image::CartKind;

    #[test]
    fn decompressing_loaders_are_larger_than_stored_ones() {
        for cart in [CartKind::MegaCart, CartKind::MultiCart] {
            assert!(loader(cart, true).len() > loader(cart, false).len());
        }
    }

    #[test]
    fn blobs_never_contain_the_page_start_marker() {
        for cart in [CartKind::MegaCart, CartKind::MultiCart] {
            for compressed in [false, true] {
                let blob = loader(cart, compressed);
                assert!(blob.windows(4).all(|w| w != &b"MOPS"[..]));
            }
        }
    }
}
