use thiserror::Error;

/// Alignment unit of the cartridge; every page starts with the variant's
/// init sequence.
pub const PAGE_SIZE: usize = 16 * 1024;

/// `MOPS` marker followed by `XOR A; LD (0FC00H), A`.
pub const MEGACART_PAGE_START: [u8; 8] = [b'M', b'O', b'P', b'S', 0xaf, 0x32, 0x00, 0xfc];

/// `MOPS` marker followed by `XOR A; LD (0C000H), A; LD (0E000H), A`.
pub const MULTICART_PAGE_START: [u8; 11] = [
    b'M', b'O', b'P', b'S', 0xaf, 0x32, 0x00, 0xc0, 0x32, 0x00, 0xe0,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartKind {
    MegaCart,
    MultiCart,
}

impl CartKind {
    #[must_use]
    pub fn page_start_bytes(self) -> &'static [u8] {
        match self {
            CartKind::MegaCart => &MEGACART_PAGE_START,
            CartKind::MultiCart => &MULTICART_PAGE_START,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("ROM image capacity exceeded")]
    Overflow,
}

/// The output image buffer. Writes append at the cursor; whenever the
/// cursor sits on a page boundary (including offset 0) the page start
/// sequence is emitted first, so the invariant holds no matter which
/// component is writing.
#[derive(Debug)]
pub struct RomImage {
    bytes: Vec<u8>,
    capacity: usize,
    cart: CartKind,
}

impl RomImage {
    #[must_use]
    pub fn new(cart: CartKind, capacity: usize) -> Self {
        debug_assert!(capacity % PAGE_SIZE == 0);
        RomImage {
            bytes: Vec::with_capacity(capacity),
            capacity,
            cart,
        }
    }

    #[must_use]
    pub fn cart(&self) -> CartKind {
        self.cart
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.bytes.len()
    }

    pub fn write_byte(&mut self, value: u8) -> Result<(), ImageError> {
        self.enter_page()?;
        if self.bytes.len() >= self.capacity {
            return Err(ImageError::Overflow);
        }
        self.bytes.push(value);
        Ok(())
    }

    pub fn write_range(&mut self, data: &[u8]) -> Result<(), ImageError> {
        for &value in data {
            self.write_byte(value)?;
        }
        Ok(())
    }

    /// Advances the cursor over a region that is patched in later.
    /// The region must not cross a page boundary.
    pub fn reserve(&mut self, len: usize) -> Result<usize, ImageError> {
        self.enter_page()?;
        let start = self.bytes.len();
        debug_assert!(start % PAGE_SIZE + len <= PAGE_SIZE);
        if start + len > self.capacity {
            return Err(ImageError::Overflow);
        }
        self.bytes.resize(start + len, 0);
        Ok(start)
    }

    /// Back-fills a region previously obtained from [`RomImage::reserve`].
    pub fn patch(&mut self, at: usize, data: &[u8]) {
        debug_assert!(at + data.len() <= self.bytes.len());
        self.bytes[at..at + data.len()].copy_from_slice(data);
    }

    /// Fills the remaining bytes up to capacity with `0xFF`, still
    /// emitting the page start sequence on every page.
    pub fn pad(&mut self) {
        while self.bytes.len() < self.capacity {
            if self.bytes.len() % PAGE_SIZE == 0 {
                let sequence = self.cart.page_start_bytes();
                self.bytes.extend_from_slice(sequence);
            }
            self.bytes.push(0xff);
        }
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn enter_page(&mut self) -> Result<(), ImageError> {
        if self.bytes.len() % PAGE_SIZE != 0 {
            return Ok(());
        }
        let sequence = self.cart.page_start_bytes();
        if self.bytes.len() + sequence.len() >= self.capacity {
            return Err(ImageError::Overflow);
        }
        self.bytes.extend_from_slice(sequence);
        Ok(())
    }
}
