use thiserror::Error;

/// Upper bound on the total raw content loaded into one build.
pub const POOL_CEILING: usize = 4 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("too many input bytes, the content pool is capped at {POOL_CEILING} bytes")]
    CapacityExceeded,
}

/// Stable reference to one file's raw bytes inside the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle {
    offset: usize,
    len: usize,
}

impl Handle {
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Append-only arena holding the concatenated raw content of every input
/// file. Ranges are handed out by a strictly increasing cursor and never
/// alias each other.
#[derive(Debug, Default)]
pub struct ContentPool {
    bytes: Vec<u8>,
}

impl ContentPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, data: &[u8]) -> Result<Handle, PoolError> {
        if self.bytes.len() + data.len() > POOL_CEILING {
            return Err(PoolError::CapacityExceeded);
        }
        let offset = self.bytes.len();
        self.bytes.extend_from_slice(data);
        Ok(Handle {
            offset,
            len: data.len(),
        })
    }

    #[must_use]
    pub fn get(&self, handle: Handle) -> &[u8] {
        &self.bytes[handle.offset..handle.offset + handle.len]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
