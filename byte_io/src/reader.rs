/// A read that does not fit inside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot read {width} byte(s) at {address:#x}: buffer length is {len:#x}")]
pub struct OutOfBounds {
    pub address: usize,
    pub width: usize,
    pub len: usize,
}

/// Immutable view of the whole ROM image. All addresses are absolute.
#[derive(Debug, Clone, Copy)]
pub struct ByteSource<'a> {
    data: &'a [u8],
}

impl<'a> ByteSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn slice(&self, address: usize, width: usize) -> Result<&'a [u8], OutOfBounds> {
        address
            .checked_add(width)
            .and_then(|end| self.data.get(address..end))
            .ok_or(OutOfBounds {
                address,
                width,
                len: self.data.len(),
            })
    }

    pub fn read_u8(&self, address: usize) -> Result<u8, OutOfBounds> {
        let bytes = self.slice(address, 1)?;

        Ok(bytes[0])
    }

    pub fn read_u16(&self, address: usize) -> Result<u16, OutOfBounds> {
        let bytes = self.slice(address, 2)?;

        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&self, address: usize) -> Result<u32, OutOfBounds> {
        let bytes = self.slice(address, 4)?;

        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Cursor over a [`ByteSource`].
///
/// The effective address is `base + cursor`. [`Reader::rebase`] moves both, which is what you
/// want when entering a new region. [`Reader::seek`] only moves the cursor, so a pointer that is
/// stored relative to the current base can be followed while the base stays put.
///
/// Every successful read advances the cursor by the width of the read. A failed read leaves the
/// reader where it was.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    source: ByteSource<'a>,
    base: usize,
    cursor: usize,
}

impl<'a> Reader<'a> {
    pub fn new(source: ByteSource<'a>) -> Self {
        Self {
            source,
            base: 0,
            cursor: 0,
        }
    }

    pub fn source(&self) -> ByteSource<'a> {
        self.source
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Saturates on overflow, which always lands outside of any buffer.
    pub fn address(&self) -> usize {
        self.base.saturating_add(self.cursor)
    }

    pub fn rebase(&mut self, base: usize, cursor: usize) {
        self.base = base;
        self.cursor = cursor;
    }

    pub fn seek(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    pub fn skip(&mut self, length: usize) {
        self.cursor = self.cursor.saturating_add(length);
    }

    /// Borrows the next `width` bytes and moves past them.
    pub fn take(&mut self, width: usize) -> Result<&'a [u8], OutOfBounds> {
        let bytes = self.source.slice(self.address(), width)?;
        self.skip(width);

        Ok(bytes)
    }

    pub fn read8(&mut self) -> Result<u8, OutOfBounds> {
        let res = self.source.read_u8(self.address())?;
        self.skip(1);

        Ok(res)
    }

    pub fn read16(&mut self) -> Result<u16, OutOfBounds> {
        let res = self.source.read_u16(self.address())?;
        self.skip(2);

        Ok(res)
    }

    pub fn read32(&mut self) -> Result<u32, OutOfBounds> {
        let res = self.source.read_u32(self.address())?;
        self.skip(4);

        Ok(res)
    }
}
