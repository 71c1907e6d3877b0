/// Appends little-endian values. Pointer fields can be written as zero and patched once the
/// target offset is known.
pub struct ByteWriter {
    pub data: Vec<u8>,
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWriter {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn get_offset(&self) -> usize {
        self.data.len()
    }

    pub fn append_u8(&mut self, i: u8) {
        self.data.push(i);
    }

    pub fn append_u16(&mut self, i: u16) {
        self.data.extend(i.to_le_bytes());
    }

    pub fn append_u32(&mut self, i: u32) {
        self.data.extend(i.to_le_bytes());
    }

    pub fn append_u8_slice(&mut self, i: &[u8]) {
        self.data.extend_from_slice(i);
    }

    pub fn append_zeroes(&mut self, length: usize) {
        self.data.resize(self.data.len() + length, 0);
    }

    pub fn replace(&mut self, start: usize, slice: &[u8]) {
        self.data[start..(start + slice.len())].copy_from_slice(slice);
    }

    pub fn replace_with_u32(&mut self, start: usize, val: u32) {
        self.replace(start, &val.to_le_bytes());
    }
}
