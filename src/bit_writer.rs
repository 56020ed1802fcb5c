/// MSB-first bit writer.
///
/// The first bit written lands in bit 7 of the first byte. A partially
/// filled final byte is kept in `acc` until [`BitWriter::finish`].
#[derive(Debug)]
pub struct BitWriter {
    bytes: Vec<u8>,
    acc: u8,
    /// Bit position the next bit is written to, 7 down to 0.
    cursor: u8,
    bit_count: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(bytes: usize) -> Self {
        BitWriter {
            bytes: Vec::with_capacity(bytes),
            acc: 0,
            cursor: 7,
            bit_count: 0,
        }
    }

    /// Total bits written so far, including pending ones.
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    pub fn push_bit(&mut self, bit: bool) {
        if bit {
            self.acc |= 1 << self.cursor;
        }
        self.bit_count += 1;

        if self.cursor == 0 {
            self.bytes.push(self.acc);
            self.acc = 0;
            self.cursor = 7;
        } else {
            self.cursor -= 1;
        }
    }

    /// Write the low `bit_length` bits of `code`, highest first.
    pub fn push_bits(&mut self, code: u32, bit_length: u8) {
        debug_assert!(u32::from(bit_length) <= u32::BITS);
        for shift in (0..bit_length).rev() {
            self.push_bit((code >> shift) & 1 == 1);
        }
    }

    /// Flush any pending byte and return the bytes plus the number of unused
    /// low-order bits in the last one.
    pub fn finish(mut self) -> (Vec<u8>, u8) {
        if self.cursor == 7 {
            return (self.bytes, 0);
        }
        self.bytes.push(self.acc);
        (self.bytes, self.cursor + 1)
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}
