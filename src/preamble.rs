//! Preamble construction and the physical-layer working buffer.
//!
//! Every physical frame is assembled in one contiguous buffer of
//! [`PHY_BUF_LEN`] bytes, split into four regions:
//!
//! ```text
//! ┌──────────────────────┬─────┬───────────────────────┬─────┐
//! │ preamble[0..size)    │ SOF │ payload[0..len)       │ pad │
//! │ 0x55 .. (bit-exact)  │ F0  │ link-layer frame      │ AA  │
//! └──────────────────────┴─────┴───────────────────────┴─────┘
//! ```
//!
//! The preamble and SOF regions are written once per configuration. The payload
//! and pad regions are overwritten for every frame and never cleared: a shorter
//! frame simply publishes fewer bytes.
//!
//! ## Bit-length rule
//!
//! A preamble of `bits` bits takes `ceil(bits / 8)` bytes. When `bits` is not a
//! multiple of 8, the first byte is the partial one and keeps only the low
//! `bits % 8` bits of the alternating pattern:
//!
//! | bits | bytes                         |
//! |------|-------------------------------|
//! | 0    | *(none)*                      |
//! | 1    | `01`                          |
//! | 8    | `55`                          |
//! | 9    | `01 55`                       |
//! | 12   | `05 55`                       |
//! | 25   | `01 55 55 55`                 |

use crate::consts::{
    DEFAULT_PREAMBLE_BITS, MAX_PREAMBLE_BITS, PAD_BYTE, PHY_BUF_LEN, PREAMBLE_PATTERN, SOF_MARKER,
};
use crate::error::{ConfigError, Violation};

/// Number of bytes needed to hold a preamble of `bits` bits.
pub const fn preamble_size(bits: u16) -> usize {
    (bits as usize).div_ceil(8)
}

/// Computes byte `index` of a preamble that is `bits` long and `size` bytes wide.
///
/// Bytes that lie entirely before the first preamble bit are `0x00`, the byte
/// holding the boundary keeps the low `bits % 8` bits of `0x55`, and the rest
/// carry the full pattern. `index` must be below `size`.
fn preamble_byte(bits: usize, size: usize, index: usize) -> u8 {
    if bits <= (size - (index + 1)) * 8 {
        0x00
    } else if bits < (size - index) * 8 {
        let shift = (bits % 8) as u32;
        PREAMBLE_PATTERN & !(0xFF << shift)
    } else {
        PREAMBLE_PATTERN
    }
}

/// The physical-layer working buffer with its precomputed preamble.
///
/// ## Example
///
/// ```rust
/// use zwave_phy::preamble::PreambleBuffer;
///
/// let mut buf = PreambleBuffer::new(9).unwrap();
/// assert_eq!(buf.preamble(), &[0x01, 0x55]);
///
/// let frame = buf.assemble(&[0xDE, 0xAD]).unwrap();
/// assert_eq!(frame, &[0x01, 0x55, 0xF0, 0xDE, 0xAD, 0xAA]);
/// ```
#[derive(Debug, Clone)]
pub struct PreambleBuffer {
    buf: [u8; PHY_BUF_LEN],
    bits: u16,
    size: usize,
}

impl PreambleBuffer {
    /// Creates a buffer holding a preamble of `bits` bits followed by the SOF marker.
    ///
    /// # Errors
    /// [`ConfigError::PreambleTooLong`] if `bits` exceeds [`MAX_PREAMBLE_BITS`].
    pub fn new(bits: u16) -> Result<Self, ConfigError> {
        let mut cls = Self::blank();
        cls.configure(bits)?;
        Ok(cls)
    }

    const fn blank() -> Self {
        Self {
            buf: [0; PHY_BUF_LEN],
            bits: 0,
            size: 0,
        }
    }

    /// Recomputes the preamble and SOF regions for a new bit length.
    ///
    /// The previous configuration is kept if `bits` is rejected.
    pub fn configure(&mut self, bits: u16) -> Result<(), ConfigError> {
        if bits > MAX_PREAMBLE_BITS {
            return Err(ConfigError::PreambleTooLong {
                bits,
                max_bits: MAX_PREAMBLE_BITS,
            });
        }
        self.fill(bits);
        Ok(())
    }

    fn fill(&mut self, bits: u16) {
        let size = preamble_size(bits);
        for (i, byte) in self.buf[..size].iter_mut().enumerate() {
            *byte = preamble_byte(bits as usize, size, i);
        }
        self.buf[size] = SOF_MARKER;
        self.bits = bits;
        self.size = size;
    }

    /// Configured preamble length in bits.
    pub fn bits(&self) -> u16 {
        self.bits
    }

    /// Configured preamble length in bytes.
    pub fn preamble_size(&self) -> usize {
        self.size
    }

    /// The preamble bytes, without the SOF marker.
    pub fn preamble(&self) -> &[u8] {
        &self.buf[..self.size]
    }

    /// The start-of-frame marker byte.
    pub fn marker(&self) -> u8 {
        self.buf[self.size]
    }

    /// Offset of the first payload byte.
    pub fn payload_offset(&self) -> usize {
        self.size + 1
    }

    /// Exclusive upper bound on the length of an inbound blob.
    ///
    /// Reserves the preamble, the SOF byte and the pad byte inside the working buffer.
    pub fn max_inbound_len(&self) -> usize {
        PHY_BUF_LEN - 1 - 1 - self.size
    }

    /// Writes `payload` behind the SOF marker, appends the pad byte and returns
    /// the complete physical frame (preamble + SOF + payload + pad).
    ///
    /// # Errors
    /// [`Violation::FrameOverflow`] if the frame would not fit the buffer.
    pub fn assemble(&mut self, payload: &[u8]) -> Result<&[u8], Violation> {
        let start = self.payload_offset();
        let pad = start + payload.len();
        if pad + 1 > PHY_BUF_LEN {
            return Err(Violation::FrameOverflow {
                needed: pad + 1,
                capacity: PHY_BUF_LEN,
            });
        }
        self.buf[start..pad].copy_from_slice(payload);
        self.buf[pad] = PAD_BYTE;
        Ok(&self.buf[..=pad])
    }
}

impl Default for PreambleBuffer {
    fn default() -> Self {
        let mut cls = Self::blank();
        cls.fill(DEFAULT_PREAMBLE_BITS);
        cls
    }
}
