//! Constants used across the Z-Wave PHY framing implementation.
//!
//! This module defines the wire-level byte values, buffer sizing and the
//! layout of the injected simulation header that precedes every inbound
//! link-layer frame.
//!
//! ## Key Concepts
//!
//! - **Preamble**: Alternating-bit bytes (`0x55`) that let a receiver lock onto the carrier.
//! - **SOF**: A single start-of-frame byte delimiting the preamble from the payload.
//! - **Pad**: One trailing byte appended after the payload so the last payload byte
//!   survives the transmitter's ramp-down.
//! - **Injected header**: A fixed 8-byte prefix carrying the protocol marker, the beam
//!   count and the node to wake up.
//! - **Buffer Sizing**: Every physical frame is assembled inside one 256-byte buffer;
//!   the accepted inbound length shrinks as the preamble grows.

/// Marker byte identifying an injected Z-Wave frame (header byte 0).
///
/// Frames carrying any other marker are dropped without output.
pub const ZWAVE_MARKER: u8 = 0x01;

/// Alternating-bit pattern used for every full preamble byte.
pub const PREAMBLE_PATTERN: u8 = 0x55;

/// Start-of-frame delimiter written right after the preamble.
pub const SOF_MARKER: u8 = 0xF0;

/// Byte appended after the payload of every physical frame.
pub const PAD_BYTE: u8 = 0xAA;

/// Capacity (in bytes) of the physical-layer working buffer.
pub const PHY_BUF_LEN: usize = 256;

/// Bytes of framing that are not preamble or payload: one SOF byte and one pad byte.
pub const FRAMING_OVERHEAD: usize = 2;

/// Longest preamble (in bytes) that still accepts a header-only inbound blob.
///
/// Inbound blobs must be strictly shorter than `PHY_BUF_LEN - FRAMING_OVERHEAD - size`,
/// and every Z-Wave blob carries at least the [`INJECT_HEADER_LEN`]-byte header.
pub const MAX_PREAMBLE_LEN: usize = PHY_BUF_LEN - FRAMING_OVERHEAD - INJECT_HEADER_LEN - 1;

/// See [`MAX_PREAMBLE_LEN`](crate::consts::MAX_PREAMBLE_LEN), expressed in bits.
pub const MAX_PREAMBLE_BITS: u16 = (MAX_PREAMBLE_LEN * 8) as u16;

/// Preamble length used by [`ZwaveFramer::default`](crate::framer::ZwaveFramer).
///
/// 25 full bytes of `0x55`.
pub const DEFAULT_PREAMBLE_BITS: u16 = 200;

/// Length (in bytes) of the injected simulation header preceding the link-layer frame.
pub const INJECT_HEADER_LEN: usize = 8;

/// Offset of the protocol marker inside the injected header.
pub const HEADER_MARKER: usize = 0;

/// Offset of the beam count inside the injected header.
pub const HEADER_BEAM_COUNT: usize = 1;

/// Offset of the node id to wake up inside the injected header.
pub const HEADER_TARGET_NODE: usize = 2;

/// Length (in bytes) of a serialised [`BeamFrame`](crate::frame::BeamFrame).
pub const BEAM_FRAME_LEN: usize = 1;

/// Name of the inbound message port.
pub const IN_PORT: &str = "in";

/// Name of the outbound message port.
pub const OUT_PORT: &str = "out";

const _: () = assert!(DEFAULT_PREAMBLE_BITS <= MAX_PREAMBLE_BITS);
