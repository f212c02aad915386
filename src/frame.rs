//! Injected frame parsing and beam wake-up frames.
//!
//! Inbound blobs start with a fixed [`INJECT_HEADER_LEN`]-byte header added by the
//! capture/simulation front end, followed by the Z-Wave link-layer frame:
//!
//! ```text
//! [0] marker   (0x01 = Z-Wave)
//! [1] beam count
//! [2] target node id
//! [3..8) reserved
//! [8..)  link-layer frame
//! ```
//!
//! [`InjectedFrame::parse`] turns a blob into a tagged view so that callers match
//! on the frame type instead of comparing marker bytes.

use crate::consts::{
    BEAM_FRAME_LEN, HEADER_BEAM_COUNT, HEADER_MARKER, HEADER_TARGET_NODE, INJECT_HEADER_LEN,
    ZWAVE_MARKER,
};
use crate::error::Violation;

/// A wake-up beacon addressed to a sleeping node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct BeamFrame {
    /// Node to wake up.
    pub target_node_id: u8,
}

impl BeamFrame {
    /// Creates a beam addressed to `target_node_id`.
    pub const fn new(target_node_id: u8) -> Self {
        Self { target_node_id }
    }

    /// Serialises the beam to its wire form.
    pub const fn to_bytes(&self) -> [u8; BEAM_FRAME_LEN] {
        [self.target_node_id]
    }
}

/// A Z-Wave frame with its injected header decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognizedFrame<'a> {
    /// Number of beam frames to send before the frame itself.
    pub beam_count: u8,
    /// Node the beams wake up.
    pub target_node_id: u8,
    /// Link-layer frame following the injected header.
    pub payload: &'a [u8],
}

impl RecognizedFrame<'_> {
    /// The beam to repeat `beam_count` times, or `None` if no wake-up was requested.
    pub fn beam(&self) -> Option<BeamFrame> {
        if self.beam_count > 0 {
            Some(BeamFrame::new(self.target_node_id))
        } else {
            None
        }
    }
}

/// Result of classifying an inbound blob by its marker byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFrame<'a> {
    /// The blob carries a Z-Wave frame.
    Recognized(RecognizedFrame<'a>),
    /// Any other marker; such frames are dropped without output.
    Unrecognized {
        /// The marker byte found in the header.
        marker: u8,
    },
}

impl<'a> InjectedFrame<'a> {
    /// Classifies `data` by its marker byte and, for Z-Wave frames, splits it into
    /// the injected header and the link-layer frame.
    ///
    /// A foreign marker is [`InjectedFrame::Unrecognized`] whatever the blob length.
    ///
    /// # Errors
    /// [`Violation::TruncatedHeader`] if `data` is empty, or carries the Z-Wave
    /// marker but is shorter than the header.
    pub fn parse(data: &'a [u8]) -> Result<Self, Violation> {
        let Some(&marker) = data.get(HEADER_MARKER) else {
            return Err(Violation::TruncatedHeader { len: data.len() });
        };
        if marker != ZWAVE_MARKER {
            return Ok(InjectedFrame::Unrecognized { marker });
        }
        if data.len() < INJECT_HEADER_LEN {
            return Err(Violation::TruncatedHeader { len: data.len() });
        }
        let (header, payload) = data.split_at(INJECT_HEADER_LEN);
        Ok(InjectedFrame::Recognized(RecognizedFrame {
            beam_count: header[HEADER_BEAM_COUNT],
            target_node_id: header[HEADER_TARGET_NODE],
            payload,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognized_frame() {
        let data = [0x01, 3, 0x2A, 0, 0, 0, 0, 0, 0xC0, 0xFF, 0xEE];
        match InjectedFrame::parse(&data).unwrap() {
            InjectedFrame::Recognized(frame) => {
                assert_eq!(frame.beam_count, 3);
                assert_eq!(frame.target_node_id, 0x2A);
                assert_eq!(frame.payload, &[0xC0, 0xFF, 0xEE]);
                assert_eq!(frame.beam(), Some(BeamFrame::new(0x2A)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_header_only_frame() {
        let data = [0x01, 0, 7, 0, 0, 0, 0, 0];
        let InjectedFrame::Recognized(frame) = InjectedFrame::parse(&data).unwrap() else {
            panic!("expected a recognized frame");
        };
        assert!(frame.payload.is_empty());
        assert_eq!(frame.beam(), None);
    }

    #[test]
    fn test_parse_unrecognized_marker() {
        let data = [0x02, 5, 9, 0, 0, 0, 0, 0, 1, 2];
        assert_eq!(
            InjectedFrame::parse(&data),
            Ok(InjectedFrame::Unrecognized { marker: 0x02 })
        );
    }

    #[test]
    fn test_parse_truncated_header() {
        assert_eq!(
            InjectedFrame::parse(&[0x01, 1, 2]),
            Err(Violation::TruncatedHeader { len: 3 })
        );
        assert_eq!(
            InjectedFrame::parse(&[]),
            Err(Violation::TruncatedHeader { len: 0 })
        );
    }

    #[test]
    fn test_short_foreign_frame_is_unrecognized() {
        assert_eq!(
            InjectedFrame::parse(&[0x02, 0, 0]),
            Ok(InjectedFrame::Unrecognized { marker: 0x02 })
        );
        assert_eq!(
            InjectedFrame::parse(&[0xFF]),
            Ok(InjectedFrame::Unrecognized { marker: 0xFF })
        );
    }

    #[test]
    fn test_beam_wire_form() {
        assert_eq!(BeamFrame::new(0x17).to_bytes(), [0x17]);
    }
}
