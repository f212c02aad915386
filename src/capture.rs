//! Sinks that keep owned copies of everything the framer publishes.
//!
//! Useful for hosts that hand frames to a transmitter after `process` returns,
//! and for inspecting output in tests. A `heapless::Vec` works everywhere; with
//! the `std` feature a `std::vec::Vec` can be used as well.

use heapless::Vec;
use thiserror::Error;

use crate::consts::PHY_BUF_LEN;
use crate::frame::BeamFrame;
use crate::message::{MessageSink, Outbound};

/// Owned counterpart of [`Outbound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedOutbound {
    /// A wake-up beam.
    Beam(BeamFrame),
    /// A copy of a physical frame.
    Phy(Vec<u8, PHY_BUF_LEN>),
    /// End-of-stream.
    EndOfStream,
}

impl OwnedOutbound {
    /// The physical frame bytes, if this is a [`OwnedOutbound::Phy`].
    pub fn phy(&self) -> Option<&[u8]> {
        match self {
            OwnedOutbound::Phy(frame) => Some(frame.as_slice()),
            _ => None,
        }
    }
}

/// Failure to capture an outbound message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum CaptureError {
    /// The capture queue has no free slot.
    #[error("capture queue is full")]
    QueueFull,
    /// A frame is longer than the physical-layer buffer.
    #[error("frame exceeds the physical-layer buffer")]
    FrameOverflow,
}

impl TryFrom<Outbound<'_>> for OwnedOutbound {
    type Error = CaptureError;

    fn try_from(msg: Outbound<'_>) -> Result<Self, Self::Error> {
        Ok(match msg {
            Outbound::Beam(beam) => OwnedOutbound::Beam(beam),
            Outbound::Phy(frame) => {
                OwnedOutbound::Phy(Vec::from_slice(frame).map_err(|_| CaptureError::FrameOverflow)?)
            }
            Outbound::EndOfStream => OwnedOutbound::EndOfStream,
        })
    }
}

impl<const N: usize> MessageSink for Vec<OwnedOutbound, N> {
    type Error = CaptureError;

    fn publish(&mut self, msg: Outbound<'_>) -> nb::Result<(), Self::Error> {
        let owned = OwnedOutbound::try_from(msg)?;
        self.push(owned)
            .map_err(|_| nb::Error::Other(CaptureError::QueueFull))
    }
}

#[cfg(feature = "std")]
impl MessageSink for std::vec::Vec<OwnedOutbound> {
    type Error = CaptureError;

    fn publish(&mut self, msg: Outbound<'_>) -> nb::Result<(), Self::Error> {
        self.push(OwnedOutbound::try_from(msg)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heapless_sink_copies_frames() {
        let mut sink: Vec<OwnedOutbound, 4> = Vec::new();
        let frame = [0x55, 0xF0, 0x01, 0xAA];
        sink.publish(Outbound::Beam(BeamFrame::new(3))).unwrap();
        sink.publish(Outbound::Phy(&frame)).unwrap();
        assert_eq!(sink[0], OwnedOutbound::Beam(BeamFrame::new(3)));
        assert_eq!(sink[1].phy(), Some(&frame[..]));
        assert_eq!(sink[0].phy(), None);
    }

    #[test]
    fn test_heapless_sink_reports_full_queue() {
        let mut sink: Vec<OwnedOutbound, 1> = Vec::new();
        sink.publish(Outbound::EndOfStream).unwrap();
        assert_eq!(
            sink.publish(Outbound::EndOfStream),
            Err(nb::Error::Other(CaptureError::QueueFull))
        );
    }

    #[test]
    fn test_oversized_frame_is_refused() {
        let frame = [0u8; PHY_BUF_LEN + 1];
        assert_eq!(
            OwnedOutbound::try_from(Outbound::Phy(&frame)),
            Err(CaptureError::FrameOverflow)
        );
    }

    #[test]
    fn test_std_sink() {
        let mut sink: std::vec::Vec<OwnedOutbound> = std::vec::Vec::new();
        sink.publish(Outbound::Phy(&[0xF0, 0xAA])).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].phy(), Some(&[0xF0, 0xAA][..]));
    }
}
