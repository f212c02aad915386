//! Z-Wave physical-layer framer.
//!
//! This module provides the [`ZwaveFramer`] struct, which turns injected Z-Wave
//! link-layer frames into physical-layer transmission buffers: a bit-accurate
//! preamble, the start-of-frame delimiter, the frame itself and one pad byte.
//! When the injected header requests it, the framer first emits a burst of
//! identical beam frames to wake a sleeping node.
//!
//! ## Message flow
//!
//! ```text
//!  in ──► shape/length checks ──► InjectedFrame::parse ──┬─► Unrecognized ──► (nothing)
//!                                                        └─► Recognized
//!                                                              ├─► Beam × beam_count ──► out
//!                                                              └─► preamble|F0|frame|AA ──► out
//! ```
//!
//! ## Example
//!
//! ```rust
//! use zwave_phy::capture::OwnedOutbound;
//! use zwave_phy::frame::BeamFrame;
//! use zwave_phy::framer::ZwaveFramer;
//! use zwave_phy::message::Message;
//!
//! let mut framer = ZwaveFramer::new(16).unwrap();
//! let mut out: Vec<OwnedOutbound> = Vec::new();
//!
//! // marker, 2 beams, node 0x07, 5 reserved bytes, then the link-layer frame
//! let blob = [0x01, 2, 0x07, 0, 0, 0, 0, 0, 0xCA, 0xFE];
//! framer.process(&Message::pdu(&blob), &mut out).unwrap();
//!
//! assert_eq!(out.len(), 3);
//! assert_eq!(out[0], OwnedOutbound::Beam(BeamFrame::new(0x07)));
//! assert_eq!(out[2].phy(), Some(&[0x55, 0x55, 0xF0, 0xCA, 0xFE, 0xAA][..]));
//! ```
//!
//! ## Design Notes
//!
//! The working buffer lives inside the framer and every operation that touches
//! it takes `&mut self`, so at most one message is in flight per instance. For
//! a framer shared with interrupt handlers see [`crate::shared`].

use heapless::Vec;
use nb::block;

use crate::consts::PHY_BUF_LEN;
use crate::error::{ConfigError, PhyError, Violation};
use crate::frame::InjectedFrame;
use crate::message::{Message, MessageSink, Outbound};
use crate::preamble::PreambleBuffer;

/// Lifecycle of a [`ZwaveFramer`].
///
/// The only transition is `Active` → `Closed`, taken when end-of-stream arrives.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Lifecycle {
    ///   Accepting messages.
    #[default]
    Active,
    ///   End-of-stream has been propagated; every further call is refused.
    Closed,
}

/// What a successful call to [`ZwaveFramer::process`] did.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Outcome {
    /// A physical frame was published, preceded by `beams` beam frames.
    Transmitted {
        /// Number of beam frames published before the frame.
        beams: u8,
        /// Length of the published physical frame.
        frame_len: usize,
    },
    /// The marker byte was not Z-Wave; nothing was published.
    Dropped {
        /// The marker byte found in the header.
        marker: u8,
    },
    /// End-of-stream was propagated and the framer is now closed.
    Closed,
}

/// Converts injected Z-Wave frames into physical-layer frames.
///
/// ## Output
///
/// For every recognised inbound frame the sink receives, in order:
/// - `beam_count` copies of the same [`BeamFrame`](crate::frame::BeamFrame), addressed
///   to the header's target node
/// - one [`Outbound::Phy`] of `preamble_size + 2 + payload_len` bytes
///
/// ## Errors
///
/// Malformed messages are reported as [`PhyError::ProtocolViolation`] before
/// anything is published. Frames with a foreign marker are not errors; they
/// return [`Outcome::Dropped`].
///
/// ## Notes
///
/// - The payload and pad region of the buffer is not cleared between frames.
/// - Sink back-pressure (`WouldBlock`) is waited out with `nb::block!`.
#[derive(Debug, Clone)]
pub struct ZwaveFramer {
    /// The current lifecycle state
    pub lifecycle: Lifecycle,
    preamble: PreambleBuffer,

    /// Counter of physical frames published.
    pub frames_sent: u32,

    /// Counter of beam frames published.
    pub beams_sent: u32,

    /// Counter of frames dropped for carrying a foreign marker.
    pub dropped: u32,

    /// Counter of messages rejected as protocol violations.
    pub rejected: u32,
}

impl Default for ZwaveFramer {
    fn default() -> Self {
        Self::with_buffer(PreambleBuffer::default())
    }
}

impl ZwaveFramer {
    /// Creates a framer whose preamble is `preamble_bits` bits long.
    ///
    /// # Errors
    /// [`ConfigError::PreambleTooLong`] if the preamble would not leave room for
    /// a header-only inbound blob.
    pub fn new(preamble_bits: u16) -> Result<Self, ConfigError> {
        Ok(Self::with_buffer(PreambleBuffer::new(preamble_bits)?))
    }

    fn with_buffer(preamble: PreambleBuffer) -> Self {
        Self {
            lifecycle: Lifecycle::Active,
            preamble,
            frames_sent: 0,
            beams_sent: 0,
            dropped: 0,
            rejected: 0,
        }
    }

    /// Rebuilds the preamble for a new bit length.
    ///
    /// On error the previous preamble stays in place.
    pub fn set_preamble(&mut self, preamble_bits: u16) -> Result<(), ConfigError> {
        self.preamble.configure(preamble_bits)?;
        debug!(
            "preamble set to {} bits ({} bytes)",
            preamble_bits,
            self.preamble.preamble_size()
        );
        Ok(())
    }

    /// The working buffer and its precomputed preamble.
    pub fn preamble(&self) -> &PreambleBuffer {
        &self.preamble
    }

    /// Whether end-of-stream has been seen.
    pub fn is_closed(&self) -> bool {
        self.lifecycle == Lifecycle::Closed
    }

    /// Handles one inbound message, publishing its output on `sink`.
    ///
    /// # Behavior
    /// - End-of-stream: publishes [`Outbound::EndOfStream`] and closes the framer
    /// - Otherwise the message must be a pair carrying a blob of `1..max` bytes,
    ///   where `max` is [`PreambleBuffer::max_inbound_len`]
    /// - A foreign marker drops the frame silently
    /// - A Z-Wave frame publishes its beams, then the physical frame
    ///
    /// # Errors
    /// - [`PhyError::Closed`] once end-of-stream has been processed; nothing is published
    /// - [`PhyError::ProtocolViolation`] for malformed messages; nothing is published
    /// - [`PhyError::Sink`] if the sink fails
    pub fn process<S: MessageSink>(
        &mut self,
        msg: &Message<'_>,
        sink: &mut S,
    ) -> Result<Outcome, PhyError<S::Error>> {
        if self.lifecycle == Lifecycle::Closed {
            return Err(PhyError::Closed);
        }

        if let Message::EndOfStream = msg {
            self.lifecycle = Lifecycle::Closed;
            info!("end of stream, framer closed; propagating on {}", S::PORT);
            block!(sink.publish(Outbound::EndOfStream)).map_err(PhyError::Sink)?;
            return Ok(Outcome::Closed);
        }

        let scratch = match self.validate(msg) {
            Ok(scratch) => scratch,
            Err(v) => {
                self.rejected += 1;
                warn!("rejected message on {}: {}", Message::PORT, v);
                return Err(v.into());
            }
        };

        let frame = match InjectedFrame::parse(&scratch) {
            Ok(InjectedFrame::Recognized(frame)) => frame,
            Ok(InjectedFrame::Unrecognized { marker }) => {
                self.dropped += 1;
                debug!("dropping frame with marker {}", marker);
                return Ok(Outcome::Dropped { marker });
            }
            Err(v) => {
                self.rejected += 1;
                warn!("rejected message on {}: {}", Message::PORT, v);
                return Err(v.into());
            }
        };

        if let Some(beam) = frame.beam() {
            info!(
                "waking node {} with {} beam frames",
                beam.target_node_id, frame.beam_count
            );
            for _ in 0..frame.beam_count {
                block!(sink.publish(Outbound::Beam(beam))).map_err(PhyError::Sink)?;
                self.beams_sent += 1;
            }
        }

        let phy = match self.preamble.assemble(frame.payload) {
            Ok(phy) => phy,
            Err(v) => {
                self.rejected += 1;
                warn!("rejected message on {}: {}", Message::PORT, v);
                return Err(v.into());
            }
        };
        let frame_len = phy.len();
        block!(sink.publish(Outbound::Phy(phy))).map_err(PhyError::Sink)?;
        self.frames_sent += 1;
        debug!("sent physical frame of {} bytes on {}", frame_len, S::PORT);

        Ok(Outcome::Transmitted {
            beams: frame.beam_count,
            frame_len,
        })
    }

    /// Checks the message shape and length and copies the blob into a scratch buffer.
    fn validate(&self, msg: &Message<'_>) -> Result<Vec<u8, PHY_BUF_LEN>, Violation> {
        let blob = msg.blob()?;
        let limit = self.preamble.max_inbound_len();
        if blob.is_empty() {
            return Err(Violation::EmptyPayload);
        }
        if blob.len() >= limit {
            return Err(Violation::PayloadTooLong {
                len: blob.len(),
                limit,
            });
        }
        Vec::from_slice(blob).map_err(|_| Violation::PayloadTooLong {
            len: blob.len(),
            limit,
        })
    }
}
