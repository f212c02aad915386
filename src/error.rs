//! Error types for the Z-Wave PHY framer.
//!
//! Errors fall into three groups:
//!
//! - [`Violation`]: an inbound message broke the contract of the input port
//!   (wrong shape, empty, too long for the configured preamble). The message is
//!   dropped and nothing is emitted for it.
//! - [`ConfigError`]: a preamble length that cannot fit the working buffer.
//! - Sink failures, carried through [`PhyError::Sink`] with the sink's own error type.
//!
//! A frame whose marker is not recognised is **not** an error; see
//! [`Outcome::Dropped`](crate::framer::Outcome::Dropped).

use thiserror::Error;

/// Ways an inbound message can break the input port contract.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Violation {
    /// The message is neither end-of-stream nor a pair.
    #[error("message is not a pair")]
    NotAPair,
    /// The second element of the pair is not a binary blob.
    #[error("second element of the pair is not a blob")]
    NotABlob,
    /// The blob carries no bytes.
    #[error("blob is empty")]
    EmptyPayload,
    /// The blob would overflow the working buffer once preamble, SOF and pad are added.
    #[error("blob of {len} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLong {
        /// Length of the offending blob.
        len: usize,
        /// Exclusive upper bound for the current preamble length.
        limit: usize,
    },
    /// The blob is shorter than the injected header.
    #[error("blob of {len} bytes is shorter than the injected header")]
    TruncatedHeader {
        /// Length of the offending blob.
        len: usize,
    },
    /// A payload does not fit behind the preamble.
    #[error("frame needs {needed} bytes but the buffer holds {capacity}")]
    FrameOverflow {
        /// Bytes required for preamble, SOF, payload and pad.
        needed: usize,
        /// Capacity of the working buffer.
        capacity: usize,
    },
}

/// Invalid preamble configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ConfigError {
    /// The preamble would leave no room for the SOF and pad bytes.
    #[error("preamble of {bits} bits exceeds the maximum of {max_bits} bits")]
    PreambleTooLong {
        /// Requested preamble length in bits.
        bits: u16,
        /// Largest accepted preamble length in bits.
        max_bits: u16,
    },
}

/// Coarse classification of a [`PhyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ErrorKind {
    /// The caller broke the input contract; see [`Violation`].
    ProtocolViolation,
    /// The framer has seen end-of-stream and refuses further work.
    Closed,
    /// The preamble configuration was rejected.
    Config,
    /// The downstream sink failed.
    Sink,
}

/// Main error type for framer operations, generic over the sink error `E`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhyError<E> {
    /// The inbound message broke the input contract.
    #[error("protocol violation: {0}")]
    ProtocolViolation(Violation),
    /// `process` was called after end-of-stream.
    #[error("framer is closed")]
    Closed,
    /// Invalid preamble configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The sink refused an outbound message.
    #[error("message sink error")]
    Sink(E),
}

impl<E> PhyError<E> {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PhyError::ProtocolViolation(_) => ErrorKind::ProtocolViolation,
            PhyError::Closed => ErrorKind::Closed,
            PhyError::Config(_) => ErrorKind::Config,
            PhyError::Sink(_) => ErrorKind::Sink,
        }
    }
}

impl<E> From<Violation> for PhyError<E> {
    fn from(v: Violation) -> Self {
        PhyError::ProtocolViolation(v)
    }
}
