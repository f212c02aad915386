//! Message shapes for the framer's input and output ports.
//!
//! The host runtime delivers loosely typed messages on the [`IN_PORT`] port: either an
//! end-of-stream sentinel or a pair whose second element should be the frame
//! blob. Output is typed ([`Outbound`]) and handed to a [`MessageSink`] standing
//! in for the [`OUT_PORT`] port.

use crate::consts::{IN_PORT, OUT_PORT};
use crate::error::Violation;
use crate::frame::BeamFrame;

/// A single value carried inside a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    /// The empty value, used as metadata placeholder.
    Nil,
    /// Raw bytes.
    Blob(&'a [u8]),
    /// A symbolic name.
    Symbol(&'a str),
    /// A signed integer.
    Integer(i64),
}

/// A message received on the input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message<'a> {
    /// The upstream producer has finished.
    EndOfStream,
    /// A metadata/data pair; the data element must be a [`Value::Blob`].
    Pair(Value<'a>, Value<'a>),
    /// A bare value, which the framer does not accept.
    Atom(Value<'a>),
}

impl<'a> Message<'a> {
    /// Name of the port these messages arrive on.
    pub const PORT: &'static str = IN_PORT;

    /// Wraps `blob` the way upstream blocks emit protocol data units: `(nil . blob)`.
    pub const fn pdu(blob: &'a [u8]) -> Self {
        Message::Pair(Value::Nil, Value::Blob(blob))
    }

    /// Returns the blob carried in the second element of the pair.
    ///
    /// # Errors
    /// - [`Violation::NotAPair`] for atoms and end-of-stream
    /// - [`Violation::NotABlob`] if the second element is not a blob
    pub fn blob(&self) -> Result<&'a [u8], Violation> {
        match *self {
            Message::Pair(_, Value::Blob(blob)) => Ok(blob),
            Message::Pair(_, _) => Err(Violation::NotABlob),
            Message::EndOfStream | Message::Atom(_) => Err(Violation::NotAPair),
        }
    }
}

/// A message published on the output port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outbound<'a> {
    /// One wake-up beam; published before the frame it precedes.
    Beam(BeamFrame),
    /// A complete physical frame: preamble, SOF, payload and pad.
    Phy(&'a [u8]),
    /// Propagated end-of-stream.
    EndOfStream,
}

/// The output port.
///
/// `publish` may return [`nb::Error::WouldBlock`] while the consumer is busy;
/// the framer retries until the message is accepted, so the order of
/// outbound messages is never changed.
pub trait MessageSink {
    /// Error reported when a message cannot be delivered.
    type Error;

    /// Name of the port this sink publishes on, used in log output.
    const PORT: &'static str = OUT_PORT;

    /// Delivers one outbound message.
    ///
    /// [`Outbound::Phy`] borrows the framer's working buffer, which is reused by the
    /// next frame; copy it if it must outlive the call.
    fn publish(&mut self, msg: Outbound<'_>) -> nb::Result<(), Self::Error>;
}

impl<S: MessageSink + ?Sized> MessageSink for &mut S {
    type Error = S::Error;

    const PORT: &'static str = S::PORT;

    fn publish(&mut self, msg: Outbound<'_>) -> nb::Result<(), Self::Error> {
        (**self).publish(msg)
    }
}
