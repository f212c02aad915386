//! # zwave-phy
//!
//! A portable, no_std Rust framer that turns captured or simulated Z-Wave
//! link-layer frames into physical-layer transmission buffers for an SDR
//! transmit chain.
//!
//! Each inbound frame arrives with a small injected header. The framer:
//! - prepends a bit-accurate alternating preamble (`0x55`) of a configurable bit length
//! - writes the start-of-frame delimiter (`0xF0`)
//! - copies the link-layer frame behind it and appends one pad byte (`0xAA`)
//! - first emits a burst of beam frames when the header asks to wake a sleeping node
//!
//! ## Crate features
//! | Feature                   | Description |
//! |---------------------------|-------------|
//! | `std`                     | Disables `#![no_std]` support and lets a `std::vec::Vec` act as a capture sink |
//! | `global-framer` (default) | Shared framer instance guarded by `critical_section` |
//! | `defmt-0-3`               | Uses `defmt` logging |
//! | `log`                     | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust
//! use zwave_phy::capture::OwnedOutbound;
//! use zwave_phy::framer::{Outcome, ZwaveFramer};
//! use zwave_phy::message::Message;
//!
//! let mut framer = ZwaveFramer::new(80).unwrap();
//! let mut out: Vec<OwnedOutbound> = Vec::new();
//!
//! let blob = [0x01, 0, 0, 0, 0, 0, 0, 0, 0xC1, 0x0D];
//! let outcome = framer.process(&Message::pdu(&blob), &mut out).unwrap();
//! assert_eq!(outcome, Outcome::Transmitted { beams: 0, frame_len: 14 });
//!
//! framer.process(&Message::EndOfStream, &mut out).unwrap();
//! assert!(framer.is_closed());
//! ```
//!
//! ## Modules
//!
//! - [`preamble`]: preamble construction and the working buffer
//! - [`frame`]: injected header parsing and beam frames
//! - [`message`]: port message shapes and the [`MessageSink`](message::MessageSink) trait
//! - [`framer`]: the frame processor
//! - [`capture`]: sinks that keep owned copies of the output
//! - [`shared`]: a `critical_section`-guarded global framer
//!
//! ## Integration Notes
//!
//! - One framer serves one input/output port pair; its buffer is reused for every frame
//! - No CRC is computed and nothing is retransmitted: the link-layer frame is sent as given
//! - Timing and modulation belong to the downstream radio blocks

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "global-framer")]
pub use critical_section;

pub use heapless;

#[macro_use]
mod fmt;

pub mod capture;
pub mod consts;
pub mod error;
pub mod frame;
pub mod framer;
pub mod message;
pub mod preamble;
#[cfg(feature = "global-framer")]
pub mod shared;
