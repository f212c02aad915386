//! A framer instance shared between the main loop and interrupt handlers.
//!
//! [`ZwaveFramer::process`] needs `&mut self`, which already rules out two
//! messages in flight on one instance. When the framer has to live in a
//! `static` (for example because frames arrive from a radio ISR while the main
//! loop reconfigures the preamble), these helpers keep it inside a
//! `critical_section::Mutex<RefCell<Option<_>>>` so every access is serialised.
//!
//! Enabled by the `global-framer` feature (default).
//!
//! - [`global_framer_init`]: `const` initialiser for the `static`
//! - [`global_framer_setup`]: installs a framer with a given preamble length
//! - [`global_framer_set_preamble`]: reconfigures the installed framer
//! - [`global_framer_process`]: runs one message through the installed framer
//! - [`init_zwave_framer!`](crate::init_zwave_framer) / [`process_zwave_framer!`](crate::process_zwave_framer):
//!   the same, for a conventionally named `ZWAVE_FRAMER` static

use core::cell::RefCell;
use critical_section::Mutex;

use crate::error::{ConfigError, PhyError};
use crate::framer::{Outcome, ZwaveFramer};
use crate::message::{Message, MessageSink};

mod macros;

/// A [`ZwaveFramer`] slot guarded by a critical section.
pub type GlobalFramer = Mutex<RefCell<Option<ZwaveFramer>>>;

/// Used to initialize the global static framer for use with
/// `critical_section`.
///
/// # Returns
/// * An empty slot; call [`global_framer_setup`] before use.
///
/// # Example
/// ```rust
/// use zwave_phy::shared::{GlobalFramer, global_framer_init};
///
/// static FRAMER: GlobalFramer = global_framer_init();
/// ```
pub const fn global_framer_init() -> GlobalFramer {
    Mutex::new(RefCell::new(None))
}

/// Installs a new framer with a preamble of `preamble_bits` bits, replacing any
/// previous one.
///
/// # Errors
/// [`ConfigError::PreambleTooLong`]; the slot is left untouched.
pub fn global_framer_setup(
    global_framer: &'static GlobalFramer,
    preamble_bits: u16,
) -> Result<(), ConfigError> {
    let framer = ZwaveFramer::new(preamble_bits)?;
    critical_section::with(|cs| {
        let _ = global_framer.borrow(cs).replace(Some(framer));
    });
    Ok(())
}

/// Rebuilds the preamble of the installed framer.
///
/// # Returns
/// `None` if [`global_framer_setup`] has not been called yet.
pub fn global_framer_set_preamble(
    global_framer: &'static GlobalFramer,
    preamble_bits: u16,
) -> Option<Result<(), ConfigError>> {
    critical_section::with(|cs| {
        global_framer
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .map(|framer| framer.set_preamble(preamble_bits))
    })
}

/// Runs one message through the installed framer.
///
/// The sink is called inside the critical section; it must not wait on
/// anything that needs interrupts to make progress.
///
/// # Returns
/// `None` if [`global_framer_setup`] has not been called yet, otherwise the
/// result of [`ZwaveFramer::process`].
///
/// # Example
/// ```rust
/// use zwave_phy::capture::OwnedOutbound;
/// use zwave_phy::message::Message;
/// use zwave_phy::shared::{GlobalFramer, global_framer_init, global_framer_process, global_framer_setup};
///
/// static FRAMER: GlobalFramer = global_framer_init();
///
/// global_framer_setup(&FRAMER, 8).unwrap();
/// let mut out: Vec<OwnedOutbound> = Vec::new();
/// let blob = [0x01, 0, 0, 0, 0, 0, 0, 0, 0x42];
/// let outcome = global_framer_process(&FRAMER, &Message::pdu(&blob), &mut out);
/// assert!(matches!(outcome, Some(Ok(_))));
/// assert_eq!(out[0].phy(), Some(&[0x55, 0xF0, 0x42, 0xAA][..]));
/// ```
pub fn global_framer_process<S: MessageSink>(
    global_framer: &'static GlobalFramer,
    msg: &Message<'_>,
    sink: &mut S,
) -> Option<Result<Outcome, PhyError<S::Error>>> {
    critical_section::with(|cs| {
        global_framer
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .map(|framer| framer.process(msg, sink))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::OwnedOutbound;
    use crate::error::ErrorKind;

    type Sink = Vec<OwnedOutbound>;

    #[test]
    fn test_calls_before_setup_do_nothing() {
        static FRAMER: GlobalFramer = global_framer_init();
        let mut out = Sink::new();
        assert!(global_framer_process(&FRAMER, &Message::EndOfStream, &mut out).is_none());
        assert!(global_framer_set_preamble(&FRAMER, 8).is_none());
        assert!(out.is_empty());
    }

    #[test]
    fn test_setup_and_process() {
        static FRAMER: GlobalFramer = global_framer_init();
        global_framer_setup(&FRAMER, 16).unwrap();
        let mut out = Sink::new();
        let blob = [0x01, 1, 0x33, 0, 0, 0, 0, 0, 0x10];

        let outcome = global_framer_process(&FRAMER, &Message::pdu(&blob), &mut out);

        assert_eq!(
            outcome,
            Some(Ok(Outcome::Transmitted {
                beams: 1,
                frame_len: 5
            }))
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].phy(), Some(&[0x55, 0x55, 0xF0, 0x10, 0xAA][..]));
    }

    #[test]
    fn test_set_preamble_through_slot() {
        static FRAMER: GlobalFramer = global_framer_init();
        global_framer_setup(&FRAMER, 16).unwrap();
        assert_eq!(global_framer_set_preamble(&FRAMER, 3), Some(Ok(())));
        assert!(matches!(
            global_framer_set_preamble(&FRAMER, u16::MAX),
            Some(Err(ConfigError::PreambleTooLong { .. }))
        ));

        let mut out = Sink::new();
        let blob = [0x01, 0, 0, 0, 0, 0, 0, 0];
        let _ = global_framer_process(&FRAMER, &Message::pdu(&blob), &mut out);
        assert_eq!(out[0].phy(), Some(&[0x05, 0xF0, 0xAA][..]));
    }

    #[test]
    fn test_rejected_setup_keeps_slot_empty() {
        static FRAMER: GlobalFramer = global_framer_init();
        assert!(global_framer_setup(&FRAMER, u16::MAX).is_err());
        let mut out = Sink::new();
        assert!(global_framer_process(&FRAMER, &Message::EndOfStream, &mut out).is_none());
    }

    #[test]
    fn test_closed_slot_refuses_work() {
        static FRAMER: GlobalFramer = global_framer_init();
        global_framer_setup(&FRAMER, 8).unwrap();
        let mut out = Sink::new();
        let _ = global_framer_process(&FRAMER, &Message::EndOfStream, &mut out);
        let err = global_framer_process(&FRAMER, &Message::EndOfStream, &mut out)
            .unwrap()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Closed);
        assert_eq!(out, vec![OwnedOutbound::EndOfStream]);
    }
}
