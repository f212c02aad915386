/// Declares a static global `ZWAVE_FRAMER` slot protected by a `critical_section` mutex.
///
/// This macro creates a `static` singleton `ZWAVE_FRAMER` suitable for use in
/// interrupt-based environments, where both the main loop and an ISR need
/// to reach the same framer.
///
/// # Example
/// ```rust
/// zwave_phy::init_zwave_framer!();
///
/// fn main() {
///     zwave_phy::shared::global_framer_setup(&ZWAVE_FRAMER, 80).unwrap();
/// }
/// ```
#[macro_export]
macro_rules! init_zwave_framer {
    () => {
        pub static ZWAVE_FRAMER: $crate::shared::GlobalFramer =
            $crate::critical_section::Mutex::new(::core::cell::RefCell::new(None));
    };
}

/// Runs one message through the global `ZWAVE_FRAMER` if it has been set up.
///
/// Expands to [`global_framer_process`](crate::shared::global_framer_process)
/// on `ZWAVE_FRAMER`, so it evaluates to
/// `Option<Result<Outcome, PhyError<_>>>`.
///
/// # Arguments
/// - `$msg`: The inbound [`Message`](crate::message::Message)
/// - `$sink`: A mutable reference to the [`MessageSink`](crate::message::MessageSink)
///
/// # Example
/// ```rust
/// use zwave_phy::capture::OwnedOutbound;
/// use zwave_phy::message::Message;
///
/// zwave_phy::init_zwave_framer!();
///
/// fn main() {
///     zwave_phy::shared::global_framer_setup(&ZWAVE_FRAMER, 8).unwrap();
///     let mut out: Vec<OwnedOutbound> = Vec::new();
///     let outcome = zwave_phy::process_zwave_framer!(&Message::EndOfStream, &mut out);
///     assert!(matches!(outcome, Some(Ok(_))));
/// }
/// ```
///
/// # Notes
/// - This macro assumes `ZWAVE_FRAMER` was declared with `init_zwave_framer!`.
/// - Safe to call before setup; it evaluates to `None`.
#[macro_export]
macro_rules! process_zwave_framer {
    ( $msg:expr, $sink:expr ) => {
        $crate::shared::global_framer_process(&ZWAVE_FRAMER, $msg, $sink)
    };
}

#[cfg(test)]
mod tests {
    use crate::capture::OwnedOutbound;
    use crate::framer::Outcome;
    use crate::message::Message;

    crate::init_zwave_framer!();

    #[test]
    fn test_macros_drive_global_framer() {
        let mut out: Vec<OwnedOutbound> = Vec::new();
        assert!(crate::process_zwave_framer!(&Message::EndOfStream, &mut out).is_none());

        crate::shared::global_framer_setup(&ZWAVE_FRAMER, 8).unwrap();
        let blob = [0x07, 0, 0, 0, 0, 0, 0, 0, 1];
        assert_eq!(
            crate::process_zwave_framer!(&Message::pdu(&blob), &mut out),
            Some(Ok(Outcome::Dropped { marker: 0x07 }))
        );
        assert!(out.is_empty());
    }
}
