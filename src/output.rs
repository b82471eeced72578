//! Hardware seams: pin groups, the rearmable alarm, and the sentence sink.

use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;

/// One or more pins driven with identical state.
pub trait OutputGroup {
    fn set_active(&mut self, active: bool);
}

/// Pins whose writes cannot fail, mirrored in array order.
impl<P, const N: usize> OutputGroup for [P; N]
where
    P: OutputPin<Error = Infallible>,
{
    fn set_active(&mut self, active: bool) {
        for pin in self.iter_mut() {
            let result = if active {
                pin.set_high()
            } else {
                pin.set_low()
            };
            match result {
                Ok(()) => {}
                Err(never) => match never {},
            }
        }
    }
}

/// A one-shot countdown alarm, reprogrammed from its own expiry handler.
pub trait RearmAlarm {
    /// Fire once more after `after_us` microseconds.
    fn rearm(&mut self, after_us: u32);
}

/// Destination for framed sentences. Writes may block; there is no
/// acknowledgement.
pub trait SentenceSink {
    fn send(&mut self, frame: &[u8]);
}
