//! Raspberry Pi Pico wiring and the hardware side of the output seams.

use rp_pico::hal::fugit::MicrosDurationU64;
use rp_pico::hal::gpio::bank0::{Gpio0, Gpio1};
use rp_pico::hal::gpio::{DynPinId, FunctionSioOutput, FunctionUart, Pin, PullDown};
use rp_pico::hal::pac;
use rp_pico::hal::timer::{Alarm, Alarm0, Instant};
use rp_pico::hal::uart::{Enabled, UartPeripheral};

use crate::output::{RearmAlarm, SentenceSink};

/// GPIO numbers, for the boot banner.
pub const FAST_PINS: [u8; 3] = [16, 17, 18];
pub const SLOW_PIN: u8 = 19;
pub const RAIL_HIGH_PIN: u8 = 21;
pub const RAIL_LOW_PIN: u8 = 22;
pub const GPRMC_TX_PIN: u8 = 0;

pub type PushPullPin = Pin<DynPinId, FunctionSioOutput, PullDown>;

/// 10 Hz group.
pub type FastGroup = [PushPullPin; 3];
/// 1 Hz group.
pub type SlowGroup = [PushPullPin; 1];
pub type StatusLed = [PushPullPin; 1];

pub type GprmcUart = UartPeripheral<
    Enabled,
    pac::UART0,
    (
        Pin<Gpio0, FunctionUart, PullDown>,
        Pin<Gpio1, FunctionUart, PullDown>,
    ),
>;

/// Alarm 0 rearmed against its previous deadline rather than the time the
/// handler got around to it, so handler latency never accumulates.
pub struct PulseAlarm {
    alarm: Alarm0,
    deadline: Instant,
}

impl PulseAlarm {
    /// `now` is the timer reading the first `rearm` counts from.
    pub fn new(mut alarm: Alarm0, now: Instant) -> Self {
        alarm.enable_interrupt();
        Self {
            alarm,
            deadline: now,
        }
    }

    pub fn clear_interrupt(&mut self) {
        self.alarm.clear_interrupt();
    }
}

impl RearmAlarm for PulseAlarm {
    fn rearm(&mut self, after_us: u32) {
        self.deadline = self.deadline + MicrosDurationU64::micros(u64::from(after_us));
        // PulseTiming keeps every interval within the alarm's range, and a
        // deadline already in the past fires immediately.
        let _ = self.alarm.schedule_at(self.deadline);
    }
}

impl SentenceSink for GprmcUart {
    fn send(&mut self, frame: &[u8]) {
        self.write_full_blocking(frame);
    }
}
