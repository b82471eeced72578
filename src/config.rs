//! Compile-time configuration for the pulse synthesizer.

use crate::clock::VirtualClock;

/// Longest interval the RP2040 alarm accepts in a single schedule.
pub const MAX_ALARM_US: u32 = 1 << 31;

/// Period and active width of a pulse train, in microseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseTiming {
    period_us: u32,
    pulse_width_us: u32,
}

impl PulseTiming {
    /// Panics (at compile time when used in a `const`) unless
    /// `0 < pulse_width_us < period_us <= MAX_ALARM_US`.
    pub const fn new(period_us: u32, pulse_width_us: u32) -> Self {
        assert!(pulse_width_us > 0, "pulse width must be non-zero");
        assert!(pulse_width_us < period_us, "pulse width must be shorter than the period");
        assert!(period_us <= MAX_ALARM_US, "period exceeds the alarm range");
        Self {
            period_us,
            pulse_width_us,
        }
    }

    pub const fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Duration of the active (high) half of each cycle.
    pub const fn pulse_width_us(&self) -> u32 {
        self.pulse_width_us
    }

    /// Duration of the inactive (low) half of each cycle.
    pub const fn rest_us(&self) -> u32 {
        self.period_us - self.pulse_width_us
    }
}

/// The fast group: 10 Hz, 1 ms active.
pub const TEN_HZ: PulseTiming = PulseTiming::new(100_000, 1_000);

/// Fast cycles per slow cycle.
pub const SUBDIVISION: u8 = 10;

/// Time of day the virtual clock is seeded with at boot.
pub const START_TIME: VirtualClock = match VirtualClock::new(12, 0, 0) {
    Some(clock) => clock,
    None => panic!("start time out of range"),
};

/// UART baud rate for the sentence output.
pub const GPRMC_BAUD: u32 = 9_600;

/// Half period of the status LED blink.
pub const BLINK_INTERVAL_US: u64 = 500_000;

/// Crystal on the Pico board.
pub const XTAL_FREQ_HZ: u32 = 12_000_000;
