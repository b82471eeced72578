//! Edge-driven pulse engine.
//!
//! One alarm drives two phase-aligned square waves. The alarm alternates
//! between the pulse width and the rest of the period, so the active half
//! is always `pulse_width` and the full cycle always `period`, whatever the
//! handler latency. The slow group rises on the same edge as every
//! `SUBDIVISION`th fast rising edge and falls on the next fast rising edge,
//! one fast period later.

use crate::config::{PulseTiming, SUBDIVISION};
use crate::output::{OutputGroup, RearmAlarm};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    #[default]
    Low,
    High,
}

/// Completed fast cycles since the last 1 Hz event, always in
/// `[0, SUBDIVISION)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SubCounter(u8);

impl SubCounter {
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Counts one fast cycle. Returns `true` when the counter wraps back
    /// to zero, exactly once per `SUBDIVISION` calls.
    pub fn increment(&mut self) -> bool {
        self.0 += 1;
        if self.0 >= SUBDIVISION {
            self.0 = 0;
            true
        } else {
            false
        }
    }
}

/// What a single alarm expiry did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Fast group went inactive.
    Fall,
    /// Fast group went active.
    Rise,
    /// Fast and slow groups went active together: the 1 Hz event.
    Second,
}

#[derive(Debug)]
pub struct PulseEngine {
    timing: PulseTiming,
    fast: Phase,
    slow: Phase,
    counter: SubCounter,
}

impl PulseEngine {
    pub const fn new(timing: PulseTiming) -> Self {
        Self {
            timing,
            fast: Phase::Low,
            slow: Phase::Low,
            counter: SubCounter(0),
        }
    }

    /// Interval to arm before the first expiry, so that it lands on a
    /// rising edge.
    pub const fn first_delay_us(&self) -> u32 {
        self.timing.rest_us()
    }

    pub const fn timing(&self) -> PulseTiming {
        self.timing
    }

    pub const fn fast_phase(&self) -> Phase {
        self.fast
    }

    pub const fn slow_phase(&self) -> Phase {
        self.slow
    }

    pub const fn counter(&self) -> SubCounter {
        self.counter
    }

    /// Alarm expiry handler. Drives the groups, rearms the alarm, and
    /// reports which edge this was. Never blocks or allocates.
    pub fn on_alarm<F, S, A>(&mut self, fast: &mut F, slow: &mut S, alarm: &mut A) -> Edge
    where
        F: OutputGroup,
        S: OutputGroup,
        A: RearmAlarm,
    {
        match self.fast {
            Phase::Low => {
                fast.set_active(true);
                self.fast = Phase::High;
                alarm.rearm(self.timing.pulse_width_us());

                if self.counter.increment() {
                    slow.set_active(true);
                    self.slow = Phase::High;
                    Edge::Second
                } else {
                    if self.counter.get() == 1 {
                        slow.set_active(false);
                        self.slow = Phase::Low;
                    }
                    Edge::Rise
                }
            }
            Phase::High => {
                fast.set_active(false);
                self.fast = Phase::Low;
                alarm.rearm(self.timing.rest_us());
                Edge::Fall
            }
        }
    }
}
