use crate::clock::VirtualClock;
use crate::config::PulseTiming;
use crate::mailbox::SecondMailbox;
use crate::output::{OutputGroup, RearmAlarm};
use crate::pulse::{Edge, PulseEngine};

/// Everything the alarm handler owns: the pulse engine and the virtual
/// clock it advances.
#[derive(Debug)]
pub struct Synthesizer {
    engine: PulseEngine,
    clock: VirtualClock,
}

impl Synthesizer {
    pub const fn new(timing: PulseTiming, start: VirtualClock) -> Self {
        Self {
            engine: PulseEngine::new(timing),
            clock: start,
        }
    }

    pub const fn engine(&self) -> &PulseEngine {
        &self.engine
    }

    pub const fn clock(&self) -> VirtualClock {
        self.clock
    }

    /// Body of the alarm interrupt. On the 1 Hz event the clock advances
    /// and the new time is posted for the foreground.
    pub fn on_alarm<F, S, A>(
        &mut self,
        fast: &mut F,
        slow: &mut S,
        alarm: &mut A,
        mailbox: &mut SecondMailbox,
    ) -> Edge
    where
        F: OutputGroup,
        S: OutputGroup,
        A: RearmAlarm,
    {
        let edge = self.engine.on_alarm(fast, slow, alarm);
        if edge == Edge::Second {
            self.clock.advance();
            mailbox.post(self.clock);
        }
        edge
    }
}
