//! Handoff of the 1 Hz event from the alarm handler to the foreground loop.
//!
//! The handler posts a clock snapshot and raises the pending flag; the
//! foreground takes both in one call and thereby clears the flag. On the
//! device the mailbox is an RTIC shared resource, so `take` runs with the
//! alarm interrupt masked and never sees a half-written snapshot.

use crate::clock::VirtualClock;

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SecondMailbox {
    pending: bool,
    time: VirtualClock,
    overruns: u32,
}

impl SecondMailbox {
    pub const fn new() -> Self {
        Self {
            pending: false,
            time: VirtualClock::MIDNIGHT,
            overruns: 0,
        }
    }

    /// Producer side. A post that finds the previous one still pending
    /// replaces it and counts an overrun.
    pub fn post(&mut self, time: VirtualClock) {
        if self.pending {
            self.overruns = self.overruns.wrapping_add(1);
        }
        self.time = time;
        self.pending = true;
    }

    /// Consumer side: returns the pending snapshot and clears the flag.
    pub fn take(&mut self) -> Option<VirtualClock> {
        if core::mem::replace(&mut self.pending, false) {
            Some(self.time)
        } else {
            None
        }
    }

    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Seconds dropped because the consumer fell behind.
    pub const fn overruns(&self) -> u32 {
        self.overruns
    }
}

impl Default for SecondMailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears_pending() {
        let mut mailbox = SecondMailbox::new();
        assert_eq!(mailbox.take(), None);

        let noon = VirtualClock::new(12, 0, 1).unwrap();
        mailbox.post(noon);
        assert!(mailbox.is_pending());
        assert_eq!(mailbox.take(), Some(noon));
        assert!(!mailbox.is_pending());
        assert_eq!(mailbox.take(), None);
        assert_eq!(mailbox.overruns(), 0);
    }

    #[test]
    fn unconsumed_post_counts_overrun_and_keeps_latest() {
        let mut mailbox = SecondMailbox::new();
        let first = VirtualClock::new(12, 0, 1).unwrap();
        let second = VirtualClock::new(12, 0, 2).unwrap();

        mailbox.post(first);
        mailbox.post(second);

        assert_eq!(mailbox.overruns(), 1);
        assert_eq!(mailbox.take(), Some(second));
    }
}
