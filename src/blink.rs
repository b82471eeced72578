/// Elapsed-time LED blinker for the foreground loop. Independent of the
/// pulse engine.
#[derive(Debug)]
pub struct Blinker {
    interval_us: u64,
    last_toggle_us: u64,
    on: bool,
}

impl Blinker {
    pub const fn new(interval_us: u64) -> Self {
        Self {
            interval_us,
            last_toggle_us: 0,
            on: false,
        }
    }

    /// Returns the new LED state when at least one interval has passed
    /// since the last toggle.
    pub fn poll(&mut self, now_us: u64) -> Option<bool> {
        if now_us.wrapping_sub(self.last_toggle_us) >= self.interval_us {
            self.last_toggle_us = now_us;
            self.on = !self.on;
            Some(self.on)
        } else {
            None
        }
    }

    pub const fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_once_per_interval() {
        let mut blinker = Blinker::new(500);
        assert_eq!(blinker.poll(100), None);
        assert_eq!(blinker.poll(500), Some(true));
        assert_eq!(blinker.poll(999), None);
        assert_eq!(blinker.poll(1_000), Some(false));
        assert!(!blinker.is_on());
    }

    #[test]
    fn late_poll_resyncs_to_now() {
        let mut blinker = Blinker::new(500);
        assert_eq!(blinker.poll(1_700), Some(true));
        assert_eq!(blinker.poll(2_100), None);
        assert_eq!(blinker.poll(2_200), Some(false));
    }

    #[test]
    fn survives_counter_wrap() {
        let mut blinker = Blinker::new(500);
        assert_eq!(blinker.poll(u64::MAX - 100), Some(true));
        assert_eq!(blinker.poll(398), None);
        assert_eq!(blinker.poll(399), Some(false));
    }
}
