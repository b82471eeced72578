/// Free-running time of day, advanced once per 1 Hz event.
///
/// Fields are private so every value in circulation satisfies
/// `hour < 24`, `minute < 60`, `second < 60`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VirtualClock {
    hour: u8,
    minute: u8,
    second: u8,
}

impl VirtualClock {
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Returns `None` if any field is out of range.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    pub const fn hms(&self) -> (u8, u8, u8) {
        (self.hour, self.minute, self.second)
    }

    /// Seconds elapsed since midnight, in `[0, 86400)`.
    pub const fn seconds_of_day(&self) -> u32 {
        self.hour as u32 * 3_600 + self.minute as u32 * 60 + self.second as u32
    }

    /// Increments the second, carrying into minute and hour. Wraps to
    /// 00:00:00 after 23:59:59.
    ///
    /// Runs in the alarm handler: constant time, no allocation.
    pub fn advance(&mut self) {
        self.second += 1;
        if self.second >= 60 {
            self.second = 0;
            self.add_minute();
        }
    }

    /// Increments the minute. Handles rollover to hours.
    pub fn add_minute(&mut self) {
        self.minute += 1;
        if self.minute >= 60 {
            self.minute = 0;
            self.hour = (self.hour + 1) % 24;
        }
    }
}
