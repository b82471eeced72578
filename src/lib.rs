//! Phase-aligned 10 Hz / 1 Hz pulse synthesizer with a `$GPRMC` time
//! sentence, driven from a single hardware alarm.
#![cfg_attr(not(test), no_std)]

pub mod blink;
#[cfg(feature = "rp2040")]
pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod mailbox;
pub mod output;
pub mod pulse;
pub mod sentence;
pub mod synth;

pub use blink::Blinker;
pub use clock::VirtualClock;
pub use config::PulseTiming;
pub use error::{Error, Result};
pub use mailbox::SecondMailbox;
pub use output::{OutputGroup, RearmAlarm, SentenceSink};
pub use pulse::{Edge, Phase, PulseEngine, SubCounter};
pub use sentence::Sentence;
pub use synth::Synthesizer;
