//! Host-level timeline tests: the alarm is simulated by firing the handler at
//! whatever deadline it last armed, and every pin transition is recorded.

use pulse_sync::config::{START_TIME, SUBDIVISION, TEN_HZ};
use pulse_sync::sentence::validate;
use pulse_sync::{
    Edge, OutputGroup, RearmAlarm, SecondMailbox, Sentence, SentenceSink, Synthesizer,
    VirtualClock,
};

/// Records `(time_us, active)` for every change of level.
#[derive(Default)]
struct Trace {
    now_us: u64,
    active: bool,
    transitions: Vec<(u64, bool)>,
}

impl Trace {
    fn set_now(&mut self, now_us: u64) {
        self.now_us = now_us;
    }

    fn rises(&self) -> Vec<u64> {
        self.transitions
            .iter()
            .filter(|(_, active)| *active)
            .map(|(at, _)| *at)
            .collect()
    }

    fn falls(&self) -> Vec<u64> {
        self.transitions
            .iter()
            .filter(|(_, active)| !*active)
            .map(|(at, _)| *at)
            .collect()
    }
}

impl OutputGroup for Trace {
    fn set_active(&mut self, active: bool) {
        if active != self.active {
            self.active = active;
            self.transitions.push((self.now_us, active));
        }
    }
}

/// Deadline-chained alarm, like the board's.
#[derive(Default)]
struct SimAlarm {
    deadline_us: u64,
    armed: Vec<u32>,
}

impl RearmAlarm for SimAlarm {
    fn rearm(&mut self, after_us: u32) {
        self.deadline_us += u64::from(after_us);
        self.armed.push(after_us);
    }
}

#[derive(Default)]
struct Wire(Vec<String>);

impl SentenceSink for Wire {
    fn send(&mut self, frame: &[u8]) {
        self.0.push(String::from_utf8(frame.to_vec()).unwrap());
    }
}

struct Rig {
    synth: Synthesizer,
    fast: Trace,
    slow: Trace,
    alarm: SimAlarm,
    mailbox: SecondMailbox,
    wire: Wire,
    edges: Vec<Edge>,
}

impl Rig {
    fn new(start: VirtualClock) -> Self {
        let synth = Synthesizer::new(TEN_HZ, start);
        let mut alarm = SimAlarm::default();
        alarm.rearm(synth.engine().first_delay_us());
        Self {
            synth,
            fast: Trace::default(),
            slow: Trace::default(),
            alarm,
            mailbox: SecondMailbox::new(),
            wire: Wire::default(),
            edges: Vec::new(),
        }
    }

    /// One alarm expiry followed by one pass of the foreground loop.
    fn expire(&mut self) {
        let now = self.alarm.deadline_us;
        self.fast.set_now(now);
        self.slow.set_now(now);
        let edge = self
            .synth
            .on_alarm(&mut self.fast, &mut self.slow, &mut self.alarm, &mut self.mailbox);
        self.edges.push(edge);

        if let Some(time) = self.mailbox.take() {
            let sentence = Sentence::render(&time).unwrap();
            self.wire.send(sentence.as_bytes());
        }
    }

    /// Runs `cycles` full 10 Hz cycles (two expiries each).
    fn run_cycles(&mut self, cycles: usize) {
        for _ in 0..cycles * 2 {
            self.expire();
        }
    }
}

fn time_field(frame: &str) -> &str {
    &frame[7..16]
}

#[test]
fn fast_group_high_for_pulse_width_of_every_period() {
    let mut rig = Rig::new(START_TIME);
    rig.run_cycles(50);

    let rises = rig.fast.rises();
    let falls = rig.fast.falls();
    assert_eq!(rises.len(), 50);
    assert_eq!(falls.len(), 50);

    let period = u64::from(TEN_HZ.period_us());
    for (rise, fall) in rises.iter().zip(&falls) {
        assert_eq!(fall - rise, u64::from(TEN_HZ.pulse_width_us()));
    }
    for pair in rises.windows(2) {
        assert_eq!(pair[1] - pair[0], period);
    }

    // Armed intervals alternate, and each pair sums to the period.
    for pair in rig.alarm.armed[1..].chunks(2) {
        assert_eq!(pair[0] + pair[1], TEN_HZ.period_us());
        assert_eq!(pair[0], TEN_HZ.pulse_width_us());
    }
}

#[test]
fn slow_group_rises_with_every_tenth_fast_rise_for_one_period() {
    let mut rig = Rig::new(START_TIME);
    rig.run_cycles(55);

    let fast_rises = rig.fast.rises();
    let slow_rises = rig.slow.rises();
    let slow_falls = rig.slow.falls();

    let expected: Vec<u64> = fast_rises
        .iter()
        .skip(usize::from(SUBDIVISION) - 1)
        .step_by(usize::from(SUBDIVISION))
        .copied()
        .collect();
    assert_eq!(slow_rises, expected);
    assert_eq!(slow_rises.len(), 5);

    for (rise, fall) in slow_rises.iter().zip(&slow_falls) {
        assert_eq!(fall - rise, u64::from(TEN_HZ.period_us()));
        assert!(fast_rises.contains(fall));
    }
}

#[test]
fn one_second_event_per_ten_cycles() {
    let mut rig = Rig::new(START_TIME);
    rig.run_cycles(100);

    let seconds: Vec<usize> = rig
        .edges
        .iter()
        .enumerate()
        .filter(|(_, edge)| **edge == Edge::Second)
        .map(|(index, _)| index)
        .collect();
    assert_eq!(seconds.len(), 10);
    for pair in seconds.windows(2) {
        assert_eq!(pair[1] - pair[0], 2 * usize::from(SUBDIVISION));
    }
}

#[test]
fn one_minute_of_ticks_from_noon() {
    let mut rig = Rig::new(START_TIME);
    rig.run_cycles(600);

    assert_eq!(rig.synth.clock().hms(), (12, 1, 0));
    assert_eq!(rig.wire.0.len(), 60);
    assert_eq!(rig.mailbox.overruns(), 0);

    let mut expected = START_TIME;
    for frame in &rig.wire.0 {
        expected.advance();
        assert!(validate(frame).is_ok(), "bad frame {frame:?}");
        let (hour, minute, second) = expected.hms();
        assert_eq!(
            time_field(frame),
            format!("{hour:02}{minute:02}{second:02}.00")
        );
    }
    assert_eq!(time_field(rig.wire.0.last().unwrap()), "120100.00");
}

#[test]
fn last_second_of_day_rolls_to_midnight() {
    let mut rig = Rig::new(VirtualClock::new(23, 59, 59).unwrap());
    rig.run_cycles(10);

    assert_eq!(rig.synth.clock(), VirtualClock::MIDNIGHT);
    assert_eq!(
        rig.wire.0,
        ["$GPRMC,000000.00,A,3000.0000,N,12000.0000,E,0.0,0.0,010124,,,A*58\r\n"]
    );
}

#[test]
fn slow_foreground_counts_overruns() {
    let mut synth = Synthesizer::new(TEN_HZ, START_TIME);
    let mut mailbox = SecondMailbox::new();
    let (mut fast, mut slow, mut alarm) = (Trace::default(), Trace::default(), SimAlarm::default());

    // Three seconds pass without the foreground taking anything.
    for _ in 0..3 * 2 * usize::from(SUBDIVISION) {
        synth.on_alarm(&mut fast, &mut slow, &mut alarm, &mut mailbox);
    }

    assert_eq!(mailbox.overruns(), 2);
    assert_eq!(mailbox.take(), VirtualClock::new(12, 0, 3));
}
