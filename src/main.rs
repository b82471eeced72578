#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use defmt::{debug, error, info, warn};
    use pulse_sync::board::{
        FastGroup, GprmcUart, PulseAlarm, SlowGroup, StatusLed, FAST_PINS, GPRMC_TX_PIN,
        RAIL_HIGH_PIN, RAIL_LOW_PIN, SLOW_PIN,
    };
    use pulse_sync::config::{BLINK_INTERVAL_US, GPRMC_BAUD, START_TIME, TEN_HZ, XTAL_FREQ_HZ};
    use pulse_sync::{
        Blinker, OutputGroup, RearmAlarm, SecondMailbox, Sentence, SentenceSink, Synthesizer,
    };
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        fugit::RateExtU32,
        gpio::{FunctionUart, PinState},
        sio::Sio,
        timer::Timer,
        uart::{DataBits, StopBits, UartConfig, UartPeripheral},
        watchdog::Watchdog,
    };

    // Shared resources (accessed by multiple tasks)
    #[shared]
    struct Shared {
        mailbox: SecondMailbox,
    }

    // Local resources (accessed by single tasks)
    #[local]
    struct Local {
        synth: Synthesizer,
        fast: FastGroup,
        slow: SlowGroup,
        alarm: PulseAlarm,
        uart: GprmcUart,
        led: StatusLed,
        timer: Timer,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let clocks = init_clocks_and_plls(
            XTAL_FREQ_HZ,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let mut fast: FastGroup = [
            pins.gpio16.into_push_pull_output().into_dyn_pin(),
            pins.gpio17.into_push_pull_output().into_dyn_pin(),
            pins.gpio18.into_push_pull_output().into_dyn_pin(),
        ];
        let mut slow: SlowGroup = [pins.gpio19.into_push_pull_output().into_dyn_pin()];
        let mut led: StatusLed = [pins.led.into_push_pull_output().into_dyn_pin()];
        fast.set_active(false);
        slow.set_active(false);
        led.set_active(false);

        // Reference rails keep their level after the handles are dropped.
        let _rail_high = pins.gpio21.into_push_pull_output_in_state(PinState::High);
        let _rail_low = pins.gpio22.into_push_pull_output_in_state(PinState::Low);

        let uart_pins = (
            pins.gpio0.into_function::<FunctionUart>(),
            pins.gpio1.into_function::<FunctionUart>(),
        );
        let uart = UartPeripheral::new(pac.UART0, uart_pins, &mut pac.RESETS)
            .enable(
                UartConfig::new(GPRMC_BAUD.Hz(), DataBits::Eight, None, StopBits::One),
                clocks.peripheral_clock.freq(),
            )
            .unwrap();

        let synth = Synthesizer::new(TEN_HZ, START_TIME);

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut alarm = PulseAlarm::new(timer.alarm_0().unwrap(), timer.get_counter());
        // First expiry is the first rising edge.
        alarm.rearm(synth.engine().first_delay_us());

        info!("RP2040 pulse generator");
        info!(
            "GPIO{}: 10 Hz, {=u32} us high of {=u32} us",
            FAST_PINS,
            TEN_HZ.pulse_width_us(),
            TEN_HZ.period_us()
        );
        info!("GPIO{=u8}: 1 Hz, high for one 10 Hz period", SLOW_PIN);
        info!(
            "GPIO{=u8} held high, GPIO{=u8} held low",
            RAIL_HIGH_PIN, RAIL_LOW_PIN
        );
        info!("GPIO{=u8}: GPRMC TX at {=u32} baud", GPRMC_TX_PIN, GPRMC_BAUD);
        info!("Virtual clock starts at {}", START_TIME);

        (
            Shared {
                mailbox: SecondMailbox::new(),
            },
            Local {
                synth,
                fast,
                slow,
                alarm,
                uart,
                led,
                timer,
            },
            init::Monotonics(),
        )
    }

    // Hardware Task: alarm 0, once per pulse edge
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [mailbox], local = [synth, fast, slow, alarm])]
    fn pulse_edge(mut ctx: pulse_edge::Context) {
        let local = ctx.local;
        local.alarm.clear_interrupt();

        ctx.shared.mailbox.lock(|mailbox| {
            local
                .synth
                .on_alarm(local.fast, local.slow, local.alarm, mailbox);
        });
    }

    // Foreground: LED blink and sentence transmission
    #[idle(
        shared = [mailbox],
        local = [uart, led, timer, blinker: Blinker = Blinker::new(BLINK_INTERVAL_US), overruns_seen: u32 = 0]
    )]
    fn idle(mut ctx: idle::Context) -> ! {
        loop {
            let now_us = ctx.local.timer.get_counter().ticks();
            if let Some(on) = ctx.local.blinker.poll(now_us) {
                ctx.local.led.set_active(on);
            }

            // Masks the alarm only for the copy.
            let (pending, overruns) = ctx
                .shared
                .mailbox
                .lock(|mailbox| (mailbox.take(), mailbox.overruns()));

            if overruns != *ctx.local.overruns_seen {
                warn!(
                    "{=u32} second(s) dropped before transmission",
                    overruns.wrapping_sub(*ctx.local.overruns_seen)
                );
                *ctx.local.overruns_seen = overruns;
            }

            if let Some(time) = pending {
                match Sentence::render(&time) {
                    Ok(sentence) => {
                        ctx.local.uart.send(sentence.as_bytes());
                        debug!("Sent {}", sentence);
                    }
                    Err(err) => error!("No sentence for {}: {}", time, err),
                }
            }
        }
    }
}
