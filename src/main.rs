#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_halt as _;
use rtic::app;

use shiftreg_counter::config::{BOARD_PINS, DWELL_CEILING, DWELL_STEP, INITIAL_DWELL};
use shiftreg_counter::{DwellDuration, StatusSink};

/// Written by the button interrupt, read once per counter value by `idle`.
static DWELL: DwellDuration = DwellDuration::new(INITIAL_DWELL, DWELL_STEP, DWELL_CEILING);

/// Status lines go out over RTT alongside the rest of the log.
struct RttConsole;

impl StatusSink for RttConsole {
    fn emit(&mut self, line: &str) {
        defmt::info!("{=str}", line);
    }
}

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use super::*;
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        gpio::{bank0::Gpio15, DynPinId, FunctionSio, FunctionSioOutput, Interrupt, Pin, PullDown, PullUp, SioInput},
        sio::Sio,
        watchdog::Watchdog,
    };
    use shiftreg_counter::{
        CounterPanel, Multiplexer, RegisterBank, RegisterId, SegmentEncoder, ShiftRegister,
    };

    type OutPin = Pin<DynPinId, FunctionSioOutput, PullDown>;
    type ButtonPin = Pin<Gpio15, FunctionSio<SioInput>, PullUp>;

    // Nothing is shared through RTIC locks; the dwell is an atomic static.
    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        button: ButtonPin,
        panel: CounterPanel<OutPin>,
        delay: cortex_m::delay::Delay,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        if let Err(err) = BOARD_PINS.validate() {
            defmt::panic!("invalid pin table: {}", err);
        }

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = match init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        ) {
            Ok(clocks) => clocks,
            Err(_) => defmt::panic!("clock init failed"),
        };

        let delay = cortex_m::delay::Delay::new(ctx.core.SYST, clocks.system_clock.freq().to_Hz());

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        // Same order as BOARD_PINS: data, output enable, clock, clear.
        let binary = ShiftRegister::new(
            RegisterId::Binary,
            pins.gpio2.into_push_pull_output().into_dyn_pin(),
            pins.gpio3.into_push_pull_output().into_dyn_pin(),
            pins.gpio4.into_push_pull_output().into_dyn_pin(),
            pins.gpio5.into_push_pull_output().into_dyn_pin(),
        );
        let segment = ShiftRegister::new(
            RegisterId::Segment,
            pins.gpio6.into_push_pull_output().into_dyn_pin(),
            pins.gpio7.into_push_pull_output().into_dyn_pin(),
            pins.gpio8.into_push_pull_output().into_dyn_pin(),
            pins.gpio9.into_push_pull_output().into_dyn_pin(),
        );
        let encoder = SegmentEncoder::new(
            pins.gpio12.into_push_pull_output().into_dyn_pin(),
            pins.gpio13.into_push_pull_output().into_dyn_pin(),
        );
        let mux = Multiplexer::new(
            pins.gpio10.into_push_pull_output().into_dyn_pin(),
            pins.gpio11.into_push_pull_output().into_dyn_pin(),
            encoder,
        );
        let panel = CounterPanel::new(RegisterBank::new(binary, segment), mux);

        let button = pins.gpio15.into_pull_up_input();
        // Falling edge: the button pulls the line to ground.
        button.set_interrupt_enabled(Interrupt::EdgeLow, true);

        defmt::info!("shiftreg-counter started");
        defmt::info!(
            "binary SER/OE/CLK/CLR = GPIO{}/{}/{}/{}",
            BOARD_PINS.binary.data,
            BOARD_PINS.binary.output_enable,
            BOARD_PINS.binary.clock,
            BOARD_PINS.binary.clear
        );
        defmt::info!(
            "segment SER/OE/CLK/CLR = GPIO{}/{}/{}/{}",
            BOARD_PINS.segment.data,
            BOARD_PINS.segment.output_enable,
            BOARD_PINS.segment.clock,
            BOARD_PINS.segment.clear
        );
        defmt::info!("dwell {} passes, button on GPIO{}", DWELL.read(), BOARD_PINS.button);

        (
            Shared {},
            Local {
                button,
                panel,
                delay,
            },
            init::Monotonics(),
        )
    }

    // Busy-waits between pulses; only the button interrupt preempts it.
    #[idle(local = [panel, delay])]
    fn idle(ctx: idle::Context) -> ! {
        let mut console = RttConsole;
        loop {
            ctx.local.panel.run_cycle(&DWELL, ctx.local.delay, &mut console);
        }
    }

    // Hardware Task: GPIO Interrupt (Button Press)
    #[task(binds = IO_IRQ_BANK0, priority = 1, local = [button])]
    fn button_press(ctx: button_press::Context) {
        ctx.local.button.clear_interrupt(Interrupt::EdgeLow);

        let dwell = DWELL.add();
        defmt::debug!("dwell now {} passes", dwell);
    }
}
