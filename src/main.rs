//! wash-panel - washing machine touch panel firmware for nRF52840.
//!
//! Embassy tasks stand in for the panel's interrupt handlers:
//!
//! - **touch**: drains the maXTouch controller whenever CHG is low
//! - **alarm**: 1 Hz countdown alarm
//! - **animation** / **lock timer**: periodic ticks, started on demand
//! - **door**: door switch edges
//! - **actuator**: owns the door lock solenoid
//! - **door LED**: lit while the door is open
//!
//! The main task is the render loop. It is the only owner of the display
//! and polls the redraw flags every few milliseconds.

#![no_std]
#![no_main]

mod board;

use defmt::{debug, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::{bind_interrupts, peripherals, spim, twim, uarte};
use embassy_time::{Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use wash_panel::config::{DISPLAY_BUFFER_LEN, RENDER_POLL_MS, TOUCH_BATCH_MAX};
use wash_panel::{PanelContext, PanelPolicy};

use board::display::GraphicsPanel;
use board::serial::UartDiagnostics;
use board::touch::MxtTouch;
use board::BoardHw;

bind_interrupts!(struct Irqs {
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    UARTE0 => uarte::InterruptHandler<peripherals::UARTE0>;
});

static CONTEXT: PanelContext = PanelContext::new(PanelPolicy::DEFAULT);

#[embassy_executor::task]
async fn touch_task(
    mut touch: MxtTouch<twim::Twim<'static, peripherals::TWISPI0>>,
    mut diagnostics: UartDiagnostics,
) {
    let mut hw = BoardHw::new();
    loop {
        touch.wait_pending().await;
        let consumed = CONTEXT.on_touch_batch(&mut touch, &mut diagnostics, &mut hw);
        if consumed == TOUCH_BATCH_MAX {
            // More may be queued; let other tasks run before the next batch.
            yield_now().await;
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("wash-panel starting");

    // Touch controller
    let mut twim_config = twim::Config::default();
    twim_config.frequency = twim::Frequency::K400;
    let twim = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim_config);
    let chg = Input::new(p.P0_13, Pull::Up);
    let touch = MxtTouch::new(twim, chg);

    // Diagnostic serial
    let mut uart_config = uarte::Config::default();
    uart_config.baudrate = uarte::Baudrate::BAUD115200;
    let uart_tx = uarte::UarteTx::new(p.UARTE0, Irqs, p.P1_02, uart_config);
    let diagnostics = UartDiagnostics::new(uart_tx);

    // Display
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M32;
    let spi = spim::Spim::new_txonly(p.SPI3, Irqs, p.P0_19, p.P0_20, spi_config);
    let cs = Output::new(p.P0_21, Level::High, OutputDrive::Standard);
    let dc = Output::new(p.P0_22, Level::Low, OutputDrive::Standard);
    let rst = Output::new(p.P0_23, Level::High, OutputDrive::Standard);

    static DISPLAY_BUFFER: StaticCell<[u8; DISPLAY_BUFFER_LEN]> = StaticCell::new();
    let buffer = DISPLAY_BUFFER.init([0; DISPLAY_BUFFER_LEN]);
    let tft = unwrap!(board::display::init(spi, cs, dc, rst, buffer));
    let mut panel = GraphicsPanel::new(tft);

    // Door switch, lock actuator and door LED (boots unlocked, LED off)
    let door = Input::new(p.P0_11, Pull::Down);
    let actuator = Output::new(p.P0_06, Level::High, OutputDrive::Standard);
    let door_led = Output::new(p.P0_14, Level::High, OutputDrive::Standard);

    unwrap!(spawner.spawn(touch_task(touch, diagnostics)));
    unwrap!(spawner.spawn(board::rtc::alarm_task(&CONTEXT)));
    unwrap!(spawner.spawn(board::animation_task(&CONTEXT)));
    unwrap!(spawner.spawn(board::lock_timer_task(&CONTEXT)));
    unwrap!(spawner.spawn(board::door_task(&CONTEXT, door)));
    unwrap!(spawner.spawn(board::actuator_task(actuator)));
    unwrap!(spawner.spawn(board::door_led_task(door_led)));

    CONTEXT.boot();
    info!("Panel ready");

    loop {
        match CONTEXT.render(&mut panel) {
            Ok(drawn) if !drawn.is_empty() => debug!("Render: {}", drawn),
            Ok(_) => {}
            Err(e) => warn!("Render failed: {}", e),
        }
        Timer::after(Duration::from_millis(RENDER_POLL_MS)).await;
    }
}
