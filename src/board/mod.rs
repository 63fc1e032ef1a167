//! nRF52840 glue between the panel core and the hardware.
//!
//! Handlers in the core request timer, alarm and actuator changes through
//! [`Hardware`]. On the board those requests become `Signal`s consumed by
//! the task that owns the peripheral, so any task can hold its own
//! [`BoardHw`].

pub mod display;
pub mod rtc;
pub mod serial;
pub mod touch;

use defmt::{debug, info};
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::{Input, Output};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker, Timer};
use embedded_hal::digital::{OutputPin, PinState};

use wash_panel::config::DOOR_DEBOUNCE_MS;
use wash_panel::context::{DoorIndicator, Hardware, TimerId};
use wash_panel::lock::LockActuator;
use wash_panel::panel::DoorEvent;
use wash_panel::timers::PeriodicTimer;
use wash_panel::PanelContext;

use self::rtc::SoftRtc;

/// `Some(hz)` starts the drum animation timer, `None` stops it.
pub static ANIMATION_TIMER: Signal<CriticalSectionRawMutex, Option<u32>> = Signal::new();

/// `Some(hz)` starts the lock hold timer, `None` stops it.
pub static LOCK_TIMER: Signal<CriticalSectionRawMutex, Option<u32>> = Signal::new();

/// Requested door lock position (`true` = released).
pub static ACTUATOR: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// Requested door LED state (`true` = lit).
pub static DOOR_LED: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// Periodic timer driven by a control signal.
pub struct SignalTimer {
    control: &'static Signal<CriticalSectionRawMutex, Option<u32>>,
}

impl PeriodicTimer for SignalTimer {
    fn start(&mut self, hz: u32) {
        self.control.signal(Some(hz));
    }

    fn stop(&mut self) {
        self.control.signal(None);
    }
}

/// Lock actuator request forwarded to [`actuator_task`].
pub struct SignalActuator;

impl LockActuator for SignalActuator {
    fn set_open(&mut self, open: bool) {
        ACTUATOR.signal(open);
    }
}

/// Door LED request forwarded to [`door_led_task`].
pub struct SignalLed;

impl DoorIndicator for SignalLed {
    fn set_lit(&mut self, lit: bool) {
        DOOR_LED.signal(lit);
    }
}

/// Per-task handle on the board outputs.
pub struct BoardHw {
    rtc: SoftRtc,
    animation: SignalTimer,
    lock_hold: SignalTimer,
    actuator: SignalActuator,
    door_led: SignalLed,
}

impl BoardHw {
    pub const fn new() -> Self {
        Self {
            rtc: SoftRtc,
            animation: SignalTimer {
                control: &ANIMATION_TIMER,
            },
            lock_hold: SignalTimer {
                control: &LOCK_TIMER,
            },
            actuator: SignalActuator,
            door_led: SignalLed,
        }
    }
}

impl Hardware for BoardHw {
    type Rtc = SoftRtc;
    type Timer = SignalTimer;
    type Actuator = SignalActuator;
    type Indicator = SignalLed;

    fn rtc(&mut self) -> &mut SoftRtc {
        &mut self.rtc
    }

    fn timer(&mut self, id: TimerId) -> &mut SignalTimer {
        match id {
            TimerId::Animation => &mut self.animation,
            TimerId::LockHold => &mut self.lock_hold,
        }
    }

    fn lock_actuator(&mut self) -> &mut SignalActuator {
        &mut self.actuator
    }

    fn door_indicator(&mut self) -> &mut SignalLed {
        &mut self.door_led
    }
}

/// Run `on_tick` at the rate last requested on `control` until stopped.
async fn run_periodic(
    control: &'static Signal<CriticalSectionRawMutex, Option<u32>>,
    mut on_tick: impl FnMut(),
) -> ! {
    let mut rate = None;
    loop {
        let Some(hz) = rate else {
            rate = control.wait().await;
            continue;
        };

        let mut ticker = Ticker::every(Duration::from_hz(u64::from(hz)));
        loop {
            match select(ticker.next(), control.wait()).await {
                Either::First(()) => on_tick(),
                Either::Second(next) => {
                    rate = next;
                    break;
                }
            }
        }
    }
}

#[embassy_executor::task]
pub async fn animation_task(ctx: &'static PanelContext) {
    let mut hw = BoardHw::new();
    run_periodic(&ANIMATION_TIMER, || ctx.on_anim_tick(&mut hw)).await
}

#[embassy_executor::task]
pub async fn lock_timer_task(ctx: &'static PanelContext) {
    let mut hw = BoardHw::new();
    run_periodic(&LOCK_TIMER, || ctx.on_lock_tick(&mut hw)).await
}

/// Drive the lock solenoid from [`ACTUATOR`] requests.
#[embassy_executor::task]
pub async fn actuator_task(mut pin: Output<'static>) {
    loop {
        let open = ACTUATOR.wait().await;
        info!("Actuator: {}", if open { "released" } else { "locked" });
        // GPIO writes are infallible on nRF.
        let _ = pin.set_state(PinState::from(open));
    }
}

/// Drive the door LED (active low) from [`DOOR_LED`] requests.
#[embassy_executor::task]
pub async fn door_led_task(mut pin: Output<'static>) {
    loop {
        let lit = DOOR_LED.wait().await;
        let _ = pin.set_state(PinState::from(!lit));
    }
}

/// Watch the door switch (high = open) and report edges.
#[embassy_executor::task]
pub async fn door_task(ctx: &'static PanelContext, mut door: Input<'static>) {
    let mut hw = BoardHw::new();

    if door.is_high() {
        ctx.on_door(DoorEvent::Opened, &mut hw);
    }

    loop {
        door.wait_for_any_edge().await;

        // Debounce: wait and sample the settled level.
        Timer::after(Duration::from_millis(DOOR_DEBOUNCE_MS)).await;

        let event = if door.is_high() {
            DoorEvent::Opened
        } else {
            DoorEvent::Closed
        };
        debug!("Door: {}", event);
        ctx.on_door(event, &mut hw);
    }
}
