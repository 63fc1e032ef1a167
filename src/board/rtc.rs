//! Wall clock and one-shot alarm on top of the embassy time driver.
//!
//! The clock reads midnight at boot. An armed alarm is a deadline on the
//! next occurrence of the requested time of day.

use defmt::debug;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};

use wash_panel::timers::{RealTimeClock, TimeOfDay};
use wash_panel::PanelContext;

use super::BoardHw;

const SECONDS_PER_DAY: u64 = 86_400;

/// `Some(t)` arms the alarm for `t`, `None` disarms it.
pub static ALARM: Signal<CriticalSectionRawMutex, Option<TimeOfDay>> = Signal::new();

/// Clock counting from boot.
pub struct SoftRtc;

impl RealTimeClock for SoftRtc {
    fn now(&mut self) -> TimeOfDay {
        TimeOfDay::from_seconds((Instant::now().as_secs() % SECONDS_PER_DAY) as u32)
    }

    fn arm_alarm(&mut self, at: TimeOfDay) {
        ALARM.signal(Some(at));
    }

    fn disarm_alarm(&mut self) {
        ALARM.signal(None);
    }
}

/// Instant of the next time the clock shows `at`.
fn deadline(at: TimeOfDay) -> Instant {
    let now = Instant::now().as_secs();
    let today = now % SECONDS_PER_DAY;
    let ahead = (u64::from(at.as_seconds()) + SECONDS_PER_DAY - today) % SECONDS_PER_DAY;
    Instant::from_secs(now) + Duration::from_secs(ahead)
}

/// Fire `on_alarm` whenever the armed time is reached.
#[embassy_executor::task]
pub async fn alarm_task(ctx: &'static PanelContext) {
    let mut hw = BoardHw::new();
    let mut armed: Option<TimeOfDay> = None;

    loop {
        let Some(at) = armed else {
            armed = ALARM.wait().await;
            continue;
        };

        match select(Timer::at(deadline(at)), ALARM.wait()).await {
            Either::First(()) => {
                debug!("RTC: alarm at {}", at);
                armed = None;
                // Re-arming arrives through ALARM.
                ctx.on_alarm(&mut hw);
            }
            Either::Second(next) => armed = next,
        }
    }
}
