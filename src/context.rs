//! Shared panel context for interrupt-side handlers and the render loop.
//!
//! Every handler takes the critical section once, runs one [`Panel`]
//! transition, raises the resulting redraw flags and then applies the
//! hardware effects outside the critical section. The render loop is the
//! only consumer of the flags and the only owner of the display.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::flags::{DirtyFlags, Redraw};
use crate::lock::LockActuator;
use crate::panel::{AlarmCommand, DoorEvent, Effects, Panel, PanelPolicy, Snapshot, Step, TimerCommand};
use crate::render::{self, PanelDisplay};
use crate::timers::{PeriodicTimer, RealTimeClock};
use crate::touch::{self, DiagnosticSink, TouchSource};

/// Which periodic timer an effect targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerId {
    /// 10 Hz drum animation.
    Animation,
    /// 1 Hz lock hold counter.
    LockHold,
}

/// LED that is lit while the door is open.
pub trait DoorIndicator {
    fn set_lit(&mut self, lit: bool);
}

/// The outputs a state transition can drive.
pub trait Hardware {
    type Rtc: RealTimeClock;
    type Timer: PeriodicTimer;
    type Actuator: LockActuator;
    type Indicator: DoorIndicator;

    fn rtc(&mut self) -> &mut Self::Rtc;
    fn timer(&mut self, id: TimerId) -> &mut Self::Timer;
    fn lock_actuator(&mut self) -> &mut Self::Actuator;
    fn door_indicator(&mut self) -> &mut Self::Indicator;
}

/// Apply the hardware side of a transition.
pub fn apply_effects<H: Hardware>(effects: Effects, hw: &mut H) {
    if effects.is_empty() {
        return;
    }

    match effects.alarm {
        Some(AlarmCommand::ArmNextSecond) => {
            let rtc = hw.rtc();
            let at = rtc.now().next_second();
            rtc.arm_alarm(at);
        }
        Some(AlarmCommand::Disarm) => hw.rtc().disarm_alarm(),
        None => {}
    }

    for (id, command) in [
        (TimerId::Animation, effects.animation_timer),
        (TimerId::LockHold, effects.lock_timer),
    ] {
        match command {
            Some(TimerCommand::Start { hz }) => {
                debug!("Timer: {} start at {} Hz", id, hz);
                hw.timer(id).start(hz);
            }
            Some(TimerCommand::Stop) => {
                debug!("Timer: {} stop", id);
                hw.timer(id).stop();
            }
            None => {}
        }
    }

    if let Some(open) = effects.lock_actuator {
        info!("Actuator: door {}", if open { "released" } else { "held" });
        hw.lock_actuator().set_open(open);
    }

    if let Some(lit) = effects.door_indicator {
        hw.door_indicator().set_lit(lit);
    }
}

/// Panel state plus the pending redraws.
pub struct PanelContext {
    panel: Mutex<RefCell<Panel>>,
    dirty: DirtyFlags,
}

impl PanelContext {
    pub const fn new(policy: PanelPolicy) -> Self {
        Self {
            panel: Mutex::new(RefCell::new(Panel::new(policy))),
            dirty: DirtyFlags::new(),
        }
    }

    /// Queue the boot screen.
    pub fn boot(&self) {
        self.dirty.raise(Panel::boot_redraw());
    }

    pub fn dirty(&self) -> &DirtyFlags {
        &self.dirty
    }

    /// Run `f` against the panel inside a critical section.
    pub fn with_panel<R>(&self, f: impl FnOnce(&Panel) -> R) -> R {
        critical_section::with(|cs| f(&self.panel.borrow_ref(cs)))
    }

    pub fn snapshot(&self) -> Snapshot {
        self.with_panel(Panel::snapshot)
    }

    fn step(&self, f: impl FnOnce(&mut Panel) -> Step) -> Effects {
        let step = critical_section::with(|cs| f(&mut self.panel.borrow_ref_mut(cs)));
        self.dirty.raise(step.redraw);
        step.effects
    }

    /// Touch controller "message pending" handler.
    ///
    /// Drains up to three messages and feeds each press/release through
    /// the state machine. Returns the number of messages consumed.
    pub fn on_touch_batch<S, D, H>(&self, source: &mut S, diagnostics: &mut D, hw: &mut H) -> usize
    where
        S: TouchSource,
        D: DiagnosticSink,
        H: Hardware,
    {
        touch::drain(source, diagnostics, |event| {
            let effects = self.step(|panel| panel.on_touch(event));
            apply_effects(effects, hw);
        })
    }

    /// 1 Hz lock hold timer handler.
    pub fn on_lock_tick<H: Hardware>(&self, hw: &mut H) {
        let effects = self.step(Panel::on_lock_tick);
        apply_effects(effects, hw);
    }

    /// Animation timer handler.
    pub fn on_anim_tick<H: Hardware>(&self, hw: &mut H) {
        let effects = self.step(Panel::on_animation_tick);
        apply_effects(effects, hw);
    }

    /// RTC alarm handler.
    pub fn on_alarm<H: Hardware>(&self, hw: &mut H) {
        let effects = self.step(Panel::on_alarm);
        apply_effects(effects, hw);
    }

    /// Door switch edge handler.
    pub fn on_door<H: Hardware>(&self, event: DoorEvent, hw: &mut H) {
        let effects = self.step(|panel| panel.on_door(event));
        apply_effects(effects, hw);
    }

    /// Take every pending flag and draw it.
    ///
    /// The snapshot is copied under the critical section; drawing runs
    /// with interrupts enabled. On a display error the flags are already
    /// consumed and the next state change repaints.
    pub fn render<D: PanelDisplay>(&self, display: &mut D) -> Result<Redraw, D::Error> {
        let redraw = self.dirty.take_all();
        if redraw.is_empty() {
            return Ok(Redraw::NONE);
        }
        let snap = self.snapshot();
        render::render(redraw, &snap, display)
    }
}

impl Default for PanelContext {
    fn default() -> Self {
        Self::new(PanelPolicy::DEFAULT)
    }
}
