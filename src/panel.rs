//! The panel state machine.
//!
//! [`Panel`] owns the screen mode, the cycle catalog, the settings
//! overlay, the lock and the countdown. Every input (touch, timer tick,
//! RTC alarm, door switch) goes through one method that returns a
//! [`Step`]: the regions to repaint and the timer/actuator changes the
//! caller must apply. `Panel` itself never touches hardware, so it runs
//! unchanged on the host.
//!
//! ## Screens
//!
//! - **Menu**: Start runs the selected cycle, Mode selects the next one,
//!   Configure opens the settings screen.
//! - **ConfigEditing**: "+" hotspots step a setting; Back commits the
//!   overlay into the selected cycle.
//! - **CycleRunning**: the RTC alarm counts down; Cancel or expiry
//!   returns to the menu.
//! - **DoorOpenNotice**: blocking notice shown when a cycle cannot run
//!   because the door is open; left when the door closes or on Back.
//!
//! The lock button is hit-tested before anything else. While the lock is
//! engaged every other button is ignored, but a running countdown keeps
//! going.

use crate::catalog::{Catalog, Cycle};
use crate::config::{ANIMATION_TICK_HZ, LOCK_TICK_HZ};
use crate::flags::Redraw;
use crate::lock::{LockController, LockState, LockTransition};
use crate::settings::Overlay;
use crate::timers::{Animation, Countdown, CountdownTick};
use crate::touch::TouchEvent;
use crate::zones::{self, MenuZone, SettingsZone};

/// Screen mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiMode {
    Menu,
    ConfigEditing,
    CycleRunning,
    DoorOpenNotice,
}

/// What to do when the door opens during a running cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DoorOpenPolicy {
    /// Show the "DOOR OPEN" banner and keep counting down.
    Notice,
    /// Cancel the cycle and show the blocking door notice.
    ForceStop,
}

/// Runtime policy switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelPolicy {
    pub door_open_during_run: DoorOpenPolicy,
}

impl PanelPolicy {
    /// Policy selected by cargo features.
    pub const DEFAULT: Self = Self {
        door_open_during_run: if cfg!(feature = "force-stop-on-door-open") {
            DoorOpenPolicy::ForceStop
        } else {
            DoorOpenPolicy::Notice
        },
    };
}

impl Default for PanelPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Door switch edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DoorEvent {
    Opened,
    Closed,
}

/// Start or stop a periodic timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerCommand {
    Start { hz: u32 },
    Stop,
}

/// Change to the 1 Hz RTC alarm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmCommand {
    /// Arm the alarm one second after the current RTC time.
    ArmNextSecond,
    Disarm,
}

/// Hardware changes requested by a state transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Effects {
    pub alarm: Option<AlarmCommand>,
    pub animation_timer: Option<TimerCommand>,
    pub lock_timer: Option<TimerCommand>,
    /// `Some(true)` opens the door lock actuator, `Some(false)` closes it.
    pub lock_actuator: Option<bool>,
    /// `Some(true)` lights the door-open LED, `Some(false)` turns it off.
    pub door_indicator: Option<bool>,
}

impl Effects {
    pub const NONE: Self = Self {
        alarm: None,
        animation_timer: None,
        lock_timer: None,
        lock_actuator: None,
        door_indicator: None,
    };

    pub const fn is_empty(&self) -> bool {
        self.alarm.is_none()
            && self.animation_timer.is_none()
            && self.lock_timer.is_none()
            && self.lock_actuator.is_none()
            && self.door_indicator.is_none()
    }
}

/// Outcome of one input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub redraw: Redraw,
    pub effects: Effects,
}

impl Step {
    pub const NONE: Self = Self {
        redraw: Redraw::NONE,
        effects: Effects::NONE,
    };

    const fn redraw(redraw: Redraw) -> Self {
        Self {
            redraw,
            effects: Effects::NONE,
        }
    }
}

/// Copy of everything the renderer needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub mode: UiMode,
    pub cycle: Cycle,
    pub overlay: Overlay,
    pub lock: LockState,
    pub remaining_secs: u32,
    pub animation_frame: u8,
    pub door_open: bool,
}

/// Panel state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Panel {
    policy: PanelPolicy,
    mode: UiMode,
    catalog: Catalog,
    overlay: Overlay,
    lock: LockController,
    countdown: Countdown,
    animation: Animation,
    door_open: bool,
}

impl Panel {
    pub const fn new(policy: PanelPolicy) -> Self {
        Self {
            policy,
            mode: UiMode::Menu,
            catalog: Catalog::new(),
            overlay: Overlay::new(),
            lock: LockController::new(),
            countdown: Countdown::new(),
            animation: Animation::new(),
            door_open: false,
        }
    }

    pub const fn mode(&self) -> UiMode {
        self.mode
    }

    pub const fn policy(&self) -> PanelPolicy {
        self.policy
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub const fn lock_state(&self) -> LockState {
        self.lock.state()
    }

    pub const fn lock(&self) -> &LockController {
        &self.lock
    }

    pub const fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub const fn animation_frame(&self) -> u8 {
        self.animation.frame()
    }

    pub const fn door_open(&self) -> bool {
        self.door_open
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode,
            cycle: *self.catalog.current(),
            overlay: self.overlay,
            lock: self.lock.state(),
            remaining_secs: self.countdown.remaining(),
            animation_frame: self.animation.frame(),
            door_open: self.door_open,
        }
    }

    /// Paint everything for the boot screen.
    pub const fn boot_redraw() -> Redraw {
        Redraw::MENU
    }

    // Touch

    /// Handle one press or release in screen coordinates.
    pub fn on_touch(&mut self, event: TouchEvent) -> Step {
        let in_lock = zones::hit_lock(event.x, event.y);

        if !event.pressed {
            // Releases only ever end a lock hold.
            let transition = self.lock.release(in_lock);
            return self.lock_step(transition);
        }

        if in_lock {
            let transition = self.lock.press();
            return self.lock_step(transition);
        }

        if self.lock.is_locked() {
            debug!("Panel: locked, press at ({}, {}) ignored", event.x, event.y);
            return Step::NONE;
        }

        match self.mode {
            UiMode::Menu => self.menu_press(event),
            UiMode::ConfigEditing => self.settings_press(event),
            UiMode::CycleRunning => {
                if zones::hit_bottom(event.x, event.y) {
                    info!("Panel: cycle cancelled");
                    self.stop_run(UiMode::Menu)
                } else {
                    Step::NONE
                }
            }
            UiMode::DoorOpenNotice => {
                if zones::hit_bottom(event.x, event.y) {
                    self.set_mode(UiMode::Menu);
                    Step::redraw(Redraw::MENU)
                } else {
                    Step::NONE
                }
            }
        }
    }

    fn menu_press(&mut self, event: TouchEvent) -> Step {
        match zones::hit_menu(event.x, event.y) {
            Some(MenuZone::Start) => {
                if self.door_open {
                    info!("Panel: start refused, door open");
                    self.set_mode(UiMode::DoorOpenNotice);
                    Step::redraw(Redraw::DOOR_NOTICE)
                } else {
                    self.start_run()
                }
            }
            Some(MenuZone::Mode) => {
                let cycle = self.catalog.advance();
                info!("Panel: selected {}", cycle.name);
                Step::redraw(Redraw::SUMMARY)
            }
            Some(MenuZone::Config) => {
                self.set_mode(UiMode::ConfigEditing);
                Step::redraw(Redraw::SETTINGS)
            }
            None => Step::NONE,
        }
    }

    fn settings_press(&mut self, event: TouchEvent) -> Step {
        match zones::hit_settings(event.x, event.y) {
            Some(SettingsZone::Advance(setting)) => {
                self.overlay.advance(setting);
                debug!("Panel: {} -> {}", setting, self.overlay.value(setting));
                Step::redraw(Redraw::SETTINGS)
            }
            Some(SettingsZone::Back) => {
                self.overlay.commit(self.catalog.current_mut());
                info!("Panel: settings committed to {}", self.catalog.current().name);
                self.set_mode(UiMode::Menu);
                Step::redraw(Redraw::MENU)
            }
            None => Step::NONE,
        }
    }

    fn lock_step(&mut self, transition: LockTransition) -> Step {
        if transition != LockTransition::None {
            info!("Lock: {} -> {}", transition, self.lock.state());
        }
        let mut step = Step::NONE;
        match transition {
            LockTransition::None | LockTransition::HoldProgress(_) => {}
            LockTransition::Engaged => {
                step.redraw = Redraw::LOCK_ICON;
                step.effects.lock_actuator = Some(false);
            }
            LockTransition::HoldStarted => {
                step.redraw = Redraw::LOCK_ICON;
                step.effects.lock_timer = Some(TimerCommand::Start { hz: LOCK_TICK_HZ });
            }
            LockTransition::HoldAborted => {
                step.redraw = Redraw::LOCK_ICON;
                step.effects.lock_timer = Some(TimerCommand::Stop);
            }
            LockTransition::ReadyToRelease => {
                step.redraw = Redraw::LOCK_ICON;
                step.effects.lock_timer = Some(TimerCommand::Stop);
            }
            LockTransition::Released => {
                step.redraw = Redraw::LOCK_ICON;
                step.effects.lock_timer = Some(TimerCommand::Stop);
                step.effects.lock_actuator = Some(true);
            }
        }
        step
    }

    // Run control

    fn start_run(&mut self) -> Step {
        let total = self.catalog.current().total_seconds();
        info!("Panel: running {} for {} s", self.catalog.current().name, total);
        self.countdown.start(total);
        self.animation.reset();
        self.set_mode(UiMode::CycleRunning);
        Step {
            redraw: Redraw::RUNNING,
            effects: Effects {
                alarm: Some(AlarmCommand::ArmNextSecond),
                animation_timer: Some(TimerCommand::Start {
                    hz: ANIMATION_TICK_HZ,
                }),
                ..Effects::NONE
            },
        }
    }

    fn stop_run(&mut self, next: UiMode) -> Step {
        self.countdown.clear();
        self.animation.reset();
        self.set_mode(next);
        Step {
            redraw: match next {
                UiMode::DoorOpenNotice => Redraw::DOOR_NOTICE,
                _ => Redraw::MENU,
            },
            effects: Effects {
                alarm: Some(AlarmCommand::Disarm),
                animation_timer: Some(TimerCommand::Stop),
                ..Effects::NONE
            },
        }
    }

    fn set_mode(&mut self, mode: UiMode) {
        if self.mode != mode {
            info!("Panel: {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    // Timers

    /// One RTC alarm tick (1 Hz while a cycle runs).
    pub fn on_alarm(&mut self) -> Step {
        if self.mode != UiMode::CycleRunning {
            return Step {
                redraw: Redraw::NONE,
                effects: Effects {
                    alarm: Some(AlarmCommand::Disarm),
                    ..Effects::NONE
                },
            };
        }

        match self.countdown.tick() {
            CountdownTick::Remaining(_) => Step {
                redraw: Redraw::COUNTDOWN,
                effects: Effects {
                    alarm: Some(AlarmCommand::ArmNextSecond),
                    ..Effects::NONE
                },
            },
            CountdownTick::Expired | CountdownTick::Idle => {
                info!("Panel: cycle finished");
                self.stop_run(UiMode::Menu)
            }
        }
    }

    /// One tick of the 1 Hz lock hold timer.
    pub fn on_lock_tick(&mut self) -> Step {
        let transition = self.lock.tick();
        self.lock_step(transition)
    }

    /// One tick of the animation timer.
    pub fn on_animation_tick(&mut self) -> Step {
        if self.mode != UiMode::CycleRunning {
            return Step::NONE;
        }
        self.animation.advance();
        Step::redraw(Redraw::ANIMATION)
    }

    // Door

    /// Door switch edge.
    pub fn on_door(&mut self, event: DoorEvent) -> Step {
        let open = event == DoorEvent::Opened;
        if self.door_open == open {
            return Step::NONE;
        }
        self.door_open = open;

        let mut step = if open {
            self.door_opened()
        } else {
            self.door_closed()
        };
        step.effects.door_indicator = Some(open);
        step
    }

    fn door_opened(&mut self) -> Step {
        info!("Door: opened in {}", self.mode);
        if self.mode != UiMode::CycleRunning {
            return Step::NONE;
        }
        match self.policy.door_open_during_run {
            DoorOpenPolicy::Notice => Step::redraw(Redraw::DOOR_BANNER),
            DoorOpenPolicy::ForceStop => {
                warn!("Panel: door opened while running, cycle stopped");
                self.stop_run(UiMode::DoorOpenNotice)
            }
        }
    }

    fn door_closed(&mut self) -> Step {
        info!("Door: closed");
        match self.mode {
            UiMode::DoorOpenNotice => {
                self.set_mode(UiMode::Menu);
                Step::redraw(Redraw::MENU)
            }
            // Repaint to clear the banner.
            UiMode::CycleRunning => Step::redraw(Redraw::RUNNING),
            UiMode::Menu | UiMode::ConfigEditing => Step::NONE,
        }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new(PanelPolicy::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Setting;

    const START: (u16, u16) = (160, 288);
    const MODE: (u16, u16) = (160, 368);
    const BOTTOM: (u16, u16) = (160, 438);
    const LOCK: (u16, u16) = (40, 438);
    const RINSE_TIME_PLUS: (u16, u16) = (280, 118);

    fn press(panel: &mut Panel, (x, y): (u16, u16)) -> Step {
        panel.on_touch(TouchEvent { x, y, pressed: true })
    }

    fn release(panel: &mut Panel, (x, y): (u16, u16)) -> Step {
        panel.on_touch(TouchEvent {
            x,
            y,
            pressed: false,
        })
    }

    fn tap(panel: &mut Panel, at: (u16, u16)) -> Step {
        let step = press(panel, at);
        release(panel, at);
        step
    }

    fn notice_policy() -> PanelPolicy {
        PanelPolicy {
            door_open_during_run: DoorOpenPolicy::Notice,
        }
    }

    fn force_stop_policy() -> PanelPolicy {
        PanelPolicy {
            door_open_during_run: DoorOpenPolicy::ForceStop,
        }
    }

    #[test]
    fn boots_into_menu_unlocked() {
        let panel = Panel::default();
        assert_eq!(panel.mode(), UiMode::Menu);
        assert_eq!(panel.lock_state(), LockState::Unlocked);
        assert_eq!(panel.catalog().current().name, "Daily");
    }

    #[test]
    fn mode_button_cycles_through_catalog() {
        let mut panel = Panel::default();
        let step = tap(&mut panel, MODE);
        assert_eq!(step.redraw, Redraw::SUMMARY);
        assert_eq!(panel.catalog().current().name, "Heavy");
        for _ in 0..5 {
            tap(&mut panel, MODE);
        }
        assert_eq!(panel.catalog().current().name, "Daily");
        assert_eq!(panel.mode(), UiMode::Menu);
    }

    #[test]
    fn start_arms_countdown_and_timers() {
        let mut panel = Panel::default();
        let step = tap(&mut panel, START);
        assert_eq!(panel.mode(), UiMode::CycleRunning);
        assert_eq!(panel.countdown().remaining(), 2280);
        assert_eq!(step.redraw, Redraw::RUNNING);
        assert_eq!(step.effects.alarm, Some(AlarmCommand::ArmNextSecond));
        assert_eq!(
            step.effects.animation_timer,
            Some(TimerCommand::Start { hz: 10 })
        );
    }

    #[test]
    fn alarm_ticks_count_down_then_return_to_menu() {
        let mut panel = Panel::default();
        tap(&mut panel, START);
        for _ in 0..2280 {
            let step = panel.on_alarm();
            assert_eq!(step.redraw, Redraw::COUNTDOWN);
            assert_eq!(step.effects.alarm, Some(AlarmCommand::ArmNextSecond));
        }
        assert_eq!(panel.countdown().remaining(), 0);
        assert_eq!(panel.mode(), UiMode::CycleRunning);

        let step = panel.on_alarm();
        assert_eq!(panel.mode(), UiMode::Menu);
        assert_eq!(step.redraw, Redraw::MENU);
        assert_eq!(step.effects.alarm, Some(AlarmCommand::Disarm));
        assert_eq!(step.effects.animation_timer, Some(TimerCommand::Stop));
    }

    #[test]
    fn alarm_outside_run_disarms() {
        let mut panel = Panel::default();
        let step = panel.on_alarm();
        assert_eq!(step.effects.alarm, Some(AlarmCommand::Disarm));
        assert!(step.redraw.is_empty());
    }

    #[test]
    fn cancel_discards_countdown() {
        let mut panel = Panel::default();
        tap(&mut panel, START);
        panel.on_alarm();
        let step = tap(&mut panel, BOTTOM);
        assert_eq!(panel.mode(), UiMode::Menu);
        assert!(!panel.countdown().is_running());
        assert_eq!(step.effects.alarm, Some(AlarmCommand::Disarm));

        // A restart begins from the full total again.
        tap(&mut panel, START);
        assert_eq!(panel.countdown().remaining(), 2280);
    }

    #[test]
    fn settings_scenario_commits_rinse_time() {
        let mut panel = Panel::default();
        assert_eq!(tap(&mut panel, BOTTOM).redraw, Redraw::SETTINGS);
        assert_eq!(panel.mode(), UiMode::ConfigEditing);

        tap(&mut panel, RINSE_TIME_PLUS);
        assert_eq!(panel.overlay().rinse_duration(), 15);
        tap(&mut panel, RINSE_TIME_PLUS);
        assert_eq!(panel.overlay().rinse_duration(), 30);
        assert_eq!(
            panel.catalog().current().rinse_duration,
            15,
            "not committed per keystroke"
        );

        assert_eq!(tap(&mut panel, BOTTOM).redraw, Redraw::MENU);
        assert_eq!(panel.mode(), UiMode::Menu);
        assert_eq!(panel.catalog().current().rinse_duration, 30);
        assert_eq!(panel.catalog().current().name, "Daily");
    }

    #[test]
    fn every_settings_hotspot_advances_its_setting() {
        let mut panel = Panel::default();
        tap(&mut panel, BOTTOM);
        for setting in Setting::ALL {
            let r = zones::settings_hotspot(setting);
            let before = panel.overlay().index(setting);
            tap(&mut panel, (r.x0 + 5, r.y0 + 5));
            assert_ne!(panel.overlay().index(setting), before, "{:?}", setting);
        }
    }

    #[test]
    fn release_events_never_press_buttons() {
        let mut panel = Panel::default();
        let step = release(&mut panel, START);
        assert_eq!(step, Step::NONE);
        assert_eq!(panel.mode(), UiMode::Menu);
    }

    #[test]
    fn lock_blocks_other_buttons() {
        let mut panel = Panel::default();
        let step = tap(&mut panel, LOCK);
        assert_eq!(step.effects.lock_actuator, Some(false));
        assert_eq!(panel.lock_state(), LockState::LockedIdle);

        assert_eq!(tap(&mut panel, START), Step::NONE);
        assert_eq!(panel.mode(), UiMode::Menu);
    }

    #[test]
    fn hold_to_unlock() {
        let mut panel = Panel::default();
        tap(&mut panel, LOCK);

        let step = press(&mut panel, LOCK);
        assert_eq!(panel.lock_state(), LockState::LockedPressing);
        assert_eq!(step.effects.lock_timer, Some(TimerCommand::Start { hz: 1 }));

        assert_eq!(panel.on_lock_tick().redraw, Redraw::NONE);
        assert_eq!(panel.on_lock_tick().redraw, Redraw::NONE);
        let step = panel.on_lock_tick();
        assert_eq!(step.redraw, Redraw::LOCK_ICON);
        assert_eq!(panel.lock_state(), LockState::ReadyToRelease);

        let step = release(&mut panel, LOCK);
        assert_eq!(panel.lock_state(), LockState::Unlocked);
        assert_eq!(step.effects.lock_actuator, Some(true));
        assert_eq!(step.effects.lock_timer, Some(TimerCommand::Stop));
    }

    #[test]
    fn short_hold_keeps_lock() {
        let mut panel = Panel::default();
        tap(&mut panel, LOCK);
        press(&mut panel, LOCK);
        panel.on_lock_tick();
        panel.on_lock_tick();
        let step = release(&mut panel, LOCK);
        assert_eq!(panel.lock_state(), LockState::LockedIdle);
        assert_eq!(panel.lock().held_secs(), 0);
        assert_eq!(step.effects.lock_timer, Some(TimerCommand::Stop));
    }

    #[test]
    fn lock_does_not_pause_countdown() {
        let mut panel = Panel::default();
        tap(&mut panel, START);
        tap(&mut panel, LOCK);
        press(&mut panel, LOCK);
        panel.on_lock_tick();
        panel.on_alarm();
        panel.on_alarm();
        assert_eq!(panel.countdown().remaining(), 2278);
        assert_eq!(tap(&mut panel, BOTTOM), Step::NONE, "cancel blocked while locked");
        assert_eq!(panel.mode(), UiMode::CycleRunning);
    }

    #[test]
    fn animation_runs_only_while_cycle_runs() {
        let mut panel = Panel::default();
        assert_eq!(panel.on_animation_tick(), Step::NONE);
        tap(&mut panel, START);
        assert_eq!(panel.on_animation_tick().redraw, Redraw::ANIMATION);
        assert_eq!(panel.animation_frame(), 1);
    }

    #[test]
    fn start_with_door_open_shows_notice() {
        let mut panel = Panel::default();
        panel.on_door(DoorEvent::Opened);
        let step = tap(&mut panel, START);
        assert_eq!(panel.mode(), UiMode::DoorOpenNotice);
        assert_eq!(step.redraw, Redraw::DOOR_NOTICE);
        assert!(!panel.countdown().is_running());

        let step = panel.on_door(DoorEvent::Closed);
        assert_eq!(panel.mode(), UiMode::Menu);
        assert_eq!(step.redraw, Redraw::MENU);
    }

    #[test]
    fn door_notice_dismissed_with_back() {
        let mut panel = Panel::default();
        panel.on_door(DoorEvent::Opened);
        tap(&mut panel, START);
        tap(&mut panel, BOTTOM);
        assert_eq!(panel.mode(), UiMode::Menu);
        assert!(panel.door_open());
    }

    #[test]
    fn door_open_during_run_notice_policy_keeps_running() {
        let mut panel = Panel::new(notice_policy());
        tap(&mut panel, START);
        let step = panel.on_door(DoorEvent::Opened);
        assert_eq!(step.redraw, Redraw::DOOR_BANNER);
        assert_eq!(panel.mode(), UiMode::CycleRunning);
        assert!(panel.countdown().is_running());

        let step = panel.on_door(DoorEvent::Closed);
        assert_eq!(step.redraw, Redraw::RUNNING);
    }

    #[test]
    fn door_open_during_run_force_stop_policy_cancels() {
        let mut panel = Panel::new(force_stop_policy());
        tap(&mut panel, START);
        let step = panel.on_door(DoorEvent::Opened);
        assert_eq!(panel.mode(), UiMode::DoorOpenNotice);
        assert_eq!(step.redraw, Redraw::DOOR_NOTICE);
        assert_eq!(step.effects.alarm, Some(AlarmCommand::Disarm));
        assert!(!panel.countdown().is_running());
    }

    #[test]
    fn door_led_follows_door_edges() {
        let mut panel = Panel::new(force_stop_policy());
        assert_eq!(panel.on_door(DoorEvent::Opened).effects.door_indicator, Some(true));
        assert_eq!(panel.on_door(DoorEvent::Closed).effects.door_indicator, Some(false));

        tap(&mut panel, START);
        let step = panel.on_door(DoorEvent::Opened);
        assert_eq!(step.effects.door_indicator, Some(true));
        assert_eq!(step.effects.alarm, Some(AlarmCommand::Disarm));
    }

    #[test]
    fn repeated_door_edges_are_ignored() {
        let mut panel = Panel::default();
        panel.on_door(DoorEvent::Opened);
        assert_eq!(panel.on_door(DoorEvent::Opened), Step::NONE);
        panel.on_door(DoorEvent::Closed);
        assert_eq!(panel.on_door(DoorEvent::Closed), Step::NONE);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut panel = Panel::default();
        tap(&mut panel, START);
        panel.on_alarm();
        let snap = panel.snapshot();
        assert_eq!(snap.mode, UiMode::CycleRunning);
        assert_eq!(snap.remaining_secs, 2279);
        assert_eq!(snap.cycle.name, "Daily");
        assert_eq!(snap.lock, LockState::Unlocked);
    }
}
