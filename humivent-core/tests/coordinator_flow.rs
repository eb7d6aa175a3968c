//! End-to-end display coordinator scenarios driven through the public API

use std::cell::Cell;

use humivent_core::traits::{
    ButtonEdges, ButtonSource, Clock, FanControl, Reading, SegmentDisplay, SensorSource,
};
use humivent_core::ui::{
    DisplayCoordinator, DisplayMode, BRIGHTNESS_STEP_MS, DIM_TIMEOUT_MS, FAN_MODE_TIMEOUT_MS,
    MAX_BRIGHTNESS, OFF_TIMEOUT_MS,
};
use proptest::prelude::*;

#[derive(Default)]
struct RecordingDisplay {
    level: u8,
    on: bool,
    text: String,
    queued: Option<String>,
}

impl SegmentDisplay for RecordingDisplay {
    fn set_brightness(&mut self, level: u8, on: bool) {
        self.level = level;
        self.on = on;
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.into();
        self.queued = None;
    }

    fn set_next_text(&mut self, text: &str) {
        self.queued = Some(text.into());
    }
}

/// Button replaying a script of (time, edges) entries
struct ScriptedButton {
    script: Vec<(u64, ButtonEdges)>,
}

impl ButtonSource for ScriptedButton {
    fn poll(&mut self, now_ms: u64) -> ButtonEdges {
        match self.script.first() {
            Some(&(at, edges)) if at <= now_ms => {
                self.script.remove(0);
                edges
            }
            _ => ButtonEdges::NONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Auto,
    On,
    Off,
}

struct Fan {
    mode: Mode,
}

impl FanControl for Fan {
    type Mode = Mode;

    fn mode(&self) -> Mode {
        self.mode
    }

    fn mode_label(&self) -> &str {
        match self.mode {
            Mode::Auto => "AUto",
            Mode::On => "On",
            Mode::Off => "OFF",
        }
    }

    fn cycle_modes(&mut self) {
        self.mode = match self.mode {
            Mode::Auto => Mode::On,
            Mode::On => Mode::Off,
            Mode::Off => Mode::Auto,
        };
    }
}

struct Sensors;

impl SensorSource for Sensors {
    fn inside(&self) -> Reading {
        Reading::new(71.4, 23.9, 1002.2)
    }

    fn outside(&self) -> Reading {
        Reading::new(58.0, 11.0, 998.6)
    }
}

struct TestClock {
    now: Cell<u64>,
}

impl TestClock {
    fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for TestClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

type Ui = DisplayCoordinator<RecordingDisplay, ScriptedButton, Mode>;

fn setup(script: &[(u64, ButtonEdges)]) -> (Ui, Fan, TestClock) {
    let fan = Fan { mode: Mode::Auto };
    let button = ScriptedButton {
        script: script.to_vec(),
    };
    let ui = DisplayCoordinator::new(RecordingDisplay::default(), button, &fan, 0);
    let clock = TestClock { now: Cell::new(0) };
    (ui, fan, clock)
}

/// Tick every 10 ms until `until_ms`
fn run(ui: &mut Ui, fan: &mut Fan, clock: &TestClock, until_ms: u64) {
    while clock.now_ms() < until_ms {
        clock.advance(10);
        ui.tick(clock, fan, &Sensors);
    }
}

#[test]
fn seven_clicks_close_the_ring() {
    let script: Vec<_> = (1..=7).map(|i| (i * 100, ButtonEdges::click())).collect();
    let (mut ui, mut fan, clock) = setup(&script);

    let expected = [
        (100, DisplayMode::HumidityInside, "Hin 71 PErc"),
        (200, DisplayMode::HumidityOutside, "Hout  58 PErc"),
        (300, DisplayMode::TemperatureInside, "tin 23 *C"),
        (400, DisplayMode::TemperatureOutside, "tout  11 *C"),
        (500, DisplayMode::PressureInside, "Pin 1002 hPA"),
        (600, DisplayMode::PressureOutside, "Pout  998 hPA"),
        (700, DisplayMode::HumidityInside, "Hin 71 PErc"),
    ];

    for (at, mode, text) in expected {
        run(&mut ui, &mut fan, &clock, at);
        assert_eq!(ui.mode(), mode);
        assert_eq!(ui.display().text, text);
    }
}

#[test]
fn long_press_shows_fan_mode_then_reverts() {
    let (mut ui, mut fan, clock) = setup(&[
        (100, ButtonEdges::click()),
        (200, ButtonEdges::click()),
        (1_000, ButtonEdges::long_click()),
    ]);

    run(&mut ui, &mut fan, &clock, 1_000);
    assert_eq!(fan.mode, Mode::On);
    assert_eq!(ui.mode(), DisplayMode::FanMode);
    assert_eq!(ui.last_mode(), DisplayMode::HumidityOutside);
    assert_eq!(ui.display().text, "On");

    run(&mut ui, &mut fan, &clock, 1_000 + FAN_MODE_TIMEOUT_MS - 10);
    assert_eq!(ui.mode(), DisplayMode::FanMode);

    run(&mut ui, &mut fan, &clock, 1_000 + FAN_MODE_TIMEOUT_MS);
    assert_eq!(ui.mode(), DisplayMode::HumidityOutside);
    assert_eq!(ui.display().queued.as_deref(), Some("Hout  58 PErc"));
}

#[test]
fn external_fan_change_interrupts_idle() {
    let (mut ui, mut fan, clock) = setup(&[]);

    run(&mut ui, &mut fan, &clock, 2_000);
    fan.mode = Mode::Off;
    run(&mut ui, &mut fan, &clock, 2_010);

    assert_eq!(ui.mode(), DisplayMode::FanMode);
    assert_eq!(ui.display().text, "OFF");

    run(&mut ui, &mut fan, &clock, 2_010 + FAN_MODE_TIMEOUT_MS);
    assert_eq!(ui.mode(), DisplayMode::IDLE);
}

#[test]
fn backlight_dims_switches_off_and_wakes() {
    let (mut ui, mut fan, clock) = setup(&[(OFF_TIMEOUT_MS + 5_000, ButtonEdges::click())]);

    run(&mut ui, &mut fan, &clock, DIM_TIMEOUT_MS);
    assert_eq!(ui.brightness(), MAX_BRIGHTNESS);

    // Seven cadence steps take the display to level 0
    run(&mut ui, &mut fan, &clock, DIM_TIMEOUT_MS + 8 * (BRIGHTNESS_STEP_MS + 10));
    assert_eq!(ui.brightness(), 0);
    assert!(ui.is_display_on());

    run(&mut ui, &mut fan, &clock, OFF_TIMEOUT_MS + 1_000);
    assert!(!ui.is_display_on());
    assert!(!ui.display().on);

    // Click wakes the display at full brightness on the next step
    run(&mut ui, &mut fan, &clock, OFF_TIMEOUT_MS + 5_000 + BRIGHTNESS_STEP_MS + 20);
    assert!(ui.is_display_on());
    assert_eq!(ui.brightness(), MAX_BRIGHTNESS);
    assert_eq!(ui.display().level, MAX_BRIGHTNESS);
    assert_eq!(ui.mode(), DisplayMode::HumidityInside);
}

#[test]
fn fan_mode_holds_backlight() {
    let (mut ui, mut fan, clock) = setup(&[]);

    run(&mut ui, &mut fan, &clock, DIM_TIMEOUT_MS - 1_000);
    fan.cycle_modes();
    run(&mut ui, &mut fan, &clock, DIM_TIMEOUT_MS + 5_000);

    // Inactive past the dim timeout, but the fan mode is on screen
    assert_eq!(ui.mode(), DisplayMode::FanMode);
    assert_eq!(ui.brightness(), MAX_BRIGHTNESS);
}

/// What happens on one step of a simulated session
#[derive(Debug, Clone, Copy)]
enum Action {
    Nothing,
    Click,
    LongClick,
    FanChange,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        6 => Just(Action::Nothing),
        1 => Just(Action::Click),
        1 => Just(Action::LongClick),
        1 => Just(Action::FanChange),
    ]
}

proptest! {
    #[test]
    fn display_wakes_only_after_activity(
        steps in prop::collection::vec((1u64..60_000, action()), 1..300)
    ) {
        // Button edges land on the tick they are scheduled for
        let mut now = 0;
        let mut script = Vec::new();
        let mut times = Vec::new();
        for &(advance, action) in &steps {
            now += advance;
            times.push(now);
            match action {
                Action::Click => script.push((now, ButtonEdges::click())),
                Action::LongClick => script.push((now, ButtonEdges::long_click())),
                _ => {}
            }
        }

        let (mut ui, mut fan, clock) = setup(&script);
        let mut activity_while_off = false;

        for (&(_, action), &at) in steps.iter().zip(&times) {
            if let Action::FanChange = action {
                fan.cycle_modes();
            }
            let was_on = ui.is_display_on();

            clock.advance(at - clock.now_ms());
            ui.tick(&clock, &mut fan, &Sensors);

            let is_on = ui.is_display_on();
            prop_assert!(ui.brightness() <= MAX_BRIGHTNESS);
            prop_assert_eq!(is_on, ui.display().on);

            if !was_on && is_on {
                prop_assert!(activity_while_off, "display woke at {} ms without activity", at);
            }

            if !is_on {
                prop_assert_eq!(ui.brightness(), 0);
                if was_on {
                    activity_while_off = false;
                }
                // Button and fan stages run after the backlight step
                if !matches!(action, Action::Nothing) {
                    activity_while_off = true;
                }
            }
        }
    }
}
