//! End-to-end menu flows on a scripted bench: a fake clock, a button
//! pressed at fixed times and encoder turns fed through the shared
//! counter, rendered to the headless canvas.

use std::cell::{Cell, RefCell};

use embassy_futures::block_on;
use rotamenu_core::config::MenuConfig;
use rotamenu_core::input::SharedEncoder;
use rotamenu_core::menu::{ActionTable, MenuSet};
use rotamenu_core::ui::MenuSystem;
use rotamenu_display::Canvas;
use rotamenu_hal::{InputPin, Timebase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Menu {
    Main,
    Second,
}

impl MenuSet for Menu {
    const COUNT: usize = 2;

    fn index(self) -> usize {
        self as usize
    }

    fn title(self) -> &'static str {
        match self {
            Menu::Main => "Main Menu",
            Menu::Second => "Menu 2",
        }
    }

    fn items(self) -> &'static [&'static str] {
        match self {
            Menu::Main => &["list", "enter a value", "message", "MENU 2"],
            Menu::Second => &["Uptime", "menu off", "RETURN"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    EnterValue,
    Open(Menu),
    Off,
}

fn actions() -> ActionTable<Action, { Menu::COUNT }> {
    ActionTable::new()
        .with(Menu::Main, 1, Action::EnterValue)
        .with(Menu::Main, 3, Action::Open(Menu::Second))
        .with(Menu::Second, 1, Action::Off)
        .with(Menu::Second, 2, Action::Open(Menu::Main))
}

#[derive(Default)]
struct Bench {
    now: Cell<u64>,
    presses: RefCell<Vec<(u64, u64)>>,
    turns: RefCell<Vec<(u64, i32)>>,
    phase: Cell<(bool, bool)>,
}

impl Bench {
    fn now(&self) -> u64 {
        self.now.get()
    }

    fn press(&self, at_ms: u64, hold_ms: u64) {
        self.presses.borrow_mut().push((at_ms, hold_ms));
    }

    fn turn(&self, at_ms: u64, detents: i32) {
        self.turns.borrow_mut().push((at_ms, detents));
    }
}

struct Button<'b>(&'b Bench);

impl InputPin for Button<'_> {
    fn is_high(&self) -> bool {
        let now = self.0.now();
        !self
            .0
            .presses
            .borrow()
            .iter()
            .any(|&(at, hold)| now >= at && now < at + hold)
    }
}

struct Clock<'b> {
    bench: &'b Bench,
    encoder: &'b SharedEncoder,
}

impl Clock<'_> {
    fn advance(&mut self, ms: u64) {
        let now = self.bench.now() + ms;
        self.bench.now.set(now);

        let mut turns = self.bench.turns.borrow_mut();
        let due: Vec<_> = turns.iter().copied().filter(|&(at, _)| at <= now).collect();
        turns.retain(|&(at, _)| at > now);

        for (_, detents) in due {
            for _ in 0..detents.unsigned_abs() {
                // samples seen on phase A edges: 00/11 clockwise, 01/10 counter-clockwise
                let (a, _) = self.bench.phase.get();
                let a = !a;
                let b = if detents > 0 { a } else { !a };
                self.bench.phase.set((a, b));
                self.encoder.on_edge(a, b);
            }
        }
    }
}

impl Timebase for Clock<'_> {
    fn now_ms(&self) -> u64 {
        self.bench.now()
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms));
    }

    async fn yield_now(&mut self) {
        self.advance(1);
    }
}

type System<'b> = MenuSystem<'b, Menu, Button<'b>, Clock<'b>, Canvas>;

fn system<'b>(bench: &'b Bench, encoder: &'b SharedEncoder) -> System<'b> {
    MenuSystem::new(
        encoder,
        Button(bench),
        Clock { bench, encoder },
        Canvas::default(),
        MenuConfig::default(),
    )
}

/// Run the main loop until `until_ms`, returning every dispatched action
async fn run(system: &mut System<'_>, bench: &Bench, until_ms: u64) -> Vec<(Action, i32)> {
    let table = actions();
    let mut log = Vec::new();

    while bench.now() < until_ms {
        system.service().await;

        let Some((menu, item)) = system.take_click() else {
            continue;
        };
        let Some(action) = table.lookup(menu, item) else {
            continue;
        };

        match action {
            Action::EnterValue => {
                let value = system.enter_value("Testval", 15, 1, 0, 30).await;
                log.push((action, value));
            }
            Action::Open(next) => {
                system.show(next);
                log.push((action, 0));
            }
            Action::Off => {
                system.deactivate();
                log.push((action, 0));
            }
        }
    }
    log
}

#[test]
fn navigate_to_second_menu_and_switch_off() {
    let bench = Bench::default();
    let encoder = SharedEncoder::new();
    bench.turn(100, 3);
    bench.press(300, 100);
    bench.turn(1_000, 1);
    bench.press(1_500, 100);

    let mut system = system(&bench, &encoder);
    system.show(Menu::Main);

    let log = block_on(run(&mut system, &bench, 3_000));

    assert_eq!(
        log,
        [(Action::Open(Menu::Second), 0), (Action::Off, 0)]
    );
    assert!(!system.is_active());
    assert!(system.display().shown().is_blank());
}

#[test]
fn second_menu_renders_after_switch() {
    let bench = Bench::default();
    let encoder = SharedEncoder::new();
    bench.turn(100, 3);
    bench.press(300, 100);

    let mut system = system(&bench, &encoder);
    system.show(Menu::Main);

    block_on(run(&mut system, &bench, 600));

    let frame = system.display().shown();
    assert!(frame.contains("Menu 2"));
    assert!(frame.contains("RETURN"));
    assert!(!frame.contains("Main Menu"));
    assert_eq!(system.model().highlighted(), 0);
}

#[test]
fn value_entry_press_does_not_click_again() {
    let bench = Bench::default();
    let encoder = SharedEncoder::new();
    bench.turn(100, 1);
    bench.press(300, 100);
    // inside the prompt: three counter-clockwise steps, then press to accept
    bench.turn(600, -3);
    bench.press(1_000, 100);

    let mut system = system(&bench, &encoder);
    system.show(Menu::Main);

    let log = block_on(run(&mut system, &bench, 2_500));

    assert_eq!(log, [(Action::EnterValue, 18)]);
    assert!(system.is_active());
    assert_eq!(system.model().clicked(), None);
    assert!(!system.button_pressed());
}
