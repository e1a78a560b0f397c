//! Rotamenu - rotary encoder menu demo
//!
//! ESP32 firmware driving an SSD1306 OLED with a rotary encoder and its
//! push button. The encoder is decoded in the GPIO interrupt; the menu
//! and every prompt run cooperatively in the main task next to a
//! heartbeat task.

#![no_std]
#![no_main]

mod menus;
mod oled;
mod pins;

use core::fmt::Write as _;

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Ticker, Timer};
use esp_backtrace as _;
use esp_hal::gpio::{Event, Input, InputConfig, Io, Pull};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::Blocking;
use esp_println as _;
use heapless::String;

use rotamenu_core::config::{parse_config, Config};
use rotamenu_core::ui::MenuSystem;
use rotamenu_display::{DisplayError, RenderSink, TextColor};
use rotamenu_hal::EmbassyTimebase;

use crate::menus::{actions, Action, Menu, LIST_ITEMS};
use crate::oled::OledSink;
use crate::pins::{ButtonPin, ENCODER};

esp_bootloader_esp_idf::esp_app_desc!();

/// Embedded configuration, validated by build.rs
/// Edit menu.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../menu.toml");

const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Heartbeat interval
const HEARTBEAT_MS: u64 = 10_000;

/// How long the boot splash stays up
const SPLASH_MS: u64 = 2_000;

/// Time the message screen waits for a key
const MESSAGE_TIMEOUT_MS: u32 = 20_000;

/// Time the uptime screen waits for a key
const UPTIME_TIMEOUT_MS: u32 = 8_000;

type Display = OledSink<I2c<'static, Blocking>>;
type System = MenuSystem<'static, Menu, ButtonPin, EmbassyTimebase, Display>;

#[esp_rtos::main]
async fn main(spawner: Spawner) {
    let peripherals = esp_hal::init(esp_hal::Config::default());

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Rotamenu {} starting...", VERSION);

    let config = load_config();

    // Encoder phases (GPIO13/14), A interrupts on every edge
    let mut phase_a = Input::new(
        peripherals.GPIO13,
        InputConfig::default().with_pull(Pull::Up),
    );
    let phase_b = Input::new(
        peripherals.GPIO14,
        InputConfig::default().with_pull(Pull::Up),
    );
    phase_a.listen(Event::AnyEdge);
    pins::install_encoder(phase_a, phase_b);

    // Handler goes in after the pins so the first edge finds them
    let mut io = Io::new(peripherals.IO_MUX);
    io.set_interrupt_handler(pins::encoder_isr);
    info!("Encoder initialized");

    let button = ButtonPin(Input::new(
        peripherals.GPIO15,
        InputConfig::default().with_pull(Pull::Up),
    ));

    // OLED on I2C0 (GPIO21=SDA, GPIO22=SCL)
    let i2c = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(400)),
    )
    .expect("I2C0 config")
    .with_sda(peripherals.GPIO21)
    .with_scl(peripherals.GPIO22);

    let mut display = OledSink::new(i2c, &config.display);
    match display.init() {
        Ok(()) => {
            info!("OLED initialized at {:#x}", config.display.address);
            if let Err(e) = draw_splash(&mut display) {
                warn!("Splash failed: {:?}", e);
            }
        }
        // Keep going: the menu still runs and logs without a panel
        Err(e) => error!("Failed to initialize display: {:?}", e),
    }

    spawner.spawn(heartbeat()).unwrap();

    Timer::after_millis(SPLASH_MS).await;

    let mut system: System =
        MenuSystem::new(&ENCODER, button, EmbassyTimebase, display, config.menu);
    let table = actions();
    system.show(Menu::Main);

    info!("Menu running");

    loop {
        system.service().await;

        if !system.is_active() {
            // Any press brings the main menu back
            if system.check_button().await && system.button_pressed() {
                debug!("wake on button");
                system.show(Menu::Main);
            }
            continue;
        }

        if system.idle_ms() >= system.config().display_timeout_ms() {
            info!("Menu idle, switching off");
            system.deactivate();
            continue;
        }

        let Some((menu, item)) = system.take_click() else {
            continue;
        };
        let Some(action) = table.lookup(menu, item) else {
            debug!("no action for {} item {}", menu, item);
            continue;
        };

        info!("{} item {} -> {}", menu, item, action);
        run_action(&mut system, action).await;
        system.touch();
    }
}

/// Carry out a menu action; returns once its screen is dismissed
async fn run_action(system: &mut System, action: Action) {
    match action {
        Action::ChooseFromList => {
            let choice = system.choose_from_list(&LIST_ITEMS, "Choose").await;
            if choice == 0 {
                if system.confirm_action_required().await {
                    info!("'{}' confirmed", LIST_ITEMS[0]);
                } else {
                    info!("'{}' cancelled", LIST_ITEMS[0]);
                }
            } else {
                info!("list item {} chosen", choice);
            }
        }
        Action::EnterValue => {
            let value = system.enter_value("Testval", 15, 1, 0, 30).await;
            info!("value entered: {}", value);
        }
        Action::Message => {
            if let Err(e) = draw_message(system.display_mut()) {
                warn!("Message screen failed: {:?}", e);
            }
            let key = system.wait_for_keypress(MESSAGE_TIMEOUT_MS).await;
            debug!("message closed: {}", key);
        }
        Action::Uptime => {
            if let Err(e) = draw_uptime(system.display_mut(), Instant::now().as_secs()) {
                warn!("Uptime screen failed: {:?}", e);
            }
            let key = system.wait_for_keypress(UPTIME_TIMEOUT_MS).await;
            debug!("uptime closed: {}", key);
        }
        Action::MenuOff => system.deactivate(),
        Action::Open(menu) => system.show(menu),
    }
}

/// Parse the embedded menu.toml, falling back to defaults
fn load_config() -> Config {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            // build.rs rejects a broken file, so this only trips on parser drift
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            Config::default()
        }
    }
}

fn draw_splash<S: RenderSink>(display: &mut S) -> Result<(), DisplayError> {
    display.clear()?;
    display.set_text_color(TextColor::Normal);
    display.set_text_size(2);
    display.set_cursor(0, 0);
    display.print("Rotamenu")?;
    display.set_text_size(1);
    display.set_cursor(0, 28);
    display.print(VERSION)?;
    display.set_cursor(0, 40);
    display.print("ESP32 + SSD1306")?;
    display.present()
}

fn draw_message<S: RenderSink>(display: &mut S) -> Result<(), DisplayError> {
    display.clear()?;
    display.set_text_color(TextColor::Normal);
    display.set_text_size(2);
    display.set_cursor(20, 20);
    display.print("Hello")?;
    display.present()
}

fn draw_uptime<S: RenderSink>(display: &mut S, secs: u64) -> Result<(), DisplayError> {
    let mut text: String<16> = String::new();
    core::write!(
        text,
        "{:02}:{:02}:{:02}",
        secs / 3600,
        secs / 60 % 60,
        secs % 60
    )
    .map_err(|_| DisplayError::BufferOverflow)?;

    display.clear()?;
    display.set_text_color(TextColor::Normal);
    display.set_text_size(1);
    display.set_cursor(0, 0);
    display.print("Uptime")?;
    display.draw_line(0, 9, display.width() as i32, 9)?;
    display.set_text_size(2);
    display.set_cursor(0, 24);
    display.print(&text)?;
    display.present()
}

/// Periodic liveness log; also shows the menu loop is yielding
#[embassy_executor::task]
async fn heartbeat() {
    info!("Heartbeat task started");

    let mut ticker = Ticker::every(Duration::from_millis(HEARTBEAT_MS));
    loop {
        ticker.next().await;
        info!(
            "alive: uptime {} s, encoder position {}",
            Instant::now().as_secs(),
            ENCODER.position()
        );
    }
}
