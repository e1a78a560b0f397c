//! Build script for rotamenu-firmware
//!
//! - Validates menu.toml at compile time (sections, keys, ranges)

use std::fs;
use std::path::Path;

/// Keys accepted in each section
const MENU_KEYS: &[&str] = &[
    "item_trigger",
    "display_timeout_s",
    "keypress_poll_ms",
    "release_poll_ms",
];
const BUTTON_KEYS: &[&str] = &["settle_ms", "min_change_ms", "confirm_hold_ms"];
const DISPLAY_KEYS: &[&str] = &["address", "rotate_180"];

fn main() {
    validate_config();
}

/// Validate menu.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=menu.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let config_path = Path::new("menu.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: menu.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds menu.toml from the rotamenu-firmware        ║\n\
            ║  directory. Restore it or create an empty file for defaults.     ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read menu.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in menu.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_menu(&config, &mut errors);
    validate_button(&config, &mut errors);
    validate_display(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid menu configuration                               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=menu.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only `[menu]`, `[button]` and `[display]` tables are allowed at the root
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        if !["menu", "button", "display"].contains(&name.as_str()) {
            errors.push(format!("unknown section or key '{}'", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// Check keys of a section and hand back its table
fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    known: &[&str],
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    let table = config.get(name)?.as_table()?;
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", name, key));
        }
    }
    Some(table)
}

/// Integer in `min..=max`, if present
fn check_range(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

fn validate_menu(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(menu) = section(config, "menu", MENU_KEYS, errors) else {
        return;
    };

    check_range(menu, "menu", "item_trigger", 1, 255, errors);
    check_range(menu, "menu", "display_timeout_s", 1, 65535, errors);
    check_range(menu, "menu", "keypress_poll_ms", 0, 10_000, errors);
    check_range(menu, "menu", "release_poll_ms", 0, 10_000, errors);
}

fn validate_button(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(button) = section(config, "button", BUTTON_KEYS, errors) else {
        return;
    };

    check_range(button, "button", "settle_ms", 0, 10_000, errors);
    check_range(button, "button", "min_change_ms", 0, 60_000, errors);
    check_range(button, "button", "confirm_hold_ms", 0, 60_000, errors);
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = section(config, "display", DISPLAY_KEYS, errors) else {
        return;
    };

    check_range(display, "display", "address", 0, 0x7F, errors);

    if let Some(value) = display.get("rotate_180") {
        if !value.is_bool() {
            errors.push("[display] rotate_180 must be true or false".to_string());
        }
    }
}
