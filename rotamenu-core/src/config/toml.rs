//! Minimal TOML reader for the menu configuration
//!
//! Handles only the subset the configuration file needs. It does NOT
//! support the full TOML spec.
//!
//! Supported:
//! - `[menu]`, `[button]` and `[display]` section headers
//! - `key = value` pairs with integer (decimal or `0x` hex) and boolean values
//! - Comments (`# ...`), including trailing comments
//!
//! Keys that are not set keep their default value.

use super::types::{Config, DisplayConfig, MenuConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not recognised in its section
    UnknownKey,
    /// Value could not be parsed as the key's type
    InvalidValue,
    /// Value parsed but is outside the allowed range
    OutOfRange,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Menu,
    Button,
    Display,
}

/// Parse TOML text into a [`Config`]
pub fn parse_config(input: &str) -> Result<Config, ParseError> {
    let mut config = Config::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            match section {
                Section::Root => return Err(ParseError::UnknownKey),
                Section::Menu => apply_menu(&mut config.menu, key, value)?,
                Section::Button => apply_button(&mut config.menu, key, value)?,
                Section::Display => apply_display(&mut config.display, key, value)?,
            }
        }
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("config parsed: {}", config);

    Ok(config)
}

/// Parse a header line like `[menu]`
fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let line = strip_comment(line);
    let name = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?
        .trim();

    match name {
        "menu" => Ok(Section::Menu),
        "button" => Ok(Section::Button),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_menu(menu: &mut MenuConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "item_trigger" => {
            menu.item_trigger = parse_int(value)?;
            if menu.item_trigger == 0 {
                return Err(ParseError::OutOfRange);
            }
        }
        "display_timeout_s" => {
            menu.display_timeout_s = parse_int(value)?;
            if menu.display_timeout_s == 0 {
                return Err(ParseError::OutOfRange);
            }
        }
        "keypress_poll_ms" => menu.keypress_poll_ms = parse_int(value)?,
        "release_poll_ms" => menu.release_poll_ms = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_button(menu: &mut MenuConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "settle_ms" => menu.button_settle_ms = parse_int(value)?,
        "min_change_ms" => menu.button_min_change_ms = parse_int(value)?,
        "confirm_hold_ms" => menu.confirm_hold_ms = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_display(display: &mut DisplayConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "address" => {
            display.address = parse_int(value)?;
            if display.address > 0x7F {
                return Err(ParseError::OutOfRange);
            }
        }
        "rotate_180" => display.rotate_180 = parse_bool(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Remove a trailing comment
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => line[..pos].trim(),
        None => line,
    }
}

/// Split `key = value`, dropping any trailing comment
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an unsigned integer, decimal or `0x` hex, with optional `_` separators
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for ch in value.chars().filter(|&c| c != '_') {
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }

    let parsed = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse::<u64>(),
    }
    .map_err(|_| ParseError::InvalidValue)?;

    T::try_from(parsed).map_err(|_| ParseError::OutOfRange)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}
