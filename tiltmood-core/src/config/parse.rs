//! Minimal TOML loader for engine configuration
//!
//! Handles only the subset the firmware's `mood.toml` uses. It does NOT
//! support the full TOML grammar.
//!
//! Supported:
//! - `[section]` headers: `zone`, `flip`, `idle`, `playback`, `input`,
//!   `zones`, `reaction`
//! - `key = value` pairs (quoted or bare strings, integers, floats, booleans)
//! - Comments, whole-line and trailing
//!
//! Mood names are resolved against the catalog while parsing, so a typo in
//! a zone mapping is caught here rather than as an out-of-range index.

use super::types::EngineConfig;
use crate::animation::Catalog;
use crate::gesture::FlipAxis;
use crate::state::{Action, DirectionEvent};
use crate::zone::{RollConvention, Zone};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed or unknown section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Key not recognized in its section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Mood name not found in the catalog
    UnknownMood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Zone,
    Flip,
    Idle,
    Playback,
    Input,
    Zones,
    Reaction,
}

/// Parse TOML text into an [`EngineConfig`]
///
/// Keys that are absent keep their defaults. The result is not validated;
/// engine construction does that.
pub fn parse_config(input: &str, catalog: &Catalog<'_>) -> Result<EngineConfig, ParseError> {
    let mut config = EngineConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(name.trim())?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config, catalog)?;
    }

    Ok(config)
}

fn parse_section_header(name: &str) -> Result<Section, ParseError> {
    match name {
        "zone" => Ok(Section::Zone),
        "flip" => Ok(Section::Flip),
        "idle" => Ok(Section::Idle),
        "playback" => Ok(Section::Playback),
        "input" => Ok(Section::Input),
        "zones" => Ok(Section::Zones),
        "reaction" => Ok(Section::Reaction),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing comment unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Split "key = value"
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Remove surrounding quotes; bare words are accepted as-is
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_float(value: &str) -> Result<f32, ParseError> {
    let v: f32 = value.parse().map_err(|_| ParseError::InvalidValue)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseError::InvalidValue)
    }
}

fn parse_roll(value: &str) -> Result<RollConvention, ParseError> {
    match parse_string(value) {
        "positive_right" | "right" => Ok(RollConvention::PositiveRight),
        "positive_left" | "left" => Ok(RollConvention::PositiveLeft),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_axis(value: &str) -> Result<FlipAxis, ParseError> {
    match parse_string(value) {
        "pitch" => Ok(FlipAxis::Pitch),
        "roll" => Ok(FlipAxis::Roll),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_action(value: &str) -> Result<Action, ParseError> {
    Action::from_name(parse_string(value)).ok_or(ParseError::InvalidValue)
}

fn parse_mood(value: &str, catalog: &Catalog<'_>) -> Result<u8, ParseError> {
    catalog
        .find(parse_string(value))
        .ok_or(ParseError::UnknownMood)
}

/// A mood name, or `"none"` to leave the zone unmapped
fn parse_zone_mood(value: &str, catalog: &Catalog<'_>) -> Result<Option<u8>, ParseError> {
    match parse_string(value) {
        "none" => Ok(None),
        _ => parse_mood(value, catalog).map(Some),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut EngineConfig,
    catalog: &Catalog<'_>,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::UnknownKey),
        Section::Zone => match key {
            "flat_deg" => config.zone.flat_deg = parse_float(value)?,
            "tilt_deg" => config.zone.tilt_deg = parse_float(value)?,
            "roll" => config.zone.roll = parse_roll(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Flip => match key {
            "window_ms" => config.flip.window_ms = parse_int(value)?,
            "angle_deg" => config.flip.angle_deg = parse_float(value)?,
            "axis" => config.flip.axis = parse_axis(value)?,
            "cooldown_ms" => config.flip.cooldown_ms = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Idle => match key {
            "timeout_ms" => config.idle_timeout_ms = parse_int(value)?,
            "timeout_s" => {
                let secs: u32 = parse_int(value)?;
                config.idle_timeout_ms = secs.checked_mul(1000).ok_or(ParseError::InvalidValue)?;
            }
            "poll_ms" => config.sleep_poll_ms = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Playback => match key {
            "home" => config.home_mood = parse_mood(value, catalog)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Input => {
            let event = DirectionEvent::from_name(key).ok_or(ParseError::UnknownKey)?;
            config.bindings.bind(event, parse_action(value)?);
        }
        Section::Zones => {
            let zone = Zone::from_name(key).ok_or(ParseError::UnknownKey)?;
            config.set_zone_mood(zone, parse_zone_mood(value, catalog)?);
        }
        Section::Reaction => match key {
            "cycles" => config.reaction_cycles = parse_int(value)?,
            "frame_ms" => config.reaction_frame_ms = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
    }
    Ok(())
}
