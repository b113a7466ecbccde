//! Build script for tiltmood-firmware
//!
//! - Places memory.x on the linker search path
//! - Validates mood.toml at compile time, so a bad config fails the build
//!   instead of silently falling back to defaults on the device

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Built-in face names accepted in [zones] and [playback]
const MOODS: &[&str] = &["happy", "sad", "angry", "surprised", "cool", "calm", "love"];

/// Joystick actions accepted in [input]
const ACTIONS: &[&str] = &["next", "previous", "prev", "pause", "home", "ignore", "none"];

/// Allowed keys per section
const SECTIONS: &[(&str, &[&str])] = &[
    ("zone", &["flat_deg", "tilt_deg", "roll"]),
    ("flip", &["window_ms", "angle_deg", "axis", "cooldown_ms"]),
    ("idle", &["timeout_ms", "timeout_s", "poll_ms"]),
    ("playback", &["home"]),
    ("input", &["up", "down", "left", "right", "middle"]),
    ("zones", &["flat", "forward", "back", "left", "right", "other"]),
    ("reaction", &["cycles", "frame_ms"]),
];

fn main() {
    setup_linker();
    validate_config();
}

fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(include_bytes!("memory.x"))
        .expect("write memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

fn validate_config() {
    println!("cargo:rerun-if-changed=mood.toml");

    let path = Path::new("mood.toml");
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail("Cannot read mood.toml", &[e.to_string()]),
    };

    let config: toml::Table = match content.parse() {
        Ok(table) => table,
        Err(e) => fail(
            "Invalid TOML syntax in mood.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let errors = check_config(&config);
    if !errors.is_empty() {
        fail("Invalid values in mood.toml", &errors);
    }

    println!("cargo:warning=mood.toml validated successfully");
}

/// Collect every problem instead of stopping at the first
fn check_config(config: &toml::Table) -> Vec<String> {
    let mut errors = Vec::new();

    for (name, value) in config {
        let Some((_, keys)) = SECTIONS.iter().find(|(s, _)| *s == name.as_str()) else {
            errors.push(format!("unknown section [{name}]"));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("[{name}] must be a table"));
            continue;
        };
        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{name}] unknown key '{key}'"));
            }
        }
    }

    let section = |name: &str| config.get(name).and_then(|v| v.as_table());

    if let Some(zone) = section("zone") {
        for key in ["flat_deg", "tilt_deg"] {
            check_non_negative_number(zone, "zone", key, &mut errors);
        }
        check_choice(zone, "zone", "roll", &["positive_right", "right", "positive_left", "left"], &mut errors);
    }

    if let Some(flip) = section("flip") {
        check_positive_int(flip, "flip", "window_ms", &mut errors);
        check_non_negative_number(flip, "flip", "angle_deg", &mut errors);
        check_choice(flip, "flip", "axis", &["pitch", "roll"], &mut errors);
        check_int_range(flip, "flip", "cooldown_ms", 0, i64::from(u32::MAX), &mut errors);
    }

    if let Some(idle) = section("idle") {
        check_positive_int(idle, "idle", "timeout_ms", &mut errors);
        check_int_range(idle, "idle", "timeout_s", 1, i64::from(u32::MAX / 1000), &mut errors);
        check_positive_int(idle, "idle", "poll_ms", &mut errors);
    }

    if let Some(playback) = section("playback") {
        check_choice(playback, "playback", "home", MOODS, &mut errors);
    }

    if let Some(input) = section("input") {
        for key in ["up", "down", "left", "right", "middle"] {
            check_choice(input, "input", key, ACTIONS, &mut errors);
        }
    }

    if let Some(zones) = section("zones") {
        let mut choices = MOODS.to_vec();
        choices.push("none");
        for key in ["flat", "forward", "back", "left", "right", "other"] {
            check_choice(zones, "zones", key, &choices, &mut errors);
        }
    }

    if let Some(reaction) = section("reaction") {
        check_int_range(reaction, "reaction", "cycles", 1, 255, &mut errors);
        check_positive_int(reaction, "reaction", "frame_ms", &mut errors);
    }

    errors
}

fn check_choice(table: &toml::Table, section: &str, key: &str, choices: &[&str], errors: &mut Vec<String>) {
    match table.get(key) {
        None => {}
        Some(toml::Value::String(s)) if choices.contains(&s.as_str()) => {}
        Some(_) => errors.push(format!("[{section}] {key} must be one of: {}", choices.join(", "))),
    }
}

fn check_positive_int(table: &toml::Table, section: &str, key: &str, errors: &mut Vec<String>) {
    check_int_range(table, section, key, 1, i64::from(u32::MAX), errors);
}

fn check_int_range(table: &toml::Table, section: &str, key: &str, min: i64, max: i64, errors: &mut Vec<String>) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(_) => errors.push(format!("[{section}] {key} must be an integer in {min}..={max}")),
    }
}

fn check_non_negative_number(table: &toml::Table, section: &str, key: &str, errors: &mut Vec<String>) {
    let value = match table.get(key) {
        None => return,
        Some(toml::Value::Float(f)) => *f,
        Some(toml::Value::Integer(i)) => *i as f64,
        Some(_) => f64::NAN,
    };
    if !(value.is_finite() && value >= 0.0) {
        errors.push(format!("[{section}] {key} must be a non-negative number"));
    }
}

/// Abort the build with a boxed message
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let line = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  • {line:<62} ║")
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {title:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {body}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n"
    );
}
