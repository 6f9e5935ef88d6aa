//! Build script for tambour-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates machine.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate machine.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=machine.toml");

    let config_path = Path::new("machine.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: machine.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds machine.toml from the tambour-firmware      ║\n\
            ║  directory. Create one before building.                          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read machine.toml                              ║\n\
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
                ║  ERROR: Invalid TOML syntax in machine.toml                      ║\n\
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
    validate_embroidery(&config, &mut errors);
    validate_steppers(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid machine.toml                                     ║\n\
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

    println!("cargo:warning=machine.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            // toml errors quote the source line, which may hold multi-byte text
            let truncated = if line.chars().count() > 64 {
                let head: String = line.chars().take(61).collect();
                format!("{}...", head)
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check a pin string is `[!][^]gpioN` with N in 0..=29
fn is_valid_pin(s: &str) -> bool {
    let s = s.trim().trim_start_matches(['!', '^']);
    s.strip_prefix("gpio")
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| n < 30)
}

/// Validate the [embroidery] section
fn validate_embroidery(config: &toml::Value, errors: &mut Vec<String>) {
    let section = match config.get("embroidery") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[embroidery] must be a table".to_string());
            return;
        }
        None => {
            println!("cargo:warning=machine.toml has no [embroidery] section; needle sync disabled");
            return;
        }
    };

    for (key, value) in section {
        match (key.as_str(), value) {
            ("needle_sensor_pin", toml::Value::String(pin)) => {
                let pin = pin.trim();
                if pin.is_empty() || pin.eq_ignore_ascii_case("none") {
                    println!("cargo:warning=needle_sensor_pin not set; needle sync disabled");
                } else if !is_valid_pin(pin) {
                    errors.push(format!("[embroidery] invalid needle_sensor_pin '{}'", pin));
                }
            }
            ("enable_on_start" | "test_pattern", toml::Value::Boolean(_)) => {}
            ("needle_sensor_pin" | "enable_on_start" | "test_pattern", _) => {
                errors.push(format!("[embroidery] '{}' has the wrong type", key));
            }
            _ => errors.push(format!("[embroidery] unknown key '{}'", key)),
        }
    }
}

/// Validate [stepper.x] and [stepper.y]
fn validate_steppers(config: &toml::Value, errors: &mut Vec<String>) {
    let steppers = match config.get("stepper") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[stepper.*] must be tables".to_string());
            return;
        }
        None => return,
    };

    for (name, stepper) in steppers {
        if name != "x" && name != "y" {
            errors.push(format!("[stepper.{}] unknown axis, expected x or y", name));
            continue;
        }
        let stepper = match stepper {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[stepper.{}] must be a table", name));
                continue;
            }
        };

        for (key, value) in stepper {
            match (key.as_str(), value) {
                ("step_pin" | "dir_pin", toml::Value::String(pin)) => {
                    if !is_valid_pin(pin) {
                        errors.push(format!("[stepper.{}] invalid {} '{}'", name, key, pin));
                    }
                }
                ("step_pin" | "dir_pin", _) => {
                    errors.push(format!("[stepper.{}] {} must be a string", name, key));
                }
                _ => errors.push(format!("[stepper.{}] unknown key '{}'", name, key)),
            }
        }
    }
}
