//! Minimal TOML parser for machine configuration
//!
//! Handles only the subset `machine.toml` uses. It needs neither `alloc`
//! nor the full TOML grammar.
//!
//! Supported:
//! - `[section]` and `[section name]` / `[section.name]` headers
//! - `key = value` pairs (string, integer, boolean)
//! - Basic (`"..."`) and literal (`'...'`) strings
//! - Comments (`# ...`), including trailing comments on any line
//!
//! Example:
//!
//! ```toml
//! [embroidery]
//! needle_sensor_pin = "^!gpio15"
//! enable_on_start = true
//!
//! [stepper x]
//! step_pin = "gpio11"
//! dir_pin = "gpio10"
//! ```

use super::types::{AxisHwConfig, MachineConfig, PinConfig, GPIO_COUNT};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type
    InvalidValue,
    /// Pin string is not `[!][^]gpioN` with N in range
    InvalidPin,
    /// Key is not valid in its section
    UnknownKey,
    /// Same GPIO assigned twice
    PinConflict(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Embroidery,
    Stepper(StepperName),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepperName {
    X,
    Y,
}

/// Parse TOML configuration into a [`MachineConfig`]
///
/// Keys that are absent keep their [`MachineConfig::default`] values.
pub fn parse_config(input: &str) -> Result<MachineConfig, ParseError> {
    let mut config = MachineConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line)
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(&header[1..])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        match section {
            Section::Root => return Err(ParseError::UnknownKey),
            Section::Embroidery => apply_embroidery(&mut config, key, value)?,
            Section::Stepper(StepperName::X) => apply_stepper(&mut config.x, key, value)?,
            Section::Stepper(StepperName::Y) => apply_stepper(&mut config.y, key, value)?,
        }
    }

    if let Some(pin) = config.find_pin_conflict() {
        return Err(ParseError::PinConflict(pin));
    }

    Ok(config)
}

/// Parse a section header like "embroidery", "stepper x" or "stepper.x"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let mut parts = header.trim().split(|c: char| c == '.' || c.is_whitespace());
    let kind = parts.next().ok_or(ParseError::InvalidSection)?;
    let name = parts.find(|p| !p.is_empty());

    match (kind, name) {
        ("embroidery", None) => Ok(Section::Embroidery),
        ("stepper", Some("x")) => Ok(Section::Stepper(StepperName::X)),
        ("stepper", Some("y")) => Ok(Section::Stepper(StepperName::Y)),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing `# comment` that is not inside a quoted string
fn strip_comment(line: &str) -> &str {
    let mut quote = None;
    for (i, c) in line.char_indices() {
        match (quote, c) {
            (None, '#') => return line[..i].trim_end(),
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if q == c => quote = None,
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line, dropping any trailing comment
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = strip_comment(line).split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn apply_embroidery(config: &mut MachineConfig, key: &str, value: &str) -> Result<(), ParseError> {
    let embroidery = &mut config.embroidery;
    match key {
        "needle_sensor_pin" => embroidery.needle_sensor_pin = parse_optional_pin(value)?,
        "enable_on_start" => embroidery.enable_on_start = parse_bool(value)?,
        "test_pattern" => embroidery.test_pattern = parse_bool(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_stepper(axis: &mut AxisHwConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "step_pin" => axis.step_pin = parse_pin(value)?,
        "dir_pin" => axis.dir_pin = parse_pin(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Parse a string value (removes basic `"` or literal `'` quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    for quote in ['"', '\''] {
        if let Some(rest) = value.strip_prefix(quote) {
            return rest.strip_suffix(quote).ok_or(ParseError::InvalidValue);
        }
    }
    Ok(value)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    parse_pin_string(parse_string(value)?).ok_or(ParseError::InvalidPin)
}

/// An empty string or "none" means the pin is not wired
fn parse_optional_pin(value: &str) -> Result<Option<PinConfig>, ParseError> {
    let value = parse_string(value)?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    parse_pin_string(value)
        .map(Some)
        .ok_or(ParseError::InvalidPin)
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio11" -> pin 11
/// - "!gpio12" -> pin 12, inverted (active-low)
/// - "^gpio4" -> pin 4, pull-up enabled
/// - "^!gpio15" / "!^gpio15" -> both
pub fn parse_pin_string(s: &str) -> Option<PinConfig> {
    let mut s = s.trim();
    let mut config = PinConfig::default();

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            config.inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            config.pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let pin: u8 = s.strip_prefix("gpio")?.parse().ok()?;
    if pin >= GPIO_COUNT {
        return None;
    }
    config.pin = pin;
    Some(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Needle synchronised hoop
[embroidery]
needle_sensor_pin = "^!gpio15"   # hall sensor, open drain
enable_on_start = false
test_pattern = true

[stepper x]
step_pin = "gpio11"
dir_pin = "!gpio10"

[stepper.y]
step_pin = "gpio6"
dir_pin = "gpio5"
"#;

    #[test]
    fn test_parse_pin_string() {
        assert_eq!(parse_pin_string("gpio11"), Some(PinConfig::new(11)));
        assert_eq!(parse_pin_string("!gpio12"), Some(PinConfig::inverted(12)));
        let pulled = parse_pin_string("^gpio4").unwrap();
        assert!(pulled.pull_up && !pulled.inverted);
        let both = parse_pin_string("!^gpio15").unwrap();
        assert!(both.pull_up && both.inverted);
        assert_eq!(parse_pin_string("gpio29").map(|p| p.pin), Some(29));

        // Invalid
        assert_eq!(parse_pin_string("gpio30"), None);
        assert_eq!(parse_pin_string("pin11"), None);
        assert_eq!(parse_pin_string(""), None);
    }

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();

        let sensor = config.embroidery.needle_sensor_pin.unwrap();
        assert_eq!(sensor.pin, 15);
        assert!(sensor.inverted && sensor.pull_up);
        assert!(!config.embroidery.enable_on_start);
        assert!(config.embroidery.test_pattern);

        assert_eq!(config.x.step_pin, PinConfig::new(11));
        assert_eq!(config.x.dir_pin, PinConfig::inverted(10));
        assert_eq!(config.y.step_pin, PinConfig::new(6));
    }

    #[test]
    fn test_missing_sensor_is_undefined() {
        let config = parse_config("[embroidery]\nenable_on_start = true\n").unwrap();
        assert_eq!(config.embroidery.needle_sensor_pin, None);

        let config = parse_config("[embroidery]\nneedle_sensor_pin = \"none\"\n").unwrap();
        assert_eq!(config.embroidery.needle_sensor_pin, None);

        let config = parse_config("[embroidery]\nneedle_sensor_pin = \"\"\n").unwrap();
        assert_eq!(config.embroidery.needle_sensor_pin, None);
    }

    #[test]
    fn test_header_trailing_comment() {
        let config = parse_config("[embroidery] # needle\nneedle_sensor_pin = \"gpio4\"\n").unwrap();
        assert_eq!(config.embroidery.needle_sensor_pin, Some(PinConfig::new(4)));

        let config = parse_config("[stepper.y]   # hoop y\nstep_pin = \"gpio7\"\n").unwrap();
        assert_eq!(config.y.step_pin, PinConfig::new(7));
    }

    #[test]
    fn test_literal_strings() {
        let config = parse_config("[embroidery]\nneedle_sensor_pin = 'gpio4'\n").unwrap();
        assert_eq!(config.embroidery.needle_sensor_pin, Some(PinConfig::new(4)));

        let config = parse_config("[embroidery]\nneedle_sensor_pin = 'none' # unwired\n").unwrap();
        assert_eq!(config.embroidery.needle_sensor_pin, None);

        assert_eq!(
            parse_config("[embroidery]\nneedle_sensor_pin = 'gpio4\"\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_hash_inside_string_is_not_comment() {
        assert_eq!(strip_comment(r#"pin = "a#b" # c"#), r#"pin = "a#b""#);
        assert_eq!(strip_comment("pin = 'a#b'"), "pin = 'a#b'");
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config("[spindle]\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[stepper z]\n"), Err(ParseError::InvalidSection));
        assert_eq!(
            parse_config("[embroidery]\nspeed = 3\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(
            parse_config("[embroidery]\nenable_on_start = yes\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[stepper x]\nstep_pin = \"gpio40\"\n"),
            Err(ParseError::InvalidPin)
        );
        assert_eq!(
            parse_config("[embroidery]\nneedle_sensor_pin = \"gpio11\"\n"),
            Err(ParseError::PinConflict(11))
        );
    }
}
