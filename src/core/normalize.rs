//! Canonical forms for distributor attribute strings
//!
//! Every function takes the raw string a distributor reports for one kind of
//! quantity and returns the single canonical rendering stored in the
//! database. Inputs that do not match the expected shape produce `"-"`,
//! except polarization, which is an enumerated vocabulary and rejects
//! unknown tokens.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::core::error::PartError;

/// Placeholder stored when a quantity cannot be read from the input
pub const MISSING: &str = "-";

static RESISTANCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*\s*[kKmMG]?").expect("valid regex"));
static CAPACITANCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)\s*([fpPnNuUμµmM]?)").expect("valid regex"));
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("valid regex"));
static SMD_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d\d\d\d").expect("valid regex"));
static DIMENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)\s*mm").expect("valid regex"));

/// SI prefixes for capacitance, smallest to largest
const CAPACITANCE_PREFIXES: [&str; 5] = ["f", "p", "n", "μ", "m"];

/// Resistance such as `1K`, `1.00K` or `100`
///
/// Units and whitespace are dropped and a lowercase `k` multiplier is
/// upper-cased. No magnitude renormalization happens.
pub fn resistance(raw: &str) -> String {
    match RESISTANCE.find(raw) {
        Some(m) => m
            .as_str()
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == 'k' { 'K' } else { c })
            .collect(),
        None => MISSING.to_string(),
    }
}

/// Capacitance such as `1nF` or `1.5μF`, scaled into `[1, 1000)` where the
/// prefix range allows it
pub fn capacitance(raw: &str) -> String {
    let Some(caps) = CAPACITANCE.captures(raw) else {
        return MISSING.to_string();
    };
    let Ok(mut value) = caps[1].parse::<f64>() else {
        return MISSING.to_string();
    };
    let mut level = match &caps[2] {
        "f" => 0,
        "p" | "P" => 1,
        "n" | "N" => 2,
        "u" | "U" | "μ" | "µ" => 3,
        "m" | "M" => 4,
        _ => return MISSING.to_string(),
    };

    while value < 1.0 && level > 0 {
        value *= 1000.0;
        level -= 1;
    }
    while value >= 1000.0 && level < CAPACITANCE_PREFIXES.len() - 1 {
        value /= 1000.0;
        level += 1;
    }

    format!("{}{}F", trim_float(value), CAPACITANCE_PREFIXES[level])
}

/// Tolerance such as `1%`; `-` when there is no number (zero ohm jumpers)
pub fn tolerance(raw: &str) -> String {
    with_suffix(raw, "%")
}

/// Power rating such as `0.1W`
pub fn power(raw: &str) -> String {
    with_suffix(raw, "W")
}

/// Voltage rating such as `50V`
pub fn voltage(raw: &str) -> String {
    with_suffix(raw, "V")
}

fn with_suffix(raw: &str, suffix: &str) -> String {
    match DECIMAL.find(raw) {
        Some(m) => format!("{}{}", m.as_str(), suffix),
        None => MISSING.to_string(),
    }
}

/// Resistor composition with spaces removed, e.g. `ThinFilm`
pub fn composition(raw: &str) -> String {
    raw.replace(' ', "")
}

/// Leading four-digit SMD code (`0805 (2012 Metric)` -> `0805`), otherwise
/// the input unchanged
pub fn smd_package(raw: &str) -> String {
    match SMD_PACKAGE.find(raw) {
        Some(m) => m.as_str().to_string(),
        None => raw.to_string(),
    }
}

/// Millimetre dimension padded to at least four characters, e.g. `5.00mm`,
/// `10.0mm`, `12.7mm`
pub fn dimension(raw: &str) -> String {
    let value = DIMENSION
        .captures(raw)
        .and_then(|caps| caps[1].parse::<f64>().ok());
    match value {
        Some(v) => format!("{:0<4}mm", float_repr(v)),
        None => MISSING.to_string(),
    }
}

/// Number followed directly by its unit, e.g. `100 V` -> `100V`
pub fn value_with_unit(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Capacitor polarization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarization {
    Polarized,
    Unpolarized,
}

impl Polarization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarization::Polarized => "Polarized",
            Polarization::Unpolarized => "Unpolarized",
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map the distributor polarization vocabulary; unknown tokens are errors
pub fn polarization(raw: &str) -> Result<Polarization, PartError> {
    match raw {
        "Bi-Polar" => Ok(Polarization::Unpolarized),
        "Polar" => Ok(Polarization::Polarized),
        other => Err(PartError::InvalidEnumeratedValue {
            field: "capacitor polarization",
            value: other.to_string(),
        }),
    }
}

/// Shortest decimal rendering that always carries a fractional part (`5.0`)
fn float_repr(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}

/// Shortest decimal rendering without trailing zeros or trailing point
fn trim_float(value: f64) -> String {
    float_repr(value)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
