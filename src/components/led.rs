//! Single-colour, multi-colour and addressable LEDs

use regex::Regex;
use std::sync::LazyLock;

use super::{missing, skip, text, Component, Draft, Field};
use crate::core::distributor::DistributorPart;
use crate::core::error::Result;
use crate::core::footprint::{self, ArtifactKind, FootprintMap, Resolver};
use crate::core::identity::{build_ipn, ComponentFamily};
use crate::core::normalize::{self, MISSING};

pub const FIELDS: &[Field] = &[
    text("color"),
    text("forward_voltage"),
    text("diode_configuration"),
    text("package"),
];

pub const FOOTPRINTS: FootprintMap = &[
    ("0603", "LED_SMD:LED_0603_1608Metric"),
    ("5mm", "LED_THT:LED_D5.0mm"),
];

/// Friendlier names for through-hole lamp sizes
const PACKAGE_NAMES: &[(&str, &str)] = &[("T-1 3/4", "5mm")];

/// Package reported for 4-lead RGB lamps; the supplier package is used instead
const RADIAL_4_LEADS: &str = "Radial - 4 Leads";

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \(.*\)").expect("valid regex"));
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[, ]+").expect("valid regex"));
static FOOTPRINT_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.?\d*)[\smLW]*x\s*(\d+\.?\d*)\s*mm").expect("valid regex")
});

/// Short package name: SMD code, known lamp size, or the input unchanged
pub fn led_package(raw: &str) -> String {
    let smd = normalize::smd_package(raw);
    if smd != raw {
        return smd;
    }
    PACKAGE_NAMES
        .iter()
        .find(|(long, _)| *long == raw)
        .map(|(_, short)| short.to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Colour usable inside an IPN, `RedGreenBlue` for `Red, Green, Blue (RGB)`
pub fn led_color(raw: &str) -> String {
    let short = PARENTHESIZED.replace_all(raw, "");
    SEPARATORS.replace_all(&short, "").into_owned()
}

/// Body size as `5.0x5.0mm` from `5.00mm L x 5.00mm W`
pub fn led_dimension(raw: &str) -> String {
    let sizes = FOOTPRINT_SIZE.captures(raw).and_then(|caps| {
        let length = caps[1].parse::<f64>().ok()?;
        let width = caps[2].parse::<f64>().ok()?;
        Some((length, width))
    });
    match sizes {
        Some((length, width)) => format!("{:.1}x{:.1}mm", length, width),
        None => MISSING.to_string(),
    }
}

pub(crate) fn from_distributor_part(
    part: &DistributorPart,
    resolver: &mut dyn Resolver,
) -> Result<Option<Component>> {
    let mut draft = Draft::from_part(ComponentFamily::Led, part);
    draft.set("forward_voltage", "");
    draft.set("diode_configuration", "");
    let mut package = None;
    let mut supplier_package = None;
    let mut size = "";
    let mut color = None;
    let mut addressable = false;

    for (name, value) in part.params() {
        match name {
            "Package / Case" => package = Some(led_package(value)),
            "Supplier Device Package" => supplier_package = Some(led_package(value)),
            "Size / Dimension" => size = value,
            "Color" => color = Some(value),
            "Voltage - Forward (Vf) (Typ)" => draft.set("forward_voltage", value),
            "Interface" => addressable = true,
            "Configuration" => match value {
                "Standard" | "Discrete" => draft.set("diode_configuration", ""),
                other => draft.set("diode_configuration", other),
            },
            _ => {}
        }
    }

    let Some(color) = color else {
        return skip(part, missing(part, "Color"));
    };
    let mut package = package.unwrap_or_else(|| led_dimension(size));
    if package == RADIAL_4_LEADS {
        if let Some(supplier_package) = supplier_package {
            package = supplier_package;
        }
    }

    let configuration = draft.get("diode_configuration").to_string();
    let short_color = led_color(color);
    let ipn = if addressable {
        build_ipn(&["LED", short_color.as_str(), "Addressable", package.as_str()])
    } else if !configuration.is_empty() {
        build_ipn(&[
            "LED",
            short_color.as_str(),
            configuration.as_str(),
            package.as_str(),
        ])
    } else {
        build_ipn(&["LED", short_color.as_str(), package.as_str()])
    };

    let mut description = format!("{} ", color);
    if addressable {
        description.push_str("addressable ");
    }
    description.push_str("LED, ");
    if !configuration.is_empty() {
        description.push_str(&format!("{}, ", configuration.to_lowercase()));
    }
    description.push_str(&package);

    let symbol = if configuration.is_empty() && !addressable {
        "Device:LED".to_string()
    } else {
        resolver.resolve_unknown(&part.dpn, ArtifactKind::Symbol)
    };
    let footprint = if configuration.is_empty() {
        footprint::resolve(FOOTPRINTS, &package, &part.dpn, resolver)
    } else {
        resolver.resolve_unknown(&part.dpn, ArtifactKind::Footprint)
    };

    draft.set("IPN", ipn);
    draft.set("description", description);
    draft.set("keywords", "led");
    draft.set("value", "${Color}");
    draft.set("kicad_symbol", symbol);
    draft.set("kicad_footprint", footprint);
    draft.set("color", color);
    draft.set("package", package);

    draft.finish().map(Some)
}
