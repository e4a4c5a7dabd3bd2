//! Resistors and zero-ohm jumpers

use super::{missing, skip, text, Component, Draft, Field};
use crate::core::distributor::DistributorPart;
use crate::core::error::Result;
use crate::core::footprint::{self, FootprintMap, Resolver};
use crate::core::identity::{build_ipn, ComponentFamily};
use crate::core::normalize::{self, MISSING};

pub const FIELDS: &[Field] = &[
    text("resistance"),
    text("tolerance"),
    text("power"),
    text("composition"),
    text("package"),
];

pub const FOOTPRINTS: FootprintMap = &[
    ("0201", "Resistor_SMD:R_0201_0603Metric"),
    ("0402", "Resistor_SMD:R_0402_1005Metric"),
    ("0603", "Resistor_SMD:R_0603_1608Metric"),
    ("0805", "Resistor_SMD:R_0805_2012Metric"),
    ("1206", "Resistor_SMD:R_1206_3216Metric"),
    ("1210", "Resistor_SMD:R_1210_3225Metric"),
];

/// Resistance of a jumper after normalization
const JUMPER_RESISTANCE: &str = "0";

pub(crate) fn from_distributor_part(
    part: &DistributorPart,
    resolver: &mut dyn Resolver,
) -> Result<Option<Component>> {
    let mut draft = Draft::from_part(ComponentFamily::Resistor, part);
    draft.set("tolerance", MISSING);
    draft.set("power", MISSING);
    draft.set("composition", MISSING);
    let mut composition_words = MISSING.to_string();
    let mut package = None;
    let mut resistance = None;

    for (name, value) in part.params() {
        match name {
            "Resistance" => resistance = Some(normalize::resistance(value)),
            "Tolerance" => draft.set("tolerance", normalize::tolerance(value)),
            "Power (Watts)" => draft.set("power", normalize::power(value)),
            "Composition" => {
                draft.set("composition", normalize::composition(value));
                composition_words = value.to_lowercase();
            }
            "Supplier Device Package" => package = Some(normalize::smd_package(value)),
            _ => {}
        }
    }

    let Some(resistance) = resistance else {
        return skip(part, missing(part, "Resistance"));
    };
    let Some(package) = package else {
        return skip(part, missing(part, "Supplier Device Package"));
    };

    if resistance == JUMPER_RESISTANCE {
        draft.set(
            "IPN",
            build_ipn(&["R", "0", "Jumper", package.as_str(), draft.get("composition")]),
        );
        draft.set(
            "description",
            format!("0Ω jumper, {}, {}", package, composition_words),
        );
        draft.set("keywords", "jumper");
    } else {
        draft.set(
            "IPN",
            build_ipn(&[
                "R",
                resistance.as_str(),
                package.as_str(),
                draft.get("tolerance"),
                draft.get("power"),
                draft.get("composition"),
            ]),
        );
        draft.set(
            "description",
            format!(
                "{}Ω ±{}, {} resistor, {}, {}",
                resistance,
                draft.get("tolerance"),
                draft.get("power"),
                package,
                composition_words
            ),
        );
        draft.set("keywords", format!("r res resistor {}", resistance));
    }

    draft.set("value", "${Resistance}");
    draft.set("kicad_symbol", "Device:R");
    draft.set(
        "kicad_footprint",
        footprint::resolve(FOOTPRINTS, &package, &part.dpn, resolver),
    );
    draft.set("resistance", resistance);
    draft.set("package", package);

    draft.finish().map(Some)
}
