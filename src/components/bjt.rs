use regex::Regex;
use std::sync::LazyLock;

use super::{missing, skip, text, Component, Draft, Field};
use crate::core::distributor::DistributorPart;
use crate::core::error::Result;
use crate::core::footprint::{self, ArtifactKind, FootprintMap, Resolver};
use crate::core::identity::{build_ipn, ComponentFamily};
use crate::core::normalize::{self, MISSING};

pub const FIELDS: &[Field] = &[
    text("bjt_type"),
    text("vce_max"),
    text("ic_max"),
    text("power_max"),
    text("ft"),
    text("package"),
];

pub const FOOTPRINTS: FootprintMap = &[("TO-92-3", "Package_TO_SOT_THT:TO-92_Inline")];

static TRANSISTOR_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d*)\s*(NPN|PNP)[,\s]*(\d*)\s*(NPN|PNP)?").expect("valid regex")
});

/// Compact transistor type plus whether it describes an array
///
/// `NPN` stays `NPN`; `4 NPN (Quad)` becomes `4xNPN`; mixed arrays join both
/// halves with `-`, as in `4xNPN-1xPNP`. `None` when no polarity is named.
pub fn transistor_type(raw: &str) -> Option<(String, bool)> {
    let caps = TRANSISTOR_TYPE.captures(raw)?;
    let mut kind = String::new();
    let mut array = false;

    let count = caps.get(1).map_or("", |m| m.as_str());
    if !count.is_empty() {
        array = true;
        kind.push_str(&format!("{}x", count));
    }
    kind.push_str(&caps[2]);

    if let Some(second) = caps.get(4) {
        array = true;
        kind.push('-');
        let count = caps.get(3).map_or("", |m| m.as_str());
        if !count.is_empty() {
            kind.push_str(&format!("{}x", count));
        }
        kind.push_str(second.as_str());
    }
    Some((kind, array))
}

pub(crate) fn from_distributor_part(
    part: &DistributorPart,
    resolver: &mut dyn Resolver,
) -> Result<Option<Component>> {
    let mut draft = Draft::from_part(ComponentFamily::Bjt, part);
    draft.set("vce_max", MISSING);
    draft.set("ic_max", MISSING);
    draft.set("power_max", MISSING);
    draft.set("ft", MISSING);
    let mut kind = None;
    let mut package = None;

    for (name, value) in part.params() {
        match name {
            "Transistor Type" => {
                kind = transistor_type(value).map(|(k, array)| {
                    let polarity = if value.contains("NPN") { "npn" } else { "pnp" };
                    (k, array, polarity)
                })
            }
            "Voltage - Collector Emitter Breakdown (Max)" => {
                draft.set("vce_max", normalize::value_with_unit(value))
            }
            "Current - Collector (Ic) (Max)" => {
                draft.set("ic_max", normalize::value_with_unit(value))
            }
            "Power - Max" => draft.set("power_max", normalize::value_with_unit(value)),
            "Frequency - Transition" => draft.set("ft", normalize::value_with_unit(value)),
            "Supplier Device Package" => package = Some(value),
            _ => {}
        }
    }

    let Some((kind, array, polarity)) = kind else {
        return skip(part, missing(part, "Transistor Type"));
    };
    let Some(package) = package else {
        return skip(part, missing(part, "Supplier Device Package"));
    };

    draft.set(
        "IPN",
        build_ipn(&[
            "BJT",
            kind.as_str(),
            draft.get("manufacturer"),
            part.mpn.as_str(),
        ]),
    );
    draft.set(
        "description",
        format!(
            "{} Ic, {} Vce, {}, {} {} BJT{}, {}",
            draft.get("ic_max"),
            draft.get("vce_max"),
            draft.get("power_max"),
            draft.get("ft"),
            kind,
            if array { " array" } else { "" },
            package
        ),
    );
    draft.set("keywords", format!("bjt transistor {}", polarity));
    draft.set("value", "${MPN}");
    draft.set(
        "kicad_symbol",
        resolver.resolve_unknown(&part.dpn, ArtifactKind::Symbol),
    );
    draft.set(
        "kicad_footprint",
        footprint::resolve(FOOTPRINTS, package, &part.dpn, resolver),
    );
    draft.set("bjt_type", kind);
    draft.set("package", package);

    draft.finish().map(Some)
}
