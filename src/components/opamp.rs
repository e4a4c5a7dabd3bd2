use super::{missing, skip, text, unit_count_word, Component, Draft, Field};
use crate::core::distributor::DistributorPart;
use crate::core::error::Result;
use crate::core::footprint::{self, ArtifactKind, FootprintMap, Resolver};
use crate::core::identity::{build_ipn, ComponentFamily};
use crate::core::normalize::MISSING;

pub const FIELDS: &[Field] = &[text("bandwidth"), text("num_units"), text("package")];

pub const FOOTPRINTS: FootprintMap = &[(
    "8-SOIC (0.154\", 3.90mm Width)",
    "Package_SO:SOIC-8_3.9x4.9mm_P1.27mm",
)];

pub(crate) fn from_distributor_part(
    part: &DistributorPart,
    resolver: &mut dyn Resolver,
) -> Result<Option<Component>> {
    let mut draft = Draft::from_part(ComponentFamily::OpAmp, part);
    draft.set("bandwidth", MISSING);
    let mut slew_rate = MISSING;
    let mut short_package = None;
    let mut package = None;
    let mut num_units = None;

    for (name, value) in part.params() {
        match name {
            "Gain Bandwidth Product" => draft.set("bandwidth", value),
            "Slew Rate" => slew_rate = value,
            "Package / Case" => package = Some(value),
            "Supplier Device Package" => short_package = Some(value),
            "Number of Circuits" => num_units = Some(value),
            _ => {}
        }
    }

    let Some(package) = package else {
        return skip(part, missing(part, "Package / Case"));
    };
    let Some(num_units) = num_units else {
        return skip(part, missing(part, "Number of Circuits"));
    };
    let short_package = short_package.unwrap_or(package);

    draft.set(
        "IPN",
        build_ipn(&["OpAmp", draft.get("manufacturer"), part.mpn.as_str()]),
    );
    draft.set(
        "description",
        format!(
            "{} {}, {} opamp, {}",
            unit_count_word(num_units),
            draft.get("bandwidth"),
            slew_rate,
            short_package
        ),
    );
    draft.set("keywords", "amplifier op amp opamp");
    draft.set("value", "${MPN}");
    draft.set(
        "kicad_symbol",
        resolver.resolve_unknown(&part.dpn, ArtifactKind::Symbol),
    );
    draft.set(
        "kicad_footprint",
        footprint::resolve(FOOTPRINTS, package, &part.dpn, resolver),
    );
    draft.set("num_units", num_units);
    draft.set("package", package);

    draft.finish().map(Some)
}
