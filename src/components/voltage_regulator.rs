use super::{missing, skip, text, Component, Draft, Field};
use crate::core::distributor::DistributorPart;
use crate::core::error::Result;
use crate::core::footprint::{self, ArtifactKind, FootprintMap, Resolver};
use crate::core::identity::{build_ipn, ComponentFamily};
use crate::core::normalize::MISSING;

pub const FIELDS: &[Field] = &[text("voltage"), text("current"), text("package")];

pub const FOOTPRINTS: FootprintMap = &[("TO-220-3", "Package_TO_SOT_THT:TO-220-3_Vertical")];

pub(crate) fn from_distributor_part(
    part: &DistributorPart,
    resolver: &mut dyn Resolver,
) -> Result<Option<Component>> {
    let mut draft = Draft::from_part(ComponentFamily::VoltageRegulator, part);
    draft.set("current", MISSING);
    let mut package = None;
    let mut vin_max = MISSING;
    let mut vout_min = MISSING;
    let mut vout_max = MISSING;
    let mut fixed = false;

    for (name, value) in part.params() {
        match name {
            "Supplier Device Package" => package = Some(value),
            "Voltage - Input (Max)" => vin_max = value,
            "Voltage - Output (Min/Fixed)" => vout_min = value,
            "Voltage - Output (Max)" => vout_max = value,
            "Current - Output" => draft.set("current", value),
            "Output Type" => fixed = value == "Fixed",
            _ => {}
        }
    }

    let Some(package) = package else {
        return skip(part, missing(part, "Supplier Device Package"));
    };

    let (voltage, output_type) = if fixed {
        (vout_min.to_string(), "fixed")
    } else {
        (format!("{} - {}", vout_min, vout_max), "adjustable")
    };

    draft.set(
        "IPN",
        build_ipn(&["VReg", draft.get("manufacturer"), part.mpn.as_str()]),
    );
    draft.set(
        "description",
        format!(
            "{} {}, {} @{} out, {} in, {} voltage regulator, {}",
            draft.get("manufacturer"),
            part.mpn,
            voltage,
            draft.get("current"),
            vin_max,
            output_type,
            package
        ),
    );
    draft.set("keywords", "voltage regulator vreg");
    draft.set("value", "${MPN}");
    draft.set(
        "kicad_symbol",
        resolver.resolve_unknown(&part.dpn, ArtifactKind::Symbol),
    );
    draft.set(
        "kicad_footprint",
        footprint::resolve(FOOTPRINTS, package, &part.dpn, resolver),
    );
    draft.set("voltage", voltage);
    draft.set("package", package);

    draft.finish().map(Some)
}
