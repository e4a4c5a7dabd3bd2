use super::{missing, skip, text, unit_count_word, Component, Draft, Field};
use crate::core::distributor::DistributorPart;
use crate::core::error::Result;
use crate::core::footprint::{self, ArtifactKind, FootprintMap, Resolver};
use crate::core::identity::{build_ipn, ComponentFamily};
use crate::core::normalize::MISSING;

pub const FIELDS: &[Field] = &[text("output"), text("num_units"), text("package")];

pub const FOOTPRINTS: FootprintMap = &[(
    "8-SOIC (0.154\", 3.90mm Width)",
    "Package_SO:SOIC-8_3.9x4.9mm_P1.27mm",
)];

fn output_kind(raw: &str) -> &str {
    if raw.contains("Open-Collector") {
        "Open-Collector"
    } else if raw.contains("Push-Pull") {
        "Push-Pull"
    } else {
        raw
    }
}

pub(crate) fn from_distributor_part(
    part: &DistributorPart,
    resolver: &mut dyn Resolver,
) -> Result<Option<Component>> {
    let mut draft = Draft::from_part(ComponentFamily::Comparator, part);
    draft.set("output", MISSING);
    let mut package = None;
    let mut short_package = None;
    let mut num_units = None;

    for (name, value) in part.params() {
        match name {
            "Output Type" => draft.set("output", output_kind(value)),
            "Package / Case" => package = Some(value),
            "Supplier Device Package" => short_package = Some(value),
            "Number of Elements" => num_units = Some(value),
            _ => {}
        }
    }

    let Some(package) = package else {
        return skip(part, missing(part, "Package / Case"));
    };
    let Some(num_units) = num_units else {
        return skip(part, missing(part, "Number of Elements"));
    };
    let short_package = short_package.unwrap_or(package);

    draft.set(
        "IPN",
        build_ipn(&["Comp", draft.get("manufacturer"), part.mpn.as_str()]),
    );
    draft.set(
        "description",
        format!(
            "{} comparator, {} output, {}",
            unit_count_word(num_units),
            draft.get("output").to_lowercase(),
            short_package
        ),
    );
    draft.set("keywords", "comparator");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::part;
    use crate::core::footprint::ScriptedResolver;

    #[test]
    fn test_comparator_from_distributor_part() {
        let p = part(
            "Integrated Circuits (ICs)",
            "Linear - Comparators",
            "Texas Instruments",
            "LM393DR",
            "296-1395-1-ND",
            &[
                ("Number of Elements", "2"),
                ("Output Type", "CMOS, MOS, Open-Collector, TTL"),
                ("Package / Case", "8-SOIC (0.154\", 3.90mm Width)"),
                ("Supplier Device Package", "8-SOIC"),
            ],
        );
        let mut resolver = ScriptedResolver::new(["Comparator:LM393"]);
        let comp = from_distributor_part(&p, &mut resolver).unwrap().unwrap();

        assert_eq!(comp.ipn(), "Comp_TexasInstruments_LM393DR");
        assert_eq!(comp.get("output"), Some("Open-Collector"));
        assert_eq!(
            comp.get("description"),
            Some("Dual comparator, open-collector output, 8-SOIC")
        );
        assert_eq!(comp.get("keywords"), Some("comparator"));
        assert_eq!(comp.get("kicad_symbol"), Some("Comparator:LM393"));
        assert_eq!(
            comp.get("kicad_footprint"),
            Some("Package_SO:SOIC-8_3.9x4.9mm_P1.27mm")
        );
    }

    #[test]
    fn test_output_kind() {
        assert_eq!(output_kind("Push-Pull, Rail-to-Rail"), "Push-Pull");
        assert_eq!(output_kind("Open Drain"), "Open Drain");
    }
}
