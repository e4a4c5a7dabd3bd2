use regex::Regex;
use std::sync::LazyLock;

use super::{missing, skip, text, Component, Draft, Field};
use crate::core::distributor::DistributorPart;
use crate::core::error::Result;
use crate::core::footprint::{self, ArtifactKind, FootprintMap, Resolver};
use crate::core::identity::{build_ipn, ComponentFamily};
use crate::core::normalize::MISSING;

pub const FIELDS: &[Field] = &[text("speed"), text("core"), text("package")];

pub const FOOTPRINTS: FootprintMap = &[
    ("8-SOIC", "Package_SO:SOIC-8_3.9x4.9mm_P1.27mm"),
    ("14-TSSOP", "Package_SO:TSSOP-14_4.4x5mm_P0.65mm"),
    ("20-TSSOP", "Package_SO:TSSOP-20_4.4x6.5mm_P0.65mm"),
    ("32-LQFP (7x7)", "Package_QFP:LQFP-32_7x7mm_P0.8mm"),
    ("48-LQFP (7x7)", "Package_QFP:LQFP-48_7x7mm_P0.5mm"),
    ("64-LQFP (10x10)", "Package_QFP:LQFP-64_10x10mm_P0.5mm"),
    ("80-LQFP (12x12)", "Package_QFP:LQFP-80_12x12mm_P0.5mm"),
    ("80-LQFP (14x14)", "Package_QFP:LQFP-80_14x14mm_P0.65mm"),
    ("100-LQFP (14x14)", "Package_QFP:LQFP-100_14x14mm_P0.5mm"),
    ("128-LQFP (14x14)", "Package_QFP:LQFP-128_14x14mm_P0.4mm"),
    ("144-LQFP (20x20)", "Package_QFP:LQFP-144_20x20mm_P0.5mm"),
    ("176-LQFP (24x24)", "Package_QFP:LQFP-176_24x24mm_P0.5mm"),
    ("208-LQFP (28x28)", "Package_QFP:LQFP-208_28x28mm_P0.5mm"),
    ("20-UFQFPN (3x3)", "Package_DFN_QFN:ST_UFQFPN-20_3x3mm_P0.5mm"),
    ("28-UFQFPN (4x4)", "Package_DFN_QFN:QFN-28_4x4mm_P0.5mm"),
    (
        "32-UFQFPN (5x5)",
        "Package_DFN_QFN:QFN-32-1EP_5x5mm_P0.5mm_EP3.45x3.45mm",
    ),
    (
        "36-VFQFPN (6x6)",
        "Package_DFN_QFN:QFN-36-1EP_6x6mm_P0.5mm_EP4.1x4.1mm",
    ),
    (
        "48-UFQFPN (7x7)",
        "Package_DFN_QFN:QFN-48-1EP_7x7mm_P0.5mm_EP5.6x5.6mm",
    ),
    (
        "68-VFQFPN (8x8)",
        "Package_DFN_QFN:QFN-68-1EP_8x8mm_P0.4mm_EP6.4x6.4mm",
    ),
];

static PIN_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d*").expect("valid regex"));
static TRADEMARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\d\w \-]").expect("valid regex"));

/// Leading pin count of a package name, `32` for `32-LQFP (7x7)`
pub fn pin_count(package: &str) -> &str {
    PIN_COUNT.find(package).map(|m| m.as_str()).unwrap_or("")
}

/// Core name without ® and ™ marks
pub fn core_name(raw: &str) -> String {
    TRADEMARKS.replace_all(raw, "").into_owned()
}

pub(crate) fn from_distributor_part(
    part: &DistributorPart,
    resolver: &mut dyn Resolver,
) -> Result<Option<Component>> {
    let mut draft = Draft::from_part(ComponentFamily::Microcontroller, part);
    draft.set("core", MISSING);
    draft.set("speed", MISSING);
    let mut package = None;

    for (name, value) in part.params() {
        match name {
            "Supplier Device Package" => package = Some(value),
            "Core Processor" => draft.set("core", core_name(value)),
            "Speed" => draft.set("speed", value),
            _ => {}
        }
    }

    let Some(package) = package else {
        return skip(part, missing(part, "Supplier Device Package"));
    };

    draft.set(
        "IPN",
        build_ipn(&["MCU", draft.get("manufacturer"), part.mpn.as_str()]),
    );
    draft.set(
        "description",
        format!(
            "{} pin {} MCU, {}, {}",
            pin_count(package),
            draft.get("core"),
            draft.get("speed"),
            package
        ),
    );
    draft.set("keywords", "mcu microcontroller uc");
    draft.set("value", "${MPN}");
    draft.set(
        "kicad_symbol",
        resolver.resolve_unknown(&part.dpn, ArtifactKind::Symbol),
    );
    draft.set(
        "kicad_footprint",
        footprint::resolve(FOOTPRINTS, package, &part.dpn, resolver),
    );
    draft.set("package", package);

    draft.finish().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::part;
    use crate::core::footprint::ScriptedResolver;

    #[test]
    fn test_pin_count() {
        assert_eq!(pin_count("32-LQFP (7x7)"), "32");
        assert_eq!(pin_count("TO-220"), "");
    }

    #[test]
    fn test_core_name() {
        assert_eq!(core_name("ARM® Cortex®-M0"), "ARM Cortex-M0");
        assert_eq!(core_name("AVR"), "AVR");
    }

    #[test]
    fn test_mcu_from_distributor_part() {
        let p = part(
            "Integrated Circuits (ICs)",
            "Embedded - Microcontrollers",
            "STMicroelectronics",
            "STM32F042K4T6TR",
            "497-17447-1-ND",
            &[
                ("Core Processor", "ARM® Cortex®-M0"),
                ("Speed", "48MHz"),
                ("Supplier Device Package", "32-LQFP (7x7)"),
            ],
        );
        let mut resolver = ScriptedResolver::new(["MCU_ST_STM32F0:STM32F042K4Tx"]);
        let comp = from_distributor_part(&p, &mut resolver).unwrap().unwrap();

        assert_eq!(comp.ipn(), "MCU_STMicroelectronics_STM32F042K4T6TR");
        assert_eq!(
            comp.get("description"),
            Some("32 pin ARM Cortex-M0 MCU, 48MHz, 32-LQFP (7x7)")
        );
        assert_eq!(comp.get("core"), Some("ARM Cortex-M0"));
        assert_eq!(comp.get("keywords"), Some("mcu microcontroller uc"));
        assert_eq!(comp.get("kicad_symbol"), Some("MCU_ST_STM32F0:STM32F042K4Tx"));
        assert_eq!(
            comp.get("kicad_footprint"),
            Some("Package_QFP:LQFP-32_7x7mm_P0.8mm")
        );
    }

    #[test]
    fn test_mcu_without_package_skips() {
        let p = part(
            "Integrated Circuits (ICs)",
            "Embedded - Microcontrollers",
            "Microchip Technology",
            "ATTINY85-20PU",
            "ATTINY85-20PU-ND",
            &[("Speed", "20MHz")],
        );
        let mut resolver = ScriptedResolver::default();
        assert!(from_distributor_part(&p, &mut resolver).unwrap().is_none());
        assert!(resolver.requests.is_empty());
    }
}
