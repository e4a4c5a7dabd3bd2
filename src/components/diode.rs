use super::{missing, skip, text, Component, Draft, Field};
use crate::core::distributor::DistributorPart;
use crate::core::error::Result;
use crate::core::footprint::{self, ArtifactKind, FootprintMap, Resolver};
use crate::core::identity::{build_ipn, ComponentFamily};
use crate::core::normalize::{self, MISSING};

pub const FIELDS: &[Field] = &[
    text("diode_type"),
    text("reverse_voltage"),
    text("current_or_power"),
    text("diode_configuration"),
    text("package"),
];

pub const FOOTPRINTS: FootprintMap = &[
    ("DO-35", "Diode_THT:D_DO-35_SOD27_P7.62mm_Horizontal"),
    ("SOD-123", "Diode_SMD:D_SOD-123"),
    ("SOD-323", "Diode_SMD:D_SOD-323"),
    ("SOT-23", "Package_TO_SOT_SMD:SOT-23"),
];

const SYMBOLS: &[(&str, &str)] = &[
    ("standard", "Device:D"),
    ("schottky", "Device:D_Schottky"),
    ("zener", "Device:D_Zener"),
];

pub(crate) fn from_distributor_part(
    part: &DistributorPart,
    resolver: &mut dyn Resolver,
) -> Result<Option<Component>> {
    let mut draft = Draft::from_part(ComponentFamily::Diode, part);
    draft.set("diode_type", MISSING);
    draft.set("reverse_voltage", MISSING);
    draft.set("current_or_power", MISSING);
    draft.set("diode_configuration", "");
    let mut package = None;

    for (name, value) in part.params() {
        match name {
            "Supplier Device Package" => package = Some(value),
            "Technology" => draft.set("diode_type", value.to_lowercase()),
            "Voltage - DC Reverse (Vr) (Max)" => {
                draft.set("reverse_voltage", normalize::value_with_unit(value))
            }
            "Current - Average Rectified (Io)"
            | "Power - Max"
            | "Current - Average Rectified (Io) (per Diode)" => {
                draft.set("current_or_power", normalize::value_with_unit(value))
            }
            "Voltage - Zener (Nom) (Vz)" => {
                draft.set("reverse_voltage", normalize::value_with_unit(value));
                draft.set("diode_type", "zener");
            }
            "Diode Configuration" => draft.set("diode_configuration", value.to_lowercase()),
            _ => {}
        }
    }

    let Some(package) = package else {
        return skip(part, missing(part, "Supplier Device Package"));
    };

    let configuration = draft.get("diode_configuration").to_string();
    let mut description = format!(
        "{}, {} {} diode, ",
        draft.get("reverse_voltage"),
        draft.get("current_or_power"),
        draft.get("diode_type")
    );
    let mut keywords = String::from("diode");
    if !configuration.is_empty() {
        description.push_str(&format!("{}, ", configuration));
        keywords.push_str(" array");
    }
    description.push_str(package);

    let known_symbol = SYMBOLS
        .iter()
        .find(|(kind, _)| *kind == draft.get("diode_type"))
        .map(|(_, symbol)| *symbol);
    let symbol = match known_symbol {
        Some(symbol) if configuration.is_empty() => symbol.to_string(),
        _ => resolver.resolve_unknown(&part.dpn, ArtifactKind::Symbol),
    };

    draft.set(
        "IPN",
        build_ipn(&["D", draft.get("manufacturer"), part.mpn.as_str()]),
    );
    draft.set("description", description);
    draft.set("keywords", keywords);
    draft.set("value", "${MPN}");
    draft.set("kicad_symbol", symbol);
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

    fn bat54ws(extra: &[(&str, &str)]) -> DistributorPart {
        let mut params = vec![
            ("Technology", "Schottky"),
            ("Voltage - DC Reverse (Vr) (Max)", "30 V"),
            ("Current - Average Rectified (Io)", "100mA"),
            ("Supplier Device Package", "SOD-323"),
        ];
        params.extend_from_slice(extra);
        part(
            "Discrete Semiconductor Products",
            "Diodes - Rectifiers - Single Diodes",
            "Diodes Incorporated",
            "BAT54WS-7-F",
            "BAT54WS-FDICT-ND",
            &params,
        )
    }

    #[test]
    fn test_schottky_from_distributor_part() {
        let mut resolver = ScriptedResolver::default();
        let comp = from_distributor_part(&bat54ws(&[]), &mut resolver)
            .unwrap()
            .unwrap();

        assert_eq!(comp.ipn(), "D_DiodesIncorporated_BAT54WS-7-F");
        assert_eq!(
            comp.get("description"),
            Some("30V, 100mA schottky diode, SOD-323")
        );
        assert_eq!(comp.get("keywords"), Some("diode"));
        assert_eq!(comp.get("kicad_symbol"), Some("Device:D_Schottky"));
        assert_eq!(comp.get("kicad_footprint"), Some("Diode_SMD:D_SOD-323"));
        assert_eq!(comp.get("diode_configuration"), Some(""));
        assert!(resolver.requests.is_empty());
    }

    #[test]
    fn test_diode_array_asks_for_symbol() {
        let mut resolver = ScriptedResolver::new(["Device:D_Schottky_x2_Serial_AKC"]);
        let comp = from_distributor_part(
            &bat54ws(&[("Diode Configuration", "1 Pair Series Connection")]),
            &mut resolver,
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            comp.get("description"),
            Some("30V, 100mA schottky diode, 1 pair series connection, SOD-323")
        );
        assert_eq!(comp.get("keywords"), Some("diode array"));
        assert_eq!(
            comp.get("kicad_symbol"),
            Some("Device:D_Schottky_x2_Serial_AKC")
        );
        assert_eq!(resolver.requests.len(), 1);
    }

    #[test]
    fn test_zener_voltage_overrides_type() {
        let p = part(
            "Discrete Semiconductor Products",
            "Diodes - Zener - Single Zener Diodes",
            "onsemi",
            "MMSZ5231BT1G",
            "MMSZ5231BT1GOSCT-ND",
            &[
                ("Voltage - Zener (Nom) (Vz)", "5.1 V"),
                ("Power - Max", "500 mW"),
                ("Supplier Device Package", "SOD-123"),
            ],
        );
        let mut resolver = ScriptedResolver::default();
        let comp = from_distributor_part(&p, &mut resolver).unwrap().unwrap();
        assert_eq!(comp.get("diode_type"), Some("zener"));
        assert_eq!(comp.get("reverse_voltage"), Some("5.1V"));
        assert_eq!(comp.get("current_or_power"), Some("500mW"));
        assert_eq!(comp.get("kicad_symbol"), Some("Device:D_Zener"));
        assert_eq!(comp.get("kicad_footprint"), Some("Diode_SMD:D_SOD-123"));
    }
}
