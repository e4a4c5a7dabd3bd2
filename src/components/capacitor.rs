//! Ceramic and aluminum electrolytic capacitors

use super::{missing, skip, text, Component, Draft, Field};
use crate::core::distributor::DistributorPart;
use crate::core::error::{PartError, Result};
use crate::core::footprint::{self, ArtifactKind, FootprintMap, Resolver};
use crate::core::identity::{build_ipn, ComponentFamily};
use crate::core::normalize::{self, Polarization, MISSING};

pub const FIELDS: &[Field] = &[
    text("capacitance"),
    text("tolerance"),
    text("voltage"),
    text("dielectric"),
    text("package"),
];

pub const FOOTPRINTS: FootprintMap = &[
    ("0201", "Capacitor_SMD:C_0201_0603Metric"),
    ("0402", "Capacitor_SMD:C_0402_1005Metric"),
    ("0603", "Capacitor_SMD:C_0603_1608Metric"),
    ("0805", "Capacitor_SMD:C_0805_2012Metric"),
    ("1206", "Capacitor_SMD:C_1206_3216Metric"),
    ("1210", "Capacitor_SMD:C_1210_3225Metric"),
];

const CERAMIC: &str = "Ceramic Capacitors";
const ALUMINUM_ELECTROLYTIC: &str = "Aluminum Electrolytic Capacitors";

/// Through-hole and SMD radial cans; their package is named after dimensions
const RADIAL: &str = "Radial, Can";
const RADIAL_SMD: &str = "Radial, Can - SMD";

#[derive(Debug, Default)]
struct Dimensions {
    diameter: Option<String>,
    height: Option<String>,
    pitch: Option<String>,
}

/// How the package appears in the IPN and description
struct PackageName {
    short: String,
    /// `D..._H..._P...` segment, empty for flat-lookup packages
    dims: String,
}

pub(crate) fn from_distributor_part(
    part: &DistributorPart,
    resolver: &mut dyn Resolver,
) -> Result<Option<Component>> {
    let mut draft = Draft::from_part(ComponentFamily::Capacitor, part);
    draft.set("tolerance", MISSING);
    draft.set("voltage", MISSING);
    draft.set("dielectric", MISSING);
    let mut capacitance = None;
    let mut package = None;
    let mut polarization = None;
    let mut dimensions = Dimensions::default();

    for (name, value) in part.params() {
        match name {
            "Capacitance" => capacitance = Some(normalize::capacitance(value)),
            "Tolerance" => draft.set("tolerance", normalize::tolerance(value)),
            "Voltage - Rated" => draft.set("voltage", normalize::voltage(value)),
            "Temperature Coefficient" => draft.set("dielectric", value),
            "Package / Case" => package = Some(normalize::smd_package(value)),
            "Polarization" => polarization = Some(normalize::polarization(value)?),
            "Lead Spacing" => dimensions.pitch = Some(normalize::dimension(value)),
            "Size / Dimension" => dimensions.diameter = Some(normalize::dimension(value)),
            "Height - Seated (Max)" => dimensions.height = Some(normalize::dimension(value)),
            _ => {}
        }
    }

    let polarization = match part.family.as_str() {
        CERAMIC => Polarization::Unpolarized,
        ALUMINUM_ELECTROLYTIC => {
            let Some(polarization) = polarization else {
                return skip(part, missing(part, "Polarization"));
            };
            draft.set("dielectric", format!("{} Electrolytic", polarization));
            polarization
        }
        other => {
            return skip(
                part,
                PartError::UnrecognizedFamily {
                    what: "capacitor family",
                    tag: other.to_string(),
                },
            )
        }
    };

    let Some(capacitance) = capacitance else {
        return skip(part, missing(part, "Capacitance"));
    };
    let Some(package) = package else {
        return skip(part, missing(part, "Package / Case"));
    };

    draft.set("value", "${Capacitance}");
    draft.set(
        "kicad_symbol",
        match polarization {
            Polarization::Unpolarized => "Device:C",
            Polarization::Polarized => "Device:C_Polarized_US",
        },
    );

    let name = match package_name(
        &mut draft,
        part,
        &package,
        polarization,
        &dimensions,
        resolver,
    ) {
        Ok(name) => name,
        Err(attribute) => return skip(part, missing(part, attribute)),
    };

    let mut ipn = build_ipn(&[
        "C",
        capacitance.as_str(),
        name.short.as_str(),
        draft.get("tolerance"),
        draft.get("voltage"),
        draft.get("dielectric"),
    ]);
    if !name.dims.is_empty() {
        ipn = format!("{}_{}", ipn, name.dims);
    }

    let dielectric = draft.get("dielectric");
    let dielectric = if dielectric.contains("olarized") {
        dielectric.to_lowercase()
    } else {
        dielectric.to_string()
    };
    let mut description = format!(
        "{} ±{}, {}, {} capacitor, {}",
        capacitance,
        draft.get("tolerance"),
        draft.get("voltage"),
        dielectric,
        name.short.replace('_', " ").to_lowercase()
    );
    if !name.dims.is_empty() {
        let dims = name
            .dims
            .split('_')
            .map(|d| {
                let (label, value) = d.split_at(1);
                let label = match label {
                    "D" => "diameter",
                    "H" => "height",
                    _ => "pitch",
                };
                format!("{} {}", label, value)
            })
            .collect::<Vec<_>>()
            .join(" ");
        description = format!("{}, {}", description, dims);
    }

    draft.set("IPN", ipn);
    draft.set("description", description);
    draft.set(
        "keywords",
        format!(
            "c cap capacitor {} {}",
            polarization.as_str().to_lowercase(),
            capacitance
        ),
    );
    draft.set("capacitance", capacitance);

    draft.finish().map(Some)
}

/// Fill `package` and `kicad_footprint`, returning the IPN package segments
///
/// A radial can lacking one of its dimensions fails with the name of the
/// missing parameter.
fn package_name(
    draft: &mut Draft,
    part: &DistributorPart,
    package: &str,
    polarization: Polarization,
    dimensions: &Dimensions,
    resolver: &mut dyn Resolver,
) -> std::result::Result<PackageName, &'static str> {
    if let Some(fp) = footprint::lookup(FOOTPRINTS, package) {
        draft.set("kicad_footprint", fp);
        draft.set("package", package);
        return Ok(PackageName {
            short: package.to_string(),
            dims: String::new(),
        });
    }

    let radial = match package {
        RADIAL => Some(("Radial", true)),
        RADIAL_SMD => Some(("Radial_SMD", false)),
        _ => None,
    };

    let name = match radial {
        Some((short, with_pitch)) => {
            let dims = radial_dims(dimensions, with_pitch)?;
            let pol = match polarization {
                Polarization::Polarized => "P",
                Polarization::Unpolarized => "",
            };
            draft.set("package", format!("C{}_{}_{}", pol, short, dims));
            PackageName {
                short: short.to_string(),
                dims,
            }
        }
        None => {
            draft.set("package", package);
            PackageName {
                short: package.to_string(),
                dims: String::new(),
            }
        }
    };

    draft.set(
        "kicad_footprint",
        resolver.resolve_unknown(&part.dpn, ArtifactKind::Footprint),
    );
    Ok(name)
}

/// `D{d}_H{h}[_P{p}]`, or the name of the first missing dimension
fn radial_dims(
    dimensions: &Dimensions,
    with_pitch: bool,
) -> std::result::Result<String, &'static str> {
    let known = |value: &Option<String>, attribute: &'static str| match value {
        Some(v) if v != MISSING => Ok(v.clone()),
        _ => Err(attribute),
    };
    let diameter = known(&dimensions.diameter, "Size / Dimension")?;
    let height = known(&dimensions.height, "Height - Seated (Max)")?;
    if with_pitch {
        let pitch = known(&dimensions.pitch, "Lead Spacing")?;
        Ok(format!("D{}_H{}_P{}", diameter, height, pitch))
    } else {
        Ok(format!("D{}_H{}", diameter, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::part;
    use crate::core::footprint::ScriptedResolver;

    fn ceramic() -> DistributorPart {
        let mut p = part(
            "Capacitors",
            "",
            "Samsung Electro-Mechanics",
            "CL21B334KBFNNNE",
            "1276-1123-1-ND",
            &[
                ("Capacitance", "0.33 µF"),
                ("Tolerance", "±10%"),
                ("Voltage - Rated", "50V"),
                ("Temperature Coefficient", "X7R"),
                ("Package / Case", "0805 (2012 Metric)"),
            ],
        );
        p.family = CERAMIC.to_string();
        p
    }

    fn electrolytic(params: &[(&str, &str)]) -> DistributorPart {
        let mut p = part(
            "Capacitors",
            "",
            "Nichicon",
            "UCY2G100MPD1TD",
            "493-13313-1-ND",
            params,
        );
        p.family = ALUMINUM_ELECTROLYTIC.to_string();
        p
    }

    const ELECTROLYTIC_PARAMS: &[(&str, &str)] = &[
        ("Capacitance", "10 µF"),
        ("Tolerance", "±20%"),
        ("Voltage - Rated", "400 V"),
        ("Polarization", "Polar"),
        ("Package / Case", "Radial, Can"),
        ("Lead Spacing", "0.197\" (5.00mm)"),
        ("Size / Dimension", "0.394\" Dia (10.00mm)"),
        ("Height - Seated (Max)", "0.689\" (17.50mm)"),
    ];

    #[test]
    fn test_ceramic_from_distributor_part() {
        let mut resolver = ScriptedResolver::default();
        let comp = from_distributor_part(&ceramic(), &mut resolver)
            .unwrap()
            .unwrap();

        assert_eq!(comp.ipn(), "C_330nF_0805_10%_50V_X7R");
        assert_eq!(comp.get("capacitance"), Some("330nF"));
        assert_eq!(comp.get("package"), Some("0805"));
        assert_eq!(
            comp.get("description"),
            Some("330nF ±10%, 50V, X7R capacitor, 0805")
        );
        assert_eq!(comp.get("keywords"), Some("c cap capacitor unpolarized 330nF"));
        assert_eq!(comp.get("kicad_symbol"), Some("Device:C"));
        assert_eq!(
            comp.get("kicad_footprint"),
            Some("Capacitor_SMD:C_0805_2012Metric")
        );
        assert_eq!(comp.get("value"), Some("${Capacitance}"));
        assert!(resolver.requests.is_empty());
    }

    #[test]
    fn test_radial_electrolytic() {
        let mut resolver =
            ScriptedResolver::new(["Capacitor_THT:CP_Radial_D10.0mm_P5.00mm"]);
        let comp = from_distributor_part(&electrolytic(ELECTROLYTIC_PARAMS), &mut resolver)
            .unwrap()
            .unwrap();

        assert_eq!(
            comp.ipn(),
            "C_10μF_Radial_20%_400V_PolarizedElectrolytic_D10.0mm_H17.5mm_P5.00mm"
        );
        assert_eq!(
            comp.get("package"),
            Some("CP_Radial_D10.0mm_H17.5mm_P5.00mm")
        );
        assert_eq!(comp.get("dielectric"), Some("Polarized Electrolytic"));
        assert_eq!(
            comp.get("description"),
            Some(
                "10μF ±20%, 400V, polarized electrolytic capacitor, radial, \
                 diameter 10.0mm height 17.5mm pitch 5.00mm"
            )
        );
        assert_eq!(comp.get("keywords"), Some("c cap capacitor polarized 10μF"));
        assert_eq!(comp.get("kicad_symbol"), Some("Device:C_Polarized_US"));
        assert_eq!(
            comp.get("kicad_footprint"),
            Some("Capacitor_THT:CP_Radial_D10.0mm_P5.00mm")
        );
        assert_eq!(resolver.requests.len(), 1);
    }

    #[test]
    fn test_radial_smd_has_no_pitch() {
        let params: Vec<(&str, &str)> = ELECTROLYTIC_PARAMS
            .iter()
            .copied()
            .map(|(k, v)| match k {
                "Package / Case" => (k, "Radial, Can - SMD"),
                "Height - Seated (Max)" => (k, "0.252\" (6.40mm)"),
                _ => (k, v),
            })
            .filter(|(k, _)| *k != "Lead Spacing")
            .collect();
        let mut resolver = ScriptedResolver::default();
        let comp = from_distributor_part(&electrolytic(&params), &mut resolver)
            .unwrap()
            .unwrap();

        assert_eq!(comp.get("package"), Some("CP_Radial_SMD_D10.0mm_H6.40mm"));
        assert!(comp.ipn().ends_with("_Radial_SMD_20%_400V_PolarizedElectrolytic_D10.0mm_H6.40mm"));
        assert!(comp
            .get("description")
            .unwrap()
            .ends_with("radial smd, diameter 10.0mm height 6.40mm"));
        assert_eq!(comp.get("kicad_footprint"), Some(""));
    }

    #[test]
    fn test_radial_missing_dimension_aborts() {
        let params: Vec<(&str, &str)> = ELECTROLYTIC_PARAMS
            .iter()
            .copied()
            .filter(|(k, _)| *k != "Height - Seated (Max)")
            .collect();
        let mut resolver = ScriptedResolver::default();
        let result = from_distributor_part(&electrolytic(&params), &mut resolver).unwrap();
        assert!(result.is_none());
        assert!(resolver.requests.is_empty());
    }

    #[test]
    fn test_unknown_polarization_is_an_error() {
        let params: Vec<(&str, &str)> = ELECTROLYTIC_PARAMS
            .iter()
            .copied()
            .map(|(k, v)| if k == "Polarization" { (k, "test") } else { (k, v) })
            .collect();
        let mut resolver = ScriptedResolver::default();
        let err = from_distributor_part(&electrolytic(&params), &mut resolver).unwrap_err();
        assert!(matches!(err, PartError::InvalidEnumeratedValue { .. }));
    }

    #[test]
    fn test_unsupported_capacitor_family_skips() {
        let mut p = ceramic();
        p.family = "Film Capacitors".to_string();
        let mut resolver = ScriptedResolver::default();
        assert!(from_distributor_part(&p, &mut resolver).unwrap().is_none());
    }

    #[test]
    fn test_other_package_asks_resolver() {
        let mut p = ceramic();
        p.parameters[4].value = "Radial".to_string();
        let mut resolver = ScriptedResolver::new(["Capacitor_THT:C_Disc_D5.0mm_W2.5mm_P5.00mm"]);
        let comp = from_distributor_part(&p, &mut resolver).unwrap().unwrap();
        assert_eq!(comp.ipn(), "C_330nF_Radial_10%_50V_X7R");
        assert_eq!(comp.get("package"), Some("Radial"));
        assert_eq!(
            comp.get("kicad_footprint"),
            Some("Capacitor_THT:C_Disc_D5.0mm_W2.5mm_P5.00mm")
        );
    }
}
