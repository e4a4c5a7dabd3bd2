//! Headers, sockets, jacks and other interconnects
//!
//! Connector descriptions are assembled from whichever mechanical attributes
//! the distributor reports; nothing beyond the manufacturer and part numbers
//! is required.

use super::{text, Component, Draft, Field};
use crate::core::distributor::DistributorPart;
use crate::core::error::Result;
use crate::core::footprint::{ArtifactKind, Resolver};
use crate::core::identity::{build_ipn, ComponentFamily};

pub const FIELDS: &[Field] = &[text("package")];

/// Mechanical attributes gathered from the parameter list
#[derive(Debug, Default)]
struct Mechanics {
    positions: String,
    rows: String,
    mounting: String,
    orientation: String,
    connector_type: String,
    contact: String,
    pitch: String,
    shrouding: String,
    latch: String,
    polarizing_key: String,
    mating_diameter: String,
    signal_lines: String,
    switch: String,
}

impl Mechanics {
    fn from_part(part: &DistributorPart) -> Self {
        let mut m = Mechanics::default();
        for (name, value) in part.params() {
            let lower = value.to_lowercase();
            match name {
                "Number of Positions" => m.positions = value.to_string(),
                "Number of Rows" => m.rows = value.to_string(),
                "Mounting Type" => {
                    m.mounting = if value.contains("Through Hole") {
                        "Through Hole"
                    } else if value.contains("Surface Mount") {
                        "Surface Mount"
                    } else {
                        "unknown mounting type"
                    }
                    .to_string();
                    m.orientation = if value.contains("Right Angle") {
                        "Horizontal"
                    } else {
                        "Vertical"
                    }
                    .to_string();
                }
                "Pitch - Mating" => {
                    m.pitch = if value.contains("0.100\"") {
                        "2.54mm".to_string()
                    } else {
                        value.to_string()
                    }
                }
                "Shrouding" => {
                    m.shrouding = if lower.contains("unshrouded") {
                        "Unshrouded"
                    } else if lower.contains("shrouded") {
                        "Shrouded"
                    } else {
                        ""
                    }
                    .to_string()
                }
                "Industry Recognized Mating Diameter" => {
                    m.mating_diameter = if value.contains("3.50mm") {
                        "3.5mm".to_string()
                    } else if value.contains("6.35mm") {
                        "6.35mm".to_string()
                    } else if value.contains("2.50mm") {
                        "2.5mm".to_string()
                    } else {
                        value.to_string()
                    }
                }
                "Connector Type" => {
                    m.connector_type = if lower.contains("header") {
                        "Header".to_string()
                    } else {
                        value.to_string()
                    }
                }
                "Contact Type" => {
                    // "female" contains "male", so test it first
                    m.contact = if lower.contains("female") {
                        "Sockets"
                    } else if lower.contains("male") {
                        "Pins"
                    } else {
                        ""
                    }
                    .to_string()
                }
                "Fastening Type" if value.contains("Latch") => m.latch = "Latch".to_string(),
                "Features" if value.contains("Polarizing Key") => {
                    m.polarizing_key = "Polarizing Key".to_string()
                }
                "Signal Lines" => m.signal_lines = value.to_string(),
                "Internal Switch" => m.switch = value.to_string(),
                _ => {}
            }
        }
        m
    }

    /// `2x04` for eight positions in two rows
    fn grid(&self) -> Option<String> {
        let positions: u32 = self.positions.trim().parse().ok()?;
        let rows: u32 = self.rows.trim().parse().ok()?;
        if rows == 0 {
            return None;
        }
        Some(format!("{}x{:02}", rows, positions / rows))
    }
}

fn describe(manufacturer: &str, series: &str, m: &Mechanics) -> String {
    let mut head: Vec<String> = Vec::new();
    if !manufacturer.is_empty() {
        head.push(manufacturer.to_string());
    }
    if !series.is_empty() && series != "-" {
        head.push(series.to_string());
    }
    if let Some(grid) = m.grid() {
        head.push(grid);
    }
    for word in [&m.shrouding, &m.mating_diameter] {
        if !word.is_empty() {
            head.push(word.clone());
        }
    }
    head.push(m.connector_type.clone());

    let mut parts = vec![head.join(" ")];
    for item in [&m.contact, &m.pitch] {
        if !item.is_empty() {
            parts.push(item.clone());
        }
    }
    parts.push(m.mounting.clone());
    parts.push(m.orientation.clone());
    for item in [&m.latch, &m.polarizing_key, &m.signal_lines, &m.switch] {
        if !item.is_empty() {
            parts.push(item.clone());
        }
    }
    parts.join(", ")
}

pub(crate) fn from_distributor_part(
    part: &DistributorPart,
    resolver: &mut dyn Resolver,
) -> Result<Option<Component>> {
    let mut draft = Draft::from_part(ComponentFamily::Connector, part);
    let mechanics = Mechanics::from_part(part);

    draft.set(
        "IPN",
        build_ipn(&["Conn", draft.get("manufacturer"), part.mpn.as_str()]),
    );
    draft.set(
        "description",
        describe(draft.get("manufacturer"), &part.series, &mechanics),
    );
    draft.set("keywords", "");
    draft.set("value", "${MPN}");
    draft.set(
        "kicad_symbol",
        resolver.resolve_unknown(&part.dpn, ArtifactKind::Symbol),
    );
    draft.set(
        "kicad_footprint",
        resolver.resolve_unknown(&part.dpn, ArtifactKind::Footprint),
    );
    draft.set("package", mechanics.connector_type);

    draft.finish().map(Some)
}
