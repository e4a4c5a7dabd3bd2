//! Canonical component records
//!
//! A [`Component`] is an immutable row: a family tag plus one canonical
//! string per column. The column list of a family is the shared base fields
//! followed by the family's own fields, and that single list drives the
//! record layout, table creation, SQL inserts and CSV output alike.

pub mod bjt;
pub mod capacitor;
pub mod comparator;
pub mod connector;
pub mod diode;
pub mod led;
pub mod microcontroller;
pub mod opamp;
pub mod resistor;
pub mod switch;
pub mod voltage_regulator;

use console::style;
use rusqlite::types::Value;
use std::collections::HashMap;

use crate::core::distributor::DistributorPart;
use crate::core::error::{PartError, Result};
use crate::core::footprint::Resolver;
use crate::core::identity::ComponentFamily;

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Canonical text
    Text,
    /// Boolean stored as integer 0/1
    Flag,
}

/// One column of a family's record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

pub const fn text(name: &'static str) -> Field {
    Field {
        name,
        kind: FieldKind::Text,
    }
}

pub const fn flag(name: &'static str) -> Field {
    Field {
        name,
        kind: FieldKind::Flag,
    }
}

pub const PRIMARY_KEY: &str = "IPN";

/// Columns every family starts with, in storage order
pub const BASE_FIELDS: &[Field] = &[
    text(PRIMARY_KEY),
    text("datasheet"),
    text("description"),
    text("keywords"),
    text("value"),
    flag("exclude_from_bom"),
    flag("exclude_from_board"),
    text("kicad_symbol"),
    text("kicad_footprint"),
    text("manufacturer"),
    text("MPN"),
    text("distributor1"),
    text("DPN1"),
    text("distributor2"),
    text("DPN2"),
];

/// Columns shown by `show --minimal-columns`
pub const MINIMAL_COLUMNS: &[&str] = &[
    "distributor1",
    "DPN1",
    "distributor2",
    "DPN2",
    "kicad_symbol",
    "kicad_footprint",
];

/// Conflict handling for the generated INSERT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    Reject,
    Replace,
}

impl ComponentFamily {
    /// Family-specific columns, after the base fields
    pub fn specific_fields(&self) -> &'static [Field] {
        match self {
            ComponentFamily::Resistor => resistor::FIELDS,
            ComponentFamily::Capacitor => capacitor::FIELDS,
            ComponentFamily::OpAmp => opamp::FIELDS,
            ComponentFamily::Microcontroller => microcontroller::FIELDS,
            ComponentFamily::VoltageRegulator => voltage_regulator::FIELDS,
            ComponentFamily::Diode => diode::FIELDS,
            ComponentFamily::Led => led::FIELDS,
            ComponentFamily::Bjt => bjt::FIELDS,
            ComponentFamily::Connector => connector::FIELDS,
            ComponentFamily::Comparator => comparator::FIELDS,
            ComponentFamily::Switch => switch::FIELDS,
            ComponentFamily::Graphic => &[],
        }
    }

    /// All columns in storage order
    pub fn fields(&self) -> impl Iterator<Item = &'static Field> {
        BASE_FIELDS.iter().chain(self.specific_fields().iter())
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.fields().map(|f| f.name).collect()
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for the family's table
    pub fn create_table_sql(&self) -> String {
        let columns: Vec<String> = self
            .fields()
            .map(|f| {
                if f.name == PRIMARY_KEY {
                    format!("{} PRIMARY KEY", f.name)
                } else {
                    f.name.to_string()
                }
            })
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {}({})",
            self.as_str(),
            columns.join(", ")
        )
    }

    /// Pick the family for a distributor part from its taxonomy
    pub fn for_distributor_part(part: &DistributorPart) -> Result<Self> {
        let category = part.taxonomy.category.as_str();
        let sub = part.subcategory();
        let family = match category {
            "Resistors" => Some(ComponentFamily::Resistor),
            "Capacitors" => Some(ComponentFamily::Capacitor),
            "Optoelectronics" => Some(ComponentFamily::Led),
            "Connectors, Interconnects" => Some(ComponentFamily::Connector),
            "Switches" => Some(ComponentFamily::Switch),
            "Integrated Circuits (ICs)" => {
                if sub.contains("OP Amps") {
                    Some(ComponentFamily::OpAmp)
                } else if sub.contains("Microcontrollers") {
                    Some(ComponentFamily::Microcontroller)
                } else if sub.contains("Voltage Regulators") {
                    Some(ComponentFamily::VoltageRegulator)
                } else if sub.contains("Comparators") {
                    Some(ComponentFamily::Comparator)
                } else {
                    None
                }
            }
            "Discrete Semiconductor Products" => {
                if sub.contains("Diodes - Rectifiers") || sub.contains("Diodes - Zener") {
                    Some(ComponentFamily::Diode)
                } else if sub.contains("Bipolar (BJT)") {
                    Some(ComponentFamily::Bjt)
                } else {
                    None
                }
            }
            _ => None,
        };
        family.ok_or_else(|| PartError::UnrecognizedFamily {
            what: "distributor category",
            tag: if sub.is_empty() {
                category.to_string()
            } else {
                format!("{} / {}", category, sub)
            },
        })
    }
}

/// Canonical, immutable component record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    family: ComponentFamily,
    /// One value per column, aligned with `family.fields()`
    values: Vec<String>,
}

impl Component {
    /// Build a record from a distributor part
    ///
    /// `Ok(None)` means the part cannot be turned into a complete record;
    /// the reason has already been reported on stderr.
    pub fn from_distributor_part(
        part: &DistributorPart,
        resolver: &mut dyn Resolver,
    ) -> Result<Option<Component>> {
        let family = ComponentFamily::for_distributor_part(part)?;
        tracing::debug!(dpn = %part.dpn, %family, "building component");
        match family {
            ComponentFamily::Resistor => resistor::from_distributor_part(part, resolver),
            ComponentFamily::Capacitor => capacitor::from_distributor_part(part, resolver),
            ComponentFamily::OpAmp => opamp::from_distributor_part(part, resolver),
            ComponentFamily::Microcontroller => {
                microcontroller::from_distributor_part(part, resolver)
            }
            ComponentFamily::VoltageRegulator => {
                voltage_regulator::from_distributor_part(part, resolver)
            }
            ComponentFamily::Diode => diode::from_distributor_part(part, resolver),
            ComponentFamily::Led => led::from_distributor_part(part, resolver),
            ComponentFamily::Bjt => bjt::from_distributor_part(part, resolver),
            ComponentFamily::Connector => connector::from_distributor_part(part, resolver),
            ComponentFamily::Comparator => comparator::from_distributor_part(part, resolver),
            ComponentFamily::Switch => switch::from_distributor_part(part, resolver),
            ComponentFamily::Graphic => Err(PartError::UnrecognizedFamily {
                what: "distributor category",
                tag: part.taxonomy.category.clone(),
            }),
        }
    }

    /// Build a record from already-canonical column values
    ///
    /// The family comes from the IPN prefix. Every column must be present,
    /// except the two flags, which default to 0.
    pub fn from_dict(fields: &HashMap<String, String>) -> Result<Component> {
        let ipn = fields
            .get(PRIMARY_KEY)
            .ok_or_else(|| PartError::MissingRequiredAttribute {
                part: "<unnamed>".to_string(),
                attribute: PRIMARY_KEY.to_string(),
            })?;
        let family = ComponentFamily::from_ipn(ipn)?;

        for key in fields.keys() {
            if !family.fields().any(|f| f.name == key.as_str()) {
                tracing::warn!(column = %key, table = family.as_str(), "ignoring unknown column");
            }
        }

        let values = family
            .fields()
            .map(|field| match (fields.get(field.name), field.kind) {
                (Some(v), FieldKind::Text) => Ok(v.clone()),
                (Some(v), FieldKind::Flag) => parse_flag(field.name, v),
                (None, FieldKind::Flag) => Ok("0".to_string()),
                (None, FieldKind::Text) => Err(PartError::MissingRequiredAttribute {
                    part: ipn.clone(),
                    attribute: field.name.to_string(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Component { family, values })
    }

    pub fn family(&self) -> ComponentFamily {
        self.family
    }

    pub fn table(&self) -> &'static str {
        self.family.as_str()
    }

    pub fn ipn(&self) -> &str {
        &self.values[0]
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.family
            .fields()
            .position(|f| f.name == name)
            .map(|i| self.values[i].as_str())
    }

    /// (column, value) pairs in storage order
    pub fn columns(&self) -> impl Iterator<Item = (&'static Field, &str)> {
        self.family
            .fields()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Copy of this record under a different IPN
    pub fn with_ipn(&self, ipn: impl Into<String>) -> Component {
        let mut values = self.values.clone();
        values[0] = ipn.into();
        Component {
            family: self.family,
            values,
        }
    }

    /// Copy of this record with one column overwritten
    pub fn with_field(&self, name: &str, value: impl Into<String>) -> Result<Component> {
        let index = self
            .family
            .fields()
            .position(|f| f.name == name)
            .ok_or_else(|| PartError::MissingRequiredAttribute {
                part: self.ipn().to_string(),
                attribute: name.to_string(),
            })?;
        let mut values = self.values.clone();
        values[index] = value.into();
        Ok(Component {
            family: self.family,
            values,
        })
    }

    /// True when every column except the IPN matches
    pub fn same_content(&self, other: &Component) -> bool {
        self.family == other.family && self.values[1..] == other.values[1..]
    }

    /// Parameterized INSERT plus its named parameters
    pub fn to_sql(&self, conflict: Conflict) -> (String, Vec<(String, Value)>) {
        let names = self.family.column_names();
        let command = match conflict {
            Conflict::Reject => "INSERT",
            Conflict::Replace => "INSERT OR REPLACE",
        };
        let sql = format!(
            "{} INTO {} ({}) VALUES(:{})",
            command,
            self.table(),
            names.join(","),
            names.join(", :")
        );
        let params = self
            .columns()
            .map(|(field, value)| {
                let value = match field.kind {
                    FieldKind::Text => Value::Text(value.to_string()),
                    FieldKind::Flag => Value::Integer(if value == "1" { 1 } else { 0 }),
                };
                (format!(":{}", field.name), value)
            })
            .collect();
        (sql, params)
    }

    /// CSV text with an optional header row and an optional value row
    pub fn to_csv(&self, header: bool, body: bool) -> Result<String> {
        let mut writer = csv::Writer::from_writer(vec![]);
        if header {
            writer.write_record(self.family.column_names())?;
        }
        if body {
            writer.write_record(&self.values)?;
        }
        writer.flush()?;
        let bytes = writer
            .into_inner()
            .map_err(|e| PartError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok("0".to_string()),
        "1" | "true" | "yes" => Ok("1".to_string()),
        _ => Err(PartError::InvalidEnumeratedValue {
            field: if name == "exclude_from_bom" {
                "exclude_from_bom flag"
            } else {
                "exclude_from_board flag"
            },
            value: raw.to_string(),
        }),
    }
}

/// Short manufacturer names used in IPNs and descriptions
const SHORT_MANUFACTURER_NAMES: &[(&str, &str)] = &[("Amphenol ICC (FCI)", "Amphenol")];

pub fn short_manufacturer(name: &str) -> &str {
    SHORT_MANUFACTURER_NAMES
        .iter()
        .find(|(long, _)| *long == name)
        .map(|(_, short)| *short)
        .unwrap_or(name)
}

/// Column values collected while a family constructor runs
pub(crate) struct Draft {
    family: ComponentFamily,
    values: HashMap<&'static str, String>,
}

impl Draft {
    /// Base columns every distributor-sourced record shares
    pub(crate) fn from_part(family: ComponentFamily, part: &DistributorPart) -> Self {
        let mut draft = Draft {
            family,
            values: HashMap::new(),
        };
        draft.set("datasheet", &part.datasheet);
        draft.set("manufacturer", short_manufacturer(&part.manufacturer));
        draft.set("MPN", &part.mpn);
        draft.set("distributor1", &part.distributor);
        draft.set("DPN1", &part.dpn);
        draft.set("distributor2", "");
        draft.set("DPN2", "");
        draft.set("exclude_from_bom", "0");
        draft.set("exclude_from_board", "0");
        draft
    }

    pub(crate) fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    /// Current value, empty when unset
    pub(crate) fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub(crate) fn finish(mut self) -> Result<Component> {
        let ipn = self.get(PRIMARY_KEY).to_string();
        let part = if ipn.is_empty() {
            self.get("DPN1").to_string()
        } else {
            ipn
        };
        let family = self.family;
        let values = family
            .fields()
            .map(|f| {
                self.values
                    .remove(f.name)
                    .ok_or_else(|| PartError::MissingRequiredAttribute {
                        part: part.clone(),
                        attribute: f.name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Component { family, values })
    }
}

/// Report a part that cannot become a complete record, and skip it
pub(crate) fn skip(part: &DistributorPart, reason: PartError) -> Result<Option<Component>> {
    eprintln!(
        "{} Skipping {}: {}",
        style("✗").red(),
        style(&part.dpn).cyan(),
        reason
    );
    Ok(None)
}

pub(crate) fn missing(part: &DistributorPart, attribute: &str) -> PartError {
    PartError::MissingRequiredAttribute {
        part: part.dpn.clone(),
        attribute: attribute.to_string(),
    }
}

/// Word used in descriptions for a unit count
pub(crate) fn unit_count_word(count: &str) -> String {
    match count.trim() {
        "1" => "Single".to_string(),
        "2" => "Dual".to_string(),
        "4" => "Quad".to_string(),
        other => format!("{}x", other),
    }
}
