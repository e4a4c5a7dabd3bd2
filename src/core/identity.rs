//! Component families and the IPN naming convention

use std::fmt;
use std::str::FromStr;

use crate::core::error::PartError;

/// Every component family the database knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentFamily {
    Resistor,
    Capacitor,
    OpAmp,
    Microcontroller,
    VoltageRegulator,
    Diode,
    Led,
    Bjt,
    Connector,
    Comparator,
    Switch,
    Graphic,
}

impl ComponentFamily {
    /// Storage table name for the family
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentFamily::Resistor => "resistor",
            ComponentFamily::Capacitor => "capacitor",
            ComponentFamily::OpAmp => "opamp",
            ComponentFamily::Microcontroller => "microcontroller",
            ComponentFamily::VoltageRegulator => "voltage_regulator",
            ComponentFamily::Diode => "diode",
            ComponentFamily::Led => "led",
            ComponentFamily::Bjt => "transistor_bjt",
            ComponentFamily::Connector => "connector",
            ComponentFamily::Comparator => "comparator",
            ComponentFamily::Switch => "switch",
            ComponentFamily::Graphic => "graphic",
        }
    }

    /// IPN prefix, i.e. the text before the first underscore of an IPN
    pub fn ipn_prefix(&self) -> &'static str {
        match self {
            ComponentFamily::Resistor => "R",
            ComponentFamily::Capacitor => "C",
            ComponentFamily::OpAmp => "OpAmp",
            ComponentFamily::Microcontroller => "MCU",
            ComponentFamily::VoltageRegulator => "VReg",
            ComponentFamily::Diode => "D",
            ComponentFamily::Led => "LED",
            ComponentFamily::Bjt => "BJT",
            ComponentFamily::Connector => "Conn",
            ComponentFamily::Comparator => "Comp",
            ComponentFamily::Switch => "SW",
            ComponentFamily::Graphic => "Graphic",
        }
    }

    pub fn all() -> &'static [ComponentFamily] {
        &[
            ComponentFamily::Resistor,
            ComponentFamily::Capacitor,
            ComponentFamily::OpAmp,
            ComponentFamily::Microcontroller,
            ComponentFamily::VoltageRegulator,
            ComponentFamily::Diode,
            ComponentFamily::Led,
            ComponentFamily::Bjt,
            ComponentFamily::Connector,
            ComponentFamily::Comparator,
            ComponentFamily::Switch,
            ComponentFamily::Graphic,
        ]
    }

    /// Determine the family from an IPN such as `R_100_0603_1%_0.1W_ThinFilm`
    pub fn from_ipn(ipn: &str) -> Result<Self, PartError> {
        let prefix = ipn.split_once('_').map(|(p, _)| p).unwrap_or_default();
        Self::all()
            .iter()
            .find(|f| !prefix.is_empty() && f.ipn_prefix() == prefix)
            .copied()
            .ok_or_else(|| PartError::UnrecognizedFamily {
                what: "IPN",
                tag: ipn.to_string(),
            })
    }
}

impl fmt::Display for ComponentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ComponentFamily {
    type Err = PartError;

    /// Parse a table name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|f| f.as_str() == s)
            .copied()
            .ok_or_else(|| PartError::UnrecognizedFamily {
                what: "table",
                tag: s.to_string(),
            })
    }
}

/// Join IPN segments with underscores and strip all whitespace
pub fn build_ipn(segments: &[&str]) -> String {
    segments
        .join("_")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Candidate IPN for the n-th increment of a duplicated base IPN
pub fn with_suffix(base: &str, n: u32) -> String {
    format!("{}_{}", base, n)
}
