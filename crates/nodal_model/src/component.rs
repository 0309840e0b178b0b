use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    quantity::Quantity,
    types::{ComponentId, TerminalRef},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    Resistor,
    VoltageSource,
    Ground,
}

#[derive(Debug)]
pub struct ParameterSpec {
    pub key: &'static str,
    pub default_value: f64,
    pub default_unit: &'static str,
}

/// Static facts about a kind of component.
#[derive(Debug)]
pub struct KindInfo {
    pub name: &'static str,
    pub terminal_count: usize,
    /// Leading letter of the element name in a SPICE deck. `None` for kinds
    /// that never become an element (ground only marks the reference node).
    pub spice_prefix: Option<char>,
    pub parameters: &'static [ParameterSpec],
}

const RESISTOR: KindInfo = KindInfo {
    name: "Resistor",
    terminal_count: 2,
    spice_prefix: Some('R'),
    parameters: &[ParameterSpec {
        key: "R",
        default_value: 100.0,
        default_unit: "kOhm",
    }],
};

const VOLTAGE_SOURCE: KindInfo = KindInfo {
    name: "VoltageSource",
    terminal_count: 2,
    spice_prefix: Some('V'),
    parameters: &[ParameterSpec {
        key: "V",
        default_value: 10.0,
        default_unit: "kV",
    }],
};

const GROUND: KindInfo = KindInfo {
    name: "Ground",
    terminal_count: 1,
    spice_prefix: None,
    parameters: &[],
};

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::Resistor,
        ComponentKind::VoltageSource,
        ComponentKind::Ground,
    ];

    pub fn info(self) -> &'static KindInfo {
        match self {
            ComponentKind::Resistor => &RESISTOR,
            ComponentKind::VoltageSource => &VOLTAGE_SOURCE,
            ComponentKind::Ground => &GROUND,
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn terminal_count(self) -> usize {
        self.info().terminal_count
    }

    pub fn parameter_spec(self, key: &str) -> Option<&'static ParameterSpec> {
        self.info().parameters.iter().find(|p| p.key == key)
    }

    pub fn from_str(s: &str) -> Option<ComponentKind> {
        match s.to_lowercase().as_str() {
            "resistor" | "r" => Some(ComponentKind::Resistor),
            "voltagesource" | "voltage_source" | "v" => Some(ComponentKind::VoltageSource),
            "ground" | "gnd" => Some(ComponentKind::Ground),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub parameters: BTreeMap<String, Quantity>,
    /// Filled in after a simulation run, e.g. `I`.
    pub results: BTreeMap<String, Quantity>,
}

impl Component {
    pub(crate) fn new(id: ComponentId, kind: ComponentKind) -> Self {
        let parameters = kind
            .info()
            .parameters
            .iter()
            .map(|p| {
                (
                    p.key.to_string(),
                    Quantity::new(p.default_value, p.default_unit),
                )
            })
            .collect();
        Self {
            id,
            kind,
            parameters,
            results: BTreeMap::new(),
        }
    }

    pub fn terminal_count(&self) -> usize {
        self.kind.terminal_count()
    }

    pub fn terminal(&self, index: usize) -> Option<TerminalRef> {
        (index < self.terminal_count()).then(|| TerminalRef::new(self.id.clone(), index))
    }

    pub fn terminals(&self) -> impl Iterator<Item = TerminalRef> + '_ {
        (0..self.terminal_count()).map(|index| TerminalRef::new(self.id.clone(), index))
    }

    pub fn parameter(&self, key: &str) -> Option<&Quantity> {
        self.parameters.get(key)
    }

    pub fn result(&self, key: &str) -> Option<&Quantity> {
        self.results.get(key)
    }
}
