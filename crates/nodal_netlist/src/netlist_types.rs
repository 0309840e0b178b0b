use std::fmt;

use nodal_model::{ComponentId, ComponentKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeName(pub String);

impl NodeName {
    pub fn ground() -> Self {
        NodeName("0".to_string())
    }

    pub fn is_ground(&self) -> bool {
        self.0 == "0"
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementType {
    Resistor,
    VoltageSource,
}

impl ElementType {
    /// `None` for kinds that never become an element.
    pub fn from_kind(kind: ComponentKind) -> Option<ElementType> {
        kind.info().spice_prefix.and_then(ElementType::from_char)
    }

    pub fn from_char(c: char) -> Option<ElementType> {
        match c {
            'R' => Some(ElementType::Resistor),
            'V' => Some(ElementType::VoltageSource),
            _ => None,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            ElementType::Resistor => 'R',
            ElementType::VoltageSource => 'V',
        }
    }

    /// The parameter carrying the element value.
    pub fn value_key(&self) -> &'static str {
        match self {
            ElementType::Resistor => "R",
            ElementType::VoltageSource => "V",
        }
    }
}

/// One line of the deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub name: String,
    pub kind: ElementType,
    pub component: ComponentId,
    pub nodes: [NodeName; 2],
    /// In Ohm for resistors, Volt for sources.
    pub value: f64,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.nodes[0], self.nodes[1], self.value
        )
    }
}
