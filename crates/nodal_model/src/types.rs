use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::ComponentKind;

/// Human readable component id, e.g. `Resistor-3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub String);

impl ComponentId {
    pub fn new(kind: ComponentKind, count: usize) -> Self {
        ComponentId(format!("{}-{count}", kind.name()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        ComponentId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(pub usize);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wire-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node-{}", self.0)
    }
}

/// A connection point on a component. Terminals are never allocated on their
/// own, they are always referred to by this pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerminalRef {
    pub component: ComponentId,
    pub index: usize,
}

impl TerminalRef {
    pub fn new(component: impl Into<ComponentId>, index: usize) -> Self {
        Self {
            component: component.into(),
            index,
        }
    }
}

impl fmt::Display for TerminalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.component, self.index)
    }
}

/// Canvas position. Only carried along so the UI can redraw branch points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One end of a wire: either a component terminal or a point on an existing wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Endpoint {
    Terminal(TerminalRef),
    Wire { wire: WireId, at: Point },
}

impl Endpoint {
    pub fn terminal(component: impl Into<ComponentId>, index: usize) -> Self {
        Endpoint::Terminal(TerminalRef::new(component, index))
    }

    pub fn wire(wire: WireId) -> Self {
        Endpoint::Wire {
            wire,
            at: Point::default(),
        }
    }

    pub fn wire_at(wire: WireId, at: Point) -> Self {
        Endpoint::Wire { wire, at }
    }

    pub fn as_terminal(&self) -> Option<&TerminalRef> {
        match self {
            Endpoint::Terminal(terminal) => Some(terminal),
            Endpoint::Wire { .. } => None,
        }
    }

    pub fn as_wire(&self) -> Option<WireId> {
        match self {
            Endpoint::Terminal(_) => None,
            Endpoint::Wire { wire, .. } => Some(*wire),
        }
    }

    /// Two endpoints name the same attachment if they are the same terminal or
    /// sit anywhere on the same wire.
    pub fn same_attachment(&self, other: &Endpoint) -> bool {
        match (self, other) {
            (Endpoint::Terminal(a), Endpoint::Terminal(b)) => a == b,
            (Endpoint::Wire { wire: a, .. }, Endpoint::Wire { wire: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl From<TerminalRef> for Endpoint {
    fn from(terminal: TerminalRef) -> Self {
        Endpoint::Terminal(terminal)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Terminal(terminal) => write!(f, "{terminal}"),
            Endpoint::Wire { wire, at } => write!(f, "{wire}@({}, {})", at.x, at.y),
        }
    }
}
