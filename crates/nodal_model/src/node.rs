use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
    quantity::Quantity,
    types::{NodeId, TerminalRef, WireId},
};

/// A set of terminals held at the same potential, together with the wires
/// that join them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitNode {
    pub id: NodeId,
    pub terminals: BTreeSet<TerminalRef>,
    pub wires: BTreeSet<WireId>,
    /// Simulation results, e.g. `V`.
    pub data: BTreeMap<String, Quantity>,
}

impl CircuitNode {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            terminals: BTreeSet::new(),
            wires: BTreeSet::new(),
            data: BTreeMap::new(),
        }
    }

    pub fn contains(&self, terminal: &TerminalRef) -> bool {
        self.terminals.contains(terminal)
    }

    pub fn voltage(&self) -> Option<&Quantity> {
        self.data.get("V")
    }
}
