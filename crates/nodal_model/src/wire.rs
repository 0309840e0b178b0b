use serde::Serialize;

use crate::types::{Endpoint, NodeId, TerminalRef, WireId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wire {
    pub id: WireId,
    pub a: Endpoint,
    pub b: Endpoint,
    /// Owning circuit node. Set for every wire once `connect` has resolved it.
    pub node: Option<NodeId>,
}

impl Wire {
    pub fn endpoints(&self) -> [&Endpoint; 2] {
        [&self.a, &self.b]
    }

    pub fn terminal_endpoints(&self) -> impl Iterator<Item = &TerminalRef> {
        self.endpoints().into_iter().filter_map(Endpoint::as_terminal)
    }

    pub fn wire_endpoints(&self) -> impl Iterator<Item = WireId> + '_ {
        self.endpoints().into_iter().filter_map(Endpoint::as_wire)
    }
}
