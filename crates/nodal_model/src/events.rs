use serde::Serialize;

use crate::types::{ComponentId, NodeId, TerminalRef, WireId};

/// Change notifications queued by the model after every successful mutation.
/// The controller drains them with `ConnectivityModel::drain_events`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ModelEvent {
    ComponentAdded(ComponentId),
    ComponentRemoved(ComponentId),
    WireAdded { wire: WireId, node: NodeId },
    WireRemoved(WireId),
    NodeCreated(NodeId),
    NodeGrew { node: NodeId, terminals: Vec<TerminalRef> },
    NodeShrank { node: NodeId, terminals: Vec<TerminalRef> },
    NodesMerged { survivor: NodeId, absorbed: NodeId },
    NodeSplit { from: NodeId, into: Vec<NodeId> },
    NodeRemoved(NodeId),
    ParallelConnection { node: NodeId, wire: WireId },
    NodeDataChanged(NodeId),
    ComponentDataChanged(ComponentId),
    ResultsCleared,
}
