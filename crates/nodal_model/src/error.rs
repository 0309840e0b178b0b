use thiserror::Error;

use crate::types::{ComponentId, Endpoint, NodeId, TerminalRef, WireId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    #[error("cannot connect {endpoint} to itself")]
    SelfConnection { endpoint: Endpoint },

    #[error("connecting {a} to {b} would join {} distinct nodes at once", .nodes.len())]
    TooManyNodes {
        a: Endpoint,
        b: Endpoint,
        nodes: Vec<NodeId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("component {0} not found")]
    Component(ComponentId),

    #[error("terminal {index} not found on {component} (it has {count} terminals)")]
    Terminal {
        component: ComponentId,
        index: usize,
        count: usize,
    },

    #[error("wire {0} not found")]
    Wire(WireId),

    #[error("node {0} not found")]
    Node(NodeId),

    #[error("{component} has no parameter {key}")]
    Parameter { component: ComponentId, key: String },
}

/// Broken internal bookkeeping, reported by `check_consistency`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("terminal {terminal} is listed in both {first} and {second}")]
    DuplicateTerminal {
        terminal: TerminalRef,
        first: NodeId,
        second: NodeId,
    },

    #[error("terminal {terminal} is indexed to {indexed:?} but listed in {listed:?}")]
    IndexMismatch {
        terminal: TerminalRef,
        indexed: Option<NodeId>,
        listed: Option<NodeId>,
    },

    #[error("terminal {0} belongs to a component that no longer exists")]
    DanglingTerminal(TerminalRef),

    #[error("wire {wire} claims {claimed:?} but is listed in {listed:?}")]
    WireMismatch {
        wire: WireId,
        claimed: Option<NodeId>,
        listed: Option<NodeId>,
    },

    #[error("node {node} lists unknown wire {wire}")]
    UnknownWire { node: NodeId, wire: WireId },

    #[error("node {0} has no wires")]
    EmptyNode(NodeId),
}
