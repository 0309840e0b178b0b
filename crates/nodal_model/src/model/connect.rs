use log::{error, info};
use serde::Serialize;

use super::ConnectivityModel;
use crate::{
    config::MergePolicy,
    error::{ModelError, NotFoundError, TopologyError},
    events::ModelEvent,
    types::{Endpoint, NodeId, TerminalRef, WireId},
    wire::Wire,
};

/// How a new wire changed the node structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectOutcome {
    /// Two free terminals formed a new node.
    Created,
    /// A free terminal joined an existing node.
    Grew,
    /// The wire shorted two nodes together.
    Merged { absorbed: NodeId },
    /// Both ends were already in the same node; only the wire was added.
    Parallel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub wire: WireId,
    pub node: NodeId,
    pub outcome: ConnectOutcome,
}

#[derive(Debug)]
enum Target {
    New,
    Existing(NodeId),
    Merge { survivor: NodeId, absorbed: NodeId },
}

/// Everything `connect` needs to know, worked out before any state changes.
#[derive(Debug)]
struct Plan {
    target: Target,
    /// Terminals named by the endpoints that are not in any node yet.
    free: Vec<TerminalRef>,
}

impl ConnectivityModel {
    /// Draw a wire between two endpoints and resolve the node it belongs to.
    ///
    /// The set of distinct nodes the endpoints touch decides the outcome:
    /// none creates a node, one grows it (or is a parallel connection when no
    /// new terminal joins), two are merged. Anything more is rejected with
    /// `TopologyError` and the model is left untouched.
    ///
    /// A parallel connection only adds the wire to the node's `wires`; its
    /// terminals and data stay as they were.
    pub fn connect(&mut self, a: Endpoint, b: Endpoint) -> Result<Connection, ModelError> {
        let plan = self.plan_connection(&a, &b).inspect_err(|err| {
            if let ModelError::Topology(topology) = err {
                error!("{topology}");
            }
        })?;
        Ok(self.apply_connection(a, b, plan))
    }

    fn plan_connection(&self, a: &Endpoint, b: &Endpoint) -> Result<Plan, ModelError> {
        if a.same_attachment(b) {
            return Err(TopologyError::SelfConnection {
                endpoint: a.clone(),
            }
            .into());
        }

        let mut touched: Vec<NodeId> = Vec::new();
        let mut free: Vec<TerminalRef> = Vec::new();
        let mut touch = |node: NodeId| {
            if !touched.contains(&node) {
                touched.push(node);
            }
        };

        for endpoint in [a, b] {
            match endpoint {
                Endpoint::Terminal(terminal) => {
                    self.check_terminal(terminal)?;
                    match self.node_of_terminal(terminal) {
                        Some(node) => touch(node),
                        None => free.push(terminal.clone()),
                    }
                }
                Endpoint::Wire { wire, .. } => {
                    let wire = self.wires.get(wire).ok_or(NotFoundError::Wire(*wire))?;
                    if let Some(node) = wire.node {
                        touch(node);
                    }
                    for terminal in wire.terminal_endpoints() {
                        if let Some(node) = self.node_of_terminal(terminal) {
                            touch(node);
                        }
                    }
                }
            }
        }

        if touched.len() > 2 {
            touched.sort();
            return Err(TopologyError::TooManyNodes {
                a: a.clone(),
                b: b.clone(),
                nodes: touched,
            }
            .into());
        }

        let target = match (touched.first().copied(), touched.get(1).copied()) {
            (None, _) => Target::New,
            (Some(node), None) => Target::Existing(node),
            (Some(first), Some(second)) => {
                let (survivor, absorbed) = match self.config.merge_policy {
                    MergePolicy::LowerIdAbsorbs => (first.min(second), first.max(second)),
                    MergePolicy::FirstEndpointAbsorbs => (first, second),
                };
                Target::Merge { survivor, absorbed }
            }
        };

        Ok(Plan { target, free })
    }

    fn apply_connection(&mut self, a: Endpoint, b: Endpoint, plan: Plan) -> Connection {
        let (node, outcome) = match plan.target {
            Target::New => {
                let node = self.create_node();
                info!("created {node}");
                self.push_event(ModelEvent::NodeCreated(node));
                (node, ConnectOutcome::Created)
            }
            Target::Existing(node) if plan.free.is_empty() => (node, ConnectOutcome::Parallel),
            Target::Existing(node) => (node, ConnectOutcome::Grew),
            Target::Merge { survivor, absorbed } => {
                self.merge_nodes(survivor, absorbed);
                (survivor, ConnectOutcome::Merged { absorbed })
            }
        };

        if !plan.free.is_empty() {
            for terminal in &plan.free {
                self.terminal_to_node.insert(terminal.clone(), node);
            }
            if let Some(entry) = self.nodes.get_mut(&node) {
                entry.terminals.extend(plan.free.iter().cloned());
            }
            if outcome != ConnectOutcome::Created {
                info!("{node} grew by {} terminal(s)", plan.free.len());
                self.push_event(ModelEvent::NodeGrew {
                    node,
                    terminals: plan.free,
                });
            }
        }

        let wire = WireId(self.next_wire);
        self.next_wire += 1;
        self.wires.insert(
            wire,
            Wire {
                id: wire,
                a,
                b,
                node: Some(node),
            },
        );
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.wires.insert(wire);
        }
        self.push_event(ModelEvent::WireAdded { wire, node });

        if outcome == ConnectOutcome::Parallel {
            info!("parallel connection in {node} through {wire}");
            self.push_event(ModelEvent::ParallelConnection { node, wire });
        }

        Connection {
            wire,
            node,
            outcome,
        }
    }

    /// `survivor` takes over the terminals, wires and data of `absorbed`,
    /// which is deleted. Data already on `survivor` wins.
    fn merge_nodes(&mut self, survivor: NodeId, absorbed: NodeId) {
        let Some(gone) = self.nodes.remove(&absorbed) else {
            return;
        };
        for terminal in &gone.terminals {
            self.terminal_to_node.insert(terminal.clone(), survivor);
        }
        for wire in &gone.wires {
            if let Some(wire) = self.wires.get_mut(wire) {
                wire.node = Some(survivor);
            }
        }
        if let Some(node) = self.nodes.get_mut(&survivor) {
            node.terminals.extend(gone.terminals);
            node.wires.extend(gone.wires);
            for (key, value) in gone.data {
                node.data.entry(key).or_insert(value);
            }
        }
        info!("short circuit: {survivor} absorbed {absorbed}");
        self.push_event(ModelEvent::NodesMerged { survivor, absorbed });
    }
}
