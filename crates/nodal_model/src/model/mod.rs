use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::{debug, info};

use crate::{
    component::{Component, ComponentKind},
    config::ModelConfig,
    error::{ConsistencyError, ModelError, NotFoundError},
    events::ModelEvent,
    node::CircuitNode,
    quantity::Quantity,
    types::{ComponentId, NodeId, TerminalRef, WireId},
    wire::Wire,
};

mod connect;
mod disconnect;

pub use connect::{ConnectOutcome, Connection};

/// Components, wires and the circuit nodes they form.
///
/// All cross references are ids into the arenas below. `terminal_to_node` is
/// a cache of `nodes[*].terminals` and is kept in step by every mutation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectivityModel {
    config: ModelConfig,
    components: BTreeMap<ComponentId, Component>,
    wires: BTreeMap<WireId, Wire>,
    nodes: BTreeMap<NodeId, CircuitNode>,
    terminal_to_node: HashMap<TerminalRef, NodeId>,
    counters: BTreeMap<ComponentKind, usize>,
    next_wire: usize,
    next_node: usize,
    events: Vec<ModelEvent>,
}

impl ConnectivityModel {
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default())
    }

    pub fn with_config(config: ModelConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Place a component with its default parameters. Ids are never reused.
    pub fn add_component(&mut self, kind: ComponentKind) -> ComponentId {
        let counter = self.counters.entry(kind).or_insert(0);
        let id = ComponentId::new(kind, *counter);
        *counter += 1;

        self.components
            .insert(id.clone(), Component::new(id.clone(), kind));
        debug!("placed {id}");
        self.push_event(ModelEvent::ComponentAdded(id.clone()));
        id
    }

    /// Remove a component. Its terminals leave their nodes but the nodes and
    /// any wires drawn to those terminals stay put.
    pub fn remove_component(&mut self, id: &ComponentId) -> Result<(), ModelError> {
        let component = self
            .components
            .remove(id)
            .ok_or_else(|| NotFoundError::Component(id.clone()))?;

        for terminal in component.terminals() {
            let Some(node_id) = self.terminal_to_node.remove(&terminal) else {
                continue;
            };
            if let Some(node) = self.nodes.get_mut(&node_id) {
                node.terminals.remove(&terminal);
            }
            info!("{terminal} detached from {node_id}");
            self.push_event(ModelEvent::NodeShrank {
                node: node_id,
                terminals: vec![terminal],
            });
        }

        info!("removed {id}");
        self.push_event(ModelEvent::ComponentRemoved(id.clone()));
        Ok(())
    }

    pub fn set_parameter(
        &mut self,
        id: &ComponentId,
        key: &str,
        value: Quantity,
    ) -> Result<(), ModelError> {
        let component = self
            .components
            .get_mut(id)
            .ok_or_else(|| NotFoundError::Component(id.clone()))?;
        if component.kind.parameter_spec(key).is_none() {
            return Err(NotFoundError::Parameter {
                component: id.clone(),
                key: key.to_string(),
            }
            .into());
        }
        debug!("{id}: {key} = {value}");
        component.parameters.insert(key.to_string(), value);
        self.push_event(ModelEvent::ComponentDataChanged(id.clone()));
        Ok(())
    }

    pub fn node_of(&self, component: &ComponentId, index: usize) -> Option<NodeId> {
        self.node_of_terminal(&TerminalRef::new(component.clone(), index))
    }

    pub fn node_of_terminal(&self, terminal: &TerminalRef) -> Option<NodeId> {
        self.terminal_to_node.get(terminal).copied()
    }

    pub fn record_node_result(
        &mut self,
        node: NodeId,
        key: &str,
        value: Quantity,
    ) -> Result<(), ModelError> {
        let entry = self
            .nodes
            .get_mut(&node)
            .ok_or(NotFoundError::Node(node))?;
        entry.data.insert(key.to_string(), value);
        self.push_event(ModelEvent::NodeDataChanged(node));
        Ok(())
    }

    pub fn record_component_result(
        &mut self,
        component: &ComponentId,
        key: &str,
        value: Quantity,
    ) -> Result<(), ModelError> {
        let entry = self
            .components
            .get_mut(component)
            .ok_or_else(|| NotFoundError::Component(component.clone()))?;
        entry.results.insert(key.to_string(), value);
        self.push_event(ModelEvent::ComponentDataChanged(component.clone()));
        Ok(())
    }

    /// Forget every simulation result on nodes and components.
    pub fn clear_results(&mut self) {
        for node in self.nodes.values_mut() {
            node.data.clear();
        }
        for component in self.components.values_mut() {
            component.results.clear();
        }
        self.push_event(ModelEvent::ResultsCleared);
    }

    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&CircuitNode> {
        self.nodes.get(&id)
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.values()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CircuitNode> {
        self.nodes.values()
    }

    pub fn terminals_of(&self, node: NodeId) -> Option<&BTreeSet<TerminalRef>> {
        self.nodes.get(&node).map(|n| &n.terminals)
    }

    /// Nodes holding the terminal of a ground symbol.
    pub fn ground_nodes(&self) -> BTreeSet<NodeId> {
        self.components
            .values()
            .filter(|c| c.kind == ComponentKind::Ground)
            .flat_map(|c| c.terminals())
            .filter_map(|t| self.node_of_terminal(&t))
            .collect()
    }

    /// The terminal sets of all nodes, without node ids. Two models wired in a
    /// different order compare equal here when they are electrically the same.
    pub fn partition(&self) -> BTreeSet<BTreeSet<TerminalRef>> {
        self.nodes
            .values()
            .filter(|n| !n.terminals.is_empty())
            .map(|n| n.terminals.clone())
            .collect()
    }

    pub fn drain_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let mut owner: HashMap<&TerminalRef, NodeId> = HashMap::new();
        for node in self.nodes.values() {
            if node.wires.is_empty() {
                return Err(ConsistencyError::EmptyNode(node.id));
            }
            for wire_id in &node.wires {
                let wire = self.wires.get(wire_id).ok_or(ConsistencyError::UnknownWire {
                    node: node.id,
                    wire: *wire_id,
                })?;
                if wire.node != Some(node.id) {
                    return Err(ConsistencyError::WireMismatch {
                        wire: *wire_id,
                        claimed: wire.node,
                        listed: Some(node.id),
                    });
                }
            }
            for terminal in &node.terminals {
                if !self.components.contains_key(&terminal.component) {
                    return Err(ConsistencyError::DanglingTerminal(terminal.clone()));
                }
                if let Some(first) = owner.insert(terminal, node.id) {
                    return Err(ConsistencyError::DuplicateTerminal {
                        terminal: terminal.clone(),
                        first,
                        second: node.id,
                    });
                }
                let indexed = self.node_of_terminal(terminal);
                if indexed != Some(node.id) {
                    return Err(ConsistencyError::IndexMismatch {
                        terminal: terminal.clone(),
                        indexed,
                        listed: Some(node.id),
                    });
                }
            }
        }

        for (terminal, node_id) in &self.terminal_to_node {
            let listed = owner.get(terminal).copied();
            if listed != Some(*node_id) {
                return Err(ConsistencyError::IndexMismatch {
                    terminal: terminal.clone(),
                    indexed: Some(*node_id),
                    listed,
                });
            }
        }

        for wire in self.wires.values() {
            let listed = wire
                .node
                .filter(|id| self.nodes.get(id).is_some_and(|n| n.wires.contains(&wire.id)));
            if listed.is_none() {
                return Err(ConsistencyError::WireMismatch {
                    wire: wire.id,
                    claimed: wire.node,
                    listed,
                });
            }
        }

        Ok(())
    }

    fn push_event(&mut self, event: ModelEvent) {
        if self.config.record_events {
            self.events.push(event);
        }
    }

    fn check_terminal(&self, terminal: &TerminalRef) -> Result<(), NotFoundError> {
        let component = self
            .components
            .get(&terminal.component)
            .ok_or_else(|| NotFoundError::Component(terminal.component.clone()))?;
        if terminal.index >= component.terminal_count() {
            return Err(NotFoundError::Terminal {
                component: terminal.component.clone(),
                index: terminal.index,
                count: component.terminal_count(),
            });
        }
        Ok(())
    }

    /// A terminal endpoint of some wire that still points at a live component.
    fn is_live(&self, terminal: &TerminalRef) -> bool {
        self.components
            .get(&terminal.component)
            .is_some_and(|c| terminal.index < c.terminal_count())
    }

    fn create_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(id, CircuitNode::new(id));
        id
    }

    fn remove_node(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        for terminal in &node.terminals {
            self.terminal_to_node.remove(terminal);
        }
        info!("removed {id}");
        self.push_event(ModelEvent::NodeRemoved(id));
    }
}
