use std::collections::{BTreeSet, HashMap};

use log::info;

use super::ConnectivityModel;
use crate::{
    error::{ModelError, NotFoundError},
    events::ModelEvent,
    types::{Endpoint, NodeId, TerminalRef, WireId},
    union_find::UnionFind,
};

impl ConnectivityModel {
    /// Remove a wire and rebuild its node from the wires that are left.
    ///
    /// Terminals only reachable through the removed wire leave the node. If
    /// the remaining wires fall apart into several pieces the node splits: the
    /// piece holding the lowest wire id keeps the node id and its data, every
    /// other piece becomes a new node. The node is deleted with its last wire.
    ///
    /// Wires branching off the removed wire are kept; their end on it simply
    /// stops conducting. A node can be left with wires but no terminals when
    /// the components it joined were removed; netlists skip such nodes.
    pub fn disconnect(&mut self, wire_id: WireId) -> Result<(), ModelError> {
        let wire = self
            .wires
            .remove(&wire_id)
            .ok_or(NotFoundError::Wire(wire_id))?;
        info!("removed {wire_id}");
        self.push_event(ModelEvent::WireRemoved(wire_id));

        if let Some(node_id) = wire.node {
            if let Some(node) = self.nodes.get_mut(&node_id) {
                node.wires.remove(&wire_id);
            }
            self.rebuild_node(node_id);
        }
        Ok(())
    }

    fn rebuild_node(&mut self, node_id: NodeId) {
        let Some(node) = self.nodes.get(&node_id) else {
            return;
        };
        if node.wires.is_empty() {
            self.remove_node(node_id);
            return;
        }

        let before = node.terminals.clone();
        let wires: Vec<WireId> = node.wires.iter().copied().collect();
        let pieces = self.connected_pieces(&wires);

        let mut after: BTreeSet<TerminalRef> = BTreeSet::new();
        let mut split_into = Vec::new();
        for (i, piece) in pieces.into_iter().enumerate() {
            let id = if i == 0 {
                node_id
            } else {
                let id = self.create_node();
                split_into.push(id);
                id
            };

            let terminals: BTreeSet<TerminalRef> = piece
                .iter()
                .filter_map(|w| self.wires.get(w))
                .flat_map(|w| w.terminal_endpoints())
                .filter(|t| self.is_live(t))
                .cloned()
                .collect();

            for wire in &piece {
                if let Some(wire) = self.wires.get_mut(wire) {
                    wire.node = Some(id);
                }
            }
            for terminal in &terminals {
                self.terminal_to_node.insert(terminal.clone(), id);
            }
            after.extend(terminals.iter().cloned());
            if let Some(node) = self.nodes.get_mut(&id) {
                node.wires = piece.into_iter().collect();
                node.terminals = terminals;
            }
        }

        let dropped: Vec<TerminalRef> = before.difference(&after).cloned().collect();
        for terminal in &dropped {
            self.terminal_to_node.remove(terminal);
        }
        if !dropped.is_empty() {
            info!("{} terminal(s) left {node_id}", dropped.len());
            self.push_event(ModelEvent::NodeShrank {
                node: node_id,
                terminals: dropped,
            });
        }
        if !split_into.is_empty() {
            info!("{node_id} split into {} pieces", split_into.len() + 1);
            for id in &split_into {
                self.push_event(ModelEvent::NodeCreated(*id));
            }
            self.push_event(ModelEvent::NodeSplit {
                from: node_id,
                into: split_into,
            });
        }
    }

    /// Group `wires` (ascending) into electrically connected pieces. Wires
    /// touch when they share a terminal, including the terminal of a deleted
    /// component, or when one ends on the other. Pieces come out ordered by
    /// their lowest wire id.
    fn connected_pieces(&self, wires: &[WireId]) -> Vec<Vec<WireId>> {
        let index: HashMap<WireId, usize> =
            wires.iter().enumerate().map(|(i, w)| (*w, i)).collect();
        let mut junctions: HashMap<&TerminalRef, usize> = HashMap::new();
        let mut links: Vec<(usize, usize)> = Vec::new();

        for (i, wire_id) in wires.iter().enumerate() {
            let Some(wire) = self.wires.get(wire_id) else {
                continue;
            };
            for endpoint in wire.endpoints() {
                match endpoint {
                    Endpoint::Terminal(terminal) => {
                        let next = wires.len() + junctions.len();
                        let j = *junctions.entry(terminal).or_insert(next);
                        links.push((i, j));
                    }
                    Endpoint::Wire { wire: other, .. } => {
                        if let Some(&j) = index.get(other) {
                            links.push((i, j));
                        }
                    }
                }
            }
        }

        let mut uf = UnionFind::new(wires.len() + junctions.len());
        for (x, y) in links {
            uf.union(x, y);
        }
        uf.groups_below(wires.len())
            .into_iter()
            .map(|group| group.into_iter().map(|i| wires[i]).collect())
            .collect()
    }
}
