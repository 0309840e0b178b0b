use std::collections::BTreeMap;

use nodal_model::{ConnectivityModel, NodeId};

use crate::netlist_types::NodeName;

/// Netlist name of every circuit node that holds a terminal. All nodes
/// touching a ground symbol collapse onto the reference node `0`.
#[derive(Debug, Clone, Default)]
pub struct NodeNaming {
    names: BTreeMap<NodeId, NodeName>,
}

impl NodeNaming {
    pub fn from_model(model: &ConnectivityModel) -> Self {
        let ground = model.ground_nodes();
        let names = model
            .nodes()
            .filter(|node| !node.terminals.is_empty())
            .map(|node| {
                let name = if ground.contains(&node.id) {
                    NodeName::ground()
                } else {
                    NodeName(format!("n{}", node.id.0))
                };
                (node.id, name)
            })
            .collect();
        Self { names }
    }

    pub fn name_of(&self, node: NodeId) -> Option<&NodeName> {
        self.names.get(&node)
    }

    pub fn has_ground(&self) -> bool {
        self.names.values().any(NodeName::is_ground)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeName)> {
        self.names.iter().map(|(id, name)| (*id, name))
    }
}

#[cfg(test)]
mod tests {
    use nodal_model::{ComponentKind, Endpoint};

    use super::*;

    #[test]
    fn test_every_ground_node_is_reference() {
        let mut model = ConnectivityModel::new();
        let v = model.add_component(ComponentKind::VoltageSource);
        let r = model.add_component(ComponentKind::Resistor);
        let g0 = model.add_component(ComponentKind::Ground);
        let g1 = model.add_component(ComponentKind::Ground);
        let top = model
            .connect(Endpoint::terminal(v.clone(), 0), Endpoint::terminal(r.clone(), 0))
            .unwrap();
        let left = model
            .connect(Endpoint::terminal(v, 1), Endpoint::terminal(g0, 0))
            .unwrap();
        let right = model
            .connect(Endpoint::terminal(r, 1), Endpoint::terminal(g1, 0))
            .unwrap();

        let naming = NodeNaming::from_model(&model);

        assert!(naming.has_ground());
        assert_eq!(naming.name_of(top.node), Some(&NodeName("n0".to_string())));
        assert_eq!(naming.name_of(left.node), Some(&NodeName::ground()));
        assert_eq!(naming.name_of(right.node), Some(&NodeName::ground()));
        assert_eq!(naming.iter().count(), 3);
    }

    #[test]
    fn test_nodes_without_terminals_are_not_named() {
        let mut model = ConnectivityModel::new();
        let v = model.add_component(ComponentKind::VoltageSource);
        let g = model.add_component(ComponentKind::Ground);
        let r = model.add_component(ComponentKind::Resistor);
        model
            .connect(Endpoint::terminal(v.clone(), 0), Endpoint::terminal(g.clone(), 0))
            .unwrap();
        model
            .connect(Endpoint::terminal(v, 1), Endpoint::terminal(g, 0))
            .unwrap();
        let bare = model
            .connect(Endpoint::terminal(r.clone(), 0), Endpoint::terminal(r.clone(), 1))
            .unwrap();
        model.remove_component(&r).unwrap();

        let naming = NodeNaming::from_model(&model);

        assert!(model.node(bare.node).is_some());
        assert_eq!(model.terminals_of(bare.node).map(|t| t.len()), Some(0));
        assert_eq!(naming.name_of(bare.node), None);
        assert_eq!(naming.iter().count(), 1);
    }

    #[test]
    fn test_no_ground() {
        let mut model = ConnectivityModel::new();
        let r = model.add_component(ComponentKind::Resistor);
        model
            .connect(Endpoint::terminal(r.clone(), 0), Endpoint::terminal(r, 1))
            .unwrap();

        assert!(!NodeNaming::from_model(&model).has_ground());
    }
}
