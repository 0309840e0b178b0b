use std::fmt;

use log::warn;
use nodal_model::{ConnectivityModel, quantity::BaseUnit};
use serde::Serialize;

use crate::{
    config::NetlistConfig,
    error::NetlistError,
    netlist_types::{Element, ElementType, NodeName},
    node_mapping::NodeNaming,
};

/// A SPICE deck for one operating point analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Netlist {
    pub title: String,
    pub temperature: f64,
    pub nominal_temperature: f64,
    pub elements: Vec<Element>,
    #[serde(skip)]
    pub naming: NodeNaming,
}

impl Netlist {
    /// One element per resistor and voltage source. Components with a
    /// terminal that is not wired to anything are left out.
    pub fn from_model(
        model: &ConnectivityModel,
        config: &NetlistConfig,
    ) -> Result<Netlist, NetlistError> {
        let naming = NodeNaming::from_model(model);
        if !naming.has_ground() {
            return Err(NetlistError::MissingGround);
        }

        let mut elements = Vec::new();
        for component in model.components() {
            let Some(kind) = ElementType::from_kind(component.kind) else {
                continue;
            };

            let nodes: Option<Vec<NodeName>> = component
                .terminals()
                .map(|terminal| {
                    model
                        .node_of_terminal(&terminal)
                        .and_then(|node| naming.name_of(node))
                        .cloned()
                })
                .collect();
            let Some([n1, n2]) = nodes.and_then(|nodes| <[NodeName; 2]>::try_from(nodes).ok())
            else {
                warn!("{} is not fully connected, leaving it out", component.id);
                continue;
            };

            let key = kind.value_key();
            let quantity = component
                .parameter(key)
                .ok_or_else(|| NetlistError::MissingParameter {
                    component: component.id.clone(),
                    key: key.to_string(),
                })?;
            let expected = match kind {
                ElementType::Resistor => BaseUnit::Ohm,
                ElementType::VoltageSource => BaseUnit::Volt,
            };
            let value = quantity
                .base_value()
                .filter(|_| quantity.base_unit() == Some(expected))
                .ok_or_else(|| NetlistError::InvalidQuantity {
                    component: component.id.clone(),
                    key: key.to_string(),
                    value: quantity.value,
                    unit: quantity.unit.clone(),
                })?;

            elements.push(Element {
                name: format!("{}{}", kind.to_char(), component.id),
                kind,
                component: component.id.clone(),
                nodes: [n1, n2],
                value,
            });
        }

        Ok(Netlist {
            title: config.title.clone(),
            temperature: config.temperature,
            nominal_temperature: config.nominal_temperature,
            elements,
            naming,
        })
    }

    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }
}

impl fmt::Display for Netlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".title {}", self.title)?;
        writeln!(
            f,
            ".options TEMP={} TNOM={}",
            self.temperature, self.nominal_temperature
        )?;
        for element in &self.elements {
            writeln!(f, "{element}")?;
        }
        writeln!(f, ".op")?;
        writeln!(f, ".end")
    }
}

#[cfg(test)]
mod tests {
    use nodal_model::{ComponentId, ComponentKind, Endpoint, Quantity};
    use rstest::{fixture, rstest};

    use super::*;

    fn wire(model: &mut ConnectivityModel, a: (&ComponentId, usize), b: (&ComponentId, usize)) {
        model
            .connect(
                Endpoint::terminal(a.0.clone(), a.1),
                Endpoint::terminal(b.0.clone(), b.1),
            )
            .unwrap();
    }

    /// A source driving a single resistor, the bottom rail grounded.
    #[fixture]
    fn divider() -> (ConnectivityModel, ComponentId, ComponentId) {
        let mut model = ConnectivityModel::new();
        let v = model.add_component(ComponentKind::VoltageSource);
        let r = model.add_component(ComponentKind::Resistor);
        let g = model.add_component(ComponentKind::Ground);
        wire(&mut model, (&v, 0), (&r, 0));
        wire(&mut model, (&v, 1), (&r, 1));
        wire(&mut model, (&g, 0), (&r, 1));
        (model, v, r)
    }

    #[rstest]
    fn test_deck(divider: (ConnectivityModel, ComponentId, ComponentId)) {
        let (model, _, _) = divider;

        let netlist = Netlist::from_model(&model, &NetlistConfig::default()).unwrap();

        insta::assert_snapshot!(netlist.to_string(), @r"
        .title Circuit
        .options TEMP=25 TNOM=25
        RResistor-0 n0 0 100000
        VVoltageSource-0 n0 0 10000
        .op
        .end
        ");
    }

    #[rstest]
    fn test_parameters_are_scaled(divider: (ConnectivityModel, ComponentId, ComponentId)) {
        let (mut model, v, r) = divider;
        model.set_parameter(&r, "R", Quantity::new(2.0, "MOhm")).unwrap();
        model.set_parameter(&v, "V", Quantity::new(5.0, "V")).unwrap();

        let netlist = Netlist::from_model(&model, &NetlistConfig::default()).unwrap();

        assert_eq!(netlist.element("RResistor-0").unwrap().value, 2e6);
        assert_eq!(netlist.element("VVoltageSource-0").unwrap().value, 5.0);
    }

    #[rstest]
    #[case::unknown_prefix(Quantity::new(1.0, "xOhm"))]
    #[case::wrong_base_unit(Quantity::new(1.0, "kV"))]
    fn test_invalid_quantity(
        divider: (ConnectivityModel, ComponentId, ComponentId),
        #[case] quantity: Quantity,
    ) {
        let (mut model, _, r) = divider;
        model.set_parameter(&r, "R", quantity.clone()).unwrap();

        let err = Netlist::from_model(&model, &NetlistConfig::default()).unwrap_err();

        assert_eq!(
            err,
            NetlistError::InvalidQuantity {
                component: r,
                key: "R".to_string(),
                value: quantity.value,
                unit: quantity.unit,
            }
        );
    }

    #[test]
    fn test_missing_ground() {
        let mut model = ConnectivityModel::new();
        let v = model.add_component(ComponentKind::VoltageSource);
        let r = model.add_component(ComponentKind::Resistor);
        model.add_component(ComponentKind::Ground);
        wire(&mut model, (&v, 0), (&r, 0));
        wire(&mut model, (&v, 1), (&r, 1));

        assert_eq!(
            Netlist::from_model(&model, &NetlistConfig::default()).unwrap_err(),
            NetlistError::MissingGround
        );
    }

    #[rstest]
    fn test_dangling_component_is_skipped(
        divider: (ConnectivityModel, ComponentId, ComponentId),
    ) {
        let (mut model, v, _) = divider;
        let loose = model.add_component(ComponentKind::Resistor);
        wire(&mut model, (&loose, 0), (&v, 0));

        let netlist = Netlist::from_model(&model, &NetlistConfig::default()).unwrap();

        assert_eq!(netlist.elements.len(), 2);
        assert!(netlist.element("RResistor-1").is_none());
    }

    #[rstest]
    fn test_custom_title_and_temperature(
        divider: (ConnectivityModel, ComponentId, ComponentId),
    ) {
        let (model, _, _) = divider;
        let config = NetlistConfig {
            title: "Bench".to_string(),
            temperature: 27.5,
            ..Default::default()
        };

        let deck = Netlist::from_model(&model, &config).unwrap().to_string();

        assert!(deck.starts_with(".title Bench\n.options TEMP=27.5 TNOM=25\n"));
    }
}
