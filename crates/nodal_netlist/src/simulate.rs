use log::{debug, error, info};
use nodal_model::{ConnectivityModel, Quantity};
use serde::{Deserialize, Serialize};

use crate::{config::NetlistConfig, error::SimulationError, netlist::Netlist};

/// Result of an operating point analysis, keyed by netlist node names and
/// element names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub voltages: Vec<(String, f64)>,
    pub currents: Vec<(String, f64)>,
}

impl OperatingPoint {
    /// Names are compared ignoring ASCII case, simulators tend to lowercase them.
    pub fn voltage(&self, node: &str) -> Option<f64> {
        lookup(&self.voltages, node)
    }

    pub fn current(&self, element: &str) -> Option<f64> {
        lookup(&self.currents, element)
    }
}

fn lookup(values: &[(String, f64)], name: &str) -> Option<f64> {
    values
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| *v)
}

/// Anything that can solve a deck for its DC operating point.
pub trait Simulator {
    fn operating_point(&self, netlist: &Netlist) -> Result<OperatingPoint, SimulationError>;
}

impl<F> Simulator for F
where
    F: Fn(&Netlist) -> Result<OperatingPoint, SimulationError>,
{
    fn operating_point(&self, netlist: &Netlist) -> Result<OperatingPoint, SimulationError> {
        self(netlist)
    }
}

fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

/// Run an operating point analysis and store the results on the model: `V`
/// on every node, `I` on every element the simulator reports a current for.
///
/// Old results are cleared first. If building the deck or the analysis fails
/// nothing new is recorded.
pub fn simulate<S>(
    model: &mut ConnectivityModel,
    simulator: &S,
    config: &NetlistConfig,
) -> Result<OperatingPoint, SimulationError>
where
    S: Simulator + ?Sized,
{
    model.clear_results();
    let netlist = Netlist::from_model(model, config)?;
    info!("simulating {} element(s)", netlist.elements.len());

    let op = simulator
        .operating_point(&netlist)
        .inspect_err(|err| error!("{err}"))?;

    for (node, name) in netlist.naming.iter() {
        let volts = if name.is_ground() {
            Some(0.0)
        } else {
            op.voltage(&name.0)
        };
        match volts {
            Some(v) => model.record_node_result(node, "V", Quantity::new(round4(v), "V"))?,
            None => debug!("no voltage reported for {name}"),
        }
    }
    for element in &netlist.elements {
        if let Some(i) = op.current(&element.name) {
            model.record_component_result(&element.component, "I", Quantity::new(round4(i), "A"))?;
        }
    }

    info!("simulation finished");
    Ok(op)
}

#[cfg(test)]
mod tests {
    use nodal_model::{ComponentId, ComponentKind, Endpoint, NodeId};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::error::NetlistError;

    struct Fixed(OperatingPoint);

    impl Simulator for Fixed {
        fn operating_point(&self, _: &Netlist) -> Result<OperatingPoint, SimulationError> {
            Ok(self.0.clone())
        }
    }

    fn connect(model: &mut ConnectivityModel, a: (&ComponentId, usize), b: (&ComponentId, usize)) {
        model
            .connect(
                Endpoint::terminal(a.0.clone(), a.1),
                Endpoint::terminal(b.0.clone(), b.1),
            )
            .unwrap();
    }

    #[fixture]
    fn circuit() -> (ConnectivityModel, ComponentId, ComponentId) {
        let mut model = ConnectivityModel::new();
        let v = model.add_component(ComponentKind::VoltageSource);
        let r = model.add_component(ComponentKind::Resistor);
        let g = model.add_component(ComponentKind::Ground);
        connect(&mut model, (&v, 0), (&r, 0));
        connect(&mut model, (&v, 1), (&r, 1));
        connect(&mut model, (&g, 0), (&v, 1));
        (model, v, r)
    }

    fn solved() -> OperatingPoint {
        OperatingPoint {
            voltages: vec![("N0".to_string(), 10000.0)],
            currents: vec![
                ("vvoltagesource-0".to_string(), -0.1),
                ("RResistor-0".to_string(), 0.099999994),
            ],
        }
    }

    #[rstest]
    fn test_results_are_written_back(circuit: (ConnectivityModel, ComponentId, ComponentId)) {
        let (mut model, v, r) = circuit;

        let op = simulate(&mut model, &Fixed(solved()), &NetlistConfig::default()).unwrap();

        assert_eq!(op, solved());
        assert_eq!(
            model.node(NodeId(0)).unwrap().voltage(),
            Some(&Quantity::new(10000.0, "V"))
        );
        assert_eq!(
            model.node(NodeId(1)).unwrap().voltage(),
            Some(&Quantity::new(0.0, "V"))
        );
        assert_eq!(
            model.component(&v).unwrap().result("I"),
            Some(&Quantity::new(-0.1, "A"))
        );
        assert_eq!(
            model.component(&r).unwrap().result("I"),
            Some(&Quantity::new(0.1, "A"))
        );
    }

    #[rstest]
    fn test_failed_analysis_records_nothing(
        circuit: (ConnectivityModel, ComponentId, ComponentId),
    ) {
        let (mut model, _, _) = circuit;
        simulate(&mut model, &Fixed(solved()), &NetlistConfig::default()).unwrap();
        let partition = model.partition();

        let failing = |_: &Netlist| -> Result<OperatingPoint, SimulationError> {
            Err(SimulationError::Analysis("singular matrix".to_string()))
        };
        let err = simulate(&mut model, &failing, &NetlistConfig::default()).unwrap_err();

        assert_eq!(err, SimulationError::Analysis("singular matrix".to_string()));
        assert!(model.nodes().all(|n| n.data.is_empty()));
        assert!(model.components().all(|c| c.results.is_empty()));
        assert_eq!(model.partition(), partition);
    }

    #[test]
    fn test_missing_ground_is_reported() {
        let mut model = ConnectivityModel::new();
        let r = model.add_component(ComponentKind::Resistor);
        connect(&mut model, (&r, 0), (&r, 1));

        let err = simulate(&mut model, &Fixed(solved()), &NetlistConfig::default()).unwrap_err();

        assert_eq!(err, SimulationError::Netlist(NetlistError::MissingGround));
    }

    #[test]
    fn test_simulator_sees_the_deck() {
        let mut model = ConnectivityModel::new();
        let v = model.add_component(ComponentKind::VoltageSource);
        let g = model.add_component(ComponentKind::Ground);
        connect(&mut model, (&v, 0), (&g, 0));
        connect(&mut model, (&v, 1), (&g, 0));

        let echo = |netlist: &Netlist| -> Result<OperatingPoint, SimulationError> {
            Ok(OperatingPoint {
                voltages: Vec::new(),
                currents: netlist
                    .elements
                    .iter()
                    .map(|e| (e.name.clone(), e.value))
                    .collect(),
            })
        };
        simulate(&mut model, &echo, &NetlistConfig::default()).unwrap();

        assert_eq!(
            model.component(&v).unwrap().result("I"),
            Some(&Quantity::new(10000.0, "A"))
        );
    }

    #[rstest]
    #[case(0.123449, 0.1234)]
    #[case(-0.00005, -0.0001)]
    #[case(12.5, 12.5)]
    fn test_round4(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(round4(value), expected);
    }
}
