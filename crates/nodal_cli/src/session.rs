use log::debug;
use nodal_model::{
    CircuitNode, Component, ConnectOutcome, ConnectivityModel, ModelConfig, ModelError, Wire,
};
use nodal_netlist::{Netlist, NetlistConfig, NetlistError};
use serde::Serialize;
use thiserror::Error;

use crate::script::Command;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Netlist(#[from] NetlistError),
}

/// Applies script commands to a model and formats what they did.
#[derive(Debug, Default)]
pub struct Session {
    model: ConnectivityModel,
    netlist: NetlistConfig,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    components: Vec<&'a Component>,
    wires: Vec<&'a Wire>,
    nodes: Vec<&'a CircuitNode>,
}

impl Session {
    pub fn new(config: ModelConfig, netlist: NetlistConfig) -> Self {
        Self {
            model: ConnectivityModel::with_config(config),
            netlist,
        }
    }

    pub fn model(&self) -> &ConnectivityModel {
        &self.model
    }

    /// Run one command. The returned text is what the command reports back,
    /// empty for commands that report nothing.
    pub fn execute(&mut self, command: &Command) -> Result<String, CommandError> {
        let output = match command {
            Command::Place(kind) => self.model.add_component(*kind).to_string(),
            Command::Wire(a, b) => {
                let connection = self.model.connect(a.clone(), b.clone())?;
                let outcome = match connection.outcome {
                    ConnectOutcome::Created => "new node".to_string(),
                    ConnectOutcome::Grew => "node grew".to_string(),
                    ConnectOutcome::Merged { absorbed } => format!("absorbed {absorbed}"),
                    ConnectOutcome::Parallel => "parallel".to_string(),
                };
                format!("{} -> {} ({outcome})", connection.wire, connection.node)
            }
            Command::Unwire(wire) => {
                self.model.disconnect(*wire)?;
                String::new()
            }
            Command::Delete(id) => {
                self.model.remove_component(id)?;
                String::new()
            }
            Command::Set {
                component,
                key,
                value,
            } => {
                self.model.set_parameter(component, key, value.clone())?;
                String::new()
            }
            Command::Show => self.node_table(),
            Command::Netlist => self.netlist()?.to_string(),
        };

        for event in self.model.drain_events() {
            debug!("{event:?}");
        }
        Ok(output)
    }

    /// One line per node: its terminals, then its wires.
    pub fn node_table(&self) -> String {
        let mut out = String::new();
        for node in self.model.nodes() {
            let terminals: Vec<String> = node.terminals.iter().map(|t| t.to_string()).collect();
            let wires: Vec<String> = node.wires.iter().map(|w| w.to_string()).collect();
            out.push_str(&format!(
                "{}: {} [{}]",
                node.id,
                terminals.join(" "),
                wires.join(" ")
            ));
            if let Some(v) = node.voltage() {
                out.push_str(&format!(" V={:.4} {}", v.value, v.unit));
            }
            out.push('\n');
        }
        out
    }

    pub fn netlist(&self) -> Result<Netlist, NetlistError> {
        Netlist::from_model(&self.model, &self.netlist)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Snapshot {
            components: self.model.components().collect(),
            wires: self.model.wires().collect(),
            nodes: self.model.nodes().collect(),
        })
    }
}
