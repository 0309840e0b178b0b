//! Turns a [`nodal_model::ConnectivityModel`] into a SPICE netlist and feeds
//! operating point results back onto the model.

pub mod config;
pub mod error;
mod netlist;
pub mod netlist_types;
mod node_mapping;
mod simulate;

pub use config::NetlistConfig;
pub use error::{NetlistError, SimulationError};
pub use netlist::Netlist;
pub use netlist_types::{Element, ElementType, NodeName};
pub use node_mapping::NodeNaming;
pub use simulate::{OperatingPoint, Simulator, simulate};
