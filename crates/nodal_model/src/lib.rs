//! Electrical connectivity for a schematic editor.
//!
//! Wires are drawn one at a time between component terminals or onto other
//! wires. [`ConnectivityModel`] keeps the terminals partitioned into circuit
//! nodes as that happens, merging nodes on a short circuit and splitting them
//! again when a wire is removed.

pub mod component;
pub mod config;
pub mod error;
pub mod events;
mod model;
pub mod node;
pub mod quantity;
pub mod types;
mod union_find;
pub mod wire;

pub use component::{Component, ComponentKind, KindInfo};
pub use config::{MergePolicy, ModelConfig};
pub use error::{ConsistencyError, ModelError, NotFoundError, TopologyError};
pub use events::ModelEvent;
pub use model::{ConnectOutcome, Connection, ConnectivityModel};
pub use node::CircuitNode;
pub use quantity::Quantity;
pub use types::{ComponentId, Endpoint, NodeId, Point, TerminalRef, WireId};
pub use wire::Wire;
