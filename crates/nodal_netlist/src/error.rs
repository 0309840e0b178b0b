use nodal_model::{ComponentId, ModelError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetlistError {
    #[error("no ground symbol is connected to the circuit")]
    MissingGround,

    #[error("{component} has no {key} parameter")]
    MissingParameter { component: ComponentId, key: String },

    #[error("{component}: cannot use {key} = {value} {unit}")]
    InvalidQuantity {
        component: ComponentId,
        key: String,
        value: f64,
        unit: String,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Netlist(#[from] NetlistError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("operating point analysis failed: {0}")]
    Analysis(String),
}
