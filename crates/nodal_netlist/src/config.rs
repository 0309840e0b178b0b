use serde::{Deserialize, Serialize};

/// Settings for the generated deck and the operating point run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetlistConfig {
    pub title: String,
    /// Circuit temperature in °C.
    pub temperature: f64,
    /// Temperature the device parameters were measured at, in °C.
    pub nominal_temperature: f64,
}

impl Default for NetlistConfig {
    fn default() -> Self {
        Self {
            title: "Circuit".to_string(),
            temperature: 25.0,
            nominal_temperature: 25.0,
        }
    }
}
