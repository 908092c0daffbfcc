pub mod config;
pub mod error;
pub mod thermostat;
pub mod types;

pub use config::{RuntimeConfig, ThermostatConfig};
pub use error::ValidationError;
pub use thermostat::{
    validate_setpoint, ThermostatEngine, DEFAULT_TEMP_C, MAX_TEMP_C, MIN_TEMP_C,
    SETPOINT_RESOLUTION_C, TEMP_STEP_C, TOLERANCE_C,
};
pub use types::{ActuatorState, ThermostatSnapshot};
