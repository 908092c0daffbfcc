use crate::{
    error::ValidationError,
    types::{ActuatorState, ThermostatSnapshot},
};

pub const MIN_TEMP_C: f64 = 10.0;
pub const MAX_TEMP_C: f64 = 35.0;
pub const TEMP_STEP_C: f64 = 0.1;
// Band width (2 * TOLERANCE_C) must be at least one step or a tick can jump
// across it and chatter.
pub const TOLERANCE_C: f64 = 0.05;
pub const DEFAULT_TEMP_C: f64 = 20.0;
pub const SETPOINT_RESOLUTION_C: f64 = 0.1;

// Allowed drift from the 0.1° grid, in ulps of the scaled value.
const GRID_ULPS: f64 = 4.0;

/// Checks a proposed setpoint against the allowed range, then against the
/// 0.1° grid. Range failures win when both apply.
pub fn validate_setpoint(proposed: f64) -> Result<f64, ValidationError> {
    if proposed < MIN_TEMP_C || proposed > MAX_TEMP_C {
        return Err(ValidationError::OutOfRange {
            min: MIN_TEMP_C,
            max: MAX_TEMP_C,
            provided: proposed,
        });
    }

    let scaled = proposed / SETPOINT_RESOLUTION_C;
    let off_grid = (scaled - scaled.round()).abs();
    if off_grid.is_nan() || off_grid > scaled.abs() * GRID_ULPS * f64::EPSILON {
        return Err(ValidationError::InvalidGranularity);
    }

    Ok(proposed)
}

/// Single-zone thermostat. The room temperature moves one fixed step per
/// `tick` toward the setpoint; heating and cooling flags are recomputed from
/// scratch on every tick.
#[derive(Debug, Clone)]
pub struct ThermostatEngine {
    current_temp_c: f64,
    target_temp_c: f64,
    heating_active: bool,
    cooling_active: bool,
}

impl Default for ThermostatEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ThermostatEngine {
    pub fn new() -> Self {
        Self {
            current_temp_c: DEFAULT_TEMP_C,
            target_temp_c: DEFAULT_TEMP_C,
            heating_active: false,
            cooling_active: false,
        }
    }

    pub fn current_temp_c(&self) -> f64 {
        self.current_temp_c
    }

    pub fn target_temp_c(&self) -> f64 {
        self.target_temp_c
    }

    pub fn is_heating(&self) -> bool {
        self.heating_active
    }

    pub fn is_cooling(&self) -> bool {
        self.cooling_active
    }

    pub fn min_temp_c(&self) -> f64 {
        MIN_TEMP_C
    }

    pub fn max_temp_c(&self) -> f64 {
        MAX_TEMP_C
    }

    pub fn actuator_state(&self) -> ActuatorState {
        ActuatorState::from_flags(self.heating_active, self.cooling_active)
    }

    /// Commits a new setpoint. Current temperature and the actuator flags
    /// are left alone until the next `tick`.
    pub fn set_target(&mut self, proposed: f64) -> Result<(), ValidationError> {
        self.target_temp_c = validate_setpoint(proposed)?;
        Ok(())
    }

    pub fn tick(&mut self) -> ActuatorState {
        let delta = self.current_temp_c - self.target_temp_c;

        if delta < -TOLERANCE_C {
            self.current_temp_c += TEMP_STEP_C;
            self.heating_active = true;
            self.cooling_active = false;
        } else if delta > TOLERANCE_C {
            self.current_temp_c -= TEMP_STEP_C;
            self.heating_active = false;
            self.cooling_active = true;
        } else {
            self.heating_active = false;
            self.cooling_active = false;
        }

        self.actuator_state()
    }

    pub fn snapshot(&self) -> ThermostatSnapshot {
        ThermostatSnapshot {
            current_temp_c: self.current_temp_c,
            target_temp_c: self.target_temp_c,
            heating: self.heating_active,
            cooling: self.cooling_active,
            state: self.actuator_state().as_str(),
            min_temp_c: self.min_temp_c(),
            max_temp_c: self.max_temp_c(),
        }
    }
}
