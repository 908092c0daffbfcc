use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActuatorState {
    Idle,
    Heating,
    Cooling,
}

impl ActuatorState {
    pub fn from_flags(heating: bool, cooling: bool) -> Self {
        match (heating, cooling) {
            (true, _) => Self::Heating,
            (false, true) => Self::Cooling,
            (false, false) => Self::Idle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Heating => "HEATING",
            Self::Cooling => "COOLING",
        }
    }

    /// Status text shown next to the temperature readout.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Heating => "Heating",
            Self::Cooling => "Cooling",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermostatSnapshot {
    #[serde(rename = "currentTemp")]
    pub current_temp_c: f64,
    #[serde(rename = "targetTemp")]
    pub target_temp_c: f64,
    pub heating: bool,
    pub cooling: bool,
    pub state: &'static str,
    #[serde(rename = "minTemp")]
    pub min_temp_c: f64,
    #[serde(rename = "maxTemp")]
    pub max_temp_c: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_from_flags() {
        assert_eq!(ActuatorState::from_flags(false, false), ActuatorState::Idle);
        assert_eq!(ActuatorState::from_flags(true, false), ActuatorState::Heating);
        assert_eq!(ActuatorState::from_flags(false, true), ActuatorState::Cooling);
    }

    #[test]
    fn labels_match_display_copy() {
        assert_eq!(ActuatorState::Heating.label(), "Heating");
        assert_eq!(ActuatorState::Cooling.label(), "Cooling");
        assert_eq!(ActuatorState::Idle.label(), "Idle");
    }
}
