use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermostatConfig {
    pub tick_interval_ms: u64,
    pub message_timeout_ms: u64,
    pub max_input_len: usize,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
            message_timeout_ms: 3_000,
            max_input_len: 32,
        }
    }
}

impl ThermostatConfig {
    pub fn sanitize(&mut self) {
        self.tick_interval_ms = self.tick_interval_ms.clamp(50, 60_000);
        self.message_timeout_ms = self.message_timeout_ms.clamp(500, 60_000);
        self.max_input_len = self.max_input_len.clamp(1, 256);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub thermostat: ThermostatConfig,
}

impl RuntimeConfig {
    pub fn from_json_slice(raw: &[u8]) -> Result<Self, serde_json::Error> {
        let mut runtime = serde_json::from_slice::<RuntimeConfig>(raw)?;
        runtime.thermostat.sanitize();
        Ok(runtime)
    }
}
