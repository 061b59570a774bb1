use thiserror::Error;

/// Plant error.
#[derive(Debug, Error, PartialEq)]
pub enum PlantError {
    #[error("Invalid time constant: {0}")]
    InvalidTimeConstant(f64),
}

/// Simulated first-order thermal plant (a heated body losing heat to ambient).
#[derive(Debug, Clone)]
pub struct ThermalPlant {
    pub ambient: f64,    // Ambient temperature
    time_constant: f64,  // Cooling time constant (s)
    heater_gain: f64,    // Heating rate per unit of power (deg/s)
    temperature: f64,    // Current temperature
}

impl ThermalPlant {
    /// Create a new plant resting at ambient temperature.
    pub fn new(ambient: f64, time_constant: f64, heater_gain: f64) -> Result<Self, PlantError> {
        if time_constant.is_nan() || time_constant <= 0.0 {
            return Err(PlantError::InvalidTimeConstant(time_constant));
        }
        Ok(Self {
            ambient,
            time_constant,
            heater_gain,
            temperature: ambient,
        })
    }

    /// Advance the simulation by `dt` seconds with the given heater power.
    pub fn step(&mut self, power: f64, dt: f64) -> f64 {
        let cooling = (self.ambient - self.temperature) / self.time_constant;
        self.temperature += (cooling + self.heater_gain * power) * dt;
        self.temperature
    }

    /// Get the current temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Temperature the plant settles at under constant power.
    pub fn steady_state(&self, power: f64) -> f64 {
        self.ambient + self.heater_gain * self.time_constant * power
    }
}
