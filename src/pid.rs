use thiserror::Error;

const DEFAULT_MIN_I: f64 = -100.0;
const DEFAULT_MAX_I: f64 = 100.0;
const DEFAULT_MIN_OUT: f64 = 0.0;
const DEFAULT_MAX_OUT: f64 = 100.0;

/// PID configuration error.
#[derive(Debug, Error, PartialEq)]
pub enum PidError {
    #[error("Invalid integral limits: min {min}, max {max}")]
    InvalidIntegralLimits { min: f64, max: f64 },
    #[error("Invalid output limits: min {min}, max {max}")]
    InvalidOutputLimits { min: f64, max: f64 },
}

/// Discrete-time PID controller.
///
/// The error is measured as `actual - setpoint`. A direct-acting controller
/// returns `bias + weighted`, a reverse-acting one `bias - weighted`, where
/// `weighted` is the sum of the three gained terms.
///
/// Only the integral is clamped. `min_out` and `max_out` are kept for the
/// caller, see [`Pid::clamp_output`].
#[derive(Debug, Clone, PartialEq)]
pub struct Pid {
    pub p_factor: f64, // Proportional coefficient
    pub i_factor: f64, // Integral coefficient
    pub d_factor: f64, // Derivative coefficient
    pub bias: f64,     // Output bias
    pub min_i: f64,    // Minimum integral
    pub max_i: f64,    // Maximum integral
    pub min_out: f64,  // Minimum output
    pub max_out: f64,  // Maximum output
    pub reverse: bool, // Reverse-action loop
    last_err: f64,     // Previous error
    last_i: f64,       // Previous integral
}

impl Pid {
    /// Create a new direct-acting PID controller with zero bias.
    pub fn new(p: f64, i: f64, d: f64) -> Self {
        Self {
            p_factor: p,
            i_factor: i,
            d_factor: d,
            bias: 0.0,
            min_i: DEFAULT_MIN_I,
            max_i: DEFAULT_MAX_I,
            min_out: DEFAULT_MIN_OUT,
            max_out: DEFAULT_MAX_OUT,
            reverse: false,
            last_err: 0.0,
            last_i: 0.0,
        }
    }

    /// Set the output bias.
    pub fn with_bias(self, bias: f64) -> Self {
        Self { bias, ..self }
    }

    /// Set the action direction.
    pub fn with_reverse(self, reverse: bool) -> Self {
        Self { reverse, ..self }
    }

    /// Set the integral clamp range.
    pub fn with_integral_limits(self, min: f64, max: f64) -> Result<Self, PidError> {
        if !limits_valid(min, max) {
            return Err(PidError::InvalidIntegralLimits { min, max });
        }
        Ok(Self {
            min_i: min,
            max_i: max,
            ..self
        })
    }

    /// Set the output range used by [`Pid::clamp_output`].
    pub fn with_output_limits(self, min: f64, max: f64) -> Result<Self, PidError> {
        if !limits_valid(min, max) {
            return Err(PidError::InvalidOutputLimits { min, max });
        }
        Ok(Self {
            min_out: min,
            max_out: max,
            ..self
        })
    }

    /// Reset the PID loop history. Gains and limits are kept.
    pub fn reset(&mut self) {
        self.last_err = 0.0;
        self.last_i = 0.0;
        log::debug!("PID reset");
    }

    /// Calculate the current PID output.
    ///
    /// `dt` is the time since the previous call and must not be negative.
    /// A zero `dt` yields a zero derivative term.
    pub fn process(&mut self, actual: f64, setpoint: f64, dt: f64) -> f64 {
        let err = actual - setpoint;
        let i = self.calc_i(err, dt);
        let d = self.calc_d(err, dt);

        self.last_err = err;
        self.last_i = i;

        let output = self.calc_out(err, i, d);
        log::trace!(
            "PID: Error: {:.3}, I: {:.3}, D: {:.3}, Output: {:.3}",
            err,
            i,
            d,
            output
        );
        output
    }

    /// Error from the last call.
    pub fn last_error(&self) -> f64 {
        self.last_err
    }

    /// Clamped integral from the last call.
    pub fn last_integral(&self) -> f64 {
        self.last_i
    }

    /// Limit an output to `[min_out, max_out]`.
    pub fn clamp_output(&self, output: f64) -> f64 {
        limit(output, self.min_out, self.max_out)
    }

    fn calc_i(&self, err: f64, dt: f64) -> f64 {
        limit(self.last_i + err * dt, self.min_i, self.max_i)
    }

    fn calc_d(&self, err: f64, dt: f64) -> f64 {
        if dt == 0.0 {
            return 0.0;
        }
        (err - self.last_err) / dt
    }

    fn calc_out(&self, p: f64, i: f64, d: f64) -> f64 {
        let weighted = self.p_factor * p + self.i_factor * i + self.d_factor * d;
        if self.reverse {
            self.bias - weighted
        } else {
            self.bias + weighted
        }
    }
}

fn limits_valid(min: f64, max: f64) -> bool {
    !min.is_nan() && !max.is_nan() && min <= max
}

// Clamp without panicking on inverted bounds.
fn limit(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
