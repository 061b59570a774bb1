use pid_loop::pid::Pid;
use pid_loop::plant::ThermalPlant;
use tracing_subscriber::EnvFilter;

// PID parameters
const KP: f64 = 8.0; // Proportional coefficient
const KI: f64 = 0.5; // Integral coefficient
const KD: f64 = 1.0; // Derivative coefficient

const SETPOINT: f64 = 60.0;
const AMBIENT: f64 = 20.0;
const TIME_CONSTANT: f64 = 50.0;
const HEATER_GAIN: f64 = 0.05;
const TICK_S: f64 = 0.5;
const TICKS: u32 = 1200;
const LOG_EVERY: u32 = 40;
const DOOR_OPEN_TICK: u32 = TICKS / 2;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut plant = ThermalPlant::new(AMBIENT, TIME_CONSTANT, HEATER_GAIN)?;

    // Heating raises the measurement, so the loop is reverse-acting.
    let mut pid = Pid::new(KP, KI, KD)
        .with_reverse(true)
        .with_integral_limits(-60.0, 60.0)?;

    log::info!(
        "Start: Temp: {:.2}, Setpoint: {:.2}",
        plant.temperature(),
        SETPOINT
    );

    // The first tick has no history to differentiate against.
    let mut dt = 0.0;
    for tick in 0..TICKS {
        if tick == DOOR_OPEN_TICK {
            plant.ambient = AMBIENT - 15.0;
            log::info!("Disturbance: ambient dropped to {:.2}", plant.ambient);
        }

        let output = pid.process(plant.temperature(), SETPOINT, dt);
        let power = pid.clamp_output(output);
        plant.step(power, TICK_S);
        dt = TICK_S;

        if tick % LOG_EVERY == 0 {
            log::info!(
                "Tick: {}, Temp: {:.2}, Error: {:.2}, I: {:.2}, PID: {:.2}, Power: {:.2}",
                tick,
                plant.temperature(),
                pid.last_error(),
                pid.last_integral(),
                output,
                power
            );
        }
    }

    log::info!(
        "Done: Temp: {:.2}, Error: {:.2}",
        plant.temperature(),
        plant.temperature() - SETPOINT
    );

    Ok(())
}
