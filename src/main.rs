use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use fin_control::config::{ControlConfig, FinControlExtension, MemoryStore};
use fin_control::control::ALTITUDE_PROFILE;
use fin_control::io::csv;
use fin_control::sim::{self, EventKind, FlightConfig};
use fin_control::telemetry::FlightData;
use fin_control::vehicle::presets;
use fin_control::ControlResult;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("simulation aborted: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> ControlResult<()> {
    // Usage: fin-control [P gain] [telemetry.csv]
    let args: Vec<String> = std::env::args().collect();
    let p_gain = match args.get(1) {
        Some(s) => s
            .parse::<f64>()
            .map_err(|e| fin_control::ControlError::Config(format!("bad P gain '{s}': {e}")))?,
        None => 100.0,
    };
    let csv_path = args.get(2);

    let mut extension = FinControlExtension::new(MemoryStore::new());
    extension.set_p_gain(p_gain);
    let mut controller = extension.initialize(ControlConfig::default())?;

    let mut rocket = presets::sport_rocket();
    let config = FlightConfig::default();
    let mut telemetry = FlightData::with_fin_channels();

    let flight = sim::fly(&mut rocket, &config, &mut controller, &mut telemetry)?;

    // -----------------------------------------------------------------------
    // Report
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  {}: {}", extension.name(), rocket.name);
    println!("====================================================================");
    println!(
        "  P gain: {:>8.1}   (scaled {:.4})   host dt: {} s",
        extension.p_gain(),
        controller.gains().p(),
        config.dt
    );
    println!();

    println!("  Control updates");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>4}  {:>6}  {:>9}  {:>9}  {:>8}  {:>9}  {:>7}  {:>7}",
        "step", "t (s)", "ref acc", "acc", "error", "fin (mm)", "alt (m)", "ref alt"
    );
    for (time, r) in &flight.updates {
        let alt = flight.state_at(*time).map(|s| s.pos.z).unwrap_or(0.0);
        let ref_alt = ALTITUDE_PROFILE
            .get(r.step)
            .map(|a| format!("{a:>7.1}"))
            .unwrap_or_else(|| format!("{:>7}", "-"));
        println!(
            "  {:>4}  {:>6.2}  {:>9.2}  {:>9.2}  {:>8.2}  {:>9.3}  {:>7.1}  {}",
            r.step,
            time,
            r.reference,
            r.acceleration,
            r.error,
            r.readback * 1000.0,
            alt,
            ref_alt
        );
    }
    println!();

    println!("  Flight events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &flight.events {
        println!(
            "  {:<18} t={:>6.2}s   alt={:>7.1}m   vz={:>7.1}m/s",
            format!("{:?}", e.kind),
            e.time,
            e.state.pos.z,
            e.state.vel.z
        );
    }
    if let Some(apogee) = flight.event(&EventKind::Apogee) {
        println!();
        println!("  Apogee: {:.1} m at t={:.2} s", apogee.state.pos.z, apogee.time);
    }
    println!("====================================================================");

    if let Some(path) = csv_path {
        csv::write_telemetry_file(path, &telemetry)?;
        println!("  Telemetry written to {path}");
    }

    Ok(())
}
