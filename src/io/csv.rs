use std::io::{self, Write};

use crate::error::{ControlError, ControlResult};
use crate::sim::FlightState;
use crate::telemetry::{Channel, FlightData};

/// Write recorded telemetry to CSV.
///
/// Columns: time, then one column per channel named after its descriptor and
/// unit. Channels not written in a step are left empty.
pub fn write_telemetry<W: Write>(writer: &mut W, data: &FlightData) -> io::Result<()> {
    let header: Vec<String> = Channel::ALL
        .iter()
        .map(|c| {
            let d = c.descriptor();
            format!("{} ({})", d.name, d.unit.symbol())
        })
        .collect();
    writeln!(writer, "time,{}", header.join(","))?;

    for row in data.rows() {
        let cells: Vec<String> = Channel::ALL
            .iter()
            .map(|&c| row.get(c).map(|v| format!("{v:.6}")).unwrap_or_default())
            .collect();
        writeln!(writer, "{:.4},{}", row.time, cells.join(","))?;
    }

    Ok(())
}

/// Write the flight path (time, altitude, vertical velocity, mass) to CSV.
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[FlightState]) -> io::Result<()> {
    writeln!(writer, "time,pos_z,vel_z,mass")?;
    for s in trajectory {
        writeln!(writer, "{:.4},{:.4},{:.4},{:.6}", s.time, s.pos.z, s.vel.z, s.mass)?;
    }
    Ok(())
}

/// Write telemetry CSV to a file at the given path.
///
/// Any I/O failure is reported as [`ControlError::Io`] naming the path.
pub fn write_telemetry_file(path: &str, data: &FlightData) -> ControlResult<()> {
    let io_err = |e: io::Error| ControlError::Io(format!("failed to write {path}: {e}"));
    let mut file = std::fs::File::create(path).map_err(io_err)?;
    write_telemetry(&mut file, data).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::TelemetrySink;

    #[test]
    fn telemetry_csv_has_header_and_rows() {
        let mut data = FlightData::with_fin_channels();
        data.begin_step(0.0);
        data.begin_step(0.07);
        data.record(Channel::FinThickness, 0.003);
        data.record(Channel::PidError, -6.46);
        data.record(Channel::IdealAcceleration, 11.46);

        let mut buf = Vec::new();
        write_telemetry(&mut buf, &data).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "time,Control fin thickness (m),PID Error (m/s^2),Ideal Acceleration (m/s^2)"
        );
        assert_eq!(lines[1], "0.0000,,,");
        assert_eq!(lines[2], "0.0700,0.003000,-6.460000,11.460000");
    }

    #[test]
    fn trajectory_csv_rows() {
        let traj = vec![FlightState::launch(0.06)];
        let mut buf = Vec::new();
        write_trajectory(&mut buf, &traj).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("time,pos_z"));
        assert_eq!(output.lines().nth(1), Some("0.0000,0.0000,0.0000,0.060000"));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let path = "/nonexistent-fin-control-dir/telemetry.csv";
        let data = FlightData::with_fin_channels();
        match write_telemetry_file(path, &data) {
            Err(ControlError::Io(msg)) => assert!(msg.contains(path)),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
