use camino::Utf8Path;

use earthspin::earthspin::EarthSpin;
use earthspin::earthspin_errors::EarthSpinError;
use earthspin::pck::frame_name;
use earthspin::series::{run, SeriesConfig};

// All batch parameters are fixed constants; the reference configuration is
// Earth, daily steps from 1990-01-01 through 2040-12-31, W in degrees.
const OUTPUT_PATH: &str = "jsonOutput.json";

/// Generate the Earth orientation series and write it out as JSON.
fn main() -> Result<(), EarthSpinError> {
    let ctx = EarthSpin::new("builtin")?;
    let config = SeriesConfig::default();

    let series = run(&ctx, &config)?;
    println!(
        "{} ({}): {} samples of {}, {} to {}",
        series.name,
        frame_name(config.body).unwrap_or("unknown frame"),
        series.data.len(),
        series.time_step,
        series.start,
        series.end
    );

    // The computed record survives a failed write; report and keep going.
    if let Err(err) = series.write_json(Utf8Path::new(OUTPUT_PATH)) {
        eprintln!("An error occurred while saving the file: {err}");
    } else {
        println!("Written to {OUTPUT_PATH}");
    }

    Ok(())
}
