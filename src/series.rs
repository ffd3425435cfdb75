//! # Batch driver: daily orientation series
//!
//! [`run`] samples the orientation model over a fixed grid of calendar dates
//! and assembles the results into an [`OrientationSeries`], the JSON document
//! consumed downstream. One configuration drives every variant of the batch
//! (date range, step count, step size, W angle unit) — there is exactly one
//! driver, parameterized, not one script per variant.
//!
//! Every calendar date goes through the single canonical clock-reading → TDB
//! conversion of [`crate::time::epoch_tdb`]; the UTC interpretation of the
//! same reading is recorded per sample as the `deltaT` field (TDB − UTC,
//! seconds) instead of silently leaking into the instants themselves. A
//! failed sample aborts the whole batch: a partial series would break the
//! fixed daily grid consumers rely on.

use camino::Utf8Path;
use serde::Serialize;

use crate::constants::{Degree, EphemSeconds, JulianDay, EARTH_NAIF_ID, SSB_CENTER};
use crate::earthspin::EarthSpin;
use crate::earthspin_errors::EarthSpinError;
use crate::orientation::sample;
use crate::pck::body_name;
use crate::time::{delta_t, epoch_tdb, et_seconds, jd_tdb, parse_calendar};

/// Output unit of the prime-meridian angle `w`.
///
/// Right ascension and declination are always reported in degrees; only the
/// W column is switchable, which is what distinguished the two historical
/// variants of this batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

/// Configuration of one batch run.
#[derive(Debug, Clone)]
pub struct SeriesConfig {
    /// NAIF id of the sampled body.
    pub body: i32,
    /// Center identifier written to the series header.
    pub center: String,
    /// Start calendar date, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`.
    pub start: String,
    /// Number of daily steps to take.
    pub step_count: u32,
    /// Step size in whole days.
    pub step_days: u32,
    /// Unit of the `w` column.
    pub angle_unit: AngleUnit,
}

impl Default for SeriesConfig {
    /// The reference batch: Earth, one sample per day from 1990-01-01 through
    /// 2040-12-31 (18 627 steps), W in degrees.
    fn default() -> Self {
        SeriesConfig {
            body: EARTH_NAIF_ID,
            center: SSB_CENTER.to_string(),
            start: "1990-01-01".to_string(),
            step_count: 18_627,
            step_days: 1,
            angle_unit: AngleUnit::Degrees,
        }
    }
}

/// One day of the output record.
#[derive(Debug, Clone, Serialize)]
pub struct DailySample {
    /// Calendar reading, `YYYY-MM-DD HH:MM:SS`.
    pub date: String,
    /// Julian date on the TDB scale.
    #[serde(rename = "jdTDB")]
    pub jd_tdb: JulianDay,
    /// TDB − UTC for this reading, seconds.
    #[serde(rename = "deltaT")]
    pub delta_t: f64,
    /// Pole unit vector, ecliptic J2000 frame.
    pub pole_vec: [f64; 3],
    /// Right ascension of the pole, degrees.
    pub ra: Degree,
    /// Declination of the pole, degrees.
    pub dec: Degree,
    /// Prime-meridian angle, in the configured [`AngleUnit`].
    pub w: f64,
}

/// The completed batch output: header fields plus the ordered day sequence.
///
/// Created by [`run`], never mutated afterwards. Serialization and file
/// output are separate steps so that a failed write leaves the computed
/// record intact.
#[derive(Debug, Clone, Serialize)]
pub struct OrientationSeries {
    pub name: String,
    #[serde(rename = "bodyID")]
    pub body_id: String,
    #[serde(rename = "timeStep")]
    pub time_step: String,
    pub center: String,
    /// First sampled date, `YYYY-MM-DD`.
    pub start: String,
    /// Exclusive end date (start + step_count · step_days), `YYYY-MM-DD`.
    pub end: String,
    pub data: Vec<DailySample>,
}

impl OrientationSeries {
    /// Pretty-printed JSON document for this series.
    pub fn to_json(&self) -> Result<String, EarthSpinError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize and write the series to `path`.
    ///
    /// A failure here is an I/O problem only: the in-memory series is
    /// untouched and the caller may retry or redirect the output.
    pub fn write_json(&self, path: &Utf8Path) -> Result<(), EarthSpinError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Run the batch: sample `config.step_count` dates and assemble the series.
///
/// For step index `i` the calendar reading is `start + i · step_days` with an
/// unchanged time of day; the reading is converted through the canonical TDB
/// path, sampled, and appended in order — insertion order is chronological
/// order, and consecutive dates differ by exactly the configured step.
///
/// Arguments
/// -----------------
/// * `ctx`: the orientation context (constants table, frame matrices).
/// * `config`: batch parameters.
///
/// Return
/// ----------
/// * The completed [`OrientationSeries`], or the first [`EarthSpinError`]
///   encountered. Any sampler failure fails the whole batch — no partial or
///   day-skipping record is ever produced.
pub fn run(ctx: &EarthSpin, config: &SeriesConfig) -> Result<OrientationSeries, EarthSpinError> {
    let start = parse_calendar(&config.start)?;

    let mut data = Vec::with_capacity(config.step_count as usize);

    for i in 0..config.step_count {
        let reading = start.offset_days((i * config.step_days) as i64);
        let epoch = epoch_tdb(reading);
        let et: EphemSeconds = et_seconds(&epoch);

        let s = sample(ctx, config.body, et)?;
        let w = match config.angle_unit {
            AngleUnit::Degrees => s.w,
            AngleUnit::Radians => s.w.to_radians(),
        };

        data.push(DailySample {
            date: reading.to_date_time_string(),
            jd_tdb: jd_tdb(&epoch),
            delta_t: delta_t(reading),
            pole_vec: [s.pole_vec.x, s.pole_vec.y, s.pole_vec.z],
            ra: s.ra,
            dec: s.dec,
            w,
        });
    }

    let end = start.offset_days((config.step_count * config.step_days) as i64);

    Ok(OrientationSeries {
        name: body_name(config.body)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Body {}", config.body)),
        body_id: config.body.to_string(),
        time_step: format!("{}d", config.step_days),
        center: config.center.clone(),
        start: start.to_date_string(),
        end: end.to_date_string(),
        data,
    })
}
