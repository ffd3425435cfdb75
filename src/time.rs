use hifitime::{Epoch, TimeScale};
use std::str::FromStr;

use crate::constants::{EphemSeconds, JulianDay, SECONDS_PER_DAY};
use crate::earthspin_errors::EarthSpinError;

/// Calendar reading broken into Gregorian components, no time scale attached.
///
/// A clock reading only becomes a time instant once a scale is chosen; the
/// crate attaches the scale through [`epoch_tdb`] (the canonical path) or
/// [`epoch_utc`] (used to measure the TDB−UTC offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarReading {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CalendarReading {
    /// Render the reading in the `YYYY-MM-DD HH:MM:SS` form used by the output record.
    pub fn to_date_time_string(self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Render the date part only (`YYYY-MM-DD`), used by the series header.
    pub fn to_date_string(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// The reading shifted by a whole number of days, same time of day.
    pub fn offset_days(self, days: i64) -> Self {
        let (year, month, day) = mjd_to_calendar(calendar_to_mjd(self.year, self.month, self.day) + days);
        CalendarReading {
            year,
            month,
            day,
            ..self
        }
    }
}

/// Parse a calendar string into its Gregorian components.
///
/// Accepted forms are `YYYY-MM-DD` (time of day defaults to midnight) and
/// `YYYY-MM-DD HH:MM:SS`, with either a space or a `T` separating date and time.
///
/// Argument
/// --------
/// * `date`: the calendar string to parse
///
/// Return
/// ------
/// * The parsed [`CalendarReading`], or [`EarthSpinError::InvalidCalendarDate`]
///   if the string is malformed or names a non-existent day.
pub fn parse_calendar(date: &str) -> Result<CalendarReading, EarthSpinError> {
    let invalid = || EarthSpinError::InvalidCalendarDate(date.to_string());

    let mut parts = date.split([' ', 'T']);
    let ymd = parts.next().ok_or_else(invalid)?;
    let hms = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    let ymd: Vec<&str> = ymd.split('-').collect();
    let &[year, month, day] = ymd.as_slice() else {
        return Err(invalid());
    };
    let year = i32::from_str(year).map_err(|_| invalid())?;
    let month = u8::from_str(month).map_err(|_| invalid())?;
    let day = u8::from_str(day).map_err(|_| invalid())?;

    let (hour, minute, second) = match hms {
        None => (0, 0, 0),
        Some(t) => {
            let hms: Vec<&str> = t.split(':').collect();
            let &[hour, minute, second] = hms.as_slice() else {
                return Err(invalid());
            };
            (
                u8::from_str(hour).map_err(|_| invalid())?,
                u8::from_str(minute).map_err(|_| invalid())?,
                u8::from_str(second).map_err(|_| invalid())?,
            )
        }
    };

    // Reject out-of-range components: a valid date round-trips through MJD.
    if mjd_to_calendar(calendar_to_mjd(year, month, day)) != (year, month, day)
        || hour > 23
        || minute > 59
        || second > 59
    {
        return Err(invalid());
    }

    Ok(CalendarReading {
        year,
        month,
        day,
        hour,
        minute,
        second,
    })
}

/// Integer Modified Julian Day number of a Gregorian date (midnight-based).
///
/// Uses the Fliegel–Van Flandern day-number algorithm, exact for all Gregorian
/// dates. The inverse is [`mjd_to_calendar`].
pub fn calendar_to_mjd(year: i32, month: u8, day: u8) -> i64 {
    let (y, m, d) = (year as i64, month as i64, day as i64);
    let jdn = (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
        - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
        + d
        - 32075;
    // The day number is noon-based; the midnight MJD of the same civil day is JDN − 2400001.
    jdn - 2_400_001
}

/// Gregorian date of an integer Modified Julian Day number (midnight-based).
///
/// Inverse of [`calendar_to_mjd`].
pub fn mjd_to_calendar(mjd: i64) -> (i32, u8, u8) {
    let jdn = mjd + 2_400_001;

    let mut l = jdn + 68569;
    let n = (4 * l) / 146097;
    l -= (146097 * n + 3) / 4;
    let i = (4000 * (l + 1)) / 1461001;
    l -= (1461 * i) / 4 - 31;
    let j = (80 * l) / 2447;
    let day = l - (2447 * j) / 80;
    l = j / 11;
    let month = j + 2 - 12 * l;
    let year = 100 * (n - 49) + i + l;

    (year as i32, month as u8, day as u8)
}

/// Canonical clock-reading → time-instant conversion: the reading is taken on the TDB scale.
///
/// This is the single conversion path used for every sample of a batch,
/// equivalent to interpreting the calendar string as `"... TDB"`. The UTC
/// interpretation of the same reading exists only through [`delta_t`], which
/// records the offset between the two scales as a first-class quantity.
pub fn epoch_tdb(reading: CalendarReading) -> Epoch {
    Epoch::from_gregorian(
        reading.year,
        reading.month,
        reading.day,
        reading.hour,
        reading.minute,
        reading.second,
        0,
        TimeScale::TDB,
    )
}

/// UTC interpretation of a clock reading.
///
/// Only used to measure the scale offset against the canonical TDB path; the
/// sampler itself never sees epochs built here.
pub fn epoch_utc(reading: CalendarReading) -> Epoch {
    Epoch::from_gregorian(
        reading.year,
        reading.month,
        reading.day,
        reading.hour,
        reading.minute,
        reading.second,
        0,
        TimeScale::UTC,
    )
}

/// Ephemeris seconds past J2000 TDB of an epoch (the SPICE `et` convention).
pub fn et_seconds(epoch: &Epoch) -> EphemSeconds {
    epoch.to_et_seconds()
}

/// Julian date of an epoch on the TDB scale.
pub fn jd_tdb(epoch: &Epoch) -> JulianDay {
    epoch.to_jde_tdb_days()
}

/// Elapsed days since the J2000 epoch for a given ephemeris time.
pub fn days_since_j2000(et: EphemSeconds) -> f64 {
    et / SECONDS_PER_DAY
}

/// TDB − UTC offset in seconds for a given clock reading.
///
/// Both scale interpretations of the same reading are converted to ephemeris
/// seconds and differenced. The result is positive: the dynamical scale runs
/// ahead of UTC by 32.184 s plus the accumulated leap seconds (≈ 64.184 s at
/// J2000), so interpreting a civil timestamp as TDB places the instant earlier
/// than the UTC interpretation by exactly this amount.
pub fn delta_t(reading: CalendarReading) -> f64 {
    et_seconds(&epoch_utc(reading)) - et_seconds(&epoch_tdb(reading))
}
