//! # Orientation sampler
//!
//! One pure function, [`sample`]: evaluate a body's IAU rotation model at an
//! ephemeris time and express the result in the ecliptic J2000 frame — the
//! pole unit vector, its right ascension and declination, and the
//! prime-meridian angle W.

use nalgebra::Vector3;

use crate::constants::{Degree, EphemSeconds, DAYS_PER_CENTURY};
use crate::earthspin::EarthSpin;
use crate::earthspin_errors::EarthSpinError;
use crate::ref_system::body_fixed_to_equm;
use crate::time::days_since_j2000;

/// Earth-orientation state at one time instant, in the ecliptic J2000 frame.
///
/// Computed once per date, immutable. `ra` is wrapped to `[0, 360)` and `dec`
/// lies in `[-90, 90]`; `w` is the raw model polynomial value in degrees,
/// continuous and unbounded, so that consecutive samples never jump across a
/// wrap boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationSample {
    /// Unit vector from the body center to its north pole.
    pub pole_vec: Vector3<f64>,
    /// Right ascension of the pole, degrees in `[0, 360)`.
    pub ra: Degree,
    /// Declination of the pole, degrees in `[-90, 90]`.
    pub dec: Degree,
    /// Prime-meridian rotation angle, degrees, unwrapped.
    pub w: Degree,
}

/// Evaluate the orientation of a body at an ephemeris time.
///
/// The IAU model polynomials are read from the context's constants table:
/// pole right ascension and declination in Julian centuries of TDB since
/// J2000, prime meridian in days. The body-fixed north pole `(0, 0, 1)` is
/// mapped through the body-fixed → equatorial J2000 rotation and then into
/// the ecliptic J2000 frame, and re-normalized — the transform chain is
/// orthonormal only up to floating-point error.
///
/// Arguments
/// -----------------
/// * `ctx`: the [`EarthSpin`] context (constants table and frame matrices).
/// * `body`: NAIF body id (399 for Earth).
/// * `et`: ephemeris seconds past J2000 TDB.
///
/// Return
/// ----------
/// * The [`OrientationSample`] at `et`, or
///   [`EarthSpinError::DataUnavailable`] if the constants table carries no
///   rotation model for `body`. No fallback orientation exists: callers must
///   treat this as fatal for the requested instant.
///
/// See also
/// ------------
/// * [`crate::series::run`] – samples a date range and assembles the output record.
pub fn sample(
    ctx: &EarthSpin,
    body: i32,
    et: EphemSeconds,
) -> Result<OrientationSample, EarthSpinError> {
    let orient = ctx.body_orientation(body)?;

    let days = days_since_j2000(et);
    let centuries = days / DAYS_PER_CENTURY;

    let pole_ra = poly2(&orient.pole_ra, centuries);
    let pole_dec = poly2(&orient.pole_dec, centuries);
    let w = poly2(&orient.prime_meridian, days);

    let body_to_eclm = ctx.get_rot_equmj2000_to_eclmj2000() * body_fixed_to_equm(pole_ra, pole_dec, w);

    let pole_raw = body_to_eclm * Vector3::z();
    let norm = pole_raw.norm();
    let pole_vec = pole_raw / norm;

    let ra = pole_vec.y.atan2(pole_vec.x).to_degrees().rem_euclid(360.0);
    let dec = (pole_raw.z / norm).asin().to_degrees();

    Ok(OrientationSample {
        pole_vec,
        ra,
        dec,
        w,
    })
}

/// Horner evaluation of a quadratic model polynomial.
fn poly2(coeffs: &[f64; 3], x: f64) -> f64 {
    (coeffs[2] * x + coeffs[1]) * x + coeffs[0]
}

#[cfg(test)]
mod orientation_test {
    use super::*;
    use crate::constants::{EARTH_NAIF_ID, SECONDS_PER_DAY, T2000};
    use crate::ref_system::obleq;
    use approx::assert_relative_eq;

    fn ctx() -> EarthSpin {
        EarthSpin::builtin()
    }

    #[test]
    fn test_earth_pole_at_j2000() {
        // At et = 0 the model angles are exactly (α₀, δ₀, W) = (0°, 90°, 190.147°):
        // the pole coincides with the equatorial ẑ, which sits at ecliptic
        // longitude 90° and latitude 90° − ε.
        let s = sample(&ctx(), EARTH_NAIF_ID, 0.0).unwrap();

        assert_relative_eq!(s.ra, 90.0, epsilon = 1e-9);
        assert_relative_eq!(s.dec, 90.0 - obleq(T2000).to_degrees(), epsilon = 1e-9);
        assert_relative_eq!(s.w, 190.147, epsilon = 1e-12);

        let eps = obleq(T2000);
        assert_relative_eq!(s.pole_vec.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(s.pole_vec.y, eps.sin(), epsilon = 1e-12);
        assert_relative_eq!(s.pole_vec.z, eps.cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_pole_is_unit_for_any_instant() {
        let ctx = ctx();
        for et in [-5.0e9, -1.0e6, 0.0, 86_400.5, 3.2e8, 1.0e10] {
            let s = sample(&ctx, EARTH_NAIF_ID, et).unwrap();
            assert_relative_eq!(s.pole_vec.norm(), 1.0, epsilon = 1e-9);
            assert!((0.0..360.0).contains(&s.ra));
            assert!((-90.0..=90.0).contains(&s.dec));
        }
    }

    #[test]
    fn test_w_is_linear_in_elapsed_days() {
        // Earth's quadratic term is zero: W must match W0 + W1·d exactly.
        let ctx = ctx();
        let pm = ctx.body_orientation(EARTH_NAIF_ID).unwrap().prime_meridian;

        for days in [-1000.0, -1.5, 0.0, 0.25, 365.25, 18_627.0] {
            let s = sample(&ctx, EARTH_NAIF_ID, days * SECONDS_PER_DAY).unwrap();
            assert_relative_eq!(s.w, pm[0] + pm[1] * days, epsilon = 1e-9 * (1.0 + days.abs()));
        }
    }

    #[test]
    fn test_w_is_monotonic_for_positive_rate() {
        let ctx = ctx();
        let mut previous = f64::NEG_INFINITY;
        for step in 0..50 {
            let s = sample(&ctx, EARTH_NAIF_ID, step as f64 * 3_600.0).unwrap();
            assert!(s.w > previous);
            previous = s.w;
        }
    }

    #[test]
    fn test_pole_drifts_over_a_century() {
        // α₀ decreases by 0.641°/century, δ₀ by 0.557°/century.
        let ctx = ctx();
        let century = DAYS_PER_CENTURY * SECONDS_PER_DAY;
        let s = sample(&ctx, EARTH_NAIF_ID, century).unwrap();

        // The pole moved away from the J2000 equatorial ẑ by a bit under a degree.
        let j2000 = sample(&ctx, EARTH_NAIF_ID, 0.0).unwrap();
        let separation = j2000.pole_vec.dot(&s.pole_vec).clamp(-1.0, 1.0).acos();
        assert!(separation.to_degrees() > 0.5);
        assert!(separation.to_degrees() < 1.0);
    }

    #[test]
    fn test_unknown_body_fails() {
        let err = sample(&ctx(), 499, 0.0).unwrap_err();
        assert!(matches!(err, EarthSpinError::DataUnavailable { body: 499, .. }));
    }
}
