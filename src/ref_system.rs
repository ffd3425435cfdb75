use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{Degree, Radian, RADEG, RADSEC, T2000};

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes (X, Y, or Z).
///
/// This function builds a [`nalgebra::Matrix3`] representing an **active rotation**
/// of a 3D vector by an angle `alpha` around the chosen axis.
/// The rotation follows the **direct (positive/trigonometric)** sense:
/// counter-clockwise when looking **along the axis toward the origin**.
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians** (positive = direct/trigonometric sense).
/// * `k` - Index of the axis of rotation:
///   * `0` → X-axis
///   * `1` → Y-axis
///   * `2` → Z-axis
///
/// # Returns
///
/// A 3×3 rotation matrix `R` such that the rotated vector is `x' = R · x`.
///
/// # Remarks
///
/// * This function uses [`nalgebra::Rotation3::from_axis_angle`] internally,
///   which ensures orthonormality and numerical stability.
/// * The returned matrix is **orthonormal** and satisfies `R.transpose() == R.inverse()`.
/// * A **change of basis** between two frames separated by an angle `alpha`
///   around axis `k` is obtained with `rotmt(-alpha, k)`.
///
/// # Panics
///
/// Panics if `k > 2`, as only axes 0–2 are valid.
///
/// # See also
/// * [`equm_to_eclm`] – equatorial → ecliptic change of basis built from `rotmt`
/// * [`body_fixed_to_equm`] – IAU body-fixed → equatorial J2000 rotation
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// This function returns the mean obliquity angle ε, defined as the angle between
/// the Earth's equator and the ecliptic plane, using the standard IAU 1976 polynomial model.
/// The result is expressed in radians and is valid for dates within a few millennia
/// of the J2000 epoch.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// Formula
/// -------
/// The obliquity ε is computed as a cubic polynomial in Julian centuries since J2000:
///
/// ```text
/// ε(t) = ε₀ + ε₁·T + ε₂·T² + ε₃·T³
/// ```
/// where `T = (tjm - T2000) / 36525.0` and the coefficients are in arcseconds,
/// internally converted to radians. The polynomial is evaluated with Horner's method.
///
/// # See also
/// * [`equm_to_eclm`] – uses this obliquity to relate equatorial and ecliptic frames
pub fn obleq(tjm: f64) -> Radian {
    // Obliquity coefficients
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = (tjm - T2000) / 36525.0;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Change of basis from the mean equatorial frame to the mean ecliptic frame at a given epoch.
///
/// The returned matrix `R` expresses an equatorial-frame vector in ecliptic
/// coordinates: `x_ecl = R · x_equ`. Both frames share the X-axis (the equinox
/// direction); the ecliptic frame is reached by tilting the equator by the mean
/// obliquity ε around X, so the change of basis is `rotmt(-ε, 0)`.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale) of the frame epoch; use [`T2000`] for J2000.
///
/// Returns
/// --------
/// * The 3×3 change-of-basis matrix, orthonormal.
///
/// # See also
/// * [`eclm_to_equm`] – the inverse change of basis
/// * [`obleq`] – mean obliquity model
pub fn equm_to_eclm(tjm: f64) -> Matrix3<f64> {
    rotmt(-obleq(tjm), 0)
}

/// Change of basis from the mean ecliptic frame to the mean equatorial frame at a given epoch.
///
/// Inverse of [`equm_to_eclm`]: `x_equ = R · x_ecl`.
pub fn eclm_to_equm(tjm: f64) -> Matrix3<f64> {
    rotmt(obleq(tjm), 0)
}

/// Build the IAU body-fixed → mean equatorial J2000 rotation from the body orientation angles.
///
/// The IAU rotation model locates a body-fixed frame with three angles: the
/// right ascension `α₀` and declination `δ₀` of the body's north pole, and the
/// prime-meridian angle `W`, all relative to the equatorial J2000 frame. A
/// vector expressed in body-fixed coordinates is mapped to equatorial J2000 by
///
/// ```text
/// x_equ = Rz(α₀ + 90°) · Rx(90° − δ₀) · Rz(W) · x_body
/// ```
///
/// where `Rz`/`Rx` are the active rotations of [`rotmt`]. In particular the
/// body-fixed pole `(0, 0, 1)` maps to `(cos α₀ cos δ₀, sin α₀ cos δ₀, sin δ₀)`,
/// the unit vector toward `(α₀, δ₀)`.
///
/// Arguments
/// ---------
/// * `pole_ra`: right ascension of the body north pole, degrees.
/// * `pole_dec`: declination of the body north pole, degrees.
/// * `w`: prime-meridian angle, degrees.
///
/// Returns
/// --------
/// * The 3×3 rotation matrix, orthonormal.
///
/// # See also
/// * [`crate::orientation::sample`] – evaluates the angle polynomials and applies this matrix
pub fn body_fixed_to_equm(pole_ra: Degree, pole_dec: Degree, w: Degree) -> Matrix3<f64> {
    let r_node = rotmt((pole_ra + 90.0) * RADEG, 2);
    let r_tilt = rotmt((90.0 - pole_dec) * RADEG, 0);
    let r_spin = rotmt(w * RADEG, 2);

    r_node * r_tilt * r_spin
}
