//! # EarthSpin: context object for orientation sampling
//!
//! This module defines the [`EarthSpin`](crate::earthspin::EarthSpin) struct, the explicit handle that
//! replaces process-global loaded-kernel state:
//!
//! 1. **Orientation constants** — a lazily-opened, cached [`PckKernel`]
//!    resolved from a [`PckSource`] descriptor (`"builtin"` or `"tpc:<path>"`).
//! 2. **Frame matrices** — the equatorial-J2000 ↔ ecliptic-J2000 changes of
//!    basis, computed once at construction.
//!
//! The design emphasizes *lazy initialization* and *idempotent caching*: the
//! constants table is opened on first use via [`OnceCell`](once_cell::sync::OnceCell), then reused for
//! the lifetime of the context. Everything inside is read-only after that
//! first load, so a `&EarthSpin` can be shared freely across a batch.
//!
//! ## Typical usage
//!
//! ```rust
//! use earthspin::constants::EARTH_NAIF_ID;
//! use earthspin::earthspin::EarthSpin;
//! use earthspin::orientation::sample;
//!
//! let ctx = EarthSpin::builtin();
//! let j2000 = sample(&ctx, EARTH_NAIF_ID, 0.0).unwrap();
//! assert!((j2000.ra - 90.0).abs() < 1e-9);
//! ```
//!
//! ## See also
//! ------------
//! * [`PckKernel`] – Orientation-constants access layer.
//! * [`crate::orientation::sample`] – The sampler consuming this context.
//! * [`crate::series::run`] – The batch driver holding a `&EarthSpin`.

use camino::{Utf8Path, Utf8PathBuf};
use nalgebra::Matrix3;
use once_cell::sync::OnceCell;

use crate::constants::T2000;
use crate::earthspin_errors::EarthSpinError;
use crate::pck::{BodyOrientation, PckKernel};
use crate::ref_system::{eclm_to_equm, equm_to_eclm};

/// Where the orientation constants come from.
///
/// Resolved from a descriptor string: `"builtin"` for the embedded IAU 2009
/// table, `"tpc:<path>"` for a NAIF text kernel on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PckSource {
    Builtin,
    TextKernel(Utf8PathBuf),
}

impl TryFrom<&str> for PckSource {
    type Error = EarthSpinError;

    fn try_from(descriptor: &str) -> Result<Self, Self::Error> {
        if descriptor == "builtin" {
            Ok(PckSource::Builtin)
        } else if let Some(path) = descriptor.strip_prefix("tpc:") {
            if path.is_empty() {
                return Err(EarthSpinError::InvalidPckSource(descriptor.to_string()));
            }
            Ok(PckSource::TextKernel(Utf8PathBuf::from(path)))
        } else {
            Err(EarthSpinError::InvalidPckSource(descriptor.to_string()))
        }
    }
}

#[derive(Debug, Clone)]
pub struct EarthSpin {
    pck_source: PckSource,
    pck: OnceCell<PckKernel>,
    rot_equmj2000_to_eclmj2000: Matrix3<f64>,
    rot_eclmj2000_to_equmj2000: Matrix3<f64>,
}

impl Default for EarthSpin {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EarthSpin {
    /// Construct a new [`EarthSpin`] context from a source descriptor.
    ///
    /// The constants table itself is **not** opened yet; it is lazily
    /// initialized the first time [`get_pck`](crate::earthspin::EarthSpin::get_pck) is called, so a context
    /// over a missing kernel file fails at first lookup rather than here.
    ///
    /// Arguments
    /// -----------------
    /// * `pck_source`: A descriptor resolvable into a [`PckSource`]
    ///   (`"builtin"` or `"tpc:<path>"`).
    ///
    /// Return
    /// ----------
    /// * A new [`EarthSpin`] instance, or an [`EarthSpinError`] if the
    ///   descriptor is not recognized.
    pub fn new(pck_source: &str) -> Result<Self, EarthSpinError> {
        Ok(Self::from_source(pck_source.try_into()?))
    }

    /// Context over the built-in IAU 2009 constants table, infallible.
    pub fn builtin() -> Self {
        Self::from_source(PckSource::Builtin)
    }

    /// Context over a NAIF text kernel on disk.
    pub fn with_kernel(path: &Utf8Path) -> Self {
        Self::from_source(PckSource::TextKernel(path.to_path_buf()))
    }

    fn from_source(pck_source: PckSource) -> Self {
        EarthSpin {
            pck_source,
            pck: OnceCell::new(),
            rot_equmj2000_to_eclmj2000: equm_to_eclm(T2000),
            rot_eclmj2000_to_equmj2000: eclm_to_equm(T2000),
        }
    }

    /// Get the lazily-initialized orientation-constants table.
    ///
    /// If this is the first call, the table is built (or the kernel file read
    /// and parsed) and cached in an internal [`OnceCell`]. Subsequent calls
    /// return the same reference.
    ///
    /// Return
    /// ----------
    /// * `&PckKernel` on success, or an [`EarthSpinError`] if the source
    ///   cannot be opened or parsed.
    pub fn get_pck(&self) -> Result<&PckKernel, EarthSpinError> {
        self.pck.get_or_try_init(|| match &self.pck_source {
            PckSource::Builtin => Ok(PckKernel::builtin()),
            PckSource::TextKernel(path) => PckKernel::from_tpc(path),
        })
    }

    /// Rotation-model coefficients for one body, through the cached table.
    pub fn body_orientation(&self, body: i32) -> Result<BodyOrientation, EarthSpinError> {
        self.get_pck()?.body_orientation(body)
    }

    /// Change of basis from equatorial J2000 to ecliptic J2000 (`x_ecl = R · x_equ`).
    pub fn get_rot_equmj2000_to_eclmj2000(&self) -> &Matrix3<f64> {
        &self.rot_equmj2000_to_eclmj2000
    }

    /// Change of basis from ecliptic J2000 to equatorial J2000 (`x_equ = R · x_ecl`).
    pub fn get_rot_eclmj2000_to_equmj2000(&self) -> &Matrix3<f64> {
        &self.rot_eclmj2000_to_equmj2000
    }
}

#[cfg(test)]
mod earthspin_test {
    use super::*;

    #[test]
    fn test_source_descriptor_parsing() {
        assert_eq!(PckSource::try_from("builtin").unwrap(), PckSource::Builtin);
        assert_eq!(
            PckSource::try_from("tpc:kernels/pck00011.tpc").unwrap(),
            PckSource::TextKernel(Utf8PathBuf::from("kernels/pck00011.tpc"))
        );
        assert!(PckSource::try_from("horizon:DE440").is_err());
        assert!(PckSource::try_from("tpc:").is_err());
    }

    #[test]
    fn test_missing_kernel_fails_at_first_lookup() {
        let ctx = EarthSpin::new("tpc:/no/such/kernel.tpc").unwrap();
        assert!(matches!(
            ctx.get_pck().unwrap_err(),
            EarthSpinError::IoError(_)
        ));
    }

    #[test]
    fn test_frame_matrices_are_inverse_of_each_other() {
        use approx::assert_relative_eq;
        let ctx = EarthSpin::builtin();
        let round_trip = ctx.get_rot_eclmj2000_to_equmj2000() * ctx.get_rot_equmj2000_to_eclmj2000();
        assert_relative_eq!(round_trip, Matrix3::identity(), epsilon = 1e-14);
    }
}
