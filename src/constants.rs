//! # Constants and type definitions for Earthspin
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `earthspin` library.
//!
//! ## Overview
//!
//! - Time-scale reference epochs (J2000 in MJD and JD form)
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Core type aliases used across the crate
//! - NAIF identifiers for the bodies carried by the built-in orientation table
//!
//! These definitions are used by all main modules, including the reference-system
//! transforms, the orientation sampler, and the series driver.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Numerical epsilon used for floating-point comparisons
pub const EPS: f64 = 1e-6;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TDB)
pub const T2000: f64 = 51544.5;

/// Julian date of the J2000.0 epoch
pub const JD_J2000: f64 = 2_451_545.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2_400_000.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;

/// Modified Julian Date (days)
pub type MJD = f64;

/// Julian Date (days)
pub type JulianDay = f64;

/// Ephemeris seconds past J2000 TDB (the SPICE `et` convention)
pub type EphemSeconds = f64;

// -------------------------------------------------------------------------------------------------
// Body identifiers
// -------------------------------------------------------------------------------------------------

/// NAIF identifier of the Sun
pub const SUN_NAIF_ID: i32 = 10;

/// NAIF identifier of the Earth
pub const EARTH_NAIF_ID: i32 = 399;

/// Center identifier used in the series header (solar system barycenter)
pub const SSB_CENTER: &str = "@0";
