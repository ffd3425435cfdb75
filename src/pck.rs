//! # Body orientation constants (PCK)
//!
//! This module supplies the IAU rotation-model polynomial coefficients used by
//! the orientation sampler: for each body, the right ascension and declination
//! of the north pole (`POLE_RA`, `POLE_DEC`, in degrees and degrees per Julian
//! century) and the prime-meridian angle (`PM`, in degrees and degrees per
//! day), all referred to the J2000 epoch.
//!
//! Two sources are supported:
//!
//! 1. **Built-in table** — the IAU 2009 values carried by the NAIF `pck00011`
//!    kernel for the bodies this crate targets (Sun and Earth).
//! 2. **NAIF text kernel** (`.tpc` file) — parsed from the standard
//!    `\begindata` / `\begintext` block format, so a newer kernel release can
//!    be dropped in without touching the code.
//!
//! Lookups are keyed by NAIF body id and item name, mirroring the
//! `BODYnnn_ITEM` naming of the kernel files. A missing body or item is a
//! fatal [`EarthSpinError::DataUnavailable`]: no fallback orientation exists.
//!
//! ## See also
//! * [`crate::earthspin::EarthSpin`] – caches one [`PckKernel`] per context.
//! * [`crate::orientation::sample`] – consumes [`BodyOrientation`] coefficients.

use std::collections::HashMap;

use camino::Utf8Path;

use crate::earthspin_errors::EarthSpinError;

/// IAU rotation-model coefficients for one body.
///
/// Each triple holds the constant, linear, and quadratic coefficients of the
/// model polynomial. `pole_ra` and `pole_dec` are evaluated in Julian
/// **centuries** of TDB since J2000; `prime_meridian` in **days**. All values
/// are degrees (and degrees per century / per day).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyOrientation {
    pub pole_ra: [f64; 3],
    pub pole_dec: [f64; 3],
    pub prime_meridian: [f64; 3],
}

/// In-memory orientation-constants table, keyed by kernel variable name.
#[derive(Debug, Clone)]
pub struct PckKernel {
    variables: HashMap<String, Vec<f64>>,
}

impl PckKernel {
    /// Built-in table: IAU 2009 report values (NAIF `pck00011`) for the Sun and the Earth.
    pub fn builtin() -> Self {
        let mut variables = HashMap::new();

        let mut insert = |name: &str, values: &[f64]| {
            variables.insert(name.to_string(), values.to_vec());
        };

        insert("BODY10_POLE_RA", &[286.13, 0.0, 0.0]);
        insert("BODY10_POLE_DEC", &[63.87, 0.0, 0.0]);
        insert("BODY10_PM", &[84.176, 14.1844000, 0.0]);

        insert("BODY399_POLE_RA", &[0.0, -0.641, 0.0]);
        insert("BODY399_POLE_DEC", &[90.0, -0.557, 0.0]);
        insert("BODY399_PM", &[190.147, 360.9856235, 0.0]);

        PckKernel { variables }
    }

    /// Load a NAIF text kernel (`.tpc`) from disk.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: location of the text kernel.
    ///
    /// Return
    /// ----------
    /// * The parsed table, or an [`EarthSpinError`] if the file cannot be read
    ///   or its data blocks are structurally malformed.
    pub fn from_tpc(path: &Utf8Path) -> Result<Self, EarthSpinError> {
        let content = std::fs::read_to_string(path)?;
        Ok(PckKernel {
            variables: parse_tpc(&content)?,
        })
    }

    /// Raw coefficient lookup by NAIF body id and kernel item name.
    ///
    /// The key follows the kernel naming scheme: body 399 and item `"PM"`
    /// resolve the variable `BODY399_PM`.
    ///
    /// Arguments
    /// -----------------
    /// * `body`: NAIF body id (e.g. 399 for Earth).
    /// * `item`: kernel item name (`"POLE_RA"`, `"POLE_DEC"`, `"PM"`).
    ///
    /// Return
    /// ----------
    /// * The coefficient slice, or [`EarthSpinError::DataUnavailable`] if the
    ///   table carries no such variable.
    pub fn coefficients(&self, body: i32, item: &str) -> Result<&[f64], EarthSpinError> {
        self.variables
            .get(&format!("BODY{body}_{item}"))
            .map(Vec::as_slice)
            .ok_or_else(|| EarthSpinError::DataUnavailable {
                body,
                item: item.to_string(),
            })
    }

    /// Assemble the full IAU rotation model for one body.
    ///
    /// Return
    /// ----------
    /// * The [`BodyOrientation`] triple set, or the first
    ///   [`EarthSpinError::DataUnavailable`] encountered. Kernels that carry
    ///   fewer than three coefficients per item are padded with zeros (the
    ///   quadratic term is zero for most bodies).
    pub fn body_orientation(&self, body: i32) -> Result<BodyOrientation, EarthSpinError> {
        let triple = |item: &str| -> Result<[f64; 3], EarthSpinError> {
            let coeffs = self.coefficients(body, item)?;
            let mut out = [0.0; 3];
            for (slot, value) in out.iter_mut().zip(coeffs.iter()) {
                *slot = *value;
            }
            Ok(out)
        };

        Ok(BodyOrientation {
            pole_ra: triple("POLE_RA")?,
            pole_dec: triple("POLE_DEC")?,
            prime_meridian: triple("PM")?,
        })
    }
}

/// Body-fixed frame name associated with a NAIF body id, if the crate knows it.
pub fn frame_name(body: i32) -> Option<&'static str> {
    match body {
        10 => Some("IAU_SUN"),
        399 => Some("IAU_EARTH"),
        _ => None,
    }
}

/// Display name associated with a NAIF body id, if the crate knows it.
pub fn body_name(body: i32) -> Option<&'static str> {
    match body {
        10 => Some("Sun"),
        399 => Some("Earth"),
        _ => None,
    }
}

/// Parse the `\begindata` blocks of a NAIF text kernel into a variable table.
///
/// Only numeric array assignments (`NAME = ( v1 v2 … )`, possibly spanning
/// lines) and numeric scalar assignments are retained; string-valued variables
/// are skipped. FORTRAN-style `D` exponents are accepted. Structural problems
/// (an assignment without `=`, an unterminated value list) are reported as
/// [`EarthSpinError::InvalidPckKernel`].
pub(crate) fn parse_tpc(content: &str) -> Result<HashMap<String, Vec<f64>>, EarthSpinError> {
    let mut variables = HashMap::new();
    let mut in_data = false;
    // Assignment whose value list continues on following lines
    let mut pending: Option<(String, String)> = None;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed == "\\begindata" {
            in_data = true;
            continue;
        }
        if trimmed == "\\begintext" {
            if let Some((name, _)) = pending {
                return Err(EarthSpinError::InvalidPckKernel(format!(
                    "unterminated value list for {name}"
                )));
            }
            in_data = false;
            continue;
        }
        if !in_data || trimmed.is_empty() {
            continue;
        }

        if let Some((name, mut buffer)) = pending.take() {
            buffer.push(' ');
            buffer.push_str(trimmed);
            pending = store_or_defer(&mut variables, name, buffer);
            continue;
        }

        let Some((name, value)) = trimmed.split_once('=') else {
            return Err(EarthSpinError::InvalidPckKernel(format!(
                "expected an assignment, found: {trimmed}"
            )));
        };
        let name = name.trim().to_string();
        let value = value.trim().to_string();

        if value.starts_with('(') {
            pending = store_or_defer(&mut variables, name, value);
        } else if let Some(scalar) = parse_kernel_number(&value) {
            variables.insert(name, vec![scalar]);
        }
        // Non-numeric scalars (quoted strings) are not orientation data: skip.
    }

    if let Some((name, _)) = pending {
        return Err(EarthSpinError::InvalidPckKernel(format!(
            "unterminated value list for {name}"
        )));
    }

    Ok(variables)
}

/// Complete a parenthesized value list if its closing `)` has arrived,
/// otherwise hand the accumulated text back as pending state.
fn store_or_defer(
    variables: &mut HashMap<String, Vec<f64>>,
    name: String,
    buffer: String,
) -> Option<(String, String)> {
    let Some(end) = buffer.find(')') else {
        return Some((name, buffer));
    };

    let inner = buffer[..end].trim_start_matches('(');
    let values: Option<Vec<f64>> = inner
        .split([' ', '\t', ','])
        .filter(|token| !token.is_empty())
        .map(parse_kernel_number)
        .collect();

    // String-valued arrays (frame names, unit labels) are not orientation data.
    if let Some(values) = values {
        variables.insert(name, values);
    }
    None
}

/// Parse one kernel numeric token, accepting FORTRAN `D`/`d` exponents.
fn parse_kernel_number(token: &str) -> Option<f64> {
    token.replace(['D', 'd'], "E").parse::<f64>().ok()
}

#[cfg(test)]
mod pck_test {
    use super::*;

    #[test]
    fn test_builtin_earth_constants() {
        let pck = PckKernel::builtin();
        assert_eq!(
            pck.coefficients(399, "PM").unwrap(),
            &[190.147, 360.9856235, 0.0]
        );
        assert_eq!(
            pck.coefficients(399, "POLE_DEC").unwrap(),
            &[90.0, -0.557, 0.0]
        );
    }

    #[test]
    fn test_body_and_frame_names() {
        assert_eq!(body_name(399), Some("Earth"));
        assert_eq!(frame_name(399), Some("IAU_EARTH"));
        assert_eq!(frame_name(10), Some("IAU_SUN"));
        assert_eq!(body_name(499), None);
    }

    #[test]
    fn test_unknown_body_is_data_unavailable() {
        let pck = PckKernel::builtin();
        let err = pck.body_orientation(499).unwrap_err();
        assert_eq!(
            err,
            EarthSpinError::DataUnavailable {
                body: 499,
                item: "POLE_RA".to_string()
            }
        );
    }

    #[test]
    fn test_parse_tpc_block() {
        let kernel = r"
Earth orientation constants, excerpt.

\begindata

    BODY399_POLE_RA    = (    0.      -0.641         0. )
    BODY399_POLE_DEC   = (   90.      -0.557         0. )
    BODY399_PM         = (  190.147  360.9856235     0. )

\begintext
Commentary outside the data block is ignored,
even when it contains an = sign.
";
        let variables = parse_tpc(kernel).unwrap();
        assert_eq!(
            variables.get("BODY399_PM").unwrap(),
            &vec![190.147, 360.9856235, 0.0]
        );
        assert_eq!(variables.len(), 3);
    }

    #[test]
    fn test_parse_tpc_multiline_and_d_exponents() {
        let kernel = r"
\begindata
    BODY301_PM  = (   38.3213
                      13.17635815
                      -1.4D-12     )
\begintext
";
        let variables = parse_tpc(kernel).unwrap();
        assert_eq!(
            variables.get("BODY301_PM").unwrap(),
            &vec![38.3213, 13.17635815, -1.4e-12]
        );
    }

    #[test]
    fn test_parse_tpc_skips_string_values() {
        let kernel = r"
\begindata
    BODY399_RADII      = ( 6378.1366 6378.1366 6356.7519 )
    FRAME_NAME         = 'IAU_EARTH'
\begintext
";
        let variables = parse_tpc(kernel).unwrap();
        assert!(variables.contains_key("BODY399_RADII"));
        assert!(!variables.contains_key("FRAME_NAME"));
    }

    #[test]
    fn test_parse_tpc_unterminated_list_is_invalid() {
        let kernel = "\\begindata\n    BODY399_PM = ( 190.147\n";
        assert!(matches!(
            parse_tpc(kernel),
            Err(EarthSpinError::InvalidPckKernel(_))
        ));
    }

    #[test]
    fn test_builtin_matches_parsed_kernel() {
        // The built-in table is a transcription of pck00011; parsing the same
        // assignments must produce identical coefficients.
        let kernel = r"
\begindata
    BODY10_PM   = (  84.176   14.1844000    0. )
    BODY399_PM  = ( 190.147  360.9856235    0. )
\begintext
";
        let parsed = parse_tpc(kernel).unwrap();
        let builtin = PckKernel::builtin();
        for name in ["BODY10_PM", "BODY399_PM"] {
            let body: i32 = name
                .trim_start_matches("BODY")
                .split('_')
                .next()
                .unwrap()
                .parse()
                .unwrap();
            assert_eq!(
                parsed.get(name).unwrap().as_slice(),
                builtin.coefficients(body, "PM").unwrap()
            );
        }
    }
}
