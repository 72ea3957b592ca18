// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Solution of the astronomical triangle (pole, zenith, body) for the
//! calculated altitude and azimuth of a body from an assumed position.

use crate::{
    constants::{AZIMUTH_DENOMINATOR_EPSILON, DEG_180, DEG_360, DEG_90},
    error::CelnavError,
};
use log::{debug, trace};

/// The three inputs of a sight reduction, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SightReductionInput {
    /// Latitude of the assumed position, north positive
    pub assumed_latitude: f64,
    /// Declination of the body, north positive
    pub declination: f64,
    /// Local hour angle of the body, measured westward from the assumed
    /// meridian
    pub local_hour_angle: f64,
}

/// The solved triangle, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SightReductionResult {
    /// Calculated altitude Hc
    pub calculated_altitude: f64,
    /// Azimuth angle Z in `[0, 180]`, measured from the elevated pole (north
    /// for a northern assumed latitude, south otherwise), east or west
    pub azimuth_angle: f64,
    /// True azimuth Zn in `[0, 360)`, clockwise from true north
    pub true_azimuth: f64,
}

fn domain_error(detail: String) -> CelnavError {
    CelnavError::DomainMath {
        source_file: file!(),
        source_line: line!(),
        function: "reduce",
        detail,
    }
}

/// Resolve the azimuth angle Z into a true azimuth Zn.
///
/// `acos` can not tell whether the body is east or west of the meridian, the
/// local hour angle can: below 180° the body is west.
///
/// | latitude | LHA    | Zn        |
/// |----------|--------|-----------|
/// | north    | > 180  | Z         |
/// | north    | <= 180 | 360 - Z   |
/// | south    | > 180  | 180 - Z   |
/// | south    | <= 180 | 180 + Z   |
///
/// The result is normalised to `[0, 360)`.
pub fn true_azimuth(assumed_latitude: f64, local_hour_angle: f64, azimuth_angle: f64) -> f64 {
    let east_of_meridian = local_hour_angle > DEG_180;
    let true_azimuth = if assumed_latitude > 0.0 {
        if east_of_meridian {
            azimuth_angle
        } else {
            DEG_360 - azimuth_angle
        }
    } else if east_of_meridian {
        DEG_180 - azimuth_angle
    } else {
        DEG_180 + azimuth_angle
    };
    true_azimuth.rem_euclid(DEG_360)
}

/// Solve for Hc, Z and Zn.
///
/// ```text
/// Hc   = asin(sin(lat) sin(dec) + cos(lat) cos(dec) cos(LHA))
/// cosZ = (sin(dec) - sin(Hc) sin(lat)) / (cos(Hc) cos(lat))
/// Z    = acos(cosZ)
/// ```
///
/// `acos` gives Z from north. For a southern (or equatorial) assumed latitude
/// Z is reported from the south pole instead, `180° - acos(cosZ)`, so that
/// [`true_azimuth`] can apply the usual rules.
///
/// The local hour angle is taken modulo 360°, so `-10°` and `350°` give the
/// same result.
///
/// Arguments of `asin` and `acos` are clamped to `[-1, 1]` so that rounding
/// near Z = 0° or 180° can not produce NaN.
///
/// # Examples
///
/// ```rust
/// use celnav::{reduce, SightReductionInput};
///
/// // on the meridian, 15° south of the zenith
/// let result = reduce(&SightReductionInput {
///     assumed_latitude: 37.,
///     declination: 22.,
///     local_hour_angle: 0.,
/// })
/// .unwrap();
/// approx::assert_abs_diff_eq!(result.calculated_altitude, 75., epsilon = 1e-9);
/// approx::assert_abs_diff_eq!(result.true_azimuth, 180., epsilon = 1e-3);
/// ```
///
/// # Errors
///
/// `CelnavError::DomainMath` if an input is not finite, a latitude or
/// declination is outside `[-90, 90]`, or the assumed position is at a pole /
/// the body is at the zenith so that the azimuth is undefined.
pub fn reduce(input: &SightReductionInput) -> Result<SightReductionResult, CelnavError> {
    trace!("start reduce");
    let SightReductionInput {
        assumed_latitude,
        declination,
        local_hour_angle,
    } = *input;

    for (name, value) in [
        ("assumed latitude", assumed_latitude),
        ("declination", declination),
        ("local hour angle", local_hour_angle),
    ] {
        if !value.is_finite() {
            return Err(domain_error(format!("{name} must be finite, not {value}")));
        }
    }
    for (name, value) in [
        ("assumed latitude", assumed_latitude),
        ("declination", declination),
    ] {
        if value.abs() > DEG_90 {
            return Err(domain_error(format!(
                "{name} must be within [-90, 90], not {value}"
            )));
        }
    }

    let local_hour_angle = local_hour_angle.rem_euclid(DEG_360);

    let lat = assumed_latitude.to_radians();
    let dec = declination.to_radians();
    let lha = local_hour_angle.to_radians();

    let sin_hc = lat.sin() * dec.sin() + lat.cos() * dec.cos() * lha.cos();
    let hc = sin_hc.clamp(-1.0, 1.0).asin();

    let denominator = hc.cos() * lat.cos();
    if denominator.abs() < AZIMUTH_DENOMINATOR_EPSILON {
        return Err(domain_error(format!(
            "azimuth is undefined with the assumed position at a pole or the body at the zenith (lat {assumed_latitude}, Hc {})",
            hc.to_degrees()
        )));
    }
    let cos_z = (dec.sin() - hc.sin() * lat.sin()) / denominator;
    let z_from_north = cos_z.clamp(-1.0, 1.0).acos().to_degrees();
    // Z is counted from the elevated pole, which is what the Zn rules expect.
    let azimuth_angle = if assumed_latitude > 0.0 {
        z_from_north
    } else {
        DEG_180 - z_from_north
    };

    let result = SightReductionResult {
        calculated_altitude: hc.to_degrees(),
        azimuth_angle,
        true_azimuth: true_azimuth(assumed_latitude, local_hour_angle, azimuth_angle),
    };
    debug!(
        "lat {} dec {} LHA {} -> Hc {} Z {} Zn {}",
        assumed_latitude,
        declination,
        local_hour_angle,
        result.calculated_altitude,
        result.azimuth_angle,
        result.true_azimuth
    );
    trace!("end reduce");
    Ok(result)
}
