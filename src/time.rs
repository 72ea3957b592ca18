// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Julian Day, sidereal time and Earth Rotation Angle from a UTC timestamp.
//!
//! Timestamps are [`hifitime::Epoch`]s. They must be in the UTC time scale:
//! anything else is rejected with [`CelnavError::TimezoneMismatch`] since
//! silently using another scale gives the wrong sidereal time.

use crate::{
    constants::{
        DAYS_PER_JULIAN_CENTURY, DEG_360, ERA_AT_J2000_TURNS, ERA_TURNS_PER_DAY,
        GST_COEFFICIENT_0, GST_COEFFICIENT_1, GST_COEFFICIENT_2, GST_COEFFICIENT_3_DIVISOR,
        J2000_JD,
    },
    error::CelnavError,
};
use hifitime::{Epoch, TimeScale};
use log::trace;

/// Fail unless `epoch` is in the UTC time scale.
///
/// # Errors
///
/// `CelnavError::TimezoneMismatch` for any other time scale.
pub fn ensure_utc(epoch: &Epoch) -> Result<(), CelnavError> {
    if epoch.time_scale != TimeScale::UTC {
        return Err(CelnavError::TimezoneMismatch {
            epoch: format!("{epoch}"),
            time_scale: format!("{:?}", epoch.time_scale),
        });
    }
    Ok(())
}

/// Julian Day of a UTC timestamp (Meeus, Astronomical Algorithms ch. 7).
///
/// January and February count as months 13 and 14 of the previous year.
///
/// # Examples
///
/// ```rust
/// use celnav::time::julian_day;
/// use hifitime::Epoch;
///
/// let j2000 = Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0);
/// assert_eq!(julian_day(&j2000).unwrap(), 2_451_545.0);
/// ```
///
/// # Errors
///
/// `CelnavError::TimezoneMismatch` if `epoch` is not UTC.
pub fn julian_day(epoch: &Epoch) -> Result<f64, CelnavError> {
    ensure_utc(epoch)?;
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    let (year, month) = if month <= 2 {
        (year - 1, month as i32 + 12)
    } else {
        (year, month as i32)
    };
    let seconds = second as f64 + nanos as f64 * 1e-9;
    let day = day as f64 + hour as f64 / 24.0 + minute as f64 / 1440.0 + seconds / 86400.0;

    let a = (year as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    let jd = (365.25 * (year + 4716) as f64).floor() + (30.6001 * (month + 1) as f64).floor()
        + day
        + b
        - 1524.5;
    trace!("julian day of {} is {}", epoch, jd);
    Ok(jd)
}

/// Greenwich sidereal time, which is the GHA of Aries \[degrees, `[0, 360)`\],
/// for a Julian Day.
pub fn greenwich_sidereal_time(jd: f64) -> f64 {
    let days = jd - J2000_JD;
    let t = days / DAYS_PER_JULIAN_CENTURY;
    let gst = GST_COEFFICIENT_0 + GST_COEFFICIENT_1 * days + GST_COEFFICIENT_2 * t.powi(2)
        - t.powi(3) / GST_COEFFICIENT_3_DIVISOR;
    gst.rem_euclid(DEG_360)
}

/// Local sidereal time \[degrees, `[0, 360)`\] from Greenwich sidereal time
/// and an east-positive longitude.
pub fn local_sidereal_time(gst: f64, longitude: f64) -> f64 {
    (gst + longitude).rem_euclid(DEG_360)
}

/// Local sidereal time \[degrees\] straight from a UTC timestamp.
///
/// # Errors
///
/// `CelnavError::TimezoneMismatch` if `epoch` is not UTC.
pub fn local_sidereal_time_at(epoch: &Epoch, longitude: f64) -> Result<f64, CelnavError> {
    let jd = julian_day(epoch)?;
    Ok(local_sidereal_time(greenwich_sidereal_time(jd), longitude))
}

/// Earth Rotation Angle \[degrees, `[0, 360)`\], the CIO based replacement for
/// Greenwich sidereal time. UTC is used as an approximation of UT1.
///
/// `ERA = 360° (0.7790572732640 + 1.00273781191135448 (JD - 2451545.0))`
///
/// # Errors
///
/// `CelnavError::TimezoneMismatch` if `epoch` is not UTC.
pub fn earth_rotation_angle(epoch: &Epoch) -> Result<f64, CelnavError> {
    let jd = julian_day(epoch)?;
    // whole turns are dropped before scaling to keep precision
    let turns = ERA_AT_J2000_TURNS + ERA_TURNS_PER_DAY * (jd - J2000_JD);
    Ok(DEG_360 * turns.rem_euclid(1.0))
}
