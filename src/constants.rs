// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Useful constants.
//!
//! All constants *must* be double precision. Angles are in degrees unless the
//! name says otherwise.

/// Half a circle. Hemisphere and hour-angle quadrant tests compare against
/// this, never against `PI`.
pub const DEG_180: f64 = 180.0;
/// A full circle.
pub const DEG_360: f64 = 360.0;
/// The zenith / pole.
pub const DEG_90: f64 = 90.0;

/// Arc minutes per degree.
pub const MINUTES_PER_DEGREE: f64 = 60.0;
/// One arc minute of a great circle is one nautical mile.
pub const NAUTICAL_MILES_PER_DEGREE: f64 = 60.0;

/// Dip of the sea horizon is `DIP_COEFFICIENT * sqrt(height [m])` arc minutes.
pub const DIP_COEFFICIENT: f64 = 1.76;

/// Bennett (1982) refraction: `R = cot(h + BENNETT_A / (h + BENNETT_B))` arc
/// minutes, `h` the apparent altitude in degrees.
pub const BENNETT_A: f64 = 7.31;
/// See [`BENNETT_A`].
pub const BENNETT_B: f64 = 4.4;

/// Below this (cos Hc * cos lat) the azimuth is undefined: the assumed
/// position is at a pole or the body is at the zenith.
pub const AZIMUTH_DENOMINATOR_EPSILON: f64 = 1e-12;

/// Julian Day of the J2000.0 epoch (2000 Jan 1 12h TT).
pub const J2000_JD: f64 = 2_451_545.0;
/// Days in a Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Greenwich mean sidereal time polynomial (Meeus 12.4), degrees.
pub const GST_COEFFICIENT_0: f64 = 280.460_618_37;
/// Degrees of sidereal rotation per day since J2000.0.
pub const GST_COEFFICIENT_1: f64 = 360.985_647_366_29;
/// Coefficient of T².
pub const GST_COEFFICIENT_2: f64 = 0.000_387_933;
/// Divisor of T³.
pub const GST_COEFFICIENT_3_DIVISOR: f64 = 38_710_000.0;

/// Earth Rotation Angle at J2000.0, in turns (IERS Conventions 2010, Eq. 5.15).
pub const ERA_AT_J2000_TURNS: f64 = 0.779_057_273_264_0;
/// Earth rotations per UT1 day.
pub const ERA_TURNS_PER_DAY: f64 = 1.002_737_811_911_354_48;

/// The Sun's GHA advances 15° per hour: one degree every 4 minutes of time ...
pub const MINUTES_OF_TIME_PER_GHA_DEGREE: f64 = 4.0;
/// ... or every 240 seconds of time.
pub const SECONDS_OF_TIME_PER_GHA_DEGREE: f64 = 240.0;
/// Seconds of time in an hour, for the hourly declination rate `d`.
pub const SECONDS_PER_HOUR: f64 = 3600.0;
