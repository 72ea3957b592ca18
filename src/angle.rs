// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Conversion between decimal degrees and the degrees-minutes notation used in
//! almanacs, sextant readings and worksheets.
//!
//! In a (degrees, minutes) pair the sign belongs to the whole pair. It is taken
//! from the degrees, the sign of the minutes is ignored.

use crate::{constants::MINUTES_PER_DEGREE, error::CelnavError};
use lazy_static::lazy_static;
use regex::Regex;
use std::{fmt::Display, str::FromStr};

/// Minimum width of a [`deg_to_dm`] string, for lining up worksheet columns.
pub const DM_WIDTH: usize = 8;

lazy_static! {
    static ref DM_REGEX: Regex = Regex::new(
        r"^\s*(?P<sign>[+-])?\s*(?P<deg>\d+(?:\.\d+)?)\s*(?:°|d)?\s*(?:(?P<min>\d+(?:\.\d+)?)\s*(?:′|'|m)?)?\s*(?P<hemi>[NSEWnsew])?\s*$"
    )
    .expect("degrees-minutes regex is valid");
}

/// `-1.0` for negative values, `1.0` otherwise (including zero).
pub fn sign(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Convert a (degrees, minutes) pair to decimal degrees.
///
/// # Examples
///
/// ```rust
/// use celnav::angle::dm_to_deg;
///
/// approx::assert_abs_diff_eq!(dm_to_deg(45., 38.1), 45.635, epsilon = 1e-9);
/// approx::assert_abs_diff_eq!(dm_to_deg(-9., 30.), -9.5, epsilon = 1e-9);
/// ```
pub fn dm_to_deg(degrees: f64, minutes: f64) -> f64 {
    sign(degrees) * (degrees.abs() + minutes.abs() / MINUTES_PER_DEGREE)
}

/// Format decimal degrees as `±D°MM.mm′`, right justified to [`DM_WIDTH`].
///
/// Values that do not fit a [`DegMin`] (NaN, infinities, more than
/// `u32::MAX` degrees) are printed as plain decimals.
///
/// # Examples
///
/// ```rust
/// use celnav::angle::deg_to_dm;
///
/// assert_eq!(deg_to_dm(50. + 58.1 / 60.), "+50°58.10′");
/// assert_eq!(deg_to_dm(-0.5), "-0°30.00′");
/// ```
pub fn deg_to_dm(degrees: f64) -> String {
    if !fits_degmin(degrees) {
        return format!("{:>width$}", degrees, width = DM_WIDTH);
    }
    format!("{:>width$}", DegMin::from_degrees(degrees), width = DM_WIDTH)
}

fn fits_degmin(degrees: f64) -> bool {
    degrees.is_finite() && degrees.abs() < u32::MAX as f64
}

/// A structured degrees-minutes angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DegMin {
    /// Whether the angle is negative (south / west / "on the arc")
    pub negative: bool,
    /// Whole degrees, truncated toward zero
    pub degrees: u32,
    /// Minutes of arc in `[0, 60)`
    pub minutes: f64,
}

impl DegMin {
    /// Build from a (degrees, minutes) pair, with the sign of `degrees`.
    pub fn new(degrees: f64, minutes: f64) -> Self {
        Self::from_degrees(dm_to_deg(degrees, minutes))
    }

    /// Split decimal degrees into whole degrees and minutes.
    ///
    /// Whole degrees saturate at `u32::MAX`.
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            negative: degrees < 0.0,
            degrees: degrees.trunc().abs() as u32,
            minutes: (degrees.fract() * MINUTES_PER_DEGREE).abs(),
        }
    }

    /// Back to decimal degrees.
    pub fn to_degrees(&self) -> f64 {
        let magnitude = self.degrees as f64 + self.minutes / MINUTES_PER_DEGREE;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl Display for DegMin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut degrees = self.degrees;
        let mut minutes = format!("{:05.2}", self.minutes);
        // 59.999′ prints as 60.00′, carry it.
        if minutes == "60.00" {
            degrees += 1;
            minutes = "00.00".into();
        }
        let text = format!(
            "{}{}°{}′",
            if self.negative { "-" } else { "+" },
            degrees,
            minutes
        );
        f.pad(&text)
    }
}

impl FromStr for DegMin {
    type Err = CelnavError;

    /// Parse `50°58.1′`, `50°58.1'`, `50 58.1`, `-0°30′`, `21.72`, `9°W` and
    /// similar. A trailing `S` or `W` makes the angle negative.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let parse_err = || CelnavError::AngleParse { text: text.into() };
        let caps = DM_REGEX.captures(text).ok_or_else(parse_err)?;

        let degrees: f64 = caps["deg"].parse().map_err(|_| parse_err())?;
        let minutes: f64 = match caps.name("min") {
            Some(min) => {
                // fractional degrees and minutes together are ambiguous
                if degrees.fract() != 0.0 {
                    return Err(parse_err());
                }
                min.as_str().parse().map_err(|_| parse_err())?
            }
            None => 0.0,
        };
        if minutes >= MINUTES_PER_DEGREE {
            return Err(parse_err());
        }

        let signed = caps.name("sign").map(|m| m.as_str());
        let hemisphere = caps.name("hemi").map(|m| m.as_str().to_ascii_uppercase());
        let negative = match (signed, hemisphere.as_deref()) {
            (Some(_), Some(_)) => return Err(parse_err()),
            (Some("-"), None) => true,
            (None, Some("S" | "W")) => true,
            _ => false,
        };

        let magnitude = degrees + minutes / MINUTES_PER_DEGREE;
        if !fits_degmin(magnitude) {
            return Err(parse_err());
        }
        Ok(Self::from_degrees(if negative {
            -magnitude
        } else {
            magnitude
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_dm_to_deg_almanac_value() {
        assert_abs_diff_eq!(dm_to_deg(45., 38.1), 45.635, epsilon = 1e-9);
        assert_abs_diff_eq!(dm_to_deg(21., 43.2), 21.72, epsilon = 1e-9);
    }

    #[test]
    fn test_dm_to_deg_sign_from_degrees_only() {
        assert_abs_diff_eq!(dm_to_deg(-9., 30.), -9.5, epsilon = 1e-12);
        assert_abs_diff_eq!(dm_to_deg(-9., -30.), -9.5, epsilon = 1e-12);
        assert_abs_diff_eq!(dm_to_deg(9., -30.), 9.5, epsilon = 1e-12);
        // zero degrees is positive
        assert_abs_diff_eq!(dm_to_deg(0., -30.), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_deg_to_dm_formats() {
        assert_eq!(deg_to_dm(50. + 58.1 / 60.), "+50°58.10′");
        assert_eq!(deg_to_dm(2.2 / 60.), "+0°02.20′");
        assert_eq!(deg_to_dm(-0.5), "-0°30.00′");
        assert_eq!(deg_to_dm(0.), "+0°00.00′");
        assert_eq!(deg_to_dm(-0.), "+0°00.00′");
        assert_eq!(deg_to_dm(-123.25), "-123°15.00′");
    }

    #[test]
    fn test_deg_to_dm_carries_sixty_minutes() {
        assert_eq!(deg_to_dm(123.999_999), "+124°00.00′");
        assert_eq!(deg_to_dm(-0.999_999), "-1°00.00′");
    }

    #[test]
    fn test_deg_to_dm_out_of_range() {
        assert_eq!(deg_to_dm(f64::NAN), "     NaN");
        assert_eq!(deg_to_dm(f64::INFINITY), "     inf");
        assert_eq!(deg_to_dm(-f64::INFINITY), "    -inf");
        assert_eq!(deg_to_dm(5e9), "5000000000");
        assert_eq!(deg_to_dm(-5e9), "-5000000000");
    }

    #[test]
    fn test_dm_round_trip() {
        for degrees in (-180i32..=180).step_by(7) {
            for &minutes in &[0., 0.01, 12.5, 29.99, 38.1, 59.99] {
                let decimal = dm_to_deg(degrees as f64, minutes);
                let expected = format!(
                    "{}{}°{:05.2}′",
                    if degrees < 0 { "-" } else { "+" },
                    degrees.abs(),
                    minutes
                );
                assert_eq!(deg_to_dm(decimal), expected, "({degrees}, {minutes})");

                let dm = DegMin::from_degrees(decimal);
                assert_eq!(dm.degrees, degrees.unsigned_abs());
                assert_abs_diff_eq!(dm.minutes, minutes, epsilon = 1e-9);
                assert_abs_diff_eq!(dm.to_degrees(), decimal, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_degmin_new_matches_dm_to_deg() {
        let dm = DegMin::new(-21., 43.2);
        assert!(dm.negative);
        assert_eq!(dm.degrees, 21);
        assert_abs_diff_eq!(dm.to_degrees(), -21.72, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_degmin() {
        for (text, expected) in [
            ("50°58.1′", 50. + 58.1 / 60.),
            ("50°58.1'", 50. + 58.1 / 60.),
            ("50 58.1", 50. + 58.1 / 60.),
            ("+2.2", 2.2),
            ("-9", -9.),
            ("-0°30′", -0.5),
            ("21.72", 21.72),
            ("37°00.0′N", 37.),
            ("9°W", -9.),
            ("12d30m", 12.5),
            (" 45° 38.1′ ", 45.635),
        ] {
            let dm: DegMin = text.parse().unwrap();
            assert_abs_diff_eq!(dm.to_degrees(), expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_parse_degmin_rejects_garbage() {
        for text in [
            "", "abc", "50°61.0′", "50.5 10", "-9W", "1.2.3", "--9", "9 9 9",
            "5000000000", "4294967296°00.0′",
        ] {
            assert!(
                matches!(
                    text.parse::<DegMin>(),
                    Err(CelnavError::AngleParse { .. })
                ),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn test_display_pads_like_deg_to_dm() {
        let dm = DegMin::from_degrees(1.5);
        assert_eq!(format!("{dm:>12}"), "   +1°30.00′");
        assert_eq!(dm.to_string(), "+1°30.00′");
    }
}
