// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Interpolating hourly almanac values to the time of a sight.

use crate::{
    angle::deg_to_dm,
    constants::{
        DEG_360, MINUTES_OF_TIME_PER_GHA_DEGREE, SECONDS_OF_TIME_PER_GHA_DEGREE, SECONDS_PER_HOUR,
    },
    error::CelnavError,
    ledger::Ledger,
    time::ensure_utc,
};
use hifitime::Epoch;
use log::{debug, trace};
use std::fmt::Display;

/// GHA gained in `minute` minutes and `second` seconds of time, at 15° per
/// hour.
pub fn gha_increment(minute: f64, second: f64) -> f64 {
    minute / MINUTES_OF_TIME_PER_GHA_DEGREE + second / SECONDS_OF_TIME_PER_GHA_DEGREE
}

/// Declination change \[degrees\] after `minute` minutes of time, given the
/// hourly `d` value in minutes of arc.
pub fn declination_increment(rate: f64, minute: f64) -> f64 {
    rate * minute / SECONDS_PER_HOUR
}

/// Local hour angle \[degrees, `[0, 360)`\] from GHA and an east-positive
/// longitude.
pub fn local_hour_angle(gha: f64, longitude: f64) -> f64 {
    (gha + longitude + DEG_360).rem_euclid(DEG_360)
}

/// A body's tabulated values for the whole UTC hour of the sight.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AlmanacEntry {
    /// GHA at the start of the hour \[degrees\]
    pub gha_at_hour: f64,
    /// Declination at the start of the hour \[degrees, north positive\]
    pub declination_at_hour: f64,
    /// `d`, the hourly change in declination \[minutes of arc, signed\]
    pub declination_rate: f64,
}

impl AlmanacEntry {
    /// Interpolate to the minute and whole second of `epoch`.
    ///
    /// # Errors
    ///
    /// `CelnavError::TimezoneMismatch` if `epoch` is not UTC, and
    /// `CelnavError::InvalidInput` if any tabulated value is not finite.
    pub fn interpolate(&self, epoch: &Epoch) -> Result<BodyPosition, CelnavError> {
        trace!("start interpolate");
        ensure_utc(epoch)?;
        for (name, value) in [
            ("GHA", self.gha_at_hour),
            ("declination", self.declination_at_hour),
            ("d", self.declination_rate),
        ] {
            if !value.is_finite() {
                return Err(CelnavError::InvalidInput {
                    what: "almanac entry",
                    reason: format!("{name} is {value}"),
                });
            }
        }

        let (_, _, _, _, minute, second, _) = epoch.to_gregorian_utc();
        let gha_increment = gha_increment(minute as f64, second as f64);
        let declination_increment = declination_increment(self.declination_rate, minute as f64);
        let position = BodyPosition {
            gha_increment,
            gha: self.gha_at_hour + gha_increment,
            declination_increment,
            declination: self.declination_at_hour + declination_increment,
        };
        debug!(
            "{}m{}s after the hour: GHA {} dec {}",
            minute, second, position.gha, position.declination
        );
        trace!("end interpolate");
        Ok(position)
    }
}

impl Display for AlmanacEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GHA {} dec {} d {:+.1}′",
            deg_to_dm(self.gha_at_hour).trim_start(),
            deg_to_dm(self.declination_at_hour).trim_start(),
            self.declination_rate
        )
    }
}

/// A body's GHA and declination at the time of the sight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyPosition {
    /// GHA gained since the start of the hour \[degrees\]
    pub gha_increment: f64,
    /// Greenwich hour angle \[degrees\], not normalised
    pub gha: f64,
    /// Declination gained since the start of the hour \[degrees\]
    pub declination_increment: f64,
    /// Declination \[degrees\]
    pub declination: f64,
}

impl BodyPosition {
    /// Worksheet block for the position of `body` observed at `epoch`.
    pub fn ledger(&self, almanac: &AlmanacEntry, body: &str, epoch: &Epoch) -> Ledger {
        let (year, month, day, hour, minute, second, _) = epoch.to_gregorian_utc();
        Ledger::builder(format!("Position of {body}:"))
            .row_with_raw(
                format!("GHA of {body} {year}-{month:02}-{day:02} {hour:02}h (Almanac)"),
                almanac.gha_at_hour.rem_euclid(DEG_360),
            )
            .row(format!("GHA increment at {minute}m {second}s"), self.gha_increment)
            .row_with_raw(
                format!("GHA of {body} at {hour}h {minute}m {second}s"),
                self.gha.rem_euclid(DEG_360),
            )
            .row(format!("Declination at {hour}h (Almanac)"), almanac.declination_at_hour)
            .row(
                format!("Decl incr {} at {minute}m (Almanac)", almanac.declination_rate),
                self.declination_increment,
            )
            .row_with_raw(format!("Declination of {body}"), self.declination)
            .build()
    }
}

/// The chosen position a sight is worked from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AssumedPosition {
    /// \[degrees, north positive\]
    pub latitude: f64,
    /// \[degrees, east positive\]
    pub longitude: f64,
}

impl AssumedPosition {
    /// # Errors
    ///
    /// `CelnavError::InvalidInput` if the latitude is outside `[-90, 90]` or
    /// either coordinate is not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CelnavError> {
        if !latitude.is_finite() || !longitude.is_finite() || latitude.abs() > 90.0 {
            return Err(CelnavError::InvalidInput {
                what: "assumed position",
                reason: format!("latitude {latitude} longitude {longitude}"),
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl Display for AssumedPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            deg_to_dm(self.latitude).trim_start(),
            deg_to_dm(self.longitude).trim_start()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_common::{SUN_ALMANAC, SUN_OBSERVATION_TIME, SUN_RESULTS};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gha_increment_is_fifteen_degrees_per_hour() {
        assert_abs_diff_eq!(gha_increment(60., 0.), 15., epsilon = 1e-12);
        assert_abs_diff_eq!(gha_increment(0., 3600.), 15., epsilon = 1e-12);
        assert_abs_diff_eq!(gha_increment(19., 28.), 4.866_666_666_666_666, epsilon = 1e-12);
    }

    #[test]
    fn test_declination_increment() {
        assert_abs_diff_eq!(declination_increment(0.4, 19.), 0.002_111_111_111_111, epsilon = 1e-12);
        assert_abs_diff_eq!(declination_increment(-0.6, 30.), -0.005, epsilon = 1e-12);
        assert_eq!(declination_increment(0.4, 0.), 0.);
    }

    #[test]
    fn test_local_hour_angle_normalises() {
        assert_abs_diff_eq!(local_hour_angle(50.5, -9.), 41.5, epsilon = 1e-12);
        assert_abs_diff_eq!(local_hour_angle(5., -9.), 356., epsilon = 1e-12);
        assert_abs_diff_eq!(local_hour_angle(355., 10.), 5., epsilon = 1e-12);
        assert_abs_diff_eq!(local_hour_angle(370., 179.), 189., epsilon = 1e-12);
        assert_abs_diff_eq!(local_hour_angle(-400., 0.), 320., epsilon = 1e-12);
        for gha in (0..720).step_by(13) {
            for lon in (-180..=180).step_by(11) {
                let lha = local_hour_angle(gha as f64, lon as f64);
                assert!((0. ..360.).contains(&lha), "{gha} {lon} -> {lha}");
            }
        }
    }

    #[test]
    fn test_interpolate_sun() {
        let position = SUN_ALMANAC.interpolate(&SUN_OBSERVATION_TIME).unwrap();
        assert_abs_diff_eq!(position.gha, SUN_RESULTS.gha, epsilon = 1e-9);
        assert_abs_diff_eq!(position.declination, SUN_RESULTS.declination, epsilon = 1e-9);
        assert_abs_diff_eq!(
            local_hour_angle(position.gha, -9.),
            SUN_RESULTS.local_hour_angle,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_interpolate_ignores_fractional_seconds() {
        let whole = Epoch::from_gregorian_utc_hms(2025, 5, 29, 15, 19, 28);
        let a = SUN_ALMANAC.interpolate(&whole).unwrap();
        let b = SUN_ALMANAC.interpolate(&SUN_OBSERVATION_TIME).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_interpolate_rejects_bad_inputs() {
        let tai = Epoch::from_gregorian_tai_hms(2025, 5, 29, 15, 19, 28);
        assert!(matches!(
            SUN_ALMANAC.interpolate(&tai),
            Err(CelnavError::TimezoneMismatch { .. })
        ));
        let bad = AlmanacEntry {
            declination_rate: f64::NAN,
            ..*SUN_ALMANAC
        };
        assert!(matches!(
            bad.interpolate(&SUN_OBSERVATION_TIME),
            Err(CelnavError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_body_ledger_rows() {
        let position = SUN_ALMANAC.interpolate(&SUN_OBSERVATION_TIME).unwrap();
        let ledger = position.ledger(&SUN_ALMANAC, "Sun", &SUN_OBSERVATION_TIME);
        assert_eq!(ledger.title, "Position of Sun:");
        let labels: Vec<_> = ledger.rows().iter().map(|row| row.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "GHA of Sun 2025-05-29 15h (Almanac)",
                "GHA increment at 19m 28s",
                "GHA of Sun at 15h 19m 28s",
                "Declination at 15h (Almanac)",
                "Decl incr 0.4 at 19m (Almanac)",
                "Declination of Sun",
            ]
        );
        assert_eq!(ledger.rows()[0].formatted_value(), "+45°38.10′");
        assert_eq!(ledger.rows()[1].formatted_value(), "+4°52.00′");
        assert_eq!(ledger.rows()[2].raw, Some(position.gha));
        assert_eq!(ledger.rows()[5].formatted_value(), "+21°43.33′");
    }

    #[test]
    fn test_assumed_position() {
        let position = AssumedPosition::new(37., -9.).unwrap();
        assert_eq!(position.to_string(), "+37°00.00′ -9°00.00′");
        assert!(AssumedPosition::new(90.5, 0.).is_err());
        assert!(AssumedPosition::new(0., f64::INFINITY).is_err());
    }
}
