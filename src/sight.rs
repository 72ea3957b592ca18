// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A complete sight: from a sextant reading and almanac page to an intercept
//! and line of position.
//!
//! # Examples
//!
//! ```rust
//! use celnav::{
//!     angle::dm_to_deg, AlmanacEntry, AssumedPosition, Direction, ObservationBuilder,
//!     SextantReadingBuilder,
//! };
//! use hifitime::Epoch;
//!
//! let observation = ObservationBuilder::default()
//!     .body("Sun")
//!     .time(Epoch::from_gregorian_utc_hms(2025, 5, 29, 15, 19, 28))
//!     .assumed_position(AssumedPosition::new(37., -9.).unwrap())
//!     .almanac(AlmanacEntry {
//!         gha_at_hour: dm_to_deg(45., 38.1),
//!         declination_at_hour: dm_to_deg(21., 43.2),
//!         declination_rate: 0.4,
//!     })
//!     .reading(
//!         SextantReadingBuilder::default()
//!             .sextant_altitude(dm_to_deg(50., 58.1))
//!             .index_error(2.2)
//!             .eye_height(2.5)
//!             .semi_diameter(15.8)
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let report = observation.reduce().unwrap();
//! assert_eq!(report.direction, Direction::Towards);
//! assert!((report.intercept_nm() - 5.71).abs() < 0.01);
//! ```

use crate::{
    almanac::{local_hour_angle, AlmanacEntry, AssumedPosition, BodyPosition},
    constants::{DEG_180, DEG_360, DEG_90, NAUTICAL_MILES_PER_DEGREE},
    error::CelnavError,
    ledger::{render_columns, Ledger},
    reduction::{reduce, SightReductionInput, SightReductionResult},
    sextant::{correct, AltitudeCorrection, SextantReading},
};
use derive_builder::Builder;
use hifitime::Epoch;
use log::{debug, trace, warn};
use std::fmt::Display;

/// Intercepts longer than this \[nautical miles\] usually mean a blunder in
/// the inputs rather than a poor assumed position.
const LARGE_INTERCEPT_NM: f64 = 30.0;

/// Everything recorded for one sight.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Observation {
    /// Name of the body, e.g. `Sun`
    #[builder(setter(into))]
    pub body: String,
    /// Time of the sight, in UTC
    pub time: Epoch,
    /// Chosen position the sight is worked from
    pub assumed_position: AssumedPosition,
    /// Almanac values for the hour of the sight
    pub almanac: AlmanacEntry,
    /// The sextant reading
    pub reading: SextantReading,
}

impl ObservationBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.body {
            Some(body) if body.trim().is_empty() => Err("body must not be empty".into()),
            Some(body) if body.contains(['/', '\\']) => {
                Err(format!("body must not contain path separators, not {body:?}"))
            }
            _ => Ok(()),
        }
    }
}

impl From<ObservationBuilderError> for CelnavError {
    fn from(err: ObservationBuilderError) -> Self {
        CelnavError::InvalidInput {
            what: "observation",
            reason: err.to_string(),
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS.ffffff UTC`
pub(crate) fn format_utc(epoch: &Epoch) -> String {
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    format!(
        "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{:06} UTC",
        nanos / 1000
    )
}

impl Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} at {}", self.body, format_utc(&self.time))?;
        writeln!(f, "Chosen position: {}", self.assumed_position)?;
        writeln!(f, "Almanac: {}", self.almanac)?;
        write!(f, "Sextant: {}", self.reading)
    }
}

impl Observation {
    /// Correct the sextant altitude, interpolate the almanac, and reduce the
    /// sight from the assumed position.
    ///
    /// # Errors
    ///
    /// Any error from [`correct`], [`AlmanacEntry::interpolate`] or
    /// [`reduce`], e.g. `CelnavError::TimezoneMismatch` for a non-UTC time.
    pub fn reduce(&self) -> Result<SightReport, CelnavError> {
        trace!("start reduce observation");
        let correction = correct(&self.reading)?;
        let position = self.almanac.interpolate(&self.time)?;
        let local_hour_angle = local_hour_angle(position.gha, self.assumed_position.longitude);
        let reduction = reduce(&SightReductionInput {
            assumed_latitude: self.assumed_position.latitude,
            declination: position.declination,
            local_hour_angle,
        })?;

        let observed_altitude = correction.observed_altitude();
        let intercept = reduction.calculated_altitude - observed_altitude;
        let direction = if observed_altitude > reduction.calculated_altitude {
            Direction::Towards
        } else {
            Direction::Away
        };
        let report = SightReport {
            observation: self.clone(),
            correction,
            position,
            local_hour_angle,
            reduction,
            intercept,
            direction,
        };
        debug!(
            "intercept {} nm {}, Zn {}",
            report.intercept_nm(),
            report.direction,
            report.reduction.true_azimuth
        );
        if report.intercept_nm() > LARGE_INTERCEPT_NM {
            warn!(
                "intercept of {:.1} nm is larger than {} nm, check the inputs",
                report.intercept_nm(),
                LARGE_INTERCEPT_NM
            );
        }
        trace!("end reduce observation");
        Ok(report)
    }
}

/// Which way to plot the intercept from the assumed position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Along the true azimuth, the observed altitude is higher
    Towards,
    /// Along the reciprocal of the true azimuth
    Away,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Direction::Towards => "Towards",
            Direction::Away => "Away",
        })
    }
}

/// The reduced sight.
#[derive(Clone, Debug, PartialEq)]
pub struct SightReport {
    /// What was reduced
    pub observation: Observation,
    /// Sextant corrections, ending with Ho
    pub correction: AltitudeCorrection,
    /// GHA and declination at the time of the sight
    pub position: BodyPosition,
    /// LHA from the assumed longitude \[degrees\]
    pub local_hour_angle: f64,
    /// Hc, Z and Zn
    pub reduction: SightReductionResult,
    /// Hc - Ho \[degrees\]
    pub intercept: f64,
    /// Towards if Ho > Hc
    pub direction: Direction,
}

impl SightReport {
    /// Ho \[degrees\]
    pub fn observed_altitude(&self) -> f64 {
        self.correction.observed_altitude()
    }

    /// Length of the intercept in nautical miles.
    pub fn intercept_nm(&self) -> f64 {
        self.intercept.abs() * NAUTICAL_MILES_PER_DEGREE
    }

    /// Bearing of the line of position \[degrees\], at right angles to Zn.
    pub fn line_of_position(&self) -> f64 {
        (self.reduction.true_azimuth + DEG_90).rem_euclid(DEG_360)
    }

    /// Lines printed above the worksheet.
    pub fn info_lines(&self) -> Vec<String> {
        vec![
            format!("Observed Body: {}", self.observation.body),
            format!("Observation time {}", format_utc(&self.observation.time)),
        ]
    }

    /// Worksheet block for the chosen position.
    pub fn chosen_position_ledger(&self) -> Ledger {
        let position = &self.observation.assumed_position;
        Ledger::builder("Chosen Position:")
            .row_with_raw("CP Latitude", position.latitude)
            .row_with_raw("CP Longitude", position.longitude)
            .row_with_raw(
                format!("LHA of {} (GHA + CP Lon)", self.observation.body),
                self.local_hour_angle,
            )
            .build()
    }

    /// Worksheet block comparing Hc with Ho.
    pub fn results_ledger(&self) -> Ledger {
        Ledger::builder("Sight Reduction:")
            .row_with_raw(
                "Hc calculated from CP lat, Decl, LHA",
                self.reduction.calculated_altitude,
            )
            .row_with_raw("Ho from sextant", self.observed_altitude())
            .row(format!("Intercept ({})", self.direction), self.intercept)
            .row("Azimuth angle (Z)", self.reduction.azimuth_angle)
            .row_with_raw("True azimuth (Zn)", self.reduction.true_azimuth)
            .row("Line of position", self.line_of_position())
            .build()
    }

    /// How Zn was resolved from Z.
    pub fn azimuth_rule(&self) -> &'static str {
        let west = self.local_hour_angle <= DEG_180;
        match (self.observation.assumed_position.latitude > 0.0, west) {
            (true, false) => "Latitude North and LHA > 180°: Zn = Z",
            (true, true) => "Latitude North and LHA <= 180°: Zn = 360° - Z",
            (false, false) => "Latitude South and LHA > 180°: Zn = 180° - Z",
            (false, true) => "Latitude South and LHA <= 180°: Zn = 180° + Z",
        }
    }

    /// All worksheet tables, each as `(label, value)` text pairs.
    pub fn tables(&self) -> Vec<Vec<(String, String)>> {
        let blank = || (String::new(), String::new());
        let sections = [
            self.correction.ledger(),
            self.position
                .ledger(&self.observation.almanac, &self.observation.body, &self.observation.time),
            self.chosen_position_ledger(),
            self.results_ledger(),
        ];
        let mut tables: Vec<_> = sections
            .iter()
            .map(|ledger| {
                let mut rows = vec![blank()];
                rows.extend(ledger.text_rows());
                rows
            })
            .collect();
        let mut summary = vec![(
            format!("Intercept ({})", self.direction),
            format!("{:5.2} nm", self.intercept_nm()),
        )];
        // the rule is only spelled out when Z is counted from the south pole
        if self.observation.assumed_position.latitude <= 0.0 {
            summary.push((self.azimuth_rule().to_string(), String::new()));
        }
        summary.push((
            format!(
                "  Zn (Azimuth) {:.0}°, LoP {:.0}°",
                self.reduction.true_azimuth,
                self.line_of_position()
            ),
            String::new(),
        ));
        tables.push(summary);
        tables
    }
}

impl Display for SightReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.info_lines() {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "{}", render_columns(&self.tables()))
    }
}
