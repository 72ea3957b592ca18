// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Corrections that turn a sextant altitude (Hs) into an observed altitude (Ho)
//!
//! The corrections are applied in the same order as a manual worksheet:
//! index error, dip of the horizon, refraction, then semi-diameter for limb
//! sights of the Sun or Moon.

use crate::{
    angle::deg_to_dm,
    constants::{BENNETT_A, BENNETT_B, DIP_COEFFICIENT, MINUTES_PER_DEGREE},
    error::CelnavError,
    ledger::Ledger,
};
use derive_builder::Builder;
use log::{debug, trace, warn};
use std::fmt::Display;

/// Sights lower than this \[degrees\] are legal but refraction near the horizon
/// is erratic.
const LOW_ALTITUDE_WARNING: f64 = 10.0;

/// A raw sextant reading and the instrument / observer details needed to
/// correct it.
///
/// # Examples
///
/// ```rust
/// use celnav::SextantReadingBuilder;
///
/// let reading = SextantReadingBuilder::default()
///     .sextant_altitude(50. + 58.1 / 60.)
///     .index_error(2.2)
///     .eye_height(2.5)
///     .semi_diameter(15.8)
///     .build()
///     .unwrap();
/// assert_eq!(reading.index_error, 2.2);
/// ```
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct SextantReading {
    /// Sextant altitude Hs \[degrees\]
    pub sextant_altitude: f64,
    /// Index error \[arc minutes\], on the arc negative, off the arc positive
    #[builder(default)]
    pub index_error: f64,
    /// Height of eye above sea level \[metres\]
    #[builder(default)]
    pub eye_height: f64,
    /// Semi-diameter \[arc minutes\] from the almanac. Positive for a lower
    /// limb sight, negative for upper limb, zero for stars and planets.
    #[builder(default)]
    pub semi_diameter: f64,
}

impl SextantReadingBuilder {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("sextant_altitude", self.sextant_altitude),
            ("index_error", self.index_error),
            ("eye_height", self.eye_height),
            ("semi_diameter", self.semi_diameter),
        ] {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(format!("{name} must be finite, not {value}"));
                }
            }
        }
        match self.eye_height {
            Some(height) if height < 0.0 => {
                Err(format!("eye_height must not be negative, not {height}"))
            }
            _ => Ok(()),
        }
    }
}

impl From<SextantReadingBuilderError> for CelnavError {
    fn from(err: SextantReadingBuilderError) -> Self {
        CelnavError::InvalidInput {
            what: "sextant reading",
            reason: err.to_string(),
        }
    }
}

impl Display for SextantReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Hs {} IE {:+}′ HoE {}m SD {:+}′",
            deg_to_dm(self.sextant_altitude).trim_start(),
            self.index_error,
            self.eye_height,
            self.semi_diameter
        )
    }
}

/// Dip of the sea horizon \[degrees\] for a height of eye \[metres\].
///
/// A height of zero gives zero dip.
pub fn dip(eye_height: f64) -> f64 {
    DIP_COEFFICIENT * eye_height.sqrt() / MINUTES_PER_DEGREE
}

/// Atmospheric refraction \[degrees\] at an apparent altitude \[degrees\],
/// using Bennett's formula.
///
/// # Errors
///
/// `CelnavError::RefractionDomain` if the apparent altitude is at or below the
/// horizon (or not a number), where the formula is not defined.
pub fn refraction_bennett(apparent_altitude: f64) -> Result<f64, CelnavError> {
    // written so NaN is rejected too
    if !(apparent_altitude > 0.0) {
        return Err(CelnavError::RefractionDomain {
            source_file: file!(),
            source_line: line!(),
            apparent_altitude,
        });
    }
    let cot_arg = (apparent_altitude + BENNETT_A / (apparent_altitude + BENNETT_B)).to_radians();
    Ok((1.0 / cot_arg.tan()) / MINUTES_PER_DEGREE)
}

/// Every intermediate value of a single correction run.
///
/// All angles are in degrees. `dip` and `refraction` are the (positive)
/// amounts subtracted.
#[derive(Clone, Debug, PartialEq)]
pub struct AltitudeCorrection {
    /// The reading that was corrected
    pub reading: SextantReading,
    /// Index error correction, added
    pub index_error: f64,
    /// Hs + index error
    pub index_corrected: f64,
    /// Dip, subtracted
    pub dip: f64,
    /// Apparent altitude, after dip
    pub apparent_altitude: f64,
    /// Refraction at the apparent altitude, subtracted
    pub refraction: f64,
    /// Apparent altitude after refraction
    pub refracted_altitude: f64,
    /// Semi-diameter correction, added. `None` for a star.
    pub semi_diameter: Option<f64>,
    /// Observed altitude Ho
    pub observed_altitude: f64,
}

impl AltitudeCorrection {
    /// The observed altitude Ho \[degrees\].
    pub fn observed_altitude(&self) -> f64 {
        self.observed_altitude
    }

    /// The step by step worksheet for this correction.
    pub fn ledger(&self) -> Ledger {
        let mut ledger = Ledger::builder("Sextant:")
            .row("Sextant Altitude (Hs)", self.reading.sextant_altitude)
            .row("Index Error (On - / Off +)", self.index_error)
            .row("Observed Altitude", self.index_corrected)
            .row(
                format!("Dip at {}m eye height", self.reading.eye_height),
                -self.dip,
            )
            .row("Apparent Altitude", self.apparent_altitude)
            .row(
                format!("Refraction at {}", deg_to_dm(self.apparent_altitude)),
                -self.refraction,
            )
            .row("Apparent Altitude", self.refracted_altitude);
        if let Some(semi_diameter) = self.semi_diameter {
            ledger = ledger.row("Semi-diameter (Almanac)", semi_diameter);
        }
        ledger
            .row("Height Observed (Ho)", self.observed_altitude)
            .build()
    }
}

/// Correct a sextant reading to an observed altitude.
///
/// # Examples
///
/// ```rust
/// use celnav::{correct, SextantReadingBuilder};
///
/// let reading = SextantReadingBuilder::default()
///     .sextant_altitude(50. + 58.1 / 60.)
///     .index_error(2.2)
///     .eye_height(2.5)
///     .semi_diameter(15.8)
///     .build()
///     .unwrap();
/// let correction = correct(&reading).unwrap();
/// assert_eq!(
///     correction.ledger().get("Height Observed (Ho)").unwrap().formatted_value(),
///     "+51°12.51′"
/// );
/// ```
///
/// # Errors
///
/// `CelnavError::RefractionDomain` if the apparent altitude after index error
/// and dip is at or below the horizon.
pub fn correct(reading: &SextantReading) -> Result<AltitudeCorrection, CelnavError> {
    trace!("start correct");

    let index_error = reading.index_error / MINUTES_PER_DEGREE;
    let index_corrected = reading.sextant_altitude + index_error;
    debug!("Hs {} + IE {}", reading.sextant_altitude, index_error);

    let dip = dip(reading.eye_height);
    let apparent_altitude = index_corrected - dip;
    debug!("dip {} at {}m -> apparent altitude {}", dip, reading.eye_height, apparent_altitude);

    let refraction = refraction_bennett(apparent_altitude)?;
    let refracted_altitude = apparent_altitude - refraction;
    debug!("refraction {} -> {}", refraction, refracted_altitude);
    if apparent_altitude < LOW_ALTITUDE_WARNING {
        warn!(
            "apparent altitude {} is below {}°, refraction is unreliable this low",
            deg_to_dm(apparent_altitude).trim_start(),
            LOW_ALTITUDE_WARNING
        );
    }

    let (semi_diameter, observed_altitude) = if reading.semi_diameter != 0.0 {
        let semi_diameter = reading.semi_diameter / MINUTES_PER_DEGREE;
        (Some(semi_diameter), refracted_altitude + semi_diameter)
    } else {
        (None, refracted_altitude)
    };
    debug!("Ho {}", observed_altitude);

    trace!("end correct");
    Ok(AltitudeCorrection {
        reading: reading.clone(),
        index_error,
        index_corrected,
        dip,
        apparent_altitude,
        refraction,
        refracted_altitude,
        semi_diameter,
        observed_altitude,
    })
}
