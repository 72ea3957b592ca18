#![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::missing_errors_doc)]

//! Celnav reduces celestial navigation sights: a sextant altitude of a body
//! and its almanac values become an intercept and a line of position from a
//! chosen position.
//!
//! # Examples
//!
//! Here's how to work a Sun sight by hand, one step at a time
//!
//! ```rust
//! use celnav::{
//!     angle::{deg_to_dm, dm_to_deg},
//!     almanac::{local_hour_angle, AlmanacEntry},
//!     correct, reduce, SextantReadingBuilder, SightReductionInput,
//! };
//! use hifitime::Epoch;
//!
//! // lower limb of the Sun, off the arc, from a cockpit
//! let reading = SextantReadingBuilder::default()
//!     .sextant_altitude(dm_to_deg(50., 58.1))
//!     .index_error(2.2)
//!     .eye_height(2.5)
//!     .semi_diameter(15.8)
//!     .build()
//!     .unwrap();
//! let correction = correct(&reading).unwrap();
//! println!("{}", correction.ledger());
//!
//! // almanac values for 15h UTC, interpolated to the time of the sight
//! let almanac = AlmanacEntry {
//!     gha_at_hour: dm_to_deg(45., 38.1),
//!     declination_at_hour: dm_to_deg(21., 43.2),
//!     declination_rate: 0.4,
//! };
//! let time = Epoch::from_gregorian_utc_hms(2025, 5, 29, 15, 19, 28);
//! let position = almanac.interpolate(&time).unwrap();
//!
//! // reduce from a chosen position of 37°N 9°W
//! let result = reduce(&SightReductionInput {
//!     assumed_latitude: 37.,
//!     declination: position.declination,
//!     local_hour_angle: local_hour_angle(position.gha, -9.),
//! })
//! .unwrap();
//!
//! let intercept = result.calculated_altitude - correction.observed_altitude();
//! assert_eq!(deg_to_dm(intercept), "-0°05.71′");
//! assert_eq!(result.true_azimuth.round(), 259.);
//! ```
//!
//! # Details
//!
//! [`sight::Observation`] ties the steps together and renders the worksheet,
//! [`io::write_log`] appends it to a plain text log. Times are handled with
//! [`hifitime`] and must be in UTC.

pub mod almanac;
pub mod angle;
pub mod constants;
pub mod error;
pub mod io;
pub mod ledger;
pub mod reduction;
pub mod sextant;
pub mod sight;
pub mod time;

pub use almanac::{AlmanacEntry, AssumedPosition, BodyPosition};
pub use error::{CLIError, CelnavError};
pub use ledger::{Ledger, LedgerRow};
pub use reduction::{reduce, SightReductionInput, SightReductionResult};
pub use sextant::{correct, AltitudeCorrection, SextantReading, SextantReadingBuilder};
pub use sight::{Direction, Observation, ObservationBuilder, SightReport};

pub use hifitime;

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "cli")] {
        pub mod cli;
        pub use cli::CelnavContext;
    }
}

#[cfg(test)]
pub(crate) mod test_common;
