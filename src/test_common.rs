//! Fixtures shared between unit tests: a worked Sun sight off Cape St Vincent.

use crate::{
    almanac::{AlmanacEntry, AssumedPosition},
    angle::dm_to_deg,
    sextant::{SextantReading, SextantReadingBuilder},
    sight::{Observation, ObservationBuilder},
};
use hifitime::Epoch;
use lazy_static::lazy_static;

/// Expected values for the worked Sun sight, computed independently.
pub struct SightResults {
    pub observed_altitude: f64,
    pub julian_day: f64,
    pub greenwich_sidereal_time: f64,
    pub earth_rotation_angle: f64,
    pub gha: f64,
    pub declination: f64,
    pub local_hour_angle: f64,
    pub calculated_altitude: f64,
    pub azimuth_angle: f64,
    pub true_azimuth: f64,
    pub intercept: f64,
    pub intercept_nm: f64,
}

lazy_static! {
    pub static ref SUN_OBSERVATION_TIME: Epoch =
        Epoch::from_gregorian_utc(2025, 5, 29, 15, 19, 28, 914_876_000);
    pub static ref SUN_READING: SextantReading = SextantReadingBuilder::default()
        .sextant_altitude(dm_to_deg(50., 58.1))
        .index_error(2.2)
        .eye_height(2.5)
        .semi_diameter(15.8)
        .build()
        .unwrap();
    pub static ref SUN_ALMANAC: AlmanacEntry = AlmanacEntry {
        gha_at_hour: dm_to_deg(45., 38.1),
        declination_at_hour: dm_to_deg(21., 43.2),
        declination_rate: 0.4,
    };
    pub static ref SUN_ASSUMED_POSITION: AssumedPosition = AssumedPosition::new(37., -9.).unwrap();
    pub static ref SUN_OBSERVATION: Observation = ObservationBuilder::default()
        .body("Sun")
        .time(*SUN_OBSERVATION_TIME)
        .assumed_position(*SUN_ASSUMED_POSITION)
        .almanac(*SUN_ALMANAC)
        .reading(SUN_READING.clone())
        .build()
        .unwrap();
    pub static ref SUN_RESULTS: SightResults = SightResults {
        observed_altitude: 51.208_500_473_760_13,
        julian_day: 2_460_825.138_529_107_4,
        greenwich_sidereal_time: 117.275_222_111_959_01,
        earth_rotation_angle: 116.949_666_497_297_59,
        gha: 50.501_666_666_666_665,
        declination: 21.722_111_111_111_11,
        local_hour_angle: 41.501_666_666_666_665,
        calculated_altitude: 51.113_313_001_115_48,
        azimuth_angle: 101.311_603_806_981_25,
        true_azimuth: 258.688_396_193_018_8,
        intercept: -0.095_187_472_644_653_33,
        intercept_nm: 5.711_248_358_679_199_6,
    };
}
