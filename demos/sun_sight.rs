//! Work a Sun sight off Cape St Vincent and print the worksheet.
//!
//! `cargo run --example sun_sight`, with `RUST_LOG=debug` to see each step.

use celnav::{
    angle::dm_to_deg, AlmanacEntry, AssumedPosition, CelnavError, ObservationBuilder,
    SextantReadingBuilder,
};
use hifitime::Epoch;

fn main() -> Result<(), CelnavError> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let observation = ObservationBuilder::default()
        .body("Sun")
        .time(Epoch::from_gregorian_utc(2025, 5, 29, 15, 19, 28, 914_876_000))
        .assumed_position(AssumedPosition::new(37., -9.)?)
        .almanac(AlmanacEntry {
            gha_at_hour: dm_to_deg(45., 38.1),
            declination_at_hour: dm_to_deg(21., 43.2),
            declination_rate: 0.4,
        })
        .reading(
            SextantReadingBuilder::default()
                .sextant_altitude(dm_to_deg(50., 58.1))
                .index_error(2.2)
                .eye_height(2.5)
                .semi_diameter(15.8)
                .build()?,
        )
        .build()?;

    let report = observation.reduce()?;
    print!("{report}");
    Ok(())
}
