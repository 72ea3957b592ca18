//! Command Line Interface helpers for celnav

use crate::{
    almanac::{AlmanacEntry, AssumedPosition},
    angle::{deg_to_dm, DegMin},
    error::{CelnavError, CelnavError::DryRun, CLIError::InvalidCommandLineArgument},
    io::write_log,
    sextant::SextantReadingBuilder,
    sight::{format_utc, Observation, ObservationBuilder, SightReport},
    time::ensure_utc,
};
use clap::{arg, command, ValueHint::DirPath};
use hifitime::Epoch;
use log::{debug, info, trace};
use prettytable::{format as prettyformat, table, Table};
use std::{
    ffi::OsString,
    fmt::{Debug, Display},
    path::PathBuf,
};

/// Everything needed to reduce one sight from the command line.
pub struct CelnavContext {
    /// The sight to reduce
    pub observation: Observation,
    /// Directory to append the worksheet log to, if any
    pub log_dir: Option<PathBuf>,
}

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

/// Write a few lines of how this executable was compiled.
///
/// # Errors
///
/// propagates writeln! fails
pub fn fmt_build_info(f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match (GIT_HEAD_REF, GIT_COMMIT_HASH) {
        (Some(hr), Some(hash)) => {
            let dirty = GIT_DIRTY.unwrap_or(false);
            writeln!(
                f,
                "Compiled on git commit hash: {}{}",
                hash,
                if dirty { " (dirty)" } else { "" }
            )?;
            writeln!(f, "            git head ref: {}", hr)?;
        }
        _ => writeln!(f, "Compiled on git commit hash: <no git info>")?,
    }
    writeln!(f, "            {}", BUILT_TIME_UTC)?;
    writeln!(f, "         with compiler {}", RUSTC_VERSION)?;
    writeln!(f)?;
    Ok(())
}

fn minutes(value: f64) -> String {
    format!("{:+.1}′", value)
}

impl Display for CelnavContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} version {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
        )?;

        fmt_build_info(f)?;

        let obs = &self.observation;
        let mut obs_table = table!(
            [r => "Body", obs.body],
            [r => "Time", format_utc(&obs.time)],
            [r => "CP Latitude", deg_to_dm(obs.assumed_position.latitude)],
            [r => "CP Longitude", deg_to_dm(obs.assumed_position.longitude)],
            [r => "GHA (hour)", deg_to_dm(obs.almanac.gha_at_hour)],
            [r => "Declination (hour)", deg_to_dm(obs.almanac.declination_at_hour)],
            [r => "d", minutes(obs.almanac.declination_rate)],
            [r => "Hs", deg_to_dm(obs.reading.sextant_altitude)],
            [r => "Index error", minutes(obs.reading.index_error)],
            [r => "Height of eye", format!("{}m", obs.reading.eye_height)],
            [r => "Semi-diameter", minutes(obs.reading.semi_diameter)]
        );
        obs_table.set_format(*prettyformat::consts::FORMAT_CLEAN);
        writeln!(f, "Observation:\n{}", obs_table)?;

        match &self.log_dir {
            Some(dir) => writeln!(f, "Will append the worksheet to a log in {}", dir.display())?,
            None => writeln!(f, "Will not write a log")?,
        }
        Ok(())
    }
}

/// A short summary of a reduced sight, one result per row.
pub fn summary_table(report: &SightReport) -> Table {
    let mut summary = table!(
        [r => "Hc", deg_to_dm(report.reduction.calculated_altitude)],
        [r => "Ho", deg_to_dm(report.observed_altitude())],
        [r => "Intercept", format!("{:.2} nm {}", report.intercept_nm(), report.direction)],
        [r => "Zn", format!("{:.1}°", report.reduction.true_azimuth)],
        [r => "LoP", format!("{:.1}°", report.line_of_position())]
    );
    summary.set_format(*prettyformat::consts::FORMAT_CLEAN);
    summary
}

fn invalid_arg(option: &str, expected: &str, received: &str) -> CelnavError {
    InvalidCommandLineArgument {
        option: format!("--{option}"),
        expected: expected.into(),
        received: received.into(),
    }
    .into()
}

impl CelnavContext {
    fn get_matches<I, T>(args: I) -> Result<clap::ArgMatches, CelnavError>
    where
        I: IntoIterator<Item = T> + Debug,
        T: Into<OsString> + Clone,
    {
        let mut app = command!()
            .arg_required_else_help(true)
            .next_line_help(false)
            .about("Reduce a celestial sight to an intercept and line of position.")
            .after_help("Angles may be given as decimal degrees (-9.5) or degrees and minutes \
                         (50°58.1′, \"50 58.1\", 9°30′W).")
            .args(&[
                arg!(--body <NAME> "Name of the observed body")
                    .help_heading("OBSERVATION")
                    .required(false)
                    .default_value("Sun"),
                arg!(-t --time <TIME> "UTC time of the sight, e.g. \"2025-05-29T15:19:28 UTC\"")
                    .help_heading("OBSERVATION"),
                // chosen position
                arg!(--lat <ANGLE> "Latitude of the chosen position, north positive")
                    .help_heading("CHOSEN POSITION")
                    .allow_hyphen_values(true),
                arg!(--lon <ANGLE> "Longitude of the chosen position, east positive")
                    .help_heading("CHOSEN POSITION")
                    .allow_hyphen_values(true),
                // almanac
                arg!(--gha <ANGLE> "GHA of the body at the whole hour")
                    .help_heading("ALMANAC")
                    .allow_hyphen_values(true),
                arg!(--dec <ANGLE> "Declination of the body at the whole hour, north positive")
                    .help_heading("ALMANAC")
                    .allow_hyphen_values(true),
                arg!(--"dec-rate" <MINUTES> "d, hourly change in declination [arc minutes]")
                    .help_heading("ALMANAC")
                    .required(false)
                    .allow_hyphen_values(true)
                    .default_value("0"),
                // sextant
                arg!(--hs <ANGLE> "Sextant altitude")
                    .help_heading("SEXTANT")
                    .allow_hyphen_values(true),
                arg!(--"index-error" <MINUTES> "Index error [arc minutes], on the arc negative")
                    .help_heading("SEXTANT")
                    .required(false)
                    .allow_hyphen_values(true)
                    .default_value("0"),
                arg!(--"eye-height" <METRES> "Height of eye above sea level [metres]")
                    .help_heading("SEXTANT")
                    .required(false)
                    .default_value("0"),
                arg!(--"semi-diameter" <MINUTES> "Semi-diameter [arc minutes], negative for upper limb")
                    .help_heading("SEXTANT")
                    .required(false)
                    .allow_hyphen_values(true)
                    .default_value("0"),
                // output
                arg!(--"log-dir" <DIR> "Append the worksheet to a log file in this directory")
                    .help_heading("OUTPUT")
                    .value_hint(DirPath)
                    .required(false),
                arg!(--"dry-run" "Just print the observation and exit"),
            ]);

        let matches = app.try_get_matches_from_mut(args)?;
        Ok(matches)
    }

    fn parse_angle(matches: &clap::ArgMatches, name: &str) -> Result<f64, CelnavError> {
        let text = matches.value_of(name).unwrap_or_default();
        match text.parse::<DegMin>() {
            Ok(angle) => Ok(angle.to_degrees()),
            Err(_) => Err(invalid_arg(name, "an angle like 50°58.1′ or -9.5", text)),
        }
    }

    fn parse_number(matches: &clap::ArgMatches, name: &str) -> Result<f64, CelnavError> {
        match matches.value_of_t::<f64>(name) {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(invalid_arg(
                name,
                "a decimal number",
                matches.value_of(name).unwrap_or_default(),
            )),
        }
    }

    fn parse_time(matches: &clap::ArgMatches) -> Result<Epoch, CelnavError> {
        let text = matches.value_of("time").unwrap_or_default();
        let epoch = text
            .parse::<Epoch>()
            .map_err(|_| invalid_arg("time", "an ISO 8601 time like 2025-05-29T15:19:28 UTC", text))?;
        ensure_utc(&epoch)?;
        Ok(epoch)
    }

    fn parse_observation(matches: &clap::ArgMatches) -> Result<Observation, CelnavError> {
        let reading = SextantReadingBuilder::default()
            .sextant_altitude(Self::parse_angle(matches, "hs")?)
            .index_error(Self::parse_number(matches, "index-error")?)
            .eye_height(Self::parse_number(matches, "eye-height")?)
            .semi_diameter(Self::parse_number(matches, "semi-diameter")?)
            .build()?;
        let almanac = AlmanacEntry {
            gha_at_hour: Self::parse_angle(matches, "gha")?,
            declination_at_hour: Self::parse_angle(matches, "dec")?,
            declination_rate: Self::parse_number(matches, "dec-rate")?,
        };
        let assumed_position = AssumedPosition::new(
            Self::parse_angle(matches, "lat")?,
            Self::parse_angle(matches, "lon")?,
        )?;

        Ok(ObservationBuilder::default()
            .body(matches.value_of("body").unwrap_or("Sun"))
            .time(Self::parse_time(matches)?)
            .assumed_position(assumed_position)
            .almanac(almanac)
            .reading(reading)
            .build()?)
    }

    /// Parse an array of arguments into a [`CelnavContext`]
    ///
    /// # Errors
    ///
    /// Can raise:
    /// - `clap::Error` if clap cannot parse `args`
    /// - `CelnavError::CLIError` if an angle, number or time is invalid.
    /// - `CelnavError::TimezoneMismatch` if the time is not UTC.
    /// - `CelnavError::InvalidInput` if the observation is inconsistent.
    /// - `CelnavError::DryRun` if `--dry-run` was given.
    pub fn from_args<I, T>(args: I) -> Result<Self, CelnavError>
    where
        I: IntoIterator<Item = T> + Debug,
        T: Into<OsString> + Clone,
    {
        debug!("args:\n{:?}", &args);

        let matches = Self::get_matches(args)?;
        trace!("arg matches:\n{:?}", &matches);

        let result = Self {
            observation: Self::parse_observation(&matches)?,
            log_dir: matches.value_of("log-dir").map(Into::into),
        };

        debug!("observation:\n{}", &result.observation);
        info!("{}", &result);

        if matches.is_present("dry-run") {
            return Err(DryRun {});
        }

        Ok(result)
    }

    /// Reduce the sight, and append it to the log if a log directory was
    /// given.
    ///
    /// # Errors
    ///
    /// Any reduction error, or `CelnavError::IOError` if the log can not be
    /// written.
    pub fn run(self) -> Result<SightReport, CelnavError> {
        let report = self.observation.reduce()?;
        if let Some(dir) = &self.log_dir {
            write_log(dir, &report)?;
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_common::SUN_RESULTS;
    use approx::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[rustfmt::skip]
    const SUN_ARGS: &[&str] = &[
        "celnav",
        "--body", "Sun",
        "--time", "2025-05-29T15:19:28 UTC",
        "--lat", "37",
        "--lon", "-9",
        "--gha", "45°38.1′",
        "--dec", "21 43.2",
        "--dec-rate", "0.4",
        "--hs", "50°58.1'",
        "--index-error", "2.2",
        "--eye-height", "2.5",
        "--semi-diameter", "15.8",
    ];

    #[test]
    fn test_celnav_context_parses_sun_sight() {
        let ctx = CelnavContext::from_args(SUN_ARGS).unwrap();
        let obs = &ctx.observation;
        assert_eq!(obs.body, "Sun");
        assert_eq!(obs.assumed_position.latitude, 37.);
        assert_eq!(obs.assumed_position.longitude, -9.);
        assert_abs_diff_eq!(obs.almanac.gha_at_hour, 45.635, epsilon = 1e-12);
        assert_abs_diff_eq!(obs.almanac.declination_at_hour, 21.72, epsilon = 1e-12);
        assert_abs_diff_eq!(obs.reading.sextant_altitude, 50. + 58.1 / 60., epsilon = 1e-12);
        assert_eq!(obs.reading.eye_height, 2.5);
        assert!(ctx.log_dir.is_none());

        let report = ctx.run().unwrap();
        assert_abs_diff_eq!(
            report.reduction.calculated_altitude,
            SUN_RESULTS.calculated_altitude,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(report.intercept, SUN_RESULTS.intercept, epsilon = 1e-9);
    }

    #[test]
    fn test_celnav_context_display_doesnt_crash() {
        let ctx = CelnavContext::from_args(SUN_ARGS).unwrap();
        let display = format!("{}", &ctx);
        assert!(display.contains(env!("CARGO_PKG_VERSION")));
        assert!(display.contains("Compiled on git commit hash"));
        assert!(display.contains("+45°38.10′"));
        assert!(display.contains("Will not write a log"));
    }

    #[test]
    fn test_defaults() {
        #[rustfmt::skip]
        let args = [
            "celnav",
            "--time", "2025-05-29T15:19:28 UTC",
            "--lat", "37", "--lon", "-9",
            "--gha", "45.635", "--dec", "21.72",
            "--hs", "50",
        ];
        let ctx = CelnavContext::from_args(args).unwrap();
        assert_eq!(ctx.observation.body, "Sun");
        assert_eq!(ctx.observation.almanac.declination_rate, 0.);
        assert_eq!(ctx.observation.reading.index_error, 0.);
        assert_eq!(ctx.observation.reading.eye_height, 0.);
        assert_eq!(ctx.observation.reading.semi_diameter, 0.);
    }

    #[test]
    fn test_negative_angles_and_hemispheres() {
        let mut args = SUN_ARGS.to_vec();
        let lat = args.iter().position(|arg| *arg == "--lat").unwrap();
        args[lat + 1] = "-33°51.5′";
        let lon = args.iter().position(|arg| *arg == "--lon").unwrap();
        args[lon + 1] = "151°12.5′E";
        let ie = args.iter().position(|arg| *arg == "--index-error").unwrap();
        args[ie + 1] = "-1.5";

        let ctx = CelnavContext::from_args(args).unwrap();
        assert_abs_diff_eq!(
            ctx.observation.assumed_position.latitude,
            -(33. + 51.5 / 60.),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            ctx.observation.assumed_position.longitude,
            151. + 12.5 / 60.,
            epsilon = 1e-12
        );
        assert_eq!(ctx.observation.reading.index_error, -1.5);
    }

    #[test]
    fn test_dry_run() {
        let mut args = SUN_ARGS.to_vec();
        args.push("--dry-run");
        assert!(matches!(
            CelnavContext::from_args(args),
            Err(CelnavError::DryRun {})
        ));
    }

    #[test]
    fn test_run_writes_log() {
        let tmp_dir = tempdir().unwrap();
        let mut args: Vec<String> = SUN_ARGS.iter().map(|arg| arg.to_string()).collect();
        args.push("--log-dir".into());
        args.push(tmp_dir.path().display().to_string());

        let ctx = CelnavContext::from_args(args).unwrap();
        assert_eq!(ctx.log_dir.as_deref(), Some(tmp_dir.path()));
        ctx.run().unwrap();
        assert!(tmp_dir
            .path()
            .join("2025-05-29 15h19m28s UTC Sun.txt")
            .exists());
    }

    #[test]
    fn test_summary_table() {
        let report = CelnavContext::from_args(SUN_ARGS).unwrap().run().unwrap();
        let summary = summary_table(&report).to_string();
        assert!(summary.contains("+51°06.80′"));
        assert!(summary.contains("5.71 nm Towards"));
        assert!(summary.contains("258.7°"));
    }
}
