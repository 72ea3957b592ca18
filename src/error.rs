//! Errors that can occur in celnav

use thiserror::Error;

use crate::io::error::IOError;

#[derive(Error, Debug)]
/// Errors that can occur on the command line
pub enum CLIError {
    /// A value given on the command line is invalid.
    #[error("Invalid Command Line Argument {option}, expected {expected}, received {received}")]
    InvalidCommandLineArgument {
        /// The option which was invalid
        option: String,
        /// What was expected
        expected: String,
        /// What was received
        received: String,
    },
}

#[derive(Error, Debug)]
/// All the errors that can occur in celnav
pub enum CelnavError {
    /// An inverse trig argument, division or input is outside the domain of
    /// the spherical triangle solution.
    #[error("{source_file}:{source_line}\nDomain error in {function}: {detail}")]
    DomainMath {
        /// The file where the error originated (usually `file!()`)
        source_file: &'static str,
        /// The line number where the error originated (usually `line!()`)
        source_line: u32,
        /// The function that rejected its inputs
        function: &'static str,
        /// What was wrong with them
        detail: String,
    },

    /// Bennett's refraction formula is only defined above the horizon.
    #[error("{source_file}:{source_line}\nRefraction is undefined at apparent altitude {apparent_altitude}°, the body must be above the horizon")]
    RefractionDomain {
        /// The file where the error originated (usually `file!()`)
        source_file: &'static str,
        /// The line number where the error originated (usually `line!()`)
        source_line: u32,
        /// The apparent altitude \[degrees\] that was rejected
        apparent_altitude: f64,
    },

    /// A timestamp was not in the UTC time scale.
    #[error("Timestamp {epoch} is in time scale {time_scale}, expected UTC")]
    TimezoneMismatch {
        /// The offending timestamp
        epoch: String,
        /// The time scale it was tagged with
        time_scale: String,
    },

    /// A sextant reading or observation could not be built.
    #[error("Invalid {what}: {reason}")]
    InvalidInput {
        /// The value being built
        what: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// A degrees-minutes string could not be parsed.
    #[error("Could not parse angle from {text:?}")]
    AngleParse {
        /// The text that was given
        text: String,
    },

    #[error("{0}")]
    /// Error derived from [`CLIError`]
    CLIError(#[from] CLIError),

    #[cfg(feature = "cli")]
    #[error("{0}")]
    /// Error derived from [`clap::Error`]
    ClapError(#[from] clap::Error),

    #[error("{0}")]
    /// Error derived from [`crate::io::error::IOError`]
    IOError(#[from] IOError),

    /// Returned by the CLI when `--dry-run` is given.
    #[error("Dry run")]
    DryRun {},
}
