//! Errors that can occur in the io module

use thiserror::Error;

#[derive(Error, Debug)]
#[allow(clippy::upper_case_acronyms)]
/// All the errors that can occur writing sight logs
pub enum IOError {
    /// The log directory is missing or is not a directory.
    #[error("{source_file}:{source_line}\nLog directory {dir} does not exist")]
    MissingLogDir {
        /// The file where the error originated (usually `file!()`)
        source_file: &'static str,
        /// The line number where the error originated (usually `line!()`)
        source_line: u32,
        /// The directory that was given
        dir: String,
    },

    #[error("Couldn't write {path}: {io_error}")]
    /// Error derived from [`std::io::Error`] while writing a log file
    LogWrite {
        /// The log file being written
        path: String,
        /// The underlying error
        io_error: std::io::Error,
    },
}
