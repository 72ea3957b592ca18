//! Plain text sight logs.
//!
//! One file per observation, named after the UTC time of the sight and the
//! body, e.g. `2025-05-29 15h19m28s UTC Sun.txt`. Writing the same observation
//! again appends another copy of the worksheet.

pub mod error;

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use log::{info, trace};

use crate::sight::SightReport;

use self::error::IOError;

/// The log file name for a report. `:` is avoided since it is not allowed in
/// file names everywhere.
pub fn log_filename(report: &SightReport) -> String {
    let (year, month, day, hour, minute, second, _) = report.observation.time.to_gregorian_utc();
    format!(
        "{year:04}-{month:02}-{day:02} {hour:02}h{minute:02}m{second:02}s UTC {}.txt",
        report.observation.body
    )
}

/// Append the rendered report to its log file in `dir`, returning the path
/// written.
///
/// # Errors
///
/// `IOError::MissingLogDir` if `dir` is not an existing directory, and
/// `IOError::LogWrite` if the file can not be opened or written.
pub fn write_log<P: AsRef<Path>>(dir: P, report: &SightReport) -> Result<PathBuf, IOError> {
    trace!("start write_log");
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(IOError::MissingLogDir {
            source_file: file!(),
            source_line: line!(),
            dir: dir.display().to_string(),
        });
    }

    let path = dir.join(log_filename(report));
    let to_io_error = |io_error| IOError::LogWrite {
        path: path.display().to_string(),
        io_error,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(to_io_error)?;
    write!(file, "{report}").map_err(to_io_error)?;

    info!("sight logged to {}", path.display());
    trace!("end write_log");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_common::SUN_OBSERVATION;
    use std::fs::read_to_string;
    use tempfile::tempdir;

    #[test]
    fn test_log_filename() {
        let report = SUN_OBSERVATION.reduce().unwrap();
        assert_eq!(log_filename(&report), "2025-05-29 15h19m28s UTC Sun.txt");
    }

    #[test]
    fn test_write_log_appends() {
        let tmp_dir = tempdir().unwrap();
        let report = SUN_OBSERVATION.reduce().unwrap();

        let path = write_log(tmp_dir.path(), &report).unwrap();
        assert_eq!(path, tmp_dir.path().join("2025-05-29 15h19m28s UTC Sun.txt"));
        let once = read_to_string(&path).unwrap();
        assert_eq!(once, report.to_string());

        write_log(tmp_dir.path(), &report).unwrap();
        let twice = read_to_string(&path).unwrap();
        assert_eq!(twice, format!("{once}{once}"));
    }

    #[test]
    fn test_write_log_missing_dir() {
        let tmp_dir = tempdir().unwrap();
        let report = SUN_OBSERVATION.reduce().unwrap();
        assert!(matches!(
            write_log(tmp_dir.path().join("Logs"), &report),
            Err(IOError::MissingLogDir { .. })
        ));
    }
}
