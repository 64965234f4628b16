//! Writing the rendered calendar to disk.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::config::LineEndings;
use crate::error::ConfcalResult;

/// Write `ics` to `path`, replacing any existing file.
///
/// The content goes to a temporary file in the destination directory first
/// and is renamed into place, so readers never see a half-written calendar.
pub fn write_calendar(path: &Path, ics: &str, line_endings: LineEndings) -> ConfcalResult<()> {
    let content = match line_endings {
        LineEndings::Crlf => ics.to_string(),
        LineEndings::Lf => ics.replace('\r', ""),
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    info!(path = %path.display(), bytes = content.len(), "calendar written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICS: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";

    #[test]
    fn test_write_calendar_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.ics");

        write_calendar(&path, ICS, LineEndings::Crlf).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), ICS);
    }

    #[test]
    fn test_write_calendar_lf_strips_carriage_returns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.ics");

        write_calendar(&path, ICS, LineEndings::Lf).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "BEGIN:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR\n");
    }

    #[test]
    fn test_write_calendar_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.ics");
        std::fs::write(&path, "x".repeat(4096)).unwrap();

        write_calendar(&path, ICS, LineEndings::Crlf).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), ICS);
    }

    #[test]
    fn test_write_calendar_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("agenda.ics");

        let result = write_calendar(&path, ICS, LineEndings::Crlf);
        assert!(matches!(result, Err(crate::error::ConfcalError::Io(_))));
    }
}
