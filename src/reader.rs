use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{LabelError, Result};
use crate::table::{LabelTable, COLUMNS};
use crate::types::{RawRecording, Sample, SegmentLabel};
use crate::utils::{is_missing_cell, parse_int_cell, split_fields};

/// Reads a raw recording from disk
///
/// The file holds one `timestamp;value` pair per line with no header.
/// Blank lines are skipped. Timestamps are kept verbatim, values must be
/// numeric.
///
/// # Errors
///
/// * `LabelError::InputNotFound` - the file does not exist
/// * `LabelError::InputMalformed` - a line is not valid UTF-8, does not have
///   exactly two fields, or its value is not a number
/// * `LabelError::InputEmpty` - the file contains no samples
///
/// # Examples
///
/// ```rust
/// use ecglabel::read_recording;
///
/// # let dir = tempfile::tempdir()?;
/// # let path = dir.path().join("s01_1_klud.csv");
/// # ecglabel::doctest_utils::create_test_recording(&path, 250)?;
/// let recording = read_recording(&path)?;
/// assert_eq!(recording.len(), 250);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_recording<P: AsRef<Path>>(path: P) -> Result<RawRecording> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LabelError::InputNotFound(path.display().to_string()),
        _ => LabelError::Io(e),
    })?;

    let recording = parse_recording(BufReader::new(file))?;
    if recording.is_empty() {
        return Err(LabelError::InputEmpty(path.display().to_string()));
    }

    log::info!("Loaded {} samples from {}", recording.len(), path.display());
    Ok(recording)
}

/// Parses recording rows from any buffered source
///
/// Unlike [`read_recording`] an empty source yields an empty recording.
pub fn parse_recording<R: BufRead>(input: R) -> Result<RawRecording> {
    let mut samples = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| undecodable(e, |reason| LabelError::InputMalformed {
            line: line_no,
            reason,
        }))?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(&line);
        if fields.len() != 2 {
            return Err(LabelError::InputMalformed {
                line: line_no,
                reason: format!("expected 2 fields, found {}", fields.len()),
            });
        }

        let value = fields[1].trim().parse::<f64>().map_err(|_| LabelError::InputMalformed {
            line: line_no,
            reason: format!("value '{}' is not a number", fields[1].trim()),
        })?;

        samples.push(Sample {
            timestamp: fields[0].trim().to_string(),
            value,
        });
    }

    Ok(RawRecording::new(samples))
}

/// Reads a persisted label table
///
/// Columns are located by header name, so files with a different column
/// order still load. Blank or `nan` artifact cells load as unset. Rows are
/// taken as they are: no check against the recording is made.
///
/// # Errors
///
/// * `LabelError::LabelFileMalformed` - missing header or column, a line
///   that is not valid UTF-8, wrong field count, or a cell that is not an
///   integer in the `i64` range
/// * `LabelError::Io` - the file cannot be read
pub fn read_label_table<P: AsRef<Path>>(path: P) -> Result<LabelTable> {
    let file = File::open(path.as_ref())?;
    parse_label_table(BufReader::new(file))
}

/// Parses a label table from any buffered source
pub fn parse_label_table<R: BufRead>(input: R) -> Result<LabelTable> {
    let mut lines = input.lines().enumerate();

    let header = match lines.next() {
        Some((_, line)) => line.map_err(|e| undecodable(e, |reason| malformed(1, &reason)))?,
        None => return Err(malformed(1, "missing header row")),
    };
    let header_fields: Vec<String> = split_fields(&header)
        .iter()
        .map(|f| f.trim().to_string())
        .collect();

    // 每个必需列在文件中的位置
    let mut positions = [0usize; COLUMNS.len()];
    for (slot, column) in positions.iter_mut().zip(COLUMNS.iter()) {
        *slot = header_fields
            .iter()
            .position(|f| f == column)
            .ok_or_else(|| malformed(1, &format!("missing column '{}'", column)))?;
    }
    let [start_pos, end_pos, activity_pos, artifact_pos, electrode_pos] = positions;

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        let line = line.map_err(|e| undecodable(e, |reason| malformed(line_no, &reason)))?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(&line);
        if fields.len() != header_fields.len() {
            return Err(malformed(
                line_no,
                &format!("expected {} fields, found {}", header_fields.len(), fields.len()),
            ));
        }

        let start = required_index(fields[start_pos], "start", line_no)?;
        let end = required_index(fields[end_pos], "end", line_no)?;
        let activity = required_int(fields[activity_pos], "activity", line_no)?;
        let electrode = required_int(fields[electrode_pos], "electrode", line_no)?;
        let artifact = if is_missing_cell(fields[artifact_pos]) {
            None
        } else {
            Some(required_int(fields[artifact_pos], "artifact", line_no)?)
        };

        rows.push(SegmentLabel {
            start,
            end,
            activity,
            artifact,
            electrode,
        });
    }

    Ok(LabelTable::from_rows(rows))
}

/// Turns a line that is not valid UTF-8 into a parse error, keeps other I/O errors
fn undecodable<F>(e: io::Error, parse_error: F) -> LabelError
where
    F: FnOnce(String) -> LabelError,
{
    match e.kind() {
        io::ErrorKind::InvalidData => parse_error(format!("line is not valid UTF-8 ({})", e)),
        _ => LabelError::Io(e),
    }
}

fn malformed(line: usize, reason: &str) -> LabelError {
    LabelError::LabelFileMalformed {
        line,
        reason: reason.to_string(),
    }
}

fn required_int(cell: &str, column: &str, line: usize) -> Result<i64> {
    match parse_int_cell(cell) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(malformed(line, &format!("column '{}' is empty", column))),
        Err(()) => Err(malformed(
            line,
            &format!("column '{}' has non-integer value '{}'", column, cell.trim()),
        )),
    }
}

fn required_index(cell: &str, column: &str, line: usize) -> Result<usize> {
    let value = required_int(cell, column, line)?;
    usize::try_from(value)
        .map_err(|_| malformed(line, &format!("column '{}' is negative ({})", column, value)))
}
