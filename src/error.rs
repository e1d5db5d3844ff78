use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Recording not found: {0}")]
    InputNotFound(String),

    #[error("Parse error in recording at line {line}: {reason}")]
    InputMalformed { line: usize, reason: String },

    #[error("Empty recording: {0}")]
    InputEmpty(String),

    #[error("Segment index {index} out of range (table has {rows} rows)")]
    IndexOutOfRange { index: usize, rows: usize },

    #[error("Electrode token '{0}' is not a number")]
    ElectrodeTokenUnparseable(String),

    #[error("Invalid artifact label: {0}")]
    InvalidArtifactLabel(i64),

    #[error("Segment of {segment_length} s at {sampling_rate} Hz contains no samples")]
    InvalidSegmentLength { sampling_rate: u32, segment_length: u32 },

    #[error("Malformed label file at line {line}: {reason}")]
    LabelFileMalformed { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl LabelError {
    /// Process exit status for a driver that aborts on this error
    ///
    /// Load-time failures each get their own status so scripts wrapping the
    /// labeling tool can tell them apart. Everything else maps to `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            LabelError::InputNotFound(_) => 2,
            LabelError::InputMalformed { .. } => 3,
            LabelError::InputEmpty(_) => 4,
            LabelError::ElectrodeTokenUnparseable(_) => 5,
            LabelError::LabelFileMalformed { .. } => 6,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, LabelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_for_load_errors() {
        let codes = [
            LabelError::InputNotFound("a".into()).exit_code(),
            LabelError::InputMalformed { line: 1, reason: "x".into() }.exit_code(),
            LabelError::InputEmpty("a".into()).exit_code(),
            LabelError::ElectrodeTokenUnparseable("x".into()).exit_code(),
            LabelError::LabelFileMalformed { line: 1, reason: "x".into() }.exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(LabelError::IndexOutOfRange { index: 3, rows: 1 }.exit_code(), 1);
    }
}
