use std::fmt;

use crate::classify::{classify_activity, classify_electrode};
use crate::error::{LabelError, Result};
use crate::types::{RawRecording, SegmentLabel};

/// Column names of a persisted label table, in file order
pub const COLUMNS: [&str; 5] = ["start", "end", "activity", "artifact", "electrode"];

/// Ordered per-segment labels of one recording
///
/// Rows are addressed by position; the position is the "current segment"
/// index used by a labeling UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelTable {
    rows: Vec<SegmentLabel>,
}

impl LabelTable {
    pub fn from_rows(rows: Vec<SegmentLabel>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SegmentLabel] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row at `index`
    ///
    /// # Errors
    ///
    /// * `LabelError::IndexOutOfRange` - `index >= len()`
    pub fn get(&self, index: usize) -> Result<&SegmentLabel> {
        self.rows.get(index).ok_or(LabelError::IndexOutOfRange {
            index,
            rows: self.rows.len(),
        })
    }

    /// Replaces the artifact cell of a row and returns the previous value
    pub(crate) fn replace_artifact(&mut self, index: usize, artifact: Option<i64>) -> Result<Option<i64>> {
        let rows = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(LabelError::IndexOutOfRange { index, rows })?;
        Ok(std::mem::replace(&mut row.artifact, artifact))
    }
}

impl fmt::Display for LabelTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>6} {:>10} {:>10} {:>8} {:>8} {:>9}",
            "", "start", "end", "activity", "artifact", "electrode"
        )?;
        for (i, row) in self.rows.iter().enumerate() {
            let artifact = row
                .artifact
                .map(|a| a.to_string())
                .unwrap_or_else(|| "NaN".to_string());
            writeln!(
                f,
                "{:>6} {:>10} {:>10} {:>8} {:>8} {:>9}",
                i, row.start, row.end, row.activity, artifact, row.electrode
            )?;
        }
        Ok(())
    }
}

/// Number of samples in one segment
///
/// # Errors
///
/// * `LabelError::InvalidSegmentLength` - the product is zero or does not
///   fit in `usize`
pub fn segment_length_samples(sampling_rate: u32, segment_length: u32) -> Result<usize> {
    let samples = u64::from(sampling_rate) * u64::from(segment_length);
    match usize::try_from(samples) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(LabelError::InvalidSegmentLength {
            sampling_rate,
            segment_length,
        }),
    }
}

/// Derives a fresh label table for a recording
///
/// The recording is cut into `floor(len / S)` contiguous segments of
/// `S = segment_length * sampling_rate` samples; a trailing remainder
/// shorter than `S` is dropped. Activity and electrode are classified once
/// from `recording_id` and copied to every row. Every artifact cell starts
/// at the activity's default label.
///
/// # Errors
///
/// * `LabelError::InvalidSegmentLength` - zero sampling rate or segment length
/// * `LabelError::ElectrodeTokenUnparseable` - see [`classify_electrode`]
///
/// # Examples
///
/// ```rust
/// use ecglabel::derive_table;
///
/// # let dir = tempfile::tempdir()?;
/// # let path = dir.path().join("s01_1_chodza.csv");
/// # ecglabel::doctest_utils::create_test_recording(&path, 1050)?;
/// let recording = ecglabel::read_recording(&path)?;
///
/// // 100 Hz, 2 s segments -> 200 samples per row, 50 samples dropped
/// let table = derive_table(&recording, "s01_1_chodza.csv", 100, 2)?;
/// assert_eq!(table.len(), 5);
/// assert_eq!(table.rows()[4].end, 1000);
/// assert!(table.rows().iter().all(|r| r.activity == 2 && r.artifact == Some(2)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn derive_table(
    recording: &RawRecording,
    recording_id: &str,
    sampling_rate: u32,
    segment_length: u32,
) -> Result<LabelTable> {
    let seg_len_pts = segment_length_samples(sampling_rate, segment_length)?;
    let row_count = recording.len() / seg_len_pts;

    let activity = classify_activity(recording_id);
    let electrode = classify_electrode(recording_id)?;
    let artifact = activity.default_artifact().code();

    let rows = (0..row_count)
        .map(|i| {
            let start = i * seg_len_pts;
            SegmentLabel {
                start,
                end: start + seg_len_pts,
                activity: activity.code(),
                artifact: Some(artifact),
                electrode: electrode.code,
            }
        })
        .collect();

    log::debug!(
        "Derived {} segments of {} samples for {} ({}, {})",
        row_count,
        seg_len_pts,
        recording_id,
        activity.label(),
        electrode.label()
    );

    Ok(LabelTable::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sample;

    fn recording(len: usize) -> RawRecording {
        RawRecording::new(
            (0..len)
                .map(|i| Sample {
                    timestamp: i.to_string(),
                    value: 0.0,
                })
                .collect(),
        )
    }

    #[test]
    fn test_segmentation_completeness() {
        for (len, fs, seg) in [(10_000, 100, 10), (999, 10, 10), (1000, 10, 10), (7, 1, 3)] {
            let table = derive_table(&recording(len), "s_1_klud.csv", fs, seg).unwrap();
            let s = (fs * seg) as usize;
            assert_eq!(table.len(), len / s);
            for (i, row) in table.rows().iter().enumerate() {
                assert_eq!(row.start, i * s);
                assert_eq!(row.end, row.start + s);
            }
            assert!(len - table.len() * s < s);
        }
    }

    #[test]
    fn test_recording_shorter_than_segment() {
        let table = derive_table(&recording(99), "s_1_klud.csv", 10, 10).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_rest_scenario() {
        let table = derive_table(&recording(10_000), "s01_1_klud.csv", 100, 10).unwrap();
        assert_eq!(table.len(), 10);
        for (i, row) in table.rows().iter().enumerate() {
            assert_eq!(row.start, i * 1000);
            assert_eq!(row.end, (i + 1) * 1000);
            assert_eq!(row.activity, 0);
            assert_eq!(row.electrode, 1);
            assert_eq!(row.artifact, Some(1));
        }
    }

    #[test]
    fn test_walk_scenario() {
        let table = derive_table(&recording(10_000), "s01_1_chodza.csv", 100, 10).unwrap();
        assert!(table.rows().iter().all(|r| r.activity == 2 && r.artifact == Some(2)));
    }

    #[test]
    fn test_unknown_metadata_broadcast() {
        let table = derive_table(&recording(50), "s01_x_foo.csv", 1, 10).unwrap();
        assert_eq!(table.len(), 5);
        assert!(table
            .rows()
            .iter()
            .all(|r| r.activity == -1 && r.electrode == -1 && r.artifact == Some(2)));
    }

    #[test]
    fn test_zero_segment_length() {
        assert!(matches!(
            derive_table(&recording(10), "s_1_klud.csv", 0, 10),
            Err(LabelError::InvalidSegmentLength { .. })
        ));
        assert!(derive_table(&recording(10), "s_1_klud.csv", 10, 0).is_err());
    }

    #[test]
    fn test_bad_electrode_token_fails_derivation() {
        assert!(matches!(
            derive_table(&recording(10), "s_1b_klud.csv", 1, 1),
            Err(LabelError::ElectrodeTokenUnparseable(_))
        ));
    }

    #[test]
    fn test_replace_artifact_bounds() {
        let mut table = derive_table(&recording(30), "s_1_klud.csv", 1, 10).unwrap();
        assert_eq!(table.replace_artifact(1, Some(2)).unwrap(), Some(1));
        assert_eq!(table.get(1).unwrap().artifact, Some(2));
        assert!(matches!(
            table.replace_artifact(3, Some(0)),
            Err(LabelError::IndexOutOfRange { index: 3, rows: 3 })
        ));
    }
}
