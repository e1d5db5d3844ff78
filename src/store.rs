use std::fs;

use crate::classify::{classify_activity, classify_electrode, electrode_from_code};
use crate::error::{LabelError, Result};
use crate::layout::{DataLayout, LabelPaths};
use crate::reader::{read_label_table, read_recording};
use crate::table::{derive_table, LabelTable};
use crate::types::{Activity, ArtifactLabel, Electrode, RawRecording, Sample};
use crate::writer::write_label_table;

/// Label state of one (recording, segment length) labeling session
///
/// The store owns the raw recording, read once and never modified, and the
/// label table, which is written back to disk in full after every edit.
///
/// A label file that already exists is loaded as it is, so an operator's
/// earlier edits always survive reopening the session. Two stores pointed at
/// the same label file are not coordinated: the last write wins.
///
/// # Examples
///
/// ```rust
/// use ecglabel::{ArtifactLabel, DataLayout, LabelStore};
///
/// # let root = tempfile::tempdir()?;
/// # let layout = DataLayout::new(root.path());
/// # let paths = layout.resolve("s01_1_klud.csv", 2);
/// # ecglabel::doctest_utils::create_test_recording(&paths.recording_file, 1000)?;
/// // 100 Hz recording, 2 s segments
/// let mut store = LabelStore::open(&layout, "s01_1_klud.csv", 100, 2)?;
/// assert_eq!(store.len(), 5);
///
/// // Resting recordings start out labeled clean
/// assert_eq!(store.get_artifact(0)?, 1);
///
/// store.set_artifact(3, ArtifactLabel::Artifact)?;
/// assert_eq!(store.get_artifact(3)?, 2);
///
/// // Reopening keeps the edit
/// let mut reopened = LabelStore::open(&layout, "s01_1_klud.csv", 100, 2)?;
/// assert_eq!(reopened.get_artifact(3)?, 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct LabelStore {
    recording_id: String,
    sampling_rate: u32,
    segment_length: u32,
    paths: LabelPaths,
    recording: RawRecording,
    table: LabelTable,
}

impl LabelStore {
    /// Opens a labeling session using the standard directory layout
    ///
    /// # Errors
    ///
    /// * `LabelError::InputNotFound` - the recording does not exist
    /// * `LabelError::InputMalformed` - the recording cannot be parsed
    /// * `LabelError::InputEmpty` - the recording has no samples
    /// * `LabelError::LabelFileMalformed` - an existing label file cannot be parsed
    /// * `LabelError::ElectrodeTokenUnparseable` - a new table cannot be
    ///   derived because the identifier breaks the naming convention
    /// * `LabelError::InvalidSegmentLength` - a new table cannot be derived
    ///   from a zero-sized segment
    pub fn open(
        layout: &DataLayout,
        recording_id: &str,
        sampling_rate: u32,
        segment_length: u32,
    ) -> Result<Self> {
        let paths = layout.resolve(recording_id, segment_length);
        Self::open_with_paths(paths, recording_id, sampling_rate, segment_length)
    }

    /// Opens a labeling session at explicit locations
    ///
    /// Same as [`LabelStore::open`] for callers that keep their own
    /// directory convention.
    pub fn open_with_paths(
        paths: LabelPaths,
        recording_id: &str,
        sampling_rate: u32,
        segment_length: u32,
    ) -> Result<Self> {
        let recording = read_recording(&paths.recording_file)?;
        let table = load_or_create(&paths, &recording, recording_id, sampling_rate, segment_length)?;

        Ok(Self {
            recording_id: recording_id.to_string(),
            sampling_rate,
            segment_length,
            paths,
            recording,
            table,
        })
    }

    /// Artifact code of a segment, filling an unset cell on first read
    ///
    /// This is not a pure read. An unset cell (blank in the label file) is
    /// set to `0` through [`LabelStore::set_artifact`] and persisted before
    /// the value is returned, so after the first view every visited segment
    /// has a value on disk.
    ///
    /// # Errors
    ///
    /// * `LabelError::IndexOutOfRange` - `index >= len()`
    /// * `LabelError::Io` - persisting the filled-in default failed
    pub fn get_artifact(&mut self, index: usize) -> Result<i64> {
        if let Some(artifact) = self.table.get(index)?.artifact {
            return Ok(artifact);
        }

        log::warn!(
            "Segment {} of {} has no artifact label, defaulting to {}",
            index,
            self.recording_id,
            ArtifactLabel::Pending.code()
        );
        self.set_artifact(index, ArtifactLabel::Pending)?;
        Ok(ArtifactLabel::Pending.code())
    }

    /// Sets the artifact code of a segment and rewrites the label file
    ///
    /// If the rewrite fails the in-memory table is left as it was before the
    /// call.
    ///
    /// # Errors
    ///
    /// * `LabelError::IndexOutOfRange` - `index >= len()`
    /// * `LabelError::Io` - the label file could not be written
    pub fn set_artifact(&mut self, index: usize, label: ArtifactLabel) -> Result<()> {
        let previous = self.table.replace_artifact(index, Some(label.code()))?;

        if let Err(e) = write_label_table(&self.paths.label_file, &self.table) {
            self.table.replace_artifact(index, previous)?;
            return Err(e);
        }

        log::debug!(
            "Segment {} of {} labeled {:?}\n{}",
            index,
            self.recording_id,
            label,
            self.table
        );
        Ok(())
    }

    /// Samples covered by a segment
    ///
    /// Fails with `LabelError::IndexOutOfRange` for an invalid row, and
    /// also when a row loaded from an old file points past the end of the
    /// recording.
    pub fn segment_samples(&self, index: usize) -> Result<&[Sample]> {
        let row = self.table.get(index)?;
        self.recording
            .samples()
            .get(row.start..row.end)
            .ok_or(LabelError::IndexOutOfRange {
                index: row.end,
                rows: self.recording.len(),
            })
    }

    /// Activity of the session
    ///
    /// Taken from the label table so it agrees with the loaded rows; the
    /// identifier is only classified when the table has no rows.
    pub fn activity(&self) -> Activity {
        match self.table.rows().first() {
            Some(row) => Activity::from_code(row.activity),
            None => classify_activity(&self.recording_id),
        }
    }

    /// Electrode of the session
    ///
    /// Taken from the label table like [`LabelStore::activity`]. Only an
    /// empty table falls back to classifying the identifier, which can fail
    /// with `LabelError::ElectrodeTokenUnparseable`.
    pub fn electrode(&self) -> Result<Electrode> {
        match self.table.rows().first() {
            Some(row) => Ok(electrode_from_code(row.electrode)),
            None => classify_electrode(&self.recording_id),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &LabelTable {
        &self.table
    }

    pub fn recording(&self) -> &RawRecording {
        &self.recording
    }

    pub fn paths(&self) -> &LabelPaths {
        &self.paths
    }

    pub fn recording_id(&self) -> &str {
        &self.recording_id
    }

    pub fn sampling_rate(&self) -> u32 {
        self.sampling_rate
    }

    pub fn segment_length(&self) -> u32 {
        self.segment_length
    }
}

/// Loads the label file, or derives and persists a new table if none exists
///
/// The existence of the label file is the only signal that a session is
/// being resumed. Its content is trusted: rows are not compared with what
/// derivation would produce.
pub fn load_or_create(
    paths: &LabelPaths,
    recording: &RawRecording,
    recording_id: &str,
    sampling_rate: u32,
    segment_length: u32,
) -> Result<LabelTable> {
    if paths.label_file.exists() {
        let table = read_label_table(&paths.label_file)?;
        log::info!(
            "Resumed {} segments from {}",
            table.len(),
            paths.label_file.display()
        );
        return Ok(table);
    }

    fs::create_dir_all(&paths.labels_dir)?;
    let table = derive_table(recording, recording_id, sampling_rate, segment_length)?;
    write_label_table(&paths.label_file, &table)?;
    log::info!(
        "Created {} segments in {}",
        table.len(),
        paths.label_file.display()
    );

    Ok(table)
}
