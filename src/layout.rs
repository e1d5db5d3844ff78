use std::path::{Path, PathBuf};

use crate::utils::stem_before_first_dot;

/// Default data root, relative to the labeling tool's working directory
pub const DEFAULT_DATA_ROOT: &str = "../../data";

/// Directory convention for recordings and their label tables
///
/// ```text
/// <root>/<subject>/<recording_id>                        raw recording
/// <root>/<subject>/labels/<stem>_<segment_length>.csv    label table
/// ```
///
/// `subject` is the part of the identifier before the first `_` and `stem`
/// the part before the first `.`.
///
/// # Examples
///
/// ```rust
/// use ecglabel::DataLayout;
/// use std::path::Path;
///
/// let layout = DataLayout::new("data");
/// let paths = layout.resolve("s01_1_klud.csv", 10);
///
/// assert_eq!(paths.recording_file, Path::new("data/s01/s01_1_klud.csv"));
/// assert_eq!(paths.labels_dir, Path::new("data/s01/labels"));
/// assert_eq!(paths.label_file, Path::new("data/s01/labels/s01_1_klud_10.csv"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
}

/// Locations used by one labeling session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPaths {
    pub recording_file: PathBuf,
    pub labels_dir: PathBuf,
    pub label_file: PathBuf,
}

impl DataLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the three session locations for a recording
    ///
    /// Pure function of its inputs; the label file is unique per
    /// (recording, segment length) pair.
    pub fn resolve(&self, recording_id: &str, segment_length: u32) -> LabelPaths {
        let subject = recording_id.split('_').next().unwrap_or(recording_id);
        let subject_dir = self.root.join(subject);
        let labels_dir = subject_dir.join("labels");
        let label_file = labels_dir.join(format!(
            "{}_{}.csv",
            stem_before_first_dot(recording_id),
            segment_length
        ));

        LabelPaths {
            recording_file: subject_dir.join(recording_id),
            labels_dir,
            label_file,
        }
    }
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_deterministic() {
        let layout = DataLayout::new("/data");
        assert_eq!(
            layout.resolve("s02_2_beh.csv", 5),
            layout.resolve("s02_2_beh.csv", 5)
        );
    }

    #[test]
    fn test_label_file_unique_per_segment_length() {
        let layout = DataLayout::new("/data");
        let a = layout.resolve("s02_2_beh.csv", 5);
        let b = layout.resolve("s02_2_beh.csv", 10);

        assert_eq!(a.recording_file, b.recording_file);
        assert_eq!(a.labels_dir, b.labels_dir);
        assert_ne!(a.label_file, b.label_file);
        assert_eq!(b.label_file, Path::new("/data/s02/labels/s02_2_beh_10.csv"));
    }

    #[test]
    fn test_label_file_lives_beside_raw_data() {
        let paths = DataLayout::default().resolve("s03_1_drepy.csv", 30);
        assert_eq!(paths.labels_dir.parent(), paths.recording_file.parent());
        assert_eq!(paths.label_file.parent(), Some(paths.labels_dir.as_path()));
    }

    #[test]
    fn test_identifier_without_underscore() {
        let paths = DataLayout::new("d").resolve("single.csv", 1);
        assert_eq!(paths.recording_file, Path::new("d/single.csv/single.csv"));
        assert_eq!(paths.label_file, Path::new("d/single.csv/labels/single_1.csv"));
    }
}
