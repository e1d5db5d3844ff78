//! # ecglabel
//!
//! Segment-level manual artifact labeling state for ECG recordings.
//!
//! A recording is cut into fixed-length, non-overlapping segments. Each
//! segment gets a row in a label table holding its sample bounds, the
//! recording's activity and electrode codes (derived from the recording
//! name) and an operator-editable artifact code. The table is stored next
//! to the raw data and rewritten after every edit, so a labeling session
//! can be interrupted and resumed at any time.
//!
//! ## Quick Start
//!
//! ```rust
//! use ecglabel::{ArtifactLabel, DataLayout, LabelStore, Result};
//!
//! fn main() -> Result<()> {
//!     # let root = tempfile::tempdir()?;
//!     # let layout = DataLayout::new(root.path());
//!     # let paths = layout.resolve("s07_3_beh.csv", 10);
//!     # ecglabel::doctest_utils::create_test_recording(&paths.recording_file, 12_500)?;
//!     // <root>/s07/s07_3_beh.csv, sampled at 500 Hz, labeled in 10 s segments
//!     let mut store = LabelStore::open(&layout, "s07_3_beh.csv", 500, 10)?;
//!
//!     println!("Activity: {}", store.activity().label());
//!     println!("Electrode: {}", store.electrode()?.label());
//!     println!("Segments: {}", store.len());
//!
//!     // Walk through the segments and mark the first one clean
//!     for i in 0..store.len() {
//!         let n = store.segment_samples(i)?.len();
//!         println!("segment {}: {} samples, artifact = {}", i, n, store.get_artifact(i)?);
//!     }
//!     store.set_artifact(0, ArtifactLabel::Clean)?;
//!     # assert_eq!(store.len(), 2);
//!     Ok(())
//! }
//! ```
//!
//! ## Label file format
//!
//! Semicolon-delimited text with a header row:
//!
//! ```text
//! start;end;activity;artifact;electrode
//! 0;5000;3;2;3
//! 5000;10000;3;1;3
//! ```
//!
//! `start..end` are half-open sample indices. Fresh tables default every
//! artifact to `1` for resting recordings and `2` otherwise. A blank
//! artifact cell is read as unset and becomes `0` the first time
//! [`LabelStore::get_artifact`] visits it.
//!
//! ## Recording naming convention
//!
//! `<subject>_<electrode>_<activity>.csv`, where the activity marker is one
//! of `klud` (rest), `ruky` (arm movements), `chodza` (walk), `beh` (run) or
//! `drepy` (squats), and the electrode token is `1` (Ag/AgCl), `2` (chrome
//! nickel) or `3` (textile).
//!
//! ```rust
//! use ecglabel::{classify_activity, classify_electrode, Activity, ElectrodeKind};
//!
//! assert_eq!(classify_activity("s01_2_drepy.csv"), Activity::Squats);
//! assert_eq!(classify_electrode("s01_2_drepy.csv")?.kind, ElectrodeKind::ChromeNickel);
//! # Ok::<(), ecglabel::LabelError>(())
//! ```

pub mod error;
pub mod types;
pub mod utils;
pub mod classify;
pub mod layout;
pub mod reader;
pub mod writer;
pub mod table;
pub mod store;

#[doc(hidden)]
pub mod doctest_utils; // For internal doctest support

// Re-export main types for convenience
pub use error::{LabelError, Result};
pub use types::{Activity, ArtifactLabel, Electrode, ElectrodeKind, RawRecording, Sample, SegmentLabel};
pub use classify::{classify_activity, classify_electrode, electrode_from_code};
pub use layout::{DataLayout, LabelPaths, DEFAULT_DATA_ROOT};
pub use reader::{read_label_table, read_recording};
pub use writer::write_label_table;
pub use table::{derive_table, LabelTable};
pub use store::LabelStore;

/// Field delimiter of both recording and label files
pub const DELIMITER: char = ';';

/// Library version
///
/// ```rust
/// let version = ecglabel::version();
/// assert!(version.contains('.'));
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
