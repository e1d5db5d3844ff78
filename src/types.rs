use crate::error::{LabelError, Result};

/// One row of a raw recording
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// 原始时间戳（按文件内容原样保存）
    pub timestamp: String,
    pub value: f64,
}

/// Raw signal recording, immutable once loaded
///
/// Always holds at least one sample; the reader rejects empty inputs.
#[derive(Debug, Clone)]
pub struct RawRecording {
    samples: Vec<Sample>,
}

impl RawRecording {
    pub(crate) fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Signal values in recording order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }
}

/// One row of the label table
///
/// `start..end` is a half-open range of sample indices into the recording.
/// `artifact` is `None` for cells left blank in a persisted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentLabel {
    pub start: usize,
    pub end: usize,
    pub activity: i64,
    pub artifact: Option<i64>,
    pub electrode: i64,
}

/// Activity performed during a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Unknown,
    Rest,
    ArmMovements,
    Walk,
    Run,
    Squats,
}

impl Activity {
    /// Activity for a stored code; unrecognized codes map to `Unknown`
    pub fn from_code(code: i64) -> Activity {
        match code {
            0 => Activity::Rest,
            1 => Activity::ArmMovements,
            2 => Activity::Walk,
            3 => Activity::Run,
            4 => Activity::Squats,
            _ => Activity::Unknown,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Activity::Unknown => -1,
            Activity::Rest => 0,
            Activity::ArmMovements => 1,
            Activity::Walk => 2,
            Activity::Run => 3,
            Activity::Squats => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Activity::Unknown => "Unknown",
            Activity::Rest => "Rest",
            Activity::ArmMovements => "Arm movements",
            Activity::Walk => "Walk 4 km/h",
            Activity::Run => "Run 8 km/h",
            Activity::Squats => "Squats",
        }
    }

    /// Artifact label every freshly derived segment starts with
    ///
    /// Resting recordings are presumed clean, everything else is presumed
    /// contaminated until the operator says otherwise.
    pub fn default_artifact(&self) -> ArtifactLabel {
        match self {
            Activity::Rest => ArtifactLabel::Clean,
            _ => ArtifactLabel::Artifact,
        }
    }
}

/// Electrode material family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectrodeKind {
    Unknown,
    AgAgCl,
    ChromeNickel,
    Textile,
}

impl ElectrodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ElectrodeKind::Unknown => "Unknown",
            ElectrodeKind::AgAgCl => "Ag/AgCl",
            ElectrodeKind::ChromeNickel => "Chrome Nickel",
            ElectrodeKind::Textile => "Textile",
        }
    }
}

/// Electrode classification of a recording
///
/// `code` is the numeric token from the recording identifier, or `-1`
/// when the kind is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Electrode {
    pub code: i64,
    pub kind: ElectrodeKind,
}

impl Electrode {
    pub const UNKNOWN: Electrode = Electrode {
        code: -1,
        kind: ElectrodeKind::Unknown,
    };

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Operator-editable artifact code of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactLabel {
    /// Materialized when an unset cell is first read
    Pending = 0,
    /// No artifact, default for resting recordings
    Clean = 1,
    /// Artifact present, default for every other activity
    Artifact = 2,
}

impl ArtifactLabel {
    pub fn code(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for ArtifactLabel {
    type Error = LabelError;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            0 => Ok(ArtifactLabel::Pending),
            1 => Ok(ArtifactLabel::Clean),
            2 => Ok(ArtifactLabel::Artifact),
            other => Err(LabelError::InvalidArtifactLabel(other)),
        }
    }
}

impl From<ArtifactLabel> for i64 {
    fn from(label: ArtifactLabel) -> i64 {
        label.code()
    }
}
