use crate::error::{LabelError, Result};
use crate::types::{Activity, Electrode, ElectrodeKind};

/// Marker tokens of the recording naming convention, in priority order
///
/// Markers are not mutually exclusive, so only the first match counts.
const ACTIVITY_RULES: &[(&str, Activity)] = &[
    ("klud", Activity::Rest),
    ("ruky", Activity::ArmMovements),
    ("chodza", Activity::Walk),
    ("beh", Activity::Run),
    ("drepy", Activity::Squats),
];

/// Digit looked up in the electrode token, in priority order
const ELECTRODE_RULES: &[(char, ElectrodeKind)] = &[
    ('1', ElectrodeKind::AgAgCl),
    ('2', ElectrodeKind::ChromeNickel),
    ('3', ElectrodeKind::Textile),
];

/// Determines the activity of a recording from its identifier
///
/// # Examples
///
/// ```rust
/// use ecglabel::{classify_activity, Activity};
///
/// assert_eq!(classify_activity("s01_1_klud.csv"), Activity::Rest);
/// assert_eq!(classify_activity("s01_1_chodza.csv").code(), 2);
/// assert_eq!(classify_activity("s01_1_other.csv"), Activity::Unknown);
/// ```
pub fn classify_activity(recording_id: &str) -> Activity {
    ACTIVITY_RULES
        .iter()
        .find(|(marker, _)| recording_id.contains(marker))
        .map(|&(_, activity)| activity)
        .unwrap_or(Activity::Unknown)
}

/// Determines the electrode type of a recording from its identifier
///
/// The electrode token is the second `_`-separated field. When it contains
/// one of the known digits the whole token is parsed as the electrode code.
/// An identifier without a second field is classified as unknown.
///
/// # Errors
///
/// * `LabelError::ElectrodeTokenUnparseable` - the token matched a rule but
///   is not an integer (e.g. `"1a"`)
///
/// # Examples
///
/// ```rust
/// use ecglabel::{classify_electrode, ElectrodeKind};
///
/// let electrode = classify_electrode("s01_3_beh.csv")?;
/// assert_eq!(electrode.code, 3);
/// assert_eq!(electrode.kind, ElectrodeKind::Textile);
///
/// assert!(classify_electrode("s01_1x_beh.csv").is_err());
/// # Ok::<(), ecglabel::LabelError>(())
/// ```
pub fn classify_electrode(recording_id: &str) -> Result<Electrode> {
    let token = match recording_id.split('_').nth(1) {
        Some(token) => token,
        None => return Ok(Electrode::UNKNOWN),
    };

    let kind = ELECTRODE_RULES
        .iter()
        .find(|(digit, _)| token.contains(*digit))
        .map(|&(_, kind)| kind);

    match kind {
        Some(kind) => {
            let code = token
                .trim()
                .parse::<i64>()
                .map_err(|_| LabelError::ElectrodeTokenUnparseable(token.to_string()))?;
            Ok(Electrode { code, kind })
        }
        None => Ok(Electrode::UNKNOWN),
    }
}

/// Electrode for a code stored in a label table
///
/// The kind follows the same digit rules as [`classify_electrode`] applied
/// to the code's decimal form. `-1` is always unknown.
pub fn electrode_from_code(code: i64) -> Electrode {
    if code == Electrode::UNKNOWN.code {
        return Electrode::UNKNOWN;
    }

    let token = code.to_string();
    let kind = ELECTRODE_RULES
        .iter()
        .find(|(digit, _)| token.contains(*digit))
        .map(|&(_, kind)| kind)
        .unwrap_or(ElectrodeKind::Unknown);
    Electrode { code, kind }
}
