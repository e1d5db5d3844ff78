use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{LabelError, Result};
use crate::table::{LabelTable, COLUMNS};
use crate::DELIMITER;

/// Writes a label table to disk, replacing any previous content
///
/// The header row is always `start;end;activity;artifact;electrode`. Unset
/// artifact cells are written blank. The parent directory must exist.
///
/// The table is written to a temporary file in the same directory, which
/// then replaces `path` in one rename. A failed write leaves the previous
/// file untouched.
///
/// # Examples
///
/// ```rust
/// use ecglabel::{write_label_table, read_label_table, LabelTable, SegmentLabel};
///
/// # let dir = tempfile::tempdir()?;
/// let path = dir.path().join("labels.csv");
/// let table = LabelTable::from_rows(vec![SegmentLabel {
///     start: 0,
///     end: 500,
///     activity: 0,
///     artifact: None,
///     electrode: 1,
/// }]);
///
/// write_label_table(&path, &table)?;
/// assert_eq!(std::fs::read_to_string(&path)?, "start;end;activity;artifact;electrode\n0;500;0;;1\n");
/// assert_eq!(read_label_table(&path)?, table);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_label_table<P: AsRef<Path>>(path: P, table: &LabelTable) -> Result<()> {
    replace_file_with(path.as_ref(), |writer| format_label_table(writer, table))
}

/// Replaces `path` with whatever `fill` writes, or leaves it as it was
fn replace_file_with<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<()>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;

    // 保留已有文件的权限
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        fill(&mut writer)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;

    // 临时文件在出错时随 drop 删除
    tmp.persist(path).map_err(|e| LabelError::Io(e.error))?;
    Ok(())
}

/// Serializes a label table to any writer
pub fn format_label_table<W: Write>(out: &mut W, table: &LabelTable) -> Result<()> {
    let delimiter = DELIMITER.to_string();
    writeln!(out, "{}", COLUMNS.join(&delimiter))?;

    for row in table.rows() {
        let artifact = row.artifact.map(|a| a.to_string()).unwrap_or_default();
        writeln!(
            out,
            "{start}{d}{end}{d}{activity}{d}{artifact}{d}{electrode}",
            start = row.start,
            end = row.end,
            activity = row.activity,
            artifact = artifact,
            electrode = row.electrode,
            d = DELIMITER,
        )?;
    }

    Ok(())
}
