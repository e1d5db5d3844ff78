// Internal utilities for documentation tests
// This file contains helper functions to generate test recordings for doctests

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Result, DELIMITER};

/// Creates a synthetic ECG-like recording with `samples` rows
///
/// Missing parent directories are created. Timestamps are milliseconds at
/// a nominal 500 Hz.
pub fn create_test_recording<P: AsRef<Path>>(path: P, samples: usize) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    for i in 0..samples {
        let t = i as f64 / 500.0;
        // 1.2 Hz 基波加一个窄峰，近似心电波形
        let phase = (t * 1.2).fract();
        let spike = if phase < 0.02 { 1.0 } else { 0.0 };
        let value = 0.1 * (2.0 * std::f64::consts::PI * 1.2 * t).sin() + spike;
        writeln!(writer, "{:.3}{}{:.6}", t * 1000.0, DELIMITER, value)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a label file with the given raw lines below the standard header
pub fn create_test_label_file<P: AsRef<Path>>(path: P, rows: &[&str]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut content = crate::table::COLUMNS.join(&DELIMITER.to_string());
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}
