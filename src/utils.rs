use crate::DELIMITER;

/// 按分隔符拆分一行，去掉行尾的回车
pub fn split_fields(line: &str) -> Vec<&str> {
    line.trim_end_matches('\r').split(DELIMITER).collect()
}

/// Checks whether a cell represents a missing value
///
/// Blank cells and the `nan` spellings written by dataframe tooling all
/// count as missing.
pub fn is_missing_cell(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case("nan")
}

/// Parses an integer cell of a label table
///
/// Accepts plain integers and integral floats such as `2.0`, which older
/// tooling writes for columns that once held missing values. Returns
/// `Ok(None)` for missing cells and `Err(())` for anything else.
pub(crate) fn parse_int_cell(s: &str) -> Result<Option<i64>, ()> {
    if is_missing_cell(s) {
        return Ok(None);
    }

    let s = s.trim();
    if let Ok(value) = s.parse::<i64>() {
        return Ok(Some(value));
    }

    // 整数值的浮点表示，如 "1.0"
    match s.parse::<f64>() {
        Ok(value)
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
        {
            Ok(Some(value as i64))
        }
        _ => Err(()),
    }
}

/// File stem up to the first `.`
pub fn stem_before_first_dot(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
