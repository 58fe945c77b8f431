//! Setting value validation.

use super::defaults::{LINE_SPACING, WRAP_CHARS};

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        WRAP_CHARS => validate_int_range(value, 1, 1000)?,
        LINE_SPACING => {
            let v: f32 = value.trim().parse().map_err(|_| "must be a float")?;
            if !(0.0..=2.0).contains(&v) {
                return Err("must be between 0.0 and 2.0".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.trim().parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
