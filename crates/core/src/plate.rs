//! License plate normalization.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Letters, digits and single inner separators (space or dash).
const PLATE_PATTERN: &str = r"^[A-Z0-9]+(?:[ -][A-Z0-9]+)*$";

static PLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLATE_PATTERN).expect("valid regex"));

/// Maximum plate length after normalization.
pub const MAX_PLATE_LEN: usize = 15;

/// Trim, upper-case and collapse inner whitespace, then check the format.
pub fn normalize_plate(raw: &str) -> Result<String, CoreError> {
    let plate = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    if plate.is_empty() {
        return Err(CoreError::Validation(
            "plate_number must not be empty".to_string(),
        ));
    }
    if plate.len() > MAX_PLATE_LEN {
        return Err(CoreError::Validation(format!(
            "plate_number must be at most {MAX_PLATE_LEN} characters"
        )));
    }
    if !PLATE_RE.is_match(&plate) {
        return Err(CoreError::Validation(format!(
            "plate_number '{plate}' may only contain letters, digits, spaces and dashes"
        )));
    }
    Ok(plate)
}
