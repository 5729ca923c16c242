use chrono::NaiveDate;

use crate::error::{CampError, CampResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> CampResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(CampError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates a value that is written into a comma-separated record.
pub fn record_field(value: &str, field: &str) -> CampResult<()> {
    if value.contains([',', '\n', '\r']) {
        return Err(CampError::InvalidField {
            field: field.to_string(),
            reason: "commas and line breaks are not allowed".into(),
        });
    }
    Ok(())
}

/// Validates a slot split: the committee pool must fit inside the total.
pub fn slots(total: u32, committee: u32) -> CampResult<()> {
    if total == 0 {
        return Err(CampError::InvalidSlots {
            reason: "total slots must be positive".into(),
        });
    }
    if committee > total {
        return Err(CampError::InvalidSlots {
            reason: format!("{committee} committee slots exceed {total} total slots"),
        });
    }
    Ok(())
}

/// Validates that registration closes no later than the first camp day.
pub fn registration_close(close: NaiveDate, start: NaiveDate) -> CampResult<NaiveDate> {
    if close > start {
        Err(CampError::InvalidRegion {
            start: close.to_string(),
            end: start.to_string(),
        })
    } else {
        Ok(close)
    }
}

/// Trims a string, returning an empty string for whitespace-only input.
pub fn trimmed(value: &str) -> String {
    value.trim().to_string()
}
