//! Input validation helpers
//!
//! Centralized text length constants and validation functions. The store
//! does not enforce lengths itself, so handlers apply these before any
//! repository call.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Product names
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Supplier names and other short identifiers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// User-supplied SKUs
pub const MAX_SKU_LEN: usize = 64;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn required_text_rejects_blank_and_oversized() {
        assert!(validate_required_text("House Blend", "name", MAX_NAME_LEN).is_ok());

        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn optional_text_allows_none_and_checks_length() {
        assert!(validate_optional_text(&None, "supplier", MAX_SHORT_TEXT_LEN).is_ok());
        assert!(
            validate_optional_text(&Some("Roasters Inc".into()), "supplier", MAX_SHORT_TEXT_LEN)
                .is_ok()
        );

        let long = Some("x".repeat(MAX_SHORT_TEXT_LEN + 1));
        assert!(validate_optional_text(&long, "supplier", MAX_SHORT_TEXT_LEN).is_err());
    }
}
