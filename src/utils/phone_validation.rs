//! Phone number validation for inbound trunk provisioning.
//!
//! The inbound number is the key used to detect conflicting trunks, so it is
//! validated up front: an E.164-like string, meaning a leading `+` followed by
//! digits only. Surrounding whitespace is trimmed.

/// Validates the inbound phone number before any remote call is made.
///
/// # Validation Rules
///
/// - Must not be empty (after trimming whitespace)
/// - Must start with `+`
/// - Everything after the `+` must be digits (`0-9`), at least one
///
/// # Returns
///
/// - `Ok(String)` - The trimmed, normalized number
/// - `Err(String)` - A human-readable error message
pub fn validate_inbound_number(phone: &str) -> Result<String, String> {
    let trimmed = phone.trim();

    if trimmed.is_empty() {
        return Err("Inbound number cannot be empty".to_string());
    }

    let digits = trimmed
        .strip_prefix('+')
        .ok_or_else(|| "Inbound number must start with '+' (E.164 format)".to_string())?;

    if digits.is_empty() {
        return Err("Inbound number must contain at least one digit".to_string());
    }

    for (i, ch) in digits.chars().enumerate() {
        if !ch.is_ascii_digit() {
            return Err(format!(
                "Invalid character '{}' at position {} - only digits are allowed after '+'",
                ch,
                i + 1
            ));
        }
    }

    Ok(trimmed.to_string())
}
