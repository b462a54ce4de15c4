// src/models/mod.rs

pub mod answer;
pub mod question;
pub mod quiz;
pub mod submission;

/// Rejects empty or whitespace-only text.
pub(crate) fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("cannot_be_blank"));
    }
    Ok(())
}
