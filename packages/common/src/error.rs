use thiserror::Error;

/// Error when parsing a string that is not a member of an enumerated field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field} '{invalid}'. Valid values: {}", .valid.join(", "))]
pub struct ParseEnumError {
    field: &'static str,
    invalid: String,
    valid: &'static [&'static str],
}

impl ParseEnumError {
    pub fn new(field: &'static str, invalid: &str, valid: &'static [&'static str]) -> Self {
        Self {
            field,
            invalid: invalid.to_string(),
            valid,
        }
    }

    /// Name of the field that failed to parse (e.g. `urgency_level`).
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The rejected input.
    pub fn invalid(&self) -> &str {
        &self.invalid
    }
}
