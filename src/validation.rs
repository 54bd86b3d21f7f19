//! Field-level validation
//!
//! Request bodies are checked against explicit rules before anything touches
//! the store. Every violated field is collected so a single 400 response can
//! list all of them.

use serde::Serialize;
use std::fmt;

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Required,
    MinLength,
    Unique,
    Malformed,
}

/// A single violated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::Required,
            message: format!("`{field}` is required"),
        }
    }

    pub fn min_length(field: &str, min: usize) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::MinLength,
            message: format!("`{field}` must be at least {min} characters long"),
        }
    }

    pub fn unique(field: &str) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::Unique,
            message: format!("expected `{field}` to be unique"),
        }
    }

    pub fn malformed(field: &str, detail: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::Malformed,
            message: detail.into(),
        }
    }
}

/// Accumulates field errors for one request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Require a present, non-empty string.
    pub fn require_non_empty(&mut self, field: &str, value: Option<&str>) {
        match value {
            Some(v) if !v.is_empty() => {}
            _ => self.push(FieldError::required(field)),
        }
    }

    /// Require a present string of at least `min` characters.
    pub fn require_min_length(&mut self, field: &str, value: Option<&str>, min: usize) {
        match value {
            None => self.push(FieldError::required(field)),
            Some(v) if v.is_empty() => self.push(FieldError::required(field)),
            Some(v) if v.chars().count() < min => self.push(FieldError::min_length(field, min)),
            Some(_) => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    #[cfg(test)]
    pub fn has_kind(&self, kind: FieldErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn finish(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join(", "))
    }
}
