//! Field identifiers, violations and the accumulated error type.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FullName,
    Email,
    Password,
    ConfirmPassword,
    Title,
    Amount,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "full name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm password",
            Self::Title => "title",
            Self::Amount => "amount",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    Empty,
    Mismatch { other: Field },
    NotPositiveAmount,
    TooPrecise { max_digits: u32 },
}

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub violation: Violation,
}

impl FieldError {
    pub fn new(field: Field, violation: Violation) -> Self {
        Self { field, violation }
    }

    /// Message suitable for an inline hint or a blocking alert.
    pub fn message(&self) -> String {
        match &self.violation {
            Violation::Empty => "Please fill in all fields.".to_string(),
            Violation::Mismatch { .. } => "Passwords do not match.".to_string(),
            Violation::NotPositiveAmount => "Enter an amount greater than zero.".to_string(),
            Violation::TooPrecise { max_digits } => {
                format!("Use at most {max_digits} decimal places.")
            }
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Every violation found in one pass over a form, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    pub fn single(field: Field, violation: Violation) -> Self {
        Self(vec![FieldError::new(field, violation)])
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    /// Fields that failed, in rule order, without duplicates.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = Vec::with_capacity(self.0.len());
        for error in &self.0 {
            if !fields.contains(&error.field) {
                fields.push(error.field);
            }
        }
        fields
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some(error) => write!(f, "{error}"),
            None => f.write_str("Invalid input."),
        }
    }
}
