//! Form rules evaluated with stillwater's `Validation`.

use crate::validation::violations::{Field, FieldError, ValidationErrors, Violation};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of one field check.
pub type FieldCheck = Validation<(), NonEmptyVec<FieldError>>;

/// Type alias for check functions over a form of type `T`.
pub type CheckFn<T> = Box<dyn Fn(&T) -> FieldCheck + Send + Sync>;

/// Ordered set of checks for one form type.
///
/// Every check runs on every call to [`FormRules::enforce`]; failures are
/// accumulated so a form reports all of its problems at once.
pub struct FormRules<T> {
    pub(crate) checks: Vec<CheckFn<T>>,
}

impl<T> FormRules<T> {
    /// Run all checks against `form`.
    pub fn enforce(&self, form: &T) -> Result<(), ValidationErrors> {
        let checks: Vec<FieldCheck> = self.checks.iter().map(|check| check(form)).collect();

        match Validation::all_vec(checks).map(|_| ()) {
            Validation::Success(()) => Ok(()),
            Validation::Failure(errors) => {
                Err(ValidationErrors::new(errors.iter().cloned().collect()))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Field must contain something other than whitespace.
pub fn non_empty(field: Field, value: &str) -> FieldCheck {
    if value.trim().is_empty() {
        Validation::fail(FieldError::new(field, Violation::Empty))
    } else {
        Validation::success(())
    }
}

/// `value` must equal `other_value`.
///
/// Skipped while either side is empty so an empty confirmation reports
/// `Empty` rather than a mismatch.
pub fn matches(field: Field, value: &str, other: Field, other_value: &str) -> FieldCheck {
    if value.is_empty() || other_value.is_empty() || value == other_value {
        Validation::success(())
    } else {
        Validation::fail(FieldError::new(field, Violation::Mismatch { other }))
    }
}

/// Lift an already computed result into a check.
pub fn from_result<E>(
    field: Field,
    result: Result<(), E>,
    violation: impl Fn(E) -> Violation,
) -> FieldCheck {
    match result {
        Ok(()) => Validation::success(()),
        Err(err) => Validation::fail(FieldError::new(field, violation(err))),
    }
}
