//! Builder API for creating form rules.

use crate::validation::rules::{CheckFn, FieldCheck, FormRules};
use crate::validation::violations::{FieldError, Violation};
use crate::validation::Field;
use stillwater::validation::Validation;

/// Builder for [`FormRules`].
pub struct RulesBuilder<T> {
    checks: Vec<CheckFn<T>>,
}

impl<T> RulesBuilder<T> {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a check returning a stillwater `Validation`.
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&T) -> FieldCheck + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Add a boolean predicate reported as `violation` on `field`.
    pub fn require_pred<F>(mut self, field: Field, violation: Violation, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let check = move |form: &T| {
            if predicate(form) {
                Validation::success(())
            } else {
                Validation::fail(FieldError::new(field, violation.clone()))
            }
        };
        self.checks.push(Box::new(check));
        self
    }

    pub fn build(self) -> FormRules<T> {
        FormRules {
            checks: self.checks,
        }
    }
}

impl<T> Default for RulesBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
