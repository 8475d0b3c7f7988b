//! Sign-in and sign-up form values and their rules.

use crate::session::password::{classify_strength, PasswordStrength};
use crate::validation::{matches, non_empty, Field, FormRules, RulesBuilder, ValidationErrors};
use std::fmt;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn rules() -> FormRules<Self> {
        RulesBuilder::new()
            .require(|f: &Self| non_empty(Field::Email, &f.email))
            .require(|f: &Self| non_empty(Field::Password, &f.password))
            .build()
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Self::rules().enforce(self)
    }
}

impl fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn rules() -> FormRules<Self> {
        RulesBuilder::new()
            .require(|f: &Self| non_empty(Field::FullName, &f.full_name))
            .require(|f: &Self| non_empty(Field::Email, &f.email))
            .require(|f: &Self| non_empty(Field::Password, &f.password))
            .require(|f: &Self| non_empty(Field::ConfirmPassword, &f.confirm_password))
            .require(|f: &Self| {
                matches(
                    Field::ConfirmPassword,
                    &f.confirm_password,
                    Field::Password,
                    &f.password,
                )
            })
            .build()
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Self::rules().enforce(self)
    }

    /// Advisory label for the password field.
    pub fn strength(&self) -> Option<PasswordStrength> {
        classify_strength(&self.password)
    }
}

impl fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}
