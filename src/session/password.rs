//! Advisory password-strength label shown under the sign-up form.
//!
//! The label never blocks submission; the identity service has the final
//! say on what it accepts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Passwords shorter than this are always `Weak`.
pub const MIN_MEDIUM_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `password`; `None` means no label (empty input).
///
/// Length is counted in characters. The uppercase and digit checks look
/// for ASCII `A-Z` and `0-9` only.
///
/// ```rust
/// use smartmoney::session::{classify_strength, PasswordStrength};
///
/// assert_eq!(classify_strength(""), None);
/// assert_eq!(classify_strength("abc"), Some(PasswordStrength::Weak));
/// assert_eq!(classify_strength("abcdef"), Some(PasswordStrength::Medium));
/// assert_eq!(classify_strength("Abcde1"), Some(PasswordStrength::Strong));
/// ```
pub fn classify_strength(password: &str) -> Option<PasswordStrength> {
    if password.is_empty() {
        return None;
    }
    if password.chars().count() < MIN_MEDIUM_LEN {
        return Some(PasswordStrength::Weak);
    }
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if has_upper && has_digit {
        Some(PasswordStrength::Strong)
    } else {
        Some(PasswordStrength::Medium)
    }
}
