//! Authentication: the session value, the identity service contract and
//! the controller that ties them to navigation.

pub mod controller;
pub mod error;
pub mod forms;
pub mod identity;
pub mod memory;
pub mod model;
pub mod password;

pub use controller::{ProfileView, SessionController};
pub use error::AuthError;
pub use forms::{SignInForm, SignUpForm};
pub use identity::{IdentityError, IdentityErrorKind, IdentityService, CURRENT_SESSION};
pub use memory::{CallCounts, IdentityCall, InMemoryIdentityService};
pub use model::{Account, Session, SessionStatus, SessionToken, User};
pub use password::{classify_strength, PasswordStrength};
