//! Account models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod account;
pub mod validation;

pub use account::{optional_text, Email, Name, NewUser, Profile, UserAccount, UserUpdate};
pub use validation::ValidationError;
