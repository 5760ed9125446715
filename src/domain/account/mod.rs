//! Account domain: entity, validation rules, repository trait, errors

mod entity;
mod error;
mod repository;
mod validation;

pub use entity::{Account, AccountId, AccountStatus};
pub use error::{AuthError, RegisterError};
pub use repository::AccountRepository;
pub use validation::{
    validate_email, validate_password_strength, validate_username, ValidationError,
};
