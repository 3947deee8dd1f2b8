//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a user, expense or budget is missing.
//! - [`ExistingKey`] thrown when registering an email twice.
//! - [`InvalidCredential`] thrown when a password does not match.
//! - [`InvalidAmount`], [`InvalidDate`] and [`InvalidInput`] thrown on
//!   malformed or out-of-range input.
//! - [`DivisionByZero`] thrown when a budget with a zero amount is evaluated.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`InvalidCredential`]: EngineError::InvalidCredential
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`DivisionByZero`]: EngineError::DivisionByZero
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0} not found")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid credentials")]
    InvalidCredential,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Division by zero: {0}")]
    DivisionByZero(String),
    #[error("Password hashing failed: {0}")]
    Password(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Returns `true` for errors caused by malformed or out-of-range input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::InvalidDate(_) | Self::InvalidInput(_)
        )
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidCredential, Self::InvalidCredential) => true,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::DivisionByZero(a), Self::DivisionByZero(b)) => a == b,
            (Self::Password(a), Self::Password(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
