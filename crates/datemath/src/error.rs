//! Error types for datemath operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DateMathError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),
}

pub type Result<T> = std::result::Result<T, DateMathError>;
