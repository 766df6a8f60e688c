use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidCharacter { field: &'static str, character: char },
    InvalidPhoneNumber { input: String, reason: String },
    InvalidUrl { input: String, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidCharacter { field, character } => {
                write!(f, "{field} must not contain {character:?}")
            }
            Self::InvalidPhoneNumber { input, reason } => {
                write!(f, "invalid phone number {input:?}: {reason}")
            }
            Self::InvalidUrl { input, reason } => write!(f, "invalid url {input:?}: {reason}"),
        }
    }
}

impl std::error::Error for ValidationError {}
