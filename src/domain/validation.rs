use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidBaseUrl { input: String, reason: String },
    InvalidTimeout { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl { input, reason } => {
                write!(f, "invalid base url {input:?}: {reason}")
            }
            Self::InvalidTimeout { input } => {
                write!(f, "invalid timeout: {input} (expected non-negative seconds)")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
