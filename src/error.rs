//! Error types and handling for the `Tripsmith` planning pipeline

use thiserror::Error;

/// Main error type for the `Tripsmith` pipeline
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A generative reply could not be read in the expected shape
    #[error("Malformed reply: {message}")]
    Format { message: String },

    /// An external collaborator failed
    #[error("{collaborator} failed: {message}")]
    Collaborator {
        collaborator: &'static str,
        message: String,
    },

    /// Failure that escaped every stage-level fallback
    #[error("Pipeline failure: {message}")]
    Pipeline { message: String },
}

impl PlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new reply format error
    pub fn format<S: Into<String>>(message: S) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create a new collaborator error
    pub fn collaborator<S: Into<String>>(collaborator: &'static str, message: S) -> Self {
        Self::Collaborator {
            collaborator,
            message: message.into(),
        }
    }

    /// Create a new pipeline error
    pub fn pipeline<S: Into<String>>(message: S) -> Self {
        Self::Pipeline {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            PlannerError::Validation { message } => message.clone(),
            PlannerError::Format { .. } => {
                "The planning service returned an unreadable answer.".to_string()
            }
            PlannerError::Collaborator { .. } => {
                "Unable to reach an external planning service.".to_string()
            }
            PlannerError::Pipeline { message } => {
                format!("Failed to generate travel plan: {message}")
            }
        }
    }
}
