use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulatorError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Cannot read {input:?} as a number: {reason}")]
    ParseNumber { input: String, reason: String },
}

impl SimulatorError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        SimulatorError::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
