use thiserror::Error;

/// Failure taxonomy shared by every booking operation.
///
/// The display text of the known variants is what clients see in the
/// `message` field of the response envelope.
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("{0}")]
    Validation(String),

    #[error("You cannot book a past time slot.")]
    PastSlot,

    #[error("The selected time slot is unavailable for this connector.")]
    SlotUnavailable,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Authentication(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl SlotError {
    pub fn internal(message: impl Into<String>) -> Self {
        SlotError::Internal(message.into().into())
    }

    /// True for failures that were not anticipated by the booking rules.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, SlotError::Database(_) | SlotError::Internal(_))
    }
}

pub type SlotResult<T> = Result<T, SlotError>;
