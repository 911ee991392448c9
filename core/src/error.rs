use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Unknown action key '{key}'")]
    UnknownAction { key: String },

    #[error("Invalid merchant state on '{merchant_id}': {detail}")]
    InvalidState { merchant_id: String, detail: String },

    #[error("Mutation '{mutation}' rejected: {detail}")]
    InvalidMutation {
        mutation: &'static str,
        detail: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DeskResult<T> = Result<T, DeskError>;
