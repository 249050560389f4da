use serde::Serialize;
use thiserror::Error;

use crate::session::Screen;

#[derive(Debug, Error)]
pub enum LayerlensError {
    #[error("Unknown layer: {0} (expected 1-10)")]
    InvalidLayer(u8),

    #[error("Cannot move from {from} screen to {to} screen")]
    InvalidTransition { from: Screen, to: Screen },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Front ends receive errors as plain messages
impl Serialize for LayerlensError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LayerlensError>;
