//! Getting frames out of the simulation and user input back in.

mod interaction;
mod sender;
mod serializer;
mod snapshot;
#[cfg(feature = "websocket")]
mod websocket;

use std::io;
use thiserror::Error;

pub use self::interaction::InteractionEvent;
pub use self::sender::{FileSender, NullSender, Sender, StdioSender};
pub use self::serializer::{BinarySerializer, JsonSerializer, Serializer};
pub use self::snapshot::{FrameSnapshot, NodeState};
// Re-export WebSocketSender when websocket feature is enabled
#[cfg(feature = "websocket")]
pub use self::websocket::WebSocketSender;

/// Error types that can occur while serializing or sending frames.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("WebSocket error: {0}")]
    WebSocket(String),
}
