use crate::snapshot::FrameSnapshot;
use crate::TransportError;

/// Turns a frame into a text payload for a [`Sender`](crate::Sender).
pub trait Serializer: Send + Sync {
    fn serialize(&self, snapshot: &FrameSnapshot) -> Result<String, TransportError>;
}

/// One JSON object per frame.
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, snapshot: &FrameSnapshot) -> Result<String, TransportError> {
        Ok(serde_json::to_string(snapshot)?)
    }
}

/// bincode-encoded frame, base64-wrapped so it can travel as a text message.
pub struct BinarySerializer;

impl BinarySerializer {
    pub fn decode(payload: &str) -> Result<FrameSnapshot, TransportError> {
        let bytes = base64::decode(payload)?;
        Ok(bincode::deserialize(&bytes)?)
    }
}

impl Serializer for BinarySerializer {
    fn serialize(&self, snapshot: &FrameSnapshot) -> Result<String, TransportError> {
        let bytes = bincode::serialize(snapshot)?;
        Ok(base64::encode(bytes))
    }
}
