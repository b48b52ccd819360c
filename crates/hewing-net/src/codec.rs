//! Message encoding and decoding with framing.
//!
//! Frame format: [length: u32][version: u16][message_type: u8][payload: bytes],
//! where the length counts everything after itself.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::NetError;
use crate::protocol::{StationEvent, StationRequest, PROTOCOL_VERSION};

/// Bytes before the payload: length, version and tag.
pub const FRAME_HEADER_LEN: usize = 4 + 2 + 1;

fn frame<T: Serialize>(msg: &T, tag: u8) -> Result<Vec<u8>, NetError> {
    let payload = postcard::to_allocvec(msg).map_err(|e| NetError::Serialize(e.to_string()))?;

    let mut frame = Vec::with_capacity(FRAME_HEADER_LEN + payload.len());
    let length = (FRAME_HEADER_LEN - 4 + payload.len()) as u32;
    frame.extend_from_slice(&length.to_le_bytes());
    frame.extend_from_slice(&PROTOCOL_VERSION.to_le_bytes());
    frame.push(tag);
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Split a frame into its tag and decoded payload. Frames from another
/// protocol version are rejected before the payload is touched.
fn unframe<T: DeserializeOwned>(data: &[u8]) -> Result<(u8, T), NetError> {
    if data.len() < FRAME_HEADER_LEN {
        return Err(NetError::FrameTooShort(data.len()));
    }

    let length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let end = 4usize.saturating_add(length);
    if length < FRAME_HEADER_LEN - 4 || data.len() < end {
        return Err(NetError::IncompleteFrame {
            expected: end.max(FRAME_HEADER_LEN),
            actual: data.len(),
        });
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version != PROTOCOL_VERSION {
        return Err(NetError::VersionMismatch {
            got: version,
            expected: PROTOCOL_VERSION,
        });
    }

    let tag = data[6];
    let msg = postcard::from_bytes(&data[FRAME_HEADER_LEN..end])
        .map_err(|e| NetError::Deserialize(e.to_string()))?;
    Ok((tag, msg))
}

fn request_tag(msg: &StationRequest) -> u8 {
    match msg {
        StationRequest::ToolAction(_) => 0,
        StationRequest::RecipeSelect(_) => 1,
        StationRequest::CancelSelect { .. } => 2,
    }
}

fn event_tag(msg: &StationEvent) -> u8 {
    match msg {
        StationEvent::OpenRecipeDialog { .. } => 0,
        StationEvent::Sync(_) => 1,
        StationEvent::ItemReturned { .. } => 2,
    }
}

pub fn encode_request(msg: &StationRequest) -> Result<Vec<u8>, NetError> {
    frame(msg, request_tag(msg))
}

/// Decode and validate a request frame.
pub fn decode_request(data: &[u8]) -> Result<StationRequest, NetError> {
    let (tag, msg): (u8, StationRequest) = unframe(data)?;
    if tag != request_tag(&msg) {
        return Err(NetError::TagMismatch {
            tag,
            kind: "request",
        });
    }
    msg.validate()?;
    Ok(msg)
}

pub fn encode_event(msg: &StationEvent) -> Result<Vec<u8>, NetError> {
    frame(msg, event_tag(msg))
}

/// Decode and validate an event frame.
pub fn decode_event(data: &[u8]) -> Result<StationEvent, NetError> {
    let (tag, msg): (u8, StationEvent) = unframe(data)?;
    if tag != event_tag(&msg) {
        return Err(NetError::TagMismatch { tag, kind: "event" });
    }
    if let StationEvent::Sync(sync) = &msg {
        sync.validate()?;
    }
    Ok(msg)
}
