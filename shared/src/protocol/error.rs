//! Errors raised while encoding, decoding or routing wire messages.

/// Errors returned by envelope and payload codecs, the registry and messengers.
///
/// Nothing in the protocol layer retries or recovers from these; they are
/// handed back to whoever invoked encode or decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum MessageError {
    #[error("malformed header: {reason}")]
    MalformedHeader { reason: String },

    #[error("unknown message type {type_id:#06x}")]
    UnknownMessageType { type_id: u16 },

    #[error("truncated {type_name} payload: need {needed} bytes, got {available}")]
    TruncatedPayload {
        type_name: &'static str,
        needed: usize,
        available: usize,
    },

    #[error(
        "incompatible {type_name} version: peer requires v{compat_version}, \
         this build understands up to v{supported}"
    )]
    IncompatibleVersion {
        type_name: &'static str,
        compat_version: u16,
        supported: u16,
    },

    #[error("message type {type_id:#06x} registered twice")]
    DuplicateMessageType { type_id: u16 },

    #[error("encode failed: {message}")]
    Encode { message: String },

    #[error("transport error: {message}")]
    Transport { message: String },
}

impl MessageError {
    /// Convenience constructor for `MalformedHeader`.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedHeader {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for `Transport`.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

impl From<bincode::Error> for MessageError {
    fn from(err: bincode::Error) -> Self {
        Self::Encode {
            message: err.to_string(),
        }
    }
}
