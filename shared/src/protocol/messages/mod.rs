//! Message kinds carried inside the envelope.
//!
//! Each kind is a plain struct implementing [`Payload`]; [`Message`] is the
//! closed set of kinds this build knows how to decode. Adding a kind means
//! adding a struct, a `Message` variant and a registry entry.

mod mgr_configure;

pub use mgr_configure::MgrConfigure;

use super::error::MessageError;
use super::features::FeatureSet;
use serde::Serialize;
use std::fmt;

/// Type ids of the manager message block (0x0700..0x0800).
pub mod type_ids {
    pub const MSG_MGR_CONFIGURE: u16 = 0x0701;
}

/// A typed message body with fixed identity and version markers.
///
/// Implementors must keep `HEAD_VERSION >= COMPAT_VERSION`; each payload
/// module asserts this at compile time.
pub trait Payload: Default + fmt::Display + Into<Message> + Sized {
    const TYPE_ID: u16;
    const TYPE_NAME: &'static str;
    /// Version this build writes and the newest it can read.
    const HEAD_VERSION: u16;
    /// Oldest version a reader must understand to decode what we write.
    const COMPAT_VERSION: u16;

    fn encode_payload(&self, features: FeatureSet) -> Result<Vec<u8>, MessageError>;

    /// Decode a body. Bytes past the known fields are ignored.
    fn decode_payload(bytes: &[u8]) -> Result<Self, MessageError>;
}

/// Every message kind this build understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    MgrConfigure(MgrConfigure),
}

impl Message {
    pub fn type_id(&self) -> u16 {
        match self {
            Message::MgrConfigure(_) => MgrConfigure::TYPE_ID,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Message::MgrConfigure(_) => MgrConfigure::TYPE_NAME,
        }
    }

    pub fn head_version(&self) -> u16 {
        match self {
            Message::MgrConfigure(_) => MgrConfigure::HEAD_VERSION,
        }
    }

    pub fn compat_version(&self) -> u16 {
        match self {
            Message::MgrConfigure(_) => MgrConfigure::COMPAT_VERSION,
        }
    }

    pub fn encode_payload(&self, features: FeatureSet) -> Result<Vec<u8>, MessageError> {
        match self {
            Message::MgrConfigure(m) => m.encode_payload(features),
        }
    }

    /// Decode `bytes` into this message in place.
    ///
    /// The message is only overwritten once the whole body decoded, so a
    /// failed decode leaves it untouched.
    pub fn decode_payload(&mut self, bytes: &[u8]) -> Result<(), MessageError> {
        match self {
            Message::MgrConfigure(m) => *m = MgrConfigure::decode_payload(bytes)?,
        }
        Ok(())
    }

    /// Short human-readable form for logs.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::MgrConfigure(m) => fmt::Display::fmt(m, f),
        }
    }
}

impl From<MgrConfigure> for Message {
    fn from(m: MgrConfigure) -> Self {
        Message::MgrConfigure(m)
    }
}
