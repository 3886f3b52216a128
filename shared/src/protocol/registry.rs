//! Type id to message-kind table used on the receiving side.

use super::error::MessageError;
use super::messages::{Message, MgrConfigure, Payload};
use super::wire::EnvelopeHeader;
use std::collections::HashMap;
use tracing::debug;

/// What the registry knows about one message kind.
#[derive(Debug, Clone, Copy)]
struct Entry {
    type_name: &'static str,
    /// Newest version of the kind this build can read.
    head_version: u16,
    /// Builds an empty message ready to be decoded into.
    factory: fn() -> Message,
}

fn empty_message<P: Payload>() -> Message {
    P::default().into()
}

/// Explicit type id to constructor mapping.
///
/// Built once at startup and handed to the transport by reference; there is no
/// process-global table.
#[derive(Debug, Clone, Default)]
pub struct MessageRegistry {
    entries: HashMap<u16, Entry>,
}

impl MessageRegistry {
    /// An empty registry. Most callers want [`MessageRegistry::default_set`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every message kind this build knows.
    pub fn default_set() -> Self {
        let mut registry = Self::new();
        registry
            .register::<MgrConfigure>()
            .expect("built-in message type ids are distinct");
        registry
    }

    /// Register payload kind `P` under its type id.
    pub fn register<P: Payload>(&mut self) -> Result<&mut Self, MessageError> {
        if self.entries.contains_key(&P::TYPE_ID) {
            return Err(MessageError::DuplicateMessageType {
                type_id: P::TYPE_ID,
            });
        }
        self.entries.insert(
            P::TYPE_ID,
            Entry {
                type_name: P::TYPE_NAME,
                head_version: P::HEAD_VERSION,
                factory: empty_message::<P>,
            },
        );
        Ok(self)
    }

    pub fn is_registered(&self, type_id: u16) -> bool {
        self.entries.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Construct an empty message of the kind registered under `type_id`.
    pub fn construct(&self, type_id: u16) -> Result<Message, MessageError> {
        self.entries
            .get(&type_id)
            .map(|entry| (entry.factory)())
            .ok_or(MessageError::UnknownMessageType { type_id })
    }

    /// Decode a complete frame: header, lookup, version gate, body.
    ///
    /// Either the returned message is fully populated or an error comes back;
    /// the body is never looked at for unknown or incompatible kinds.
    pub fn decode_frame(&self, bytes: &[u8]) -> Result<(EnvelopeHeader, Message), MessageError> {
        let (header, body) = EnvelopeHeader::decode(bytes)?;
        let entry = self
            .entries
            .get(&header.type_id)
            .ok_or(MessageError::UnknownMessageType {
                type_id: header.type_id,
            })?;
        header.check_compat(entry.type_name, entry.head_version)?;

        let mut message = (entry.factory)();
        message.decode_payload(body)?;
        debug!(
            "decoded {} v{} (compat v{}, {} body bytes)",
            message, header.version, header.compat_version, body.len()
        );
        Ok((header, message))
    }

    /// Decode a frame the transport delivered tagged with `type_id`.
    ///
    /// The tag must agree with the type id inside the header.
    pub fn decode_tagged(
        &self,
        type_id: u16,
        bytes: &[u8],
    ) -> Result<(EnvelopeHeader, Message), MessageError> {
        let (header, _) = EnvelopeHeader::decode(bytes)?;
        if header.type_id != type_id {
            return Err(MessageError::malformed(format!(
                "transport tagged frame {:#06x} but header says {:#06x}",
                type_id, header.type_id
            )));
        }
        self.decode_frame(bytes)
    }
}
