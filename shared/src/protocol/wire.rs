//! Envelope codec shared by every message kind.
//!
//! Uses bincode with an explicit config so manager and client always agree on
//! the byte layout (fixint, little-endian), independent of bincode defaults.
//!
//! # Layout
//!
//! | offset | width | field            |
//! |--------|-------|------------------|
//! | 0      | 2     | `type_id`        |
//! | 2      | 2     | `version`        |
//! | 4      | 2     | `compat_version` |
//! | 6      | ..    | payload body     |
//!
//! # Schema evolution
//!
//! Bodies are positional. A newer sender may append fields and bump
//! `version` while leaving `compat_version` alone; older receivers read the
//! prefix they know and ignore the rest, which is why the codec allows
//! trailing bytes. Bumping `compat_version` tells receivers below it that
//! they can no longer make sense of the body.

use super::error::MessageError;
use super::features::FeatureSet;
use super::messages::Message;
use bincode::Options;
use serde::{Deserialize, Serialize};

/// Size of the fixed envelope header in bytes.
pub const HEADER_LEN: usize = 6;

/// Single bincode config for the wire format: fixint so every integer has a
/// fixed width, trailing bytes allowed so appended fields never break old
/// readers.
pub(crate) fn wire_bincode() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .allow_trailing_bytes()
}

/// Fixed header in front of every payload body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvelopeHeader {
    pub type_id: u16,
    /// Version the body was written with.
    pub version: u16,
    /// Oldest version able to decode the body.
    pub compat_version: u16,
}

impl EnvelopeHeader {
    pub fn new(type_id: u16, version: u16, compat_version: u16) -> Self {
        Self {
            type_id,
            version,
            compat_version,
        }
    }

    /// Header describing `message` as this build writes it.
    pub fn for_message(message: &Message) -> Self {
        Self::new(
            message.type_id(),
            message.head_version(),
            message.compat_version(),
        )
    }

    /// Append the header bytes to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) -> Result<(), MessageError> {
        wire_bincode().serialize_into(buf, self)?;
        Ok(())
    }

    /// Parse a header off the front of `bytes`, returning it with the
    /// remaining payload body.
    pub fn decode(bytes: &[u8]) -> Result<(Self, &[u8]), MessageError> {
        if bytes.len() < HEADER_LEN {
            return Err(MessageError::malformed(format!(
                "need {} header bytes, got {}",
                HEADER_LEN,
                bytes.len()
            )));
        }
        let (head, body) = bytes.split_at(HEADER_LEN);
        let header: Self = wire_bincode()
            .deserialize(head)
            .map_err(|e| MessageError::malformed(e.to_string()))?;
        if header.version < header.compat_version {
            return Err(MessageError::malformed(format!(
                "version {} is older than compat_version {}",
                header.version, header.compat_version
            )));
        }
        Ok((header, body))
    }

    /// Gate a received header against the newest version this build
    /// understands for the message kind.
    ///
    /// A newer `version` is fine as long as `compat_version` still reaches
    /// back to `supported`; the unknown tail of the body is skipped.
    pub fn check_compat(
        &self,
        type_name: &'static str,
        supported: u16,
    ) -> Result<(), MessageError> {
        if self.compat_version > supported {
            return Err(MessageError::IncompatibleVersion {
                type_name,
                compat_version: self.compat_version,
                supported,
            });
        }
        Ok(())
    }
}

/// Serialize `message` behind its envelope header.
///
/// `features` describes the receiving peer and is passed through to the
/// payload encoder.
pub fn encode(message: &Message, features: FeatureSet) -> Result<Vec<u8>, MessageError> {
    let body = message.encode_payload(features)?;
    let mut buf = Vec::with_capacity(HEADER_LEN + body.len());
    EnvelopeHeader::for_message(message).encode_into(&mut buf)?;
    buf.extend_from_slice(&body);
    Ok(buf)
}

/// Split a frame into its header and payload body.
pub fn decode(bytes: &[u8]) -> Result<(EnvelopeHeader, &[u8]), MessageError> {
    EnvelopeHeader::decode(bytes)
}
