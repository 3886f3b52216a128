//! Manager to client: how often to publish statistics.

use super::{type_ids, Payload};
use crate::protocol::error::MessageError;
use crate::protocol::features::FeatureSet;
use crate::protocol::wire::wire_bincode;
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body length at version 1: a single `u32`.
const BODY_LEN_V1: usize = 4;

/// Sent by the manager to a client, telling it at what interval (seconds) to
/// report statistics back.
///
/// The period is not range checked here. Zero is carried as-is and left for
/// the receiving reporter to interpret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MgrConfigure {
    stats_period: u32,
}

impl MgrConfigure {
    pub fn new(stats_period: u32) -> Self {
        Self { stats_period }
    }

    /// Requested reporting interval in seconds.
    pub fn stats_period(&self) -> u32 {
        self.stats_period
    }

    pub fn set_stats_period(&mut self, stats_period: u32) {
        self.stats_period = stats_period;
    }
}

impl Payload for MgrConfigure {
    const TYPE_ID: u16 = type_ids::MSG_MGR_CONFIGURE;
    const TYPE_NAME: &'static str = "mgrconfigure";
    const HEAD_VERSION: u16 = 1;
    const COMPAT_VERSION: u16 = 1;

    fn encode_payload(&self, _features: FeatureSet) -> Result<Vec<u8>, MessageError> {
        Ok(wire_bincode().serialize(self)?)
    }

    fn decode_payload(bytes: &[u8]) -> Result<Self, MessageError> {
        let truncated = || MessageError::TruncatedPayload {
            type_name: Self::TYPE_NAME,
            needed: BODY_LEN_V1,
            available: bytes.len(),
        };
        if bytes.len() < BODY_LEN_V1 {
            return Err(truncated());
        }
        wire_bincode().deserialize(bytes).map_err(|_| truncated())
    }
}

const _: () = assert!(MgrConfigure::HEAD_VERSION >= MgrConfigure::COMPAT_VERSION);

impl fmt::Display for MgrConfigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}()", Self::TYPE_NAME)
    }
}
