//! Peer feature bitmask.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability bits negotiated with a peer.
///
/// Encoders receive the target peer's set and may use it to decide whether
/// optional fields are emitted. The bits themselves are opaque to the
/// envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(u64);

impl FeatureSet {
    /// No optional features.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every feature bit set.
    pub const fn all() -> Self {
        Self(u64::MAX)
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// True when every bit of `other` is present in `self`.
    pub const fn contains(&self, other: FeatureSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: FeatureSet) -> Self {
        Self(self.0 | other.0)
    }
}

impl From<u64> for FeatureSet {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
