//! Shared wire protocol for mgrlink
//!
//! This crate contains the versioned message envelope, the message kinds the
//! manager and client exchange, and the registry used to decode them.

pub mod protocol;
pub mod utils;

// Re-export commonly used types
pub use protocol::{
    error::MessageError,
    features::FeatureSet,
    messages::{Message, MgrConfigure, Payload},
    messenger::{deliver, Dispatcher, Frame, MemoryMessenger, Messenger},
    registry::MessageRegistry,
    wire::EnvelopeHeader,
};
