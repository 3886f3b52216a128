//! Wire protocol definitions
//!
//! Every frame exchanged between the manager and its clients is a fixed
//! envelope header followed by a message-kind-specific body. The header
//! carries the type id plus two version markers so that peers built from
//! different releases can still talk to each other.

pub mod error;
pub mod features;
pub mod messages;
pub mod messenger;
pub mod registry;
pub mod wire;
